// tests/cache_roundtrip.rs
mod common;

use std::sync::{Arc, Mutex};

use chrono::TimeDelta;
use common::*;
use score_graph::{
    core::net::Response,
    fetch::Fetcher,
    progress::NullProgress,
    scrape::Collector,
    store::VoteCache,
};

fn online(o: &score_graph::config::options::ScrapeOptions) -> MockTransport {
    let id = item("v17");
    let votes = daily_votes(day(2024, 1, 1), &[8.0, 6.0, 10.0]);
    let newest: Vec<_> = votes.iter().rev().cloned().collect();
    MockTransport::default()
        .route(o.item_url(&id), item_page("Ever17", 3))
        .route(o.votes_url(&id, 1), vote_page(&newest))
}

#[test]
fn second_collect_within_a_day_is_offline_and_identical() {
    let dir = tempfile::tempdir().unwrap();
    let mut o = opts();
    o.cache_path = dir.path().join("votes.json");
    let id = item("v17");
    let t0 = day(2024, 2, 1);

    let cache = Arc::new(Mutex::new(VoteCache::open(&o.cache_path)));
    let mut first = Collector::new(
        Fetcher::with_sleep(online(&o), RecordingSleep::default()),
        cache.clone(),
        o.clone(),
    );
    let fresh = first.collect(&id, t0, &mut NullProgress).unwrap();
    assert!(!fresh.from_cache);
    assert_eq!(fresh.summary.as_ref().map(|s| s.title.as_str()), Some("Ever17"));
    assert_eq!(fresh.votes.len(), 3);
    assert!(o.cache_path.exists());

    // same process, shared cache
    let mut offline = Collector::new(
        Fetcher::with_sleep(OfflineTransport, RecordingSleep::default()),
        cache,
        o.clone(),
    );
    let again = offline.collect(&id, t0 + TimeDelta::hours(23), &mut NullProgress).unwrap();
    assert!(again.from_cache);
    assert_eq!(again.votes, fresh.votes);

    // new process, cache read back from disk
    let reloaded = Arc::new(Mutex::new(VoteCache::open(&o.cache_path)));
    let mut cold = Collector::new(
        Fetcher::with_sleep(OfflineTransport, RecordingSleep::default()),
        reloaded,
        o,
    );
    let from_disk = cold.collect(&id, t0 + TimeDelta::hours(1), &mut NullProgress).unwrap();
    assert_eq!(from_disk.votes, fresh.votes);
}

#[test]
fn stale_entry_is_collected_again() {
    let o = opts();
    let id = item("v17");
    let t0 = day(2024, 2, 1);

    let cache = Arc::new(Mutex::new(VoteCache::in_memory()));
    lock_put(&cache, &id, t0, vec![vote(day(2023, 1, 1), 1.0, "old")]);

    let mut c = Collector::new(Fetcher::with_sleep(online(&o), RecordingSleep::default()), cache.clone(), o);
    let got = c.collect(&id, t0 + TimeDelta::days(1), &mut NullProgress).unwrap();

    assert!(!got.from_cache);
    assert_eq!(got.votes.len(), 3);
    let stored = cache.lock().unwrap().get(&id).cloned().unwrap();
    assert_eq!(stored.updated_at, t0 + TimeDelta::days(1));
    assert_eq!(stored.votes, got.votes);
}

#[test]
fn refresh_skips_a_fresh_entry() {
    let mut o = opts();
    o.refresh = true;
    let id = item("v17");
    let t0 = day(2024, 2, 1);

    let cache = Arc::new(Mutex::new(VoteCache::in_memory()));
    lock_put(&cache, &id, t0, vec![]);

    let mut c = Collector::new(Fetcher::with_sleep(online(&o), RecordingSleep::default()), cache, o);
    let got = c.collect(&id, t0, &mut NullProgress).unwrap();
    assert!(!got.from_cache);
    assert_eq!(got.votes.len(), 3);
}

#[test]
fn failed_run_leaves_the_cache_alone() {
    let o = opts();
    let id = item("v17");
    let t = MockTransport::default()
        .route(o.item_url(&id), item_page("Ever17", 120))
        .route(o.votes_url(&id, 1), vote_page(&daily_votes(day(2024, 1, 1), &[7.0])))
        .route(o.votes_url(&id, 2), Response::ok("<p>not a vote page</p>"));

    let cache = Arc::new(Mutex::new(VoteCache::in_memory()));
    let mut c = Collector::new(Fetcher::with_sleep(t, RecordingSleep::default()), cache.clone(), o);

    assert!(c.collect(&id, day(2024, 2, 1), &mut NullProgress).is_err());
    assert!(cache.lock().unwrap().is_empty());
}

#[test]
fn item_without_vote_graph_has_no_votes() {
    let o = opts();
    let id = item("v99");
    let t = MockTransport::default().route(
        o.item_url(&id),
        Response::ok(r#"<div id="maincontent"><div class="mainbox"><h1>Unreleased</h1></div></div>"#),
    );
    let cache = Arc::new(Mutex::new(VoteCache::in_memory()));
    let mut c = Collector::new(Fetcher::with_sleep(t, RecordingSleep::default()), cache, o);

    let got = c.collect(&id, day(2024, 2, 1), &mut NullProgress).unwrap();
    assert!(got.votes.is_empty());
    assert_eq!(c.fetcher().transport().requests.len(), 1);
}

fn lock_put(
    cache: &Arc<Mutex<VoteCache>>,
    id: &score_graph::data::ItemId,
    at: chrono::DateTime<chrono::Utc>,
    votes: Vec<score_graph::data::Vote>,
) {
    cache.lock().unwrap().put(id.clone(), at, votes);
}
