// src/scrape.rs
//
// Collection run for one item: cache lookup, item page, then the vote
// listing page by page. Strictly sequential; the fetcher's pacing only means
// something if requests do not overlap.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::{
    config::options::ScrapeOptions,
    core::net::{Sleep, ThreadSleep, Transport},
    data::{ItemId, ItemSummary, Vote},
    error::{Error, Result},
    fetch::Fetcher,
    progress::Progress,
    specs::{item::parse_item_page, votes::{parse_vote_page, VotePage}},
    store::VoteCache,
};

/// Pages the advertised vote count implies. Only an upper bound: the
/// listing's own end marker wins.
pub fn page_count(total: u32, page_size: u32) -> u32 {
    if page_size == 0 { 0 } else { total.div_ceil(page_size) }
}

/// Walk pages `1..=page_count` and return every vote, oldest first.
///
/// Stops early at the end-of-list page. A page that fails to parse aborts
/// the run; nothing partial is returned.
pub fn collect_votes<T: Transport, S: Sleep>(
    fetcher: &mut Fetcher<T, S>,
    opts: &ScrapeOptions,
    item: &ItemId,
    total: u32,
    progress: &mut dyn Progress,
) -> Result<Vec<Vote>> {
    let pages = page_count(total, opts.page_size);
    progress.begin(pages);

    // the hint is scraped text; don't trust it for the allocation
    let mut votes = Vec::with_capacity(total.min(opts.page_size.saturating_mul(64)) as usize);
    for page in 1..=pages {
        progress.page_start(page, pages, votes.len());

        let html = fetcher.fetch_page(&opts.votes_url(item, page));
        match parse_vote_page(&html).map_err(|source| Error::Parse { page, source })? {
            VotePage::Votes(rows) => votes.extend(rows),
            VotePage::EndOfPages => {
                logf!("{item}: listing ended at page {page} of {pages}");
                break;
            }
        }
    }

    // newest-first across the board; flip once
    votes.reverse();
    Ok(votes)
}

pub type SharedCache = Arc<Mutex<VoteCache>>;

#[derive(Clone, Debug)]
pub struct Collected {
    pub item: ItemId,
    /// None when served from cache
    pub summary: Option<ItemSummary>,
    /// Oldest first
    pub votes: Vec<Vote>,
    pub from_cache: bool,
}

/// Fetcher + cache for a run. One per worker; the cache may be shared.
pub struct Collector<T, S = ThreadSleep> {
    fetcher: Fetcher<T, S>,
    cache: SharedCache,
    opts: ScrapeOptions,
}

impl<T: Transport, S: Sleep> Collector<T, S> {
    pub fn new(fetcher: Fetcher<T, S>, cache: SharedCache, opts: ScrapeOptions) -> Self {
        Self { fetcher, cache, opts }
    }

    pub fn fetcher(&self) -> &Fetcher<T, S> {
        &self.fetcher
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Title, vote-count hint and releases from the item's main page.
    pub fn fetch_summary(&mut self, item: &ItemId) -> Result<ItemSummary> {
        let html = self.fetcher.fetch_page(&self.opts.item_url(item));
        parse_item_page(&html).map_err(Error::ItemPage)
    }

    /// Votes for `item`: from the cache if fresh (no network), otherwise
    /// collected in full and written back.
    pub fn collect(
        &mut self,
        item: &ItemId,
        now: DateTime<Utc>,
        progress: &mut dyn Progress,
    ) -> Result<Collected> {
        if !self.opts.refresh {
            let cached = lock!(self.cache)
                .get_fresh(item, now, self.opts.freshness)
                .map(|e| e.votes.clone());
            if let Some(votes) = cached {
                logf!("{item}: {} votes from cache", votes.len());
                progress.log(&format!("{} votes loaded from cache", votes.len()));
                progress.finish();
                return Ok(Collected { item: item.clone(), summary: None, votes, from_cache: true });
            }
        }

        let result = self.collect_fresh(item, now, progress);
        progress.finish();
        result
    }

    fn collect_fresh(
        &mut self,
        item: &ItemId,
        now: DateTime<Utc>,
        progress: &mut dyn Progress,
    ) -> Result<Collected> {
        progress.log("Reading item page…");
        let summary = self.fetch_summary(item)?;
        // no vote graph → no votes yet
        let total = summary.vote_count.unwrap_or(0);
        logf!("{item}: \"{}\", {total} votes advertised", summary.title);

        let votes = collect_votes(&mut self.fetcher, &self.opts, item, total, progress)?;
        logf!("{item}: collected {} votes", votes.len());

        let mut cache = lock!(self.cache);
        cache.put(item.clone(), now, votes.clone());
        if let Err(e) = cache.save() {
            loge!("{item}: votes collected but cache not saved: {e}");
        }
        drop(cache);

        Ok(Collected { item: item.clone(), summary: Some(summary), votes, from_cache: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 50), 0);
        assert_eq!(page_count(1, 50), 1);
        assert_eq!(page_count(50, 50), 1);
        assert_eq!(page_count(51, 50), 2);
        assert_eq!(page_count(10, 0), 0);
    }
}
