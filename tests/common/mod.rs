// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    time::Duration,
};

use chrono::{DateTime, TimeZone, Utc};
use score_graph::{
    config::options::ScrapeOptions,
    core::net::{Response, Sleep, Transport, TransportError},
    data::{ItemId, Vote},
};

pub const BASE: &str = "http://test.invalid";

/// Canned responses per URL, served in order. The last response for a URL
/// repeats; an unknown URL fails the test.
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, VecDeque<Response>>,
    pub requests: Vec<String>,
}

impl MockTransport {
    pub fn route(mut self, url: impl Into<String>, resp: Response) -> Self {
        self.routes.entry(url.into()).or_default().push_back(resp);
        self
    }
}

impl Transport for MockTransport {
    fn get(&mut self, url: &str) -> Result<Response, TransportError> {
        self.requests.push(url.to_string());
        let queue = self
            .routes
            .get_mut(url)
            .unwrap_or_else(|| panic!("unexpected GET {url}"));
        let resp = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
        Ok(resp.expect("route without responses"))
    }
}

/// Any request is a test failure.
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn get(&mut self, url: &str) -> Result<Response, TransportError> {
        panic!("network access while offline: {url}");
    }
}

#[derive(Default)]
pub struct RecordingSleep(pub Vec<Duration>);

impl Sleep for RecordingSleep {
    fn sleep(&mut self, d: Duration) {
        self.0.push(d);
    }
}

pub fn opts() -> ScrapeOptions {
    ScrapeOptions { base_url: BASE.to_string(), ..Default::default() }
}

pub fn item(s: &str) -> ItemId {
    s.parse().unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn vote(date: DateTime<Utc>, value: f64, user: &str) -> Vote {
    Vote { date, value, user: user.to_string() }
}

/// A listing page with `votes` in the given (newest-first) order.
pub fn vote_page(votes: &[Vote]) -> Response {
    let rows: String = votes
        .iter()
        .map(|v| {
            format!(
                r#"<tr><td class="tc1">{}</td><td class="tc2">{}</td><td class="tc3"><a href="/u1">{}</a></td></tr>"#,
                v.date.format("%Y-%m-%d"),
                v.value,
                v.user
            )
        })
        .collect();
    Response::ok(format!(
        r#"<html><body><div id="maincontent"><div class="mainbox"><h1>Votes</h1></div>
<div class="mainbox votelist"><table><thead><tr><td class="tc1">Date</td></tr></thead>
<tbody>{rows}</tbody></table></div></div></body></html>"#
    ))
}

pub fn end_page() -> Response {
    Response::ok(r#"<html><body><div id="maincontent"><div class="mainbox"><h1>Votes</h1><p>No votes to list!</p></div></div></body></html>"#)
}

pub fn item_page(title: &str, total: u32) -> Response {
    Response::ok(format!(
        r#"<html><body><div id="maincontent"><div class="mainbox"><h1>{title}</h1>
<div class="vnreleases"><details><summary><abbr class="icon-lang lang-ja"></abbr></summary><table>
<tr><td class="tc1">2020-05-01</td><td class="tc4"><a href="/r1" title="{title} Original">{title}</a></td></tr>
</table></details></div></div>
<div class="mainbox"><div class="votegraph"><table><tfoot><tr><td>{total} votes total, average 7.00</td></tr></tfoot></table></div></div>
</div></body></html>"#
    ))
}

/// Votes one per day starting at `start`, oldest first.
pub fn daily_votes(start: DateTime<Utc>, values: &[f64]) -> Vec<Vote> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| vote(start + chrono::TimeDelta::days(i as i64), v, &format!("user{i}")))
        .collect()
}
