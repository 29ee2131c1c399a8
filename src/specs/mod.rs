// src/specs/mod.rs
//! # Page specs
//!
//! Each spec knows how to read **one** page of the site: where the data lives
//! in the HTML and how to turn it into records. Nothing here fetches, caches
//! or presents; the callers (`scrape`, `report`) do that.
//!
//! ## Conventions
//! - Scan with the case-insensitive helpers in `core::html`; no full-document
//!   regexes.
//! - Structural only: cells are found by their fixed column classes
//!   (`tc1`, `tc2`, …).
//! - A page that does not have the expected shape is a [`ParseError`], never
//!   a silently shorter result. Screen scraping breaks when the site markup
//!   changes; the error should say where.
//!
//! ## Specs
//! - `votes` – one page of an item's vote listing, or the end-of-list marker.
//! - `item` – the item's main page: title, vote-count hint, releases.
//!
//! Specs are tested offline against small HTML fixtures.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

pub mod item;
pub mod votes;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("no vote list and no end-of-list marker")]
    MissingVoteList,

    #[error("vote list has no table body")]
    MissingTableBody,

    #[error("row {row}: missing `{cell}` cell")]
    MissingCell { row: usize, cell: &'static str },

    #[error("row {row}: unreadable date {text:?}")]
    BadDate { row: usize, text: String },

    #[error("row {row}: unreadable vote {text:?}")]
    BadVote { row: usize, text: String },

    #[error("no title heading")]
    MissingTitle,

    #[error("unreadable vote count {0:?}")]
    BadVoteCount(String),
}

/// Site dates: `YYYY-MM-DD`, with `YYYY-MM` and `YYYY` read as the first day
/// of the period. RFC 3339 timestamps are taken as-is. Anything else (`TBA`,
/// `unknown`) is None.
pub fn parse_site_date(text: &str) -> Option<DateTime<Utc>> {
    let t = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.with_timezone(&Utc));
    }

    let mut parts = t.splitn(3, '-');
    let year = parts.next().filter(|y| y.len() == 4)?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = match parts.next() { Some(m) => m.parse().ok()?, None => 1 };
    let day: u32 = match parts.next() { Some(d) => d.parse().ok()?, None => 1 };

    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn site_date_forms() {
        let ymd = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        assert_eq!(parse_site_date("2021-03-04"), Some(ymd(2021, 3, 4)));
        assert_eq!(parse_site_date(" 2021-03 "), Some(ymd(2021, 3, 1)));
        assert_eq!(parse_site_date("2021"), Some(ymd(2021, 1, 1)));
        assert_eq!(
            parse_site_date("2021-03-04T10:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2021, 3, 4, 8, 30, 0).unwrap())
        );
        assert_eq!(parse_site_date("TBA"), None);
        assert_eq!(parse_site_date("2021-13-01"), None);
        assert_eq!(parse_site_date("8"), None);
    }
}
