// src/data.rs
//
// Records shared by the scraper, the cache and the statistics engine.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One user's rating of an item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    pub value: f64,
    pub user: String,
}

/// Site identifier with its type prefix, e.g. `v17`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `v17` shape: one ASCII letter, then digits.
    fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let prefix = chars.next()?;
        let digits = chars.as_str();
        let ok = prefix.is_ascii_alphabetic()
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit());
        ok.then(|| Self(format!("{}{}", prefix.to_ascii_lowercase(), digits)))
    }
}

impl FromStr for ItemId {
    type Err = Error;

    /// Accepts `v17`, a bare `17` (visual novel assumed), or any site URL
    /// whose path contains the id (`https://vndb.org/v17/votes`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Self(format!("v{t}")));
        }

        let path = match t.find("://") {
            Some(i) => t[i + 3..].split_once('/').map(|(_, p)| p).unwrap_or(""),
            None => t,
        };
        path.split(['/', '?', '#'])
            .find_map(Self::from_token)
            .ok_or_else(|| Error::InvalidItemId(s!(s)))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dated release, drawn as a marker on the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Release {
    pub date: DateTime<Utc>,
    pub title: String,
    pub lang: String,
}

/// What the item's main page tells us.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemSummary {
    pub title: String,
    /// "N votes total"; None when the page shows no vote graph
    pub vote_count: Option<u32>,
    pub releases: Vec<Release>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_forms() {
        let id = |s: &str| s.parse::<ItemId>().map(|i| i.to_string());
        assert_eq!(id("v17").unwrap(), "v17");
        assert_eq!(id(" 17 ").unwrap(), "v17");
        assert_eq!(id("V17").unwrap(), "v17");
        assert_eq!(id("https://vndb.org/v17").unwrap(), "v17");
        assert_eq!(id("https://vndb.org/v17/votes?p=2").unwrap(), "v17");
        assert_eq!(id("vndb.org/v2002/").unwrap(), "v2002");
    }

    #[test]
    fn item_id_rejects_garbage() {
        assert!("".parse::<ItemId>().is_err());
        assert!("v".parse::<ItemId>().is_err());
        assert!("https://vndb.org/".parse::<ItemId>().is_err());
        assert!("vx17".parse::<ItemId>().is_err());
    }
}
