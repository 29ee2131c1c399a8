// src/config/options.rs
use std::path::{Path, PathBuf};

use chrono::TimeDelta;

use super::consts::*;
use crate::data::ItemId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrapeOptions {
    /// Site root, no trailing slash
    pub base_url: String,
    pub page_size: u32,
    pub base_delay_ms: u64,
    pub delay_growth: f64,
    pub cache_path: PathBuf,
    pub freshness: TimeDelta,
    /// Skip the cache lookup (the result is still written back)
    pub refresh: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            page_size: VOTES_PER_PAGE,
            base_delay_ms: BASE_DELAY_MS,
            delay_growth: DELAY_GROWTH,
            cache_path: PathBuf::from(STORE_DIR).join(CACHE_FILE),
            freshness: TimeDelta::hours(CACHE_FRESH_HOURS),
            refresh: false,
        }
    }
}

impl ScrapeOptions {
    fn root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The item's main page (title, vote count, releases).
    pub fn item_url(&self, item: &ItemId) -> String {
        format!("{}/{}", self.root(), item)
    }

    /// One page of the vote listing, newest first.
    pub fn votes_url(&self, item: &ItemId, page: u32) -> String {
        format!("{}/{}/votes?o=d&p={}&s=date", self.root(), item, page)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    dir: PathBuf,
    /// None → named after the item
    file_stem: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: None,
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; the stem defaults to the item id.
    pub fn out_path(&self, item: &ItemId) -> PathBuf {
        let stem = self.file_stem.clone().unwrap_or_else(|| item.to_string());
        self.dir.join(format!("{stem}.{}", self.format.ext()))
    }

    /// Parse user text into dir + stem. Ignores a pasted extension; format controls it.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.dir = parent.to_path_buf();
        }
        self.file_stem = p
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn votes_url_matches_site_listing() {
        let opts = ScrapeOptions { base_url: s!("https://vndb.org/"), ..Default::default() };
        let item: ItemId = "v17".parse().unwrap();
        assert_eq!(opts.votes_url(&item, 3), "https://vndb.org/v17/votes?o=d&p=3&s=date");
        assert_eq!(opts.item_url(&item), "https://vndb.org/v17");
    }

    #[test]
    fn set_path_ignores_extension_and_follows_format() {
        let item: ItemId = "v5".parse().unwrap();
        let mut export = ExportOptions::default();
        assert_eq!(export.out_path(&item), Path::new("out").join("v5.csv"));

        export.set_path("reports/scores.csv");
        export.format = ExportFormat::Tsv;
        assert_eq!(export.out_path(&item), Path::new("reports").join("scores.tsv"));
    }
}
