// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://vndb.org";
pub const USER_AGENT: &str = concat!("score_graph/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// Pacing: delay paid after every request; grows on failure
pub const BASE_DELAY_MS: u64 = 300;
pub const DELAY_GROWTH: f64 = 1.2;

// Scrape
pub const VOTES_PER_PAGE: u32 = 50;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CACHE_FILE: &str = "votes.json";
pub const LOG_FILE: &str = "debug.log";
pub const CACHE_FRESH_HOURS: i64 = 24;

// Statistics
pub const MONTH_MS: i64 = 2_629_800_000; // 365.25 / 12 days
pub const TRAILING_VOTES: usize = 20;
pub const POPULARITY_DAYS: i64 = 14;
pub const DISPLAY_SCALE: f64 = 10.0;
pub const SIG_FIGS: usize = 3;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
