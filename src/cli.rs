// src/cli.rs
use std::{
    io::{self, Write},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::{
    config::options::{AppOptions, ExportFormat},
    core::net::HttpTransport,
    csv::to_export_string,
    data::ItemId,
    fetch::Fetcher,
    file::write_export,
    progress::Progress,
    report::{fmt_sig, Report},
    scrape::Collector,
    store::VoteCache,
};

/// Vote history statistics for one item.
#[derive(Parser, Debug)]
#[command(name = "cli", author, version, about, long_about = None)]
pub struct Args {
    /// Item id (`v17`, `17`) or a link to the item
    pub item: String,

    /// Write the table here instead of stdout (extension follows --format)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Emit the header row
    #[arg(long)]
    pub include_headers: bool,

    /// Ignore a fresh cache entry and collect again
    #[arg(long)]
    pub refresh: bool,

    /// Vote cache file
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Site root
    #[arg(long)]
    pub base_url: Option<String>,
}

impl Args {
    fn into_options(self) -> Result<(ItemId, AppOptions, bool)> {
        let item: ItemId = self.item.parse()?;
        let mut opts = AppOptions::default();

        opts.scrape.refresh = self.refresh;
        if let Some(cache) = self.cache {
            opts.scrape.cache_path = cache;
        }
        if let Some(url) = self.base_url {
            opts.scrape.base_url = url;
        }

        opts.export.format = self.format;
        opts.export.include_headers = self.include_headers;
        let to_file = match &self.out {
            Some(p) => {
                opts.export.set_path(&p.to_string_lossy());
                true
            }
            None => false,
        };

        Ok((item, opts, to_file))
    }
}

/// Progress lines on stderr, so stdout stays clean for the table.
struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn page_start(&mut self, page: u32, pages: u32, votes: usize) {
        eprintln!("Loading page {page} of {pages}, {votes} votes grabbed");
    }
}

pub fn run() -> Result<()> {
    crate::log::init(true);
    let (item, opts, to_file) = Args::parse().into_options()?;

    let cache = VoteCache::open(&opts.scrape.cache_path);
    let transport = HttpTransport::new().wrap_err("building HTTP client")?;
    let fetcher = Fetcher::new(transport).pacing(opts.scrape.base_delay_ms, opts.scrape.delay_growth);
    let mut collector = Collector::new(fetcher, Arc::new(Mutex::new(cache)), opts.scrape.clone());

    let now = Utc::now();
    let collected = collector
        .collect(&item, now, &mut CliProgress)
        .wrap_err_with(|| format!("collecting votes for {item}"))?;
    let report = Report::build(collected, now);

    if let (Some(last), Some(vote)) = (report.stats.series.last(), report.votes.last()) {
        eprintln!(
            "{}: {} votes, average {}, last month {}, last 20 {} (as of {})",
            report.title,
            report.votes.len(),
            fmt_sig(last.running_average, 3),
            fmt_sig(last.trailing_month_average, 3),
            fmt_sig(last.trailing_twenty_average, 3),
            vote.date.format("%Y-%m-%d"),
        );
    } else {
        eprintln!("{}: no votes", report.title);
    }

    if to_file {
        let path = write_export(&opts.export, &item, &report.table)
            .wrap_err("writing export file")?;
        eprintln!("Wrote {}", path.display());
    } else {
        let text = to_export_string(
            &report.table.headers,
            &report.table.rows,
            opts.export.include_headers,
            opts.export.format.delim(),
        );
        io::stdout().lock().write_all(text.as_bytes())?;
    }

    Ok(())
}
