// src/gui/actions/fetch.rs
use std::{sync::mpsc, thread};

use chrono::Utc;
use eframe::egui;

use crate::{
    config::options::ScrapeOptions,
    core::net::HttpTransport,
    data::ItemId,
    error::Result,
    fetch::Fetcher,
    gui::{app::App, progress::GuiProgress},
    scrape::{Collected, Collector, SharedCache},
};

/// Start a collection for the item in the text field on a worker thread.
/// The result comes back through `app.rx`.
pub fn fetch(app: &mut App, ctx: &egui::Context) {
    if app.running {
        return;
    }

    let item: ItemId = match app.state.gui.item_text.parse() {
        Ok(id) => id,
        Err(e) => {
            logd!("Fetch: {e}");
            app.status(format!("{e}"));
            return;
        }
    };

    logf!("Fetch: Begin item={item} refresh={}", app.state.options.scrape.refresh);

    let opts = app.state.options.scrape.clone();
    let cache = app.cache.clone();
    let mut prog = GuiProgress::new(app.status.clone(), ctx.clone());
    let ctx = ctx.clone();
    let (tx, rx) = mpsc::channel();

    app.status(format!("Fetching {item}…"));
    app.running = true;
    app.rx = Some(rx);

    thread::spawn(move || {
        let result = collect(&item, opts, cache, &mut prog);
        // receiver gone means the window closed; nothing to do
        let _ = tx.send(result);
        ctx.request_repaint();
    });
}

fn collect(item: &ItemId, opts: ScrapeOptions, cache: SharedCache, prog: &mut GuiProgress) -> Result<Collected> {
    let transport = HttpTransport::new()?;
    let fetcher = Fetcher::new(transport).pacing(opts.base_delay_ms, opts.delay_growth);
    let mut collector = Collector::new(fetcher, cache, opts);
    collector.collect(item, Utc::now(), prog)
}
