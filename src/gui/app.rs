// src/gui/app.rs
use std::{
    collections::{HashMap, HashSet},
    error::Error,
    sync::{mpsc::{Receiver, TryRecvError}, Arc, Mutex},
    time::Duration,
};

use chrono::Utc;
use eframe::egui;

use crate::{
    config::state::{AppState, ViewTab},
    data::{ItemId, ItemSummary},
    error,
    report::{sort_rows, Report},
    scrape::{Collected, SharedCache},
    store::VoteCache,
};

use super::components;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "VNDB Score Graph",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,

    // shared with collection workers
    pub cache: SharedCache,

    // item pages seen this session; a cache hit does not re-read them
    pub summaries: HashMap<ItemId, ItemSummary>,

    // what is on screen
    pub report: Option<Report>,
    /// Table rows in display order
    pub rows: Vec<Vec<String>>,
    /// Chart series switched off in the legend
    pub hidden_series: HashSet<&'static str>,

    pub(super) rx: Option<Receiver<error::Result<Collected>>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let cache = VoteCache::open(&state.options.scrape.cache_path);
        let status = if cache.is_empty() {
            s!("Idle")
        } else {
            format!("Idle ({} items cached)", cache.len())
        };
        logf!("Init: cache={} items", cache.len());

        Self {
            state,
            status: Arc::new(Mutex::new(status)),
            running: false,
            cache: Arc::new(Mutex::new(cache)),
            summaries: HashMap::new(),
            report: None,
            rows: Vec::new(),
            hidden_series: HashSet::new(),
            rx: None,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *lock!(self.status) = msg.into();
    }

    /// Rebuild `rows` from the report under the current sort.
    pub fn apply_sort(&mut self) {
        let Some(report) = &self.report else {
            self.rows.clear();
            return;
        };
        self.rows = report.table.rows.clone();
        if let Some((col, descending)) = self.state.gui.sort {
            sort_rows(&mut self.rows, col, descending);
        }
    }

    /// Header click: ascending → descending → site order.
    pub fn cycle_sort(&mut self, col: usize) {
        self.state.gui.sort = match self.state.gui.sort {
            Some((c, false)) if c == col => Some((col, true)),
            Some((c, true)) if c == col => None,
            _ => Some((col, false)),
        };
        logd!("UI: sort → {:?}", self.state.gui.sort);
        self.apply_sort();
    }

    /// Pick up a finished worker, if any.
    fn poll_worker(&mut self) {
        let Some(rx) = &self.rx else { return };
        let msg = match rx.try_recv() {
            Ok(msg) => msg,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                loge!("Fetch: worker ended without a result");
                self.status("Error: fetch worker stopped");
                self.running = false;
                self.rx = None;
                return;
            }
        };
        self.running = false;
        self.rx = None;

        match msg {
            Ok(mut collected) => {
                if let Some(s) = &collected.summary {
                    self.summaries.insert(collected.item.clone(), s.clone());
                }
                collected.summary = collected
                    .summary
                    .take()
                    .or_else(|| self.summaries.get(&collected.item).cloned());
                let from_cache = collected.from_cache;
                let report = Report::build(collected, Utc::now());
                logf!("Fetch: OK item={} votes={} cached={}", report.item, report.votes.len(), from_cache);
                self.status(report.status_line());
                self.report = Some(report);
                self.apply_sort();
            }
            Err(e) => {
                loge!("Fetch: Error: {e}");
                self.status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();
        if self.running {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            components::toolbar::draw(ui, self);
            components::tabs::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("export").show(ctx, |ui| {
            components::export_bar::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.report.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("Enter an item id (v17) or link and press Fetch");
                });
                return;
            }
            match self.state.gui.tab {
                ViewTab::Chart => components::chart::draw(ui, self),
                ViewTab::Table => components::data_table::draw(ui, self),
            }
        });
    }
}
