// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use eframe::egui;

use crate::progress::Progress;

/// Writes progress into the shared status line and wakes the UI thread.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    ctx: egui::Context,
    pages: u32,
    votes: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>, ctx: egui::Context) -> Self {
        Self { status, ctx, pages: 0, votes: 0 }
    }

    fn set_status(&self, msg: impl Into<String>) {
        *lock!(self.status) = msg.into();
        self.ctx.request_repaint();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, pages: u32) {
        self.pages = pages;
        if pages == 0 {
            self.set_status("No votes to load");
        }
    }
    fn log(&mut self, msg: &str) {
        self.set_status(msg);
    }
    fn page_start(&mut self, page: u32, pages: u32, votes: usize) {
        self.votes = votes;
        self.set_status(format!("Loading page {page} of {pages}, {votes} votes grabbed"));
    }
    fn finish(&mut self) {
        if self.pages == 0 {
            self.set_status("Fetch complete");
        } else {
            self.set_status(format!("Fetch complete ({} pages)", self.pages));
        }
    }
}
