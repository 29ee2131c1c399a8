// src/gui/actions/copy.rs
use eframe::egui;

use crate::{csv::to_export_string, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let Some(table) = super::current_table(app) else {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    };

    let export = &app.state.options.export;
    let txt = to_export_string(&table.headers, &table.rows, export.include_headers, export.format.delim());
    logf!("Copy: rows={}, headers={}", table.nrows(), export.include_headers);

    ui_ctx.copy_text(txt);
    app.status("Copied to clipboard");
}
