// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy,export,fetch}.

mod copy;    // src/gui/actions/copy.rs
mod export;  // src/gui/actions/export.rs
mod fetch;   // src/gui/actions/fetch.rs

pub use copy::copy;
pub use export::export;
pub use fetch::fetch;

use crate::{gui::app::App, report::TableData};

/// The table as currently shown (sorted), for Copy and Export.
pub(super) fn current_table(app: &App) -> Option<TableData> {
    let report = app.report.as_ref()?;
    Some(TableData::with(report.table.headers.clone(), app.rows.clone()))
}
