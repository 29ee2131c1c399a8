// src/gui/actions/export.rs
use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.state.gui.out_path_dirty {
        let text = app.state.gui.out_path_text.clone();
        app.state.options.export.set_path(&text);
        logf!("Export: Out path set → {text}");
        app.state.gui.out_path_dirty = false;
    }

    let Some(table) = super::current_table(app) else {
        logd!("Export: Clicked, but there's nothing to export");
        return app.status("Nothing to export");
    };
    let Some(item) = app.report.as_ref().map(|r| r.item.clone()) else { return };

    let status_msg = match file::write_export(&app.state.options.export, &item, &table) {
        Ok(path) => {
            logf!("Export: OK rows={} → {}", table.nrows(), path.display());
            format!("Exported {}", path.display())
        }
        Err(e) => {
            loge!("Export: Error: {e}");
            format!("Export error: {e}")
        }
    };

    app.status(status_msg);
}
