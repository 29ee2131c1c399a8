// src/gui/components/export_bar.rs

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::{
    config::options::ExportFormat,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(4.0);
    let mut open_folder_clicked = false;

    ui.horizontal(|ui| {
        let export = &mut app.state.options.export;

        // --- Format + Include headers ---
        let prev_fmt = export.format;
        ui.label("Format:");
        ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
        ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");
        if export.format != prev_fmt {
            logf!("UI: Export format → {:?}", export.format);
        }

        let before_headers = export.include_headers;
        ui.checkbox(&mut export.include_headers, "Include headers");
        if export.include_headers != before_headers {
            logf!("UI: Include_headers → {}", export.include_headers);
        }

        ui.separator();

        // --- Output field ---
        ui.label("Output:");
        let hint = match &app.report {
            Some(r) => export.out_path(&r.item).to_string_lossy().into_owned(),
            None => format!("out/<item>.{}", export.format.ext()),
        };
        if ui
            .add(
                egui::TextEdit::singleline(&mut app.state.gui.out_path_text)
                    .hint_text(hint)
                    .font(egui::TextStyle::Monospace),
            )
            .changed()
        {
            app.state.gui.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.state.gui.out_path_text);
        }

        if ui.button("📁").on_hover_text("Open output folder").clicked() {
            open_folder_clicked = true;
        }

        ui.separator();

        let has_data = app.report.is_some();
        if ui.add_enabled(has_data, egui::Button::new("Copy")).clicked() {
            actions::copy(app, ui.ctx());
        }
        if ui.add_enabled(has_data, egui::Button::new("Export")).clicked() {
            actions::export(app);
        }
    });
    ui.add_space(4.0);

    // Handle open folder after the borrow ends
    if open_folder_clicked {
        open_output_folder(app);
    }
}

/// Open the export folder in the system file explorer.
fn open_output_folder(app: &App) {
    let text = app.state.gui.out_path_text.trim();
    let folder = if text.is_empty() {
        PathBuf::from(crate::config::consts::DEFAULT_OUT_DIR)
    } else {
        Path::new(text).parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."))
    };

    let folder_to_open = find_nearest_existing_parent(&folder);

    let absolute_folder = match std::fs::canonicalize(&folder_to_open) {
        Ok(abs_path) => abs_path,
        Err(e) => {
            let msg = format!("Cannot resolve folder path: {}", e);
            loge!("{}", msg);
            app.status(msg);
            return;
        }
    };

    if let Err(e) = open_folder_in_explorer(&absolute_folder) {
        loge!("Failed to open folder: {}", e);
        app.status(format!("Failed to open folder: {}", e));
    } else {
        logf!("Opened folder: {}", absolute_folder.display());
    }
}

/// Nearest existing directory at or above `path`; `.` when none is found.
fn find_nearest_existing_parent(path: &Path) -> PathBuf {
    path.ancestors()
        .find(|p| !p.as_os_str().is_empty() && p.is_dir())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn open_folder_in_explorer(path: &Path) -> Result<(), String> {
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(target_os = "linux")]
    let program = "xdg-open";

    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    {
        std::process::Command::new(program)
            .arg(path)
            .spawn()
            .map(|_| ())
            .map_err(|e| format!("Failed to spawn {program}: {e}"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let _ = path;
        Err(s!("Opening folders not supported on this platform"))
    }
}
