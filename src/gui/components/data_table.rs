// src/gui/components/data_table.rs
//
// Draws the vote table. Clicking a header cycles its sort:
// ascending → descending → site order.

use eframe::egui::{self, Align, Layout, RichText, Sense, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::gui::app::App;

/// Date, User, then numbers.
const TEXT_COLUMNS: [usize; 2] = [0, 1];
const WIDTHS: [f32; 8] = [90.0, 180.0, 50.0, 70.0, 90.0, 90.0, 80.0, 80.0];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(report) = &app.report else { return };
    let headers = report.table.headers.clone().unwrap_or_default();
    let cols = report.table.ncols();
    let sort = app.state.gui.sort;

    // Ensure scroll bars allocate space (not floating over content)
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let mut clicked: Option<usize> = None;
    let rows = &app.rows;

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .cell_layout(Layout::left_to_right(Align::Center));
    for ci in 0..cols {
        let w = WIDTHS.get(ci).copied().unwrap_or(80.0);
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(30.0));
    }

    table
        .header(24.0, |mut header| {
            for ci in 0..cols {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    let arrow = match sort {
                        Some((c, false)) if c == ci => " ▲",
                        Some((c, true)) if c == ci => " ▼",
                        _ => "",
                    };
                    let label = headers.get(ci).cloned().unwrap_or_else(|| format!("Col {}", ci + 1));
                    let resp = ui.add(
                        egui::Label::new(RichText::new(format!("{label}{arrow}")).strong())
                            .selectable(false)
                            .sense(Sense::click()),
                    );
                    if resp.on_hover_text("Sort").clicked() {
                        clicked = Some(ci);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let Some(data) = rows.get(row.index()) else { return };
                for ci in 0..cols {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        let cell = data.get(ci).map(String::as_str).unwrap_or("");
                        if TEXT_COLUMNS.contains(&ci) {
                            ui.label(cell);
                        } else {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
        });

    if let Some(ci) = clicked {
        app.cycle_sort(ci);
    }
}
