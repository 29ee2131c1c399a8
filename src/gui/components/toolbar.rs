// src/gui/components/toolbar.rs
//
// Item field, Fetch button, refresh toggle and the status line.

use eframe::egui::{self, widgets::Spinner};

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label("Item:");
        let field = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.item_text)
                .hint_text("v17 or https://vndb.org/v17")
                .desired_width(260.0),
        );
        let entered = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.checkbox(&mut app.state.options.scrape.refresh, "Ignore cache")
            .on_hover_text("Collect again even if the votes were fetched within the last day");

        let clicked = ui
            .add_enabled(!app.running, egui::Button::new(egui::RichText::new("Fetch").strong()))
            .clicked();
        if clicked || (entered && !app.running) {
            actions::fetch(app, ui.ctx());
        }

        if app.running {
            ui.add(Spinner::new().size(16.0));
        }

        let status = lock!(app.status).clone();
        ui.label(status);
    });

    if let Some(report) = &app.report {
        ui.horizontal(|ui| {
            ui.heading(&report.title);
            ui.label(format!("({}, {} votes)", report.item, report.votes.len()));
        });
    }
}
