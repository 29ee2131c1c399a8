// src/gui/components/tabs.rs
//
// Chart / Table switch. Both views read the same report; nothing is rebuilt.

use eframe::egui;

use crate::{config::state::ViewTab, gui::app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        for (tab, title) in [(ViewTab::Chart, "Chart"), (ViewTab::Table, "Table")] {
            let selected = app.state.gui.tab == tab;
            if ui.selectable_label(selected, title).clicked() && !selected {
                logf!("UI: Tab switch {:?} → {:?}", app.state.gui.tab, tab);
                app.state.gui.tab = tab;
            }
        }
    });
    ui.add_space(2.0);
}
