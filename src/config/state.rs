// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewTab {
    Chart,
    Table,
}

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Raw text of the item field (`v17`, `17` or a URL)
    pub item_text: String,

    pub window_w: u32,
    pub window_h: u32,

    pub tab: ViewTab,

    /// Table sort: (column, descending). None → site order (oldest first).
    pub sort: Option<(usize, bool)>,

    /// Export path field
    pub out_path_text: String,
    pub out_path_dirty: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            item_text: s!(),
            window_w: 1100,
            window_h: 700,
            tab: ViewTab::Chart,
            sort: None,
            out_path_text: s!(),
            out_path_dirty: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
