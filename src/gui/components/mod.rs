// src/gui/components/mod.rs
pub mod chart;
pub mod data_table;
pub mod export_bar;
pub mod tabs;
pub mod toolbar;
