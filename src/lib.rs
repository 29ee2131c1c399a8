// src/lib.rs
#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod specs;

pub mod csv;
pub mod fetch;
pub mod file;
pub mod gui;
pub mod progress;
pub mod report;
pub mod scrape;
pub mod stats;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;
