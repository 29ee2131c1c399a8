// src/error.rs
use std::io;

use thiserror::Error;

use crate::specs::ParseError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not an item id: {0:?}")]
    InvalidItemId(String),

    /// A vote page did not have the expected shape; nothing was collected.
    #[error("vote page {page}: {source}")]
    Parse { page: u32, source: ParseError },

    #[error("item page: {0}")]
    ItemPage(#[source] ParseError),

    #[error("HTTP client setup: {0}")]
    Client(#[from] reqwest::Error),

    /// Writing an export file
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
