// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;
use crate::data::ItemId;
use crate::error::Result;
use crate::report::TableData;

/// Write the vote table to the file `ExportOptions` names for `item`.
/// Returns the final path written to.
pub fn write_export(export: &ExportOptions, item: &ItemId, table: &TableData) -> Result<PathBuf> {
    let path = export.out_path(item);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(
        &table.headers,
        &table.rows,
        export.include_headers,
        export.format.delim(),
    );

    fs::write(&path, contents)?;
    logf!("Exported {} rows to {}", table.nrows(), path.display());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
