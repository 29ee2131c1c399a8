// src/csv.rs
use std::io::{self, Write};

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Create a full export string (Copy/Export) from table data.
/// - `headers`: column names (if any)
/// - `rows`: display rows
/// - `include_headers`: whether to emit a header line
/// - `sep`: character to be used as field/cell separator
pub fn to_export_string(
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        if let Some(h) = headers {
            let _ = write_row(&mut buf, h, sep);
        }
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_only_when_needed() {
        let row = vec![s!("2024-01-02"), s!("Bob, \"the\" reader"), s!("8")];
        let mut out = Vec::new();
        write_row(&mut out, &row, ',').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2024-01-02,\"Bob, \"\"the\"\" reader\",8\n");

        let mut out = Vec::new();
        write_row(&mut out, &row[1..2], '\t').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"Bob, \"\"the\"\" reader\"\n");
    }

    #[test]
    fn header_line_is_optional() {
        let headers = Some(vec![s!("Date"), s!("Vote")]);
        let rows = vec![vec![s!("2024-01-02"), s!("8")]];
        assert_eq!(to_export_string(&headers, &rows, true, '\t'), "Date\tVote\n2024-01-02\t8\n");
        assert_eq!(to_export_string(&headers, &rows, false, '\t'), "2024-01-02\t8\n");
    }
}
