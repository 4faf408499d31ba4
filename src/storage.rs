use crate::models::JoinedRow;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells a spreadsheet would evaluate as a formula.
fn neutralize_formula(cell: &str) -> Cow<'_, str> {
    if cell.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{cell}"))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Save the joined table as CSV with header.
pub fn save_csv<P: AsRef<Path>>(rows: &[JoinedRow], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.serialize(("name", "price", "color"))?;
    for r in rows {
        wtr.serialize((neutralize_formula(&r.name), r.price, &r.color))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the joined table as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[JoinedRow], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Pick the format from the extension: `.json` → JSON, anything else CSV.
pub fn save_rows<P: AsRef<Path>>(rows: &[JoinedRow], path: P) -> Result<()> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        save_json(rows, path)
    } else {
        save_csv(rows, path)
    }
}
