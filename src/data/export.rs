use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::filter::FilteredView;
use super::model::Title;

/// Suggested file name for a download.
pub const EXPORT_FILE_NAME: &str = "filtered_netflix_data.csv";
/// Media type of the export.
pub const EXPORT_MIME: &str = "text/csv";

/// Columns of the exported table (also the columns shown in the UI table).
pub const EXPORT_COLUMNS: [&str; 5] = ["title", "type", "country", "year_added", "listed_in"];

/// One exported row.  Absent values become empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub country: Option<String>,
    pub year_added: Option<i32>,
    pub listed_in: Option<String>,
}

impl From<&Title> for ExportRecord {
    fn from(t: &Title) -> Self {
        ExportRecord {
            title: t.title.clone(),
            kind: t.kind.to_string(),
            country: t.country.clone(),
            year_added: t.year_added(),
            listed_in: t.listed_in.clone(),
        }
    }
}

/// Serialize a view to UTF-8 CSV: header first, then one line per row.
///
/// The header is written explicitly so an empty view still yields it.
pub fn serialize(view: &FilteredView<'_>) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_COLUMNS)?;
    for title in view.iter() {
        writer.serialize(ExportRecord::from(title))?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Read exported bytes back into records.
pub fn parse(bytes: &[u8]) -> Result<Vec<ExportRecord>, csv::Error> {
    csv::Reader::from_reader(bytes).deserialize().collect()
}

/// Serialize `view` and write it to `path`.  Returns the number of rows written.
pub fn write_to(view: &FilteredView<'_>, path: &Path) -> Result<usize> {
    let bytes = serialize(view).context("serializing filtered rows")?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} rows to {}", view.len(), path.display());
    Ok(view.len())
}
