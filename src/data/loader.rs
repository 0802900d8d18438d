use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use chrono::{NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{ContentType, Dataset, Title};

/// Columns every catalog source must provide, in [`RawRow`] order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "title",
    "type",
    "country",
    "date_added",
    "listed_in",
    "rating",
];

/// Text cells of one row, indexed like [`REQUIRED_COLUMNS`].  Blank cells are `None`.
type RawRow = [Option<String>; 6];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least [`REQUIRED_COLUMNS`] (also the fallback)
/// * `.json`    – `[{ "title": ..., "type": ..., ... }, ...]`
/// * `.parquet` – any column types that cast to UTF-8
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let mut builder = RowBuilder::default();
    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path, &mut builder)?,
        "json" => load_json(path, &mut builder)?,
        _ => load_csv(path, &mut builder)?,
    }

    log::info!(
        "Loaded {} titles from {} ({} unparsable date_added values)",
        builder.titles.len(),
        path.display(),
        builder.bad_dates
    );
    Ok(Dataset::new(builder.titles, path))
}

// ---------------------------------------------------------------------------
// Row conversion shared by all formats
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RowBuilder {
    titles: Vec<Title>,
    bad_dates: usize,
}

impl RowBuilder {
    fn push(&mut self, row_no: usize, cells: RawRow) {
        let [title, kind, country, date_added, listed_in, rating] = cells;

        let date_added = date_added.and_then(|raw| {
            let parsed = parse_date_added(&raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                log::debug!("Row {row_no}: unparsable date_added {raw:?}");
                self.bad_dates += 1;
            }
            parsed
        });

        self.titles.push(Title {
            title: title.unwrap_or_default(),
            kind: ContentType::from_raw(kind.as_deref().unwrap_or("")),
            country,
            date_added,
            listed_in,
            rating,
        });
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Find the position of every required column, reporting all that are missing.
fn locate_columns<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<[usize; 6], LoadError> {
    let names: Vec<&str> = names.into_iter().map(str::trim).collect();

    let mut positions = [0usize; 6];
    let mut missing = Vec::new();
    for (slot, col) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        match names.iter().position(|n| *n == col) {
            Some(i) => *slot = i,
            None => missing.push(col.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d",
    "%d-%b-%y",
    "%m/%d/%Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a `date_added` cell.  Surrounding whitespace is ignored; anything
/// unrecognised yields `None`.
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Ragged rows are accepted; cells past the end of a short row are absent.
fn load_csv(path: &Path, rows: &mut RowBuilder) -> Result<(), LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let positions = locate_columns(reader.headers()?.iter())?;

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cells: RawRow = positions.map(|i| record.get(i).and_then(non_empty));
        rows.push(row_no, cells);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "Dick Johnson Is Dead", "type": "Movie", "country": "United States",
///     "date_added": "September 25, 2021", "listed_in": "Documentaries", "rating": "PG-13" },
///   ...
/// ]
/// ```
///
/// The first record decides whether the required columns exist.  An empty
/// array names no columns at all, so it is a schema error.
fn load_json(path: &Path, rows: &mut RowBuilder) -> Result<(), LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".into()))?;

    match records.first() {
        Some(JsonValue::Object(first)) => {
            locate_columns(first.keys().map(String::as_str))?;
        }
        Some(_) => {}
        None => {
            locate_columns(std::iter::empty())?;
        }
    }

    for (row_no, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {row_no} is not a JSON object")))?;
        let cells: RawRow = REQUIRED_COLUMNS.map(|col| obj.get(col).and_then(json_to_cell));
        rows.push(row_no, cells);
    }
    Ok(())
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => non_empty(s),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every required column is cast to UTF-8 first, so date or numeric physical
/// types load the same way as text.
fn load_parquet(path: &Path, rows: &mut RowBuilder) -> Result<(), LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let positions = locate_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut row_no = 0;
    for batch_result in reader {
        let batch = batch_result?;

        let columns = positions
            .iter()
            .map(|&i| cast(batch.column(i), &DataType::Utf8))
            .collect::<Result<Vec<ArrayRef>, _>>()?;

        for row in 0..batch.num_rows() {
            let cells: RawRow = std::array::from_fn(|c| {
                let col = columns[c].as_string::<i32>();
                if col.is_null(row) {
                    None
                } else {
                    non_empty(col.value(row))
                }
            });
            rows.push(row_no, cells);
            row_no += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "show_id,type,title,director,country,date_added,release_year,rating,listed_in\n";

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn parses_the_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2021, 9, 25);
        assert_eq!(parse_date_added("September 25, 2021"), expected);
        assert_eq!(parse_date_added(" September 25, 2021 "), expected);
        assert_eq!(parse_date_added("Sep 25, 2021"), expected);
        assert_eq!(parse_date_added("2021-09-25"), expected);
        assert_eq!(parse_date_added("2021-09-25T00:00:00"), expected);
        assert_eq!(parse_date_added("not a date"), None);
        assert_eq!(parse_date_added("   "), None);
    }

    #[test]
    fn csv_rows_keep_order_and_tolerate_bad_dates() {
        let file = temp_file(
            ".csv",
            &format!(
                "{HEADER}\
                 s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,United States,\"September 25, 2021\",2020,PG-13,Documentaries\n\
                 s2,TV Show,Blood & Water,,South Africa,\" September 24, 2021\",2021,TV-MA,\"International TV Shows, TV Dramas, TV Mysteries\"\n\
                 s3,TV Show,Ganglands,Julien Leclercq,,someday,2021,,\"Crime TV Shows, International TV Shows\"\n\
                 s4,Movie,Untitled,,,,2019,,\n"
            ),
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 4);

        let names: Vec<&str> = ds.titles.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            names,
            vec!["Dick Johnson Is Dead", "Blood & Water", "Ganglands", "Untitled"]
        );

        let first = &ds.titles[0];
        assert_eq!(first.kind, ContentType::Movie);
        assert_eq!(first.year_added(), Some(2021));
        assert_eq!(first.month_added(), Some(9));
        assert_eq!(first.rating.as_deref(), Some("PG-13"));

        let second = &ds.titles[1];
        assert_eq!(second.kind, ContentType::TvShow);
        assert_eq!(second.date_added, NaiveDate::from_ymd_opt(2021, 9, 24));
        assert_eq!(
            second.listed_in.as_deref(),
            Some("International TV Shows, TV Dramas, TV Mysteries")
        );

        let third = &ds.titles[2];
        assert_eq!(third.country, None);
        assert_eq!(third.date_added, None);
        assert_eq!(third.year_added(), None);
        assert_eq!(third.month_added(), None);
        assert_eq!(third.rating, None);

        let fourth = &ds.titles[3];
        assert_eq!(fourth.date_added, None);
        assert_eq!(fourth.listed_in, None);

        assert_eq!(ds.years_desc(), &[2021]);
    }

    #[test]
    fn missing_columns_are_reported_together() {
        let file = temp_file(".csv", "title,type,country\nA,Movie,India\n");
        match load_file(file.path()) {
            Err(LoadError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["date_added", "listed_in", "rating"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_load_with_trailing_cells_absent() {
        let file = temp_file(
            ".csv",
            "title,type,country,date_added,listed_in,rating
             A,Movie,India,\"May 1, 2020\",Dramas,R
             B,Movie,India
             C,TV Show,Japan,\"June 2, 2021\",Anime Series,TV-14,extra
",
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);

        let short = &ds.titles[1];
        assert_eq!(short.title, "B");
        assert_eq!(short.country.as_deref(), Some("India"));
        assert_eq!(short.date_added, None);
        assert_eq!(short.listed_in, None);
        assert_eq!(short.rating, None);

        assert_eq!(ds.titles[2].rating.as_deref(), Some("TV-14"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert!(matches!(load_file(&path), Err(LoadError::NotFound(p)) if p == path));
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let file = temp_file(".csv", HEADER);
        let ds = load_file(file.path()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.years_desc().is_empty());
    }

    #[test]
    fn json_records_load_like_csv() {
        let file = temp_file(
            ".json",
            r#"[
                {"title": "A", "type": "Movie", "country": "India", "date_added": "March 1, 2020",
                 "listed_in": "Dramas", "rating": "TV-14", "release_year": 2019},
                {"title": "B", "type": "TV Show", "country": null, "date_added": null,
                 "listed_in": "", "rating": 7}
            ]"#,
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.titles[0].year_added(), Some(2020));
        assert_eq!(ds.titles[1].kind, ContentType::TvShow);
        assert_eq!(ds.titles[1].country, None);
        assert_eq!(ds.titles[1].listed_in, None);
        assert_eq!(ds.titles[1].rating.as_deref(), Some("7"));
    }

    #[test]
    fn json_without_required_keys_is_a_schema_error() {
        let file = temp_file(".json", r#"[{"title": "A", "type": "Movie"}]"#);
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::MissingColumns(_))
        ));
    }

    #[test]
    fn empty_json_array_is_a_schema_error() {
        let file = temp_file(".json", "[]");
        match load_file(file.path()) {
            Err(LoadError::MissingColumns(cols)) => assert_eq!(cols, REQUIRED_COLUMNS),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn parquet_string_columns_load() {
        let schema = Arc::new(Schema::new(
            REQUIRED_COLUMNS
                .iter()
                .map(|name| Field::new(*name, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        ));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec![Some("A"), Some("B")])),
            Arc::new(StringArray::from(vec![Some("Movie"), Some("TV Show")])),
            Arc::new(StringArray::from(vec![Some("United States"), None])),
            Arc::new(StringArray::from(vec![Some("January 5, 2019"), Some("??")])),
            Arc::new(StringArray::from(vec![Some("Comedies"), None])),
            Arc::new(StringArray::from(vec![Some("R"), Some("TV-Y")])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.titles[0].year_added(), Some(2019));
        assert_eq!(ds.titles[0].country.as_deref(), Some("United States"));
        assert_eq!(ds.titles[1].country, None);
        assert_eq!(ds.titles[1].date_added, None);
    }
}
