use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// ContentType – the `type` column
// ---------------------------------------------------------------------------

/// Kind of catalog entry.  Anything other than the two known literals is kept
/// verbatim instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    Movie,
    TvShow,
    Other(String),
}

impl ContentType {
    /// Map a raw cell to a content type (exact, case-sensitive match).
    pub fn from_raw(s: &str) -> Self {
        match s {
            "Movie" => ContentType::Movie,
            "TV Show" => ContentType::TvShow,
            other => ContentType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
            ContentType::Other(s) => s,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Title – one row of the catalog
// ---------------------------------------------------------------------------

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub title: String,
    pub kind: ContentType,
    /// Free text, possibly several comma-separated countries.
    pub country: Option<String>,
    /// `None` when the cell was blank or not a recognisable date.
    pub date_added: Option<NaiveDate>,
    /// Comma-separated genre tags.
    pub listed_in: Option<String>,
    pub rating: Option<String>,
}

impl Title {
    /// Year the title was added.  Present exactly when `date_added` is.
    pub fn year_added(&self) -> Option<i32> {
        self.date_added.map(|d| d.year())
    }

    /// Month (1-12) the title was added.  Present exactly when `date_added` is.
    pub fn month_added(&self) -> Option<u32> {
        self.date_added.map(|d| d.month())
    }

    /// Country cell with absent treated as the empty string.
    pub fn country_or_empty(&self) -> &str {
        self.country.as_deref().unwrap_or("")
    }

    /// Genre cell with absent treated as the empty string.
    pub fn listed_in_or_empty(&self) -> &str {
        self.listed_in.as_deref().unwrap_or("")
    }

    /// Individual genre tags: split on commas, trimmed, empties dropped.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.listed_in_or_empty()
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded catalog
// ---------------------------------------------------------------------------

/// The full parsed catalog.  Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All titles (rows) in file order.
    pub titles: Vec<Title>,
    /// File the rows were read from.
    pub source: PathBuf,
    /// Distinct `year_added` values, newest first.
    years: Vec<i32>,
}

impl Dataset {
    /// Build the dataset and its year index from loaded rows.
    pub fn new(titles: Vec<Title>, source: &Path) -> Self {
        let years: BTreeSet<i32> = titles.iter().filter_map(Title::year_added).collect();
        Dataset {
            titles,
            source: source.to_path_buf(),
            years: years.into_iter().rev().collect(),
        }
    }

    /// Years offered by the year selector, descending.
    pub fn years_desc(&self) -> &[i32] {
        &self.years
    }

    /// Number of titles.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
