use std::fmt;

use super::model::{ContentType, Dataset, Title};

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// Type selector: everything, or one exact content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Movie,
    TvShow,
}

impl TypeFilter {
    pub const CHOICES: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Movie, TypeFilter::TvShow];

    fn matches(self, kind: &ContentType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Movie => *kind == ContentType::Movie,
            TypeFilter::TvShow => *kind == ContentType::TvShow,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeFilter::All => "All",
            TypeFilter::Movie => "Movie",
            TypeFilter::TvShow => "TV Show",
        })
    }
}

/// Year selector: everything, or titles added in one specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => f.write_str("All"),
            YearFilter::Year(y) => write!(f, "{y}"),
        }
    }
}

/// The four user-facing predicates.  Empty text fields mean "no constraint".
///
/// Constructed fresh from the widgets on every interaction; the default value
/// constrains nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterParams {
    pub kind: TypeFilter,
    /// Case-insensitive substring of the raw `country` cell.
    pub country: String,
    pub year: YearFilter,
    /// Case-insensitive substring of the raw, comma-joined `listed_in` cell.
    pub genre: String,
}

impl FilterParams {
    /// Whether every predicate is at its "no constraint" value.
    pub fn is_unconstrained(&self) -> bool {
        self.kind == TypeFilter::All
            && self.country.is_empty()
            && self.year == YearFilter::All
            && self.genre.is_empty()
    }

    /// Lower-case the needles once so each row check is a plain `contains`.
    fn compile(&self) -> CompiledFilter {
        CompiledFilter {
            kind: self.kind,
            country: (!self.country.is_empty()).then(|| self.country.to_lowercase()),
            year: self.year,
            genre: (!self.genre.is_empty()).then(|| self.genre.to_lowercase()),
        }
    }

    /// Evaluate the conjunction of all four predicates for one row.
    pub fn matches(&self, title: &Title) -> bool {
        self.compile().matches(title)
    }
}

struct CompiledFilter {
    kind: TypeFilter,
    country: Option<String>,
    year: YearFilter,
    genre: Option<String>,
}

impl CompiledFilter {
    fn matches(&self, title: &Title) -> bool {
        if !self.kind.matches(&title.kind) {
            return false;
        }
        if let Some(needle) = &self.country {
            if !title.country_or_empty().to_lowercase().contains(needle) {
                return false;
            }
        }
        if let YearFilter::Year(year) = self.year {
            if title.year_added() != Some(year) {
                return false;
            }
        }
        // Matched against the whole cell, so a needle may span a comma.
        if let Some(needle) = &self.genre {
            if !title.listed_in_or_empty().to_lowercase().contains(needle) {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Rows of a dataset that pass a [`FilterParams`], in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// View over an explicit set of row indices (must be ascending).
    pub fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        FilteredView { dataset, indices }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Positions of the visible rows within the dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The `n`-th visible row.
    pub fn get(&self, n: usize) -> Option<&'a Title> {
        let dataset = self.dataset;
        self.indices.get(n).and_then(|&i| dataset.titles.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Title> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.titles[i])
    }
}

/// Return the rows of `dataset` that pass every active predicate.
///
/// An empty result is valid.  The dataset itself is never modified.
pub fn apply<'a>(dataset: &'a Dataset, params: &FilterParams) -> FilteredView<'a> {
    let filter = params.compile();
    let indices = dataset
        .titles
        .iter()
        .enumerate()
        .filter(|(_, title)| filter.matches(title))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}
