//! Summary views over a [`FilteredView`].  All functions are pure and return
//! empty structures for an empty view.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use super::filter::FilteredView;
use super::model::ContentType;

/// How many genres / countries the "top" charts show.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Insertion-ordered frequency counter
// ---------------------------------------------------------------------------

/// Counts keys while remembering the order each key was first seen, so that
/// ties in [`Tally::most_common`] fall back to first appearance.
struct Tally<K> {
    slots: HashMap<K, usize>,
    counts: Vec<(K, usize)>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    fn new() -> Self {
        Tally {
            slots: HashMap::new(),
            counts: Vec::new(),
        }
    }

    fn add(&mut self, key: K) {
        match self.slots.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.slots.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Counts in first-seen order.
    fn into_first_seen(self) -> Vec<(K, usize)> {
        self.counts
    }

    /// Descending by count; the sort is stable so ties keep first-seen order.
    fn most_common(self, limit: Option<usize>) -> Vec<(K, usize)> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = limit {
            counts.truncate(n);
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// The five aggregates
// ---------------------------------------------------------------------------

/// Titles per content type, in first-seen order.
pub fn type_counts(view: &FilteredView<'_>) -> Vec<(ContentType, usize)> {
    let mut tally = Tally::new();
    for title in view.iter() {
        tally.add(title.kind.clone());
    }
    tally.into_first_seen()
}

/// Titles per `year_added`, ascending.  Rows without a year are skipped.
pub fn year_histogram(view: &FilteredView<'_>) -> BTreeMap<i32, usize> {
    let mut hist = BTreeMap::new();
    for year in view.iter().filter_map(|t| t.year_added()) {
        *hist.entry(year).or_insert(0) += 1;
    }
    hist
}

/// The `n` most frequent genre tags.  `listed_in` is split on commas and each
/// tag is trimmed before counting.
pub fn top_genres(view: &FilteredView<'_>, n: usize) -> Vec<(String, usize)> {
    let mut tally = Tally::new();
    for title in view.iter() {
        for genre in title.genres() {
            tally.add(genre.to_string());
        }
    }
    tally.most_common(Some(n))
}

/// The `n` most frequent `country` cells.  The whole cell is one key (no
/// splitting) and a missing country counts under `""`.
pub fn top_countries(view: &FilteredView<'_>, n: usize) -> Vec<(String, usize)> {
    let mut tally = Tally::new();
    for title in view.iter() {
        tally.add(title.country_or_empty().to_string());
    }
    tally.most_common(Some(n))
}

/// Titles per rating, most frequent first.  A missing rating is its own
/// bucket (`None`).
pub fn rating_distribution(view: &FilteredView<'_>) -> Vec<(Option<String>, usize)> {
    let mut tally = Tally::new();
    for title in view.iter() {
        tally.add(title.rating.clone());
    }
    tally.most_common(None)
}

// ---------------------------------------------------------------------------
// Summary – everything the charts need for one render
// ---------------------------------------------------------------------------

/// All five aggregates for one filtered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of rows in the view the summary was built from.
    pub total: usize,
    pub type_counts: Vec<(ContentType, usize)>,
    pub year_histogram: BTreeMap<i32, usize>,
    pub top_genres: Vec<(String, usize)>,
    pub top_countries: Vec<(String, usize)>,
    pub ratings: Vec<(Option<String>, usize)>,
}

impl Summary {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        Summary {
            total: view.len(),
            type_counts: type_counts(view),
            year_histogram: year_histogram(view),
            top_genres: top_genres(view, TOP_N),
            top_countries: top_countries(view, TOP_N),
            ratings: rating_distribution(view),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
