use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::data::aggregate::Summary;
use crate::data::model::ContentType;

// ---------------------------------------------------------------------------
// Presenter – anything that can show the five summary charts
// ---------------------------------------------------------------------------

/// Chart titles, in display order.
pub const CHART_TITLES: [&str; 5] = [
    "Movies vs TV Shows",
    "Titles Added Per Year",
    "Top 10 Genres",
    "Top Countries with Most Titles",
    "Content Ratings Distribution",
];

/// Sink for the aggregate structures.  The egui chart panel and the plain-text
/// report both implement this; neither the filter nor the aggregation code
/// depends on it.
pub trait Presenter {
    fn type_counts(&mut self, counts: &[(ContentType, usize)]);
    fn year_histogram(&mut self, histogram: &BTreeMap<i32, usize>);
    fn top_genres(&mut self, genres: &[(String, usize)]);
    fn top_countries(&mut self, countries: &[(String, usize)]);
    fn ratings(&mut self, ratings: &[(Option<String>, usize)]);
}

/// Feed every chart of `summary` to `presenter` in display order.
pub fn present<P: Presenter + ?Sized>(summary: &Summary, presenter: &mut P) {
    presenter.type_counts(&summary.type_counts);
    presenter.year_histogram(&summary.year_histogram);
    presenter.top_genres(&summary.top_genres);
    presenter.top_countries(&summary.top_countries);
    presenter.ratings(&summary.ratings);
}

/// Display label for a missing country / rating bucket.
pub fn bucket_label(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => "(unknown)",
    }
}

// ---------------------------------------------------------------------------
// TextReport – headless rendering
// ---------------------------------------------------------------------------

/// Renders the charts as aligned text tables.
#[derive(Debug, Default)]
pub struct TextReport {
    out: String,
}

impl TextReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn section(&mut self, title: &str, rows: impl IntoIterator<Item = (String, usize)>) {
        let _ = writeln!(self.out, "## {title}");
        let rows: Vec<(String, usize)> = rows.into_iter().collect();
        if rows.is_empty() {
            let _ = writeln!(self.out, "  (no data)");
        }
        let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        for (label, count) in rows {
            let _ = writeln!(self.out, "  {label:<width$}  {count:>6}");
        }
        self.out.push('\n');
    }
}

impl Presenter for TextReport {
    fn type_counts(&mut self, counts: &[(ContentType, usize)]) {
        self.section(
            CHART_TITLES[0],
            counts.iter().map(|(k, n)| (k.to_string(), *n)),
        );
    }

    fn year_histogram(&mut self, histogram: &BTreeMap<i32, usize>) {
        self.section(
            CHART_TITLES[1],
            histogram.iter().map(|(y, n)| (y.to_string(), *n)),
        );
    }

    fn top_genres(&mut self, genres: &[(String, usize)]) {
        self.section(CHART_TITLES[2], genres.iter().cloned());
    }

    fn top_countries(&mut self, countries: &[(String, usize)]) {
        self.section(
            CHART_TITLES[3],
            countries
                .iter()
                .map(|(c, n)| (bucket_label(Some(c.as_str())).to_string(), *n)),
        );
    }

    fn ratings(&mut self, ratings: &[(Option<String>, usize)]) {
        self.section(
            CHART_TITLES[4],
            ratings
                .iter()
                .map(|(r, n)| (bucket_label(r.as_deref()).to_string(), *n)),
        );
    }
}
