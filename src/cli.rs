use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::data::aggregate::Summary;
use crate::data::cache::DatasetCache;
use crate::data::export;
use crate::data::filter::{apply, FilterParams, TypeFilter, YearFilter};
use crate::presenter::{present, TextReport};

/// Content type choice on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum TypeArg {
    #[default]
    All,
    Movie,
    /// Matches "TV Show"
    TvShow,
}

impl From<TypeArg> for TypeFilter {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::All => TypeFilter::All,
            TypeArg::Movie => TypeFilter::Movie,
            TypeArg::TvShow => TypeFilter::TvShow,
        }
    }
}

/// Command-line arguments.
#[derive(Clone, Parser, Debug)]
#[command(
    name = "catalog-explorer",
    version,
    about = "Explore a streaming catalog: filter titles, export them and chart the result"
)]
pub struct Args {
    /// Catalog file to open (.csv, .json or .parquet)
    #[arg(value_name = "PATH", default_value = "netflix_titles.csv")]
    pub path: PathBuf,

    /// Only titles of this type
    #[arg(long = "type", value_enum, default_value_t = TypeArg::All)]
    pub kind: TypeArg,

    /// Case-insensitive substring of the country column
    #[arg(long, default_value = "")]
    pub country: String,

    /// Only titles added in this year
    #[arg(long)]
    pub year: Option<i32>,

    /// Case-insensitive substring of the genre (listed_in) column
    #[arg(long, default_value = "")]
    pub genre: String,

    /// Write the filtered rows as CSV to this file and exit
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Print the chart data as text and exit
    #[arg(long)]
    pub summary: bool,
}

impl Args {
    /// Filters requested on the command line.
    pub fn filter_params(&self) -> FilterParams {
        FilterParams {
            kind: self.kind.into(),
            country: self.country.clone(),
            year: self.year.map_or(YearFilter::All, YearFilter::Year),
            genre: self.genre.clone(),
        }
    }

    /// Whether to run without opening a window.
    pub fn is_headless(&self) -> bool {
        self.export.is_some() || self.summary
    }
}

/// Load, filter, then export and/or print the summary.  Any load failure is fatal.
pub fn run_headless(args: &Args) -> Result<()> {
    let cache = DatasetCache::new();
    let dataset = cache
        .get_or_load(&args.path)
        .with_context(|| format!("loading {}", args.path.display()))?;

    let params = args.filter_params();
    let view = apply(&dataset, &params);
    log::info!("{} of {} titles match {params:?}", view.len(), dataset.len());

    if let Some(out) = &args.export {
        export::write_to(&view, out)?;
    }

    if args.summary {
        let summary = Summary::from_view(&view);
        let mut report = TextReport::new();
        present(&summary, &mut report);
        println!("Filtered Data ({} results)\n", view.len());
        print!("{}", report.finish());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_unconstrained() {
        let args = Args::parse_from(["catalog-explorer"]);
        assert_eq!(args.path, PathBuf::from("netflix_titles.csv"));
        assert!(args.filter_params().is_unconstrained());
        assert!(!args.is_headless());
    }

    #[test]
    fn flags_map_to_filter_params() {
        let args = Args::parse_from([
            "catalog-explorer",
            "titles.csv",
            "--type",
            "tv-show",
            "--country",
            "India",
            "--year",
            "2020",
            "--genre",
            "drama",
            "--summary",
        ]);
        assert_eq!(
            args.filter_params(),
            FilterParams {
                kind: TypeFilter::TvShow,
                country: "India".into(),
                year: YearFilter::Year(2020),
                genre: "drama".into(),
            }
        );
        assert!(args.is_headless());
    }

    #[test]
    fn headless_export_writes_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("titles.csv");
        let mut f = std::fs::File::create(&input).unwrap();
        writeln!(f, "title,type,country,date_added,listed_in,rating").unwrap();
        writeln!(f, "A,Movie,United States,\"January 1, 2020\",\"Dramas, Comedies\",R").unwrap();
        writeln!(f, "B,TV Show,India,\"January 2, 2020\",Dramas,TV-MA").unwrap();
        drop(f);

        let out = dir.path().join("out.csv");
        let input_arg = input.to_string_lossy().into_owned();
        let out_arg = out.to_string_lossy().into_owned();
        let args = Args::parse_from([
            "catalog-explorer",
            input_arg.as_str(),
            "--type",
            "movie",
            "--export",
            out_arg.as_str(),
        ]);
        run_headless(&args).unwrap();

        let rows = export::parse(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "A");
        assert_eq!(rows[0].year_added, Some(2020));
    }

    #[test]
    fn headless_run_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv").to_string_lossy().into_owned();
        let args = Args::parse_from(["catalog-explorer", missing.as_str(), "--summary"]);
        assert!(run_headless(&args).is_err());
    }
}
