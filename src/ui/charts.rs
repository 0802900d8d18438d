use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{gradient, ColorMap};
use crate::data::model::ContentType;
use crate::presenter::{bucket_label, Presenter, CHART_TITLES};

const PLOT_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Chart panel (central panel, below the table)
// ---------------------------------------------------------------------------

/// Draws the summary charts into an egui `Ui`, one after another.
pub struct ChartPanel<'a> {
    ui: &'a mut Ui,
    type_colors: &'a ColorMap,
    rating_colors: &'a ColorMap,
    index: usize,
}

impl<'a> ChartPanel<'a> {
    pub fn new(ui: &'a mut Ui, type_colors: &'a ColorMap, rating_colors: &'a ColorMap) -> Self {
        ChartPanel {
            ui,
            type_colors,
            rating_colors,
            index: 0,
        }
    }

    /// Section heading; returns false (after saying so) when there is nothing to plot.
    fn heading(&mut self, has_data: bool) -> bool {
        let title = CHART_TITLES[self.index];
        self.index += 1;

        self.ui.add_space(8.0);
        self.ui.label(RichText::new(format!("{}. {title}", self.index)).heading());
        if !has_data {
            self.ui.label("No titles match the current filters.");
        }
        has_data
    }

    /// Vertical bars, one per category, left to right in the given order.
    fn category_columns(&mut self, id: &str, x_label: &str, entries: Vec<(String, usize, Color32)>) {
        let labels: Vec<String> = entries.iter().map(|(l, _, _)| l.clone()).collect();
        let bars: Vec<Bar> = entries
            .into_iter()
            .enumerate()
            .map(|(i, (label, count, color))| {
                Bar::new(i as f64, count as f64)
                    .name(label)
                    .fill(color)
                    .width(0.6)
            })
            .collect();

        Plot::new(id)
            .height(PLOT_HEIGHT)
            .x_axis_label(x_label)
            .y_axis_label("Count")
            .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                category_label(&labels, mark.value)
            })
            .include_y(0.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(self.ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).element_formatter(Box::new(count_tooltip)));
            });
    }

    /// Horizontal bars, first entry at the top.
    fn ranked_rows(&mut self, id: &str, entries: Vec<(String, usize, Color32)>) {
        // Plot y grows upwards, so place the highest-ranked entry last.
        let n = entries.len();
        let mut labels = vec![String::new(); n];
        let bars: Vec<Bar> = entries
            .into_iter()
            .enumerate()
            .map(|(rank, (label, count, color))| {
                let pos = n - 1 - rank;
                labels[pos] = label.clone();
                Bar::new(pos as f64, count as f64)
                    .name(label)
                    .fill(color)
                    .width(0.7)
            })
            .collect();

        Plot::new(id)
            .height(PLOT_HEIGHT)
            .x_axis_label("Count")
            .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                category_label(&labels, mark.value)
            })
            .y_axis_min_width(140.0)
            .include_x(0.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(self.ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .horizontal()
                        .element_formatter(Box::new(count_tooltip)),
                );
            });
    }
}

impl Presenter for ChartPanel<'_> {
    fn type_counts(&mut self, counts: &[(ContentType, usize)]) {
        if !self.heading(!counts.is_empty()) {
            return;
        }
        let entries = counts
            .iter()
            .map(|(kind, n)| {
                let label = kind.to_string();
                let color = self.type_colors.color_for(&label);
                (label, *n, color)
            })
            .collect();
        self.category_columns("type_counts", "Type", entries);
    }

    fn year_histogram(&mut self, histogram: &BTreeMap<i32, usize>) {
        if !self.heading(!histogram.is_empty()) {
            return;
        }
        let bars: Vec<Bar> = histogram
            .iter()
            .map(|(&year, &n)| {
                Bar::new(f64::from(year), n as f64)
                    .name(year.to_string())
                    .width(0.8)
            })
            .collect();

        Plot::new("year_histogram")
            .height(PLOT_HEIGHT)
            .x_axis_label("Year")
            .y_axis_label("Number of Titles")
            .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
                if mark.value.fract() == 0.0 {
                    format!("{}", mark.value as i64)
                } else {
                    String::new()
                }
            })
            .include_y(0.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(self.ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(Color32::from_rgb(135, 206, 235))
                        .element_formatter(Box::new(count_tooltip)),
                );
            });
    }

    fn top_genres(&mut self, genres: &[(String, usize)]) {
        if !self.heading(!genres.is_empty()) {
            return;
        }
        let shades = gradient(300.0, genres.len());
        let entries = genres
            .iter()
            .zip(shades)
            .map(|((g, n), c)| (g.clone(), *n, c))
            .collect();
        self.ranked_rows("top_genres", entries);
    }

    fn top_countries(&mut self, countries: &[(String, usize)]) {
        if !self.heading(!countries.is_empty()) {
            return;
        }
        let entries = countries
            .iter()
            .map(|(c, n)| (bucket_label(Some(c.as_str())).to_string(), *n, Color32::DARK_GREEN))
            .collect();
        self.ranked_rows("top_countries", entries);
    }

    fn ratings(&mut self, ratings: &[(Option<String>, usize)]) {
        if !self.heading(!ratings.is_empty()) {
            return;
        }
        let entries = ratings
            .iter()
            .map(|(r, n)| {
                let label = bucket_label(r.as_deref()).to_string();
                let color = self.rating_colors.color_for(&label);
                (label, *n, color)
            })
            .collect();
        self.ranked_rows("ratings", entries);
    }
}

/// Axis text for a category position; blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let pos = value.round();
    if (value - pos).abs() > 1e-6 || pos < 0.0 {
        return String::new();
    }
    labels.get(pos as usize).cloned().unwrap_or_default()
}

fn count_tooltip(bar: &Bar, _chart: &BarChart) -> String {
    format!("{}\n{} titles", bar.name, bar.value)
}
