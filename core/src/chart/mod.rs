//! Summary charts over a set of recipes, rendered to base64 PNG.
//!
//! Rendering is fail-soft: any error or panic while drawing is logged and
//! reported as "no chart" so a broken chart never breaks a search.

mod canvas;

use crate::error::ChartError;
use crate::models::Recipe;
use canvas::{hex, Canvas};
use chrono::{DateTime, Utc};
use image::Rgb;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

pub use canvas::MIN_SIDE;

/// Label used for recipes whose difficulty was never set.
pub const UNSPECIFIED_DIFFICULTY: &str = "Unspecified";

const PALETTE: [Rgb<u8>; 6] = [
    Rgb([78, 121, 167]),
    Rgb([242, 142, 43]),
    Rgb([225, 87, 89]),
    Rgb([118, 183, 178]),
    Rgb([89, 161, 79]),
    Rgb([237, 201, 72]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Bar chart of recipe counts per difficulty
    Distribution,
    /// Pie chart of cook times split into fixed buckets
    TimeBuckets,
    /// Line chart of the running recipe count over creation time
    Growth,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::Distribution,
        ChartKind::TimeBuckets,
        ChartKind::Growth,
    ];

    /// The selector code submitted by the search form.
    pub fn code(self) -> &'static str {
        match self {
            ChartKind::Distribution => "#1",
            ChartKind::TimeBuckets => "#2",
            ChartKind::Growth => "#3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Distribution => "Bar: Recipes by Difficulty",
            ChartKind::TimeBuckets => "Pie: Cooking Time Distribution",
            ChartKind::Growth => "Line: Recipe Growth Over Time",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        ChartKind::ALL.into_iter().find(|k| k.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 640,
            height: 400,
        }
    }
}

/// One series entry, so the page can label what the image shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: String,
    pub value: usize,
    /// `#rrggbb`
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub kind: ChartKind,
    /// PNG bytes, base64 encoded with the standard alphabet
    pub image_base64: String,
    pub legend: Vec<LegendEntry>,
}

/// Count recipes per difficulty label, ordered by label.
pub fn difficulty_counts(recipes: &[Recipe]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for recipe in recipes {
        let label = recipe
            .difficulty
            .map(|d| d.as_str())
            .unwrap_or(UNSPECIFIED_DIFFICULTY);
        *counts.entry(label).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

/// Count recipes per cook-time bucket, dropping empty buckets.
pub fn cook_time_buckets(recipes: &[Recipe]) -> Vec<(&'static str, usize)> {
    let mut counts = [("<=30", 0usize), ("31-60", 0), (">60", 0)];
    for recipe in recipes {
        let slot = match recipe.cook_time_minutes {
            0..=30 => 0,
            31..=60 => 1,
            _ => 2,
        };
        counts[slot].1 += 1;
    }
    counts.into_iter().filter(|(_, n)| *n > 0).collect()
}

/// Creation timestamps in ascending order paired with the running count.
pub fn cumulative_growth(recipes: &[Recipe]) -> Vec<(DateTime<Utc>, usize)> {
    let mut stamps: Vec<DateTime<Utc>> = recipes.iter().filter_map(|r| r.created_at).collect();
    stamps.sort();
    stamps
        .into_iter()
        .enumerate()
        .map(|(i, at)| (at, i + 1))
        .collect()
}

enum Series {
    Bars(Vec<(String, usize)>),
    Pie(Vec<(&'static str, usize)>),
    Line(Vec<(DateTime<Utc>, usize)>),
}

impl Series {
    fn collect(kind: ChartKind, recipes: &[Recipe]) -> Option<Series> {
        let series = match kind {
            ChartKind::Distribution => Series::Bars(difficulty_counts(recipes)),
            ChartKind::TimeBuckets => Series::Pie(cook_time_buckets(recipes)),
            ChartKind::Growth => Series::Line(cumulative_growth(recipes)),
        };
        let empty = match &series {
            Series::Bars(v) => v.is_empty(),
            Series::Pie(v) => v.is_empty(),
            Series::Line(v) => v.is_empty(),
        };
        (!empty).then_some(series)
    }
}

/// Renders charts at a fixed size given at construction.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    config: ChartConfig,
    #[cfg(test)]
    panic_in_draw: bool,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        ChartRenderer {
            config,
            ..Default::default()
        }
    }

    /// A renderer whose drawing step always panics.
    #[cfg(test)]
    pub(crate) fn panicking() -> Self {
        ChartRenderer {
            panic_in_draw: true,
            ..Default::default()
        }
    }

    pub fn render(&self, kind: Option<ChartKind>, recipes: &[Recipe]) -> Option<Chart> {
        let kind = kind?;
        if recipes.is_empty() {
            return None;
        }
        let series = Series::collect(kind, recipes)?;

        match panic::catch_unwind(AssertUnwindSafe(|| self.draw(kind, &series))) {
            Ok(Ok(chart)) => Some(chart),
            Ok(Err(e)) => {
                tracing::warn!(chart = kind.code(), error = %e, "chart rendering failed");
                None
            }
            Err(_) => {
                tracing::warn!(chart = kind.code(), "chart rendering panicked");
                None
            }
        }
    }

    fn draw(&self, kind: ChartKind, series: &Series) -> Result<Chart, ChartError> {
        #[cfg(test)]
        if self.panic_in_draw {
            panic!("drawing {} blew up", kind.code());
        }
        let mut canvas = Canvas::new(self.config.width, self.config.height)?;
        let legend = match series {
            Series::Bars(bars) => draw_bars(&mut canvas, bars),
            Series::Pie(slices) => draw_pie(&mut canvas, slices),
            Series::Line(points) => draw_line(&mut canvas, points),
        };
        Ok(Chart {
            kind,
            image_base64: canvas.into_png_base64()?,
            legend,
        })
    }
}

fn draw_bars(canvas: &mut Canvas, bars: &[(String, usize)]) -> Vec<LegendEntry> {
    let area = canvas.plot_area();
    let max = bars.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1) as f64;
    canvas.draw_grid(area, max);

    let slot = area.width() / bars.len() as f64;
    let bar_width = slot * 0.6;
    let mut legend = Vec::with_capacity(bars.len());
    for (i, (label, count)) in bars.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let x0 = area.left + i as f64 * slot + (slot - bar_width) / 2.0;
        let top = area.bottom - *count as f64 / max * area.height();
        canvas.fill_rect(x0, top, x0 + bar_width, area.bottom, color);
        legend.push(LegendEntry {
            label: label.clone(),
            value: *count,
            color: hex(color),
        });
    }
    canvas.draw_axes(area);
    legend
}

fn draw_pie(canvas: &mut Canvas, slices: &[(&'static str, usize)]) -> Vec<LegendEntry> {
    let total: usize = slices.iter().map(|(_, n)| n).sum();
    let area = canvas.plot_area();
    let center = (
        (area.left + area.right) / 2.0,
        (area.top + area.bottom) / 2.0,
    );
    let radius = area.width().min(area.height()) / 2.0;

    let colored: Vec<(f64, Rgb<u8>)> = slices
        .iter()
        .enumerate()
        .map(|(i, (_, n))| (*n as f64 / total as f64, PALETTE[i % PALETTE.len()]))
        .collect();
    canvas.fill_pie(center, radius, &colored);

    slices
        .iter()
        .zip(&colored)
        .map(|((label, n), (_, color))| LegendEntry {
            label: label.to_string(),
            value: *n,
            color: hex(*color),
        })
        .collect()
}

fn draw_line(canvas: &mut Canvas, points: &[(DateTime<Utc>, usize)]) -> Vec<LegendEntry> {
    let color = PALETTE[0];
    let area = canvas.plot_area();
    let max = points.len() as f64;
    canvas.draw_grid(area, max);

    let first = points[0].0;
    let span = (points[points.len() - 1].0 - first).num_milliseconds() as f64;
    let last_index = (points.len() - 1).max(1) as f64;
    let coords: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, (at, count))| {
            let fraction = if span > 0.0 {
                (*at - first).num_milliseconds() as f64 / span
            } else if points.len() == 1 {
                0.5
            } else {
                i as f64 / last_index
            };
            let x = area.left + fraction * area.width();
            let y = area.bottom - *count as f64 / max * area.height();
            (x, y)
        })
        .collect();

    for pair in coords.windows(2) {
        canvas.draw_line(pair[0], pair[1], 3.0, color);
    }
    for &(x, y) in &coords {
        canvas.fill_rect(x - 3.5, y - 3.5, x + 3.5, y + 3.5, color);
    }
    canvas.draw_axes(area);

    points
        .iter()
        .map(|(at, count)| LegendEntry {
            label: at.format("%Y-%m-%d %H:%M").to_string(),
            value: *count,
            color: hex(color),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use chrono::TimeZone;

    fn recipe(id: i32, minutes: u32, difficulty: Option<Difficulty>, day: Option<u32>) -> Recipe {
        Recipe {
            id,
            name: format!("Recipe {}", id),
            description: String::new(),
            cook_time_minutes: minutes,
            difficulty,
            created_at: day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap()),
            image: None,
            ingredients: Vec::new(),
        }
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe(1, 25, Some(Difficulty::Easy), Some(3)),
            recipe(2, 45, Some(Difficulty::Medium), Some(1)),
            recipe(3, 120, Some(Difficulty::Hard), Some(2)),
            recipe(4, 10, Some(Difficulty::Easy), None),
            recipe(5, 30, None, Some(5)),
        ]
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(ChartKind::from_code("#1"), Some(ChartKind::Distribution));
        assert_eq!(ChartKind::from_code("#3"), Some(ChartKind::Growth));
        assert_eq!(ChartKind::from_code(""), None);
        assert_eq!(ChartKind::from_code("#4"), None);
    }

    #[test]
    fn test_difficulty_counts_sum_to_total() {
        let recipes = sample();
        let counts = difficulty_counts(&recipes);
        assert_eq!(
            counts,
            vec![
                ("Easy".to_string(), 2),
                ("Hard".to_string(), 1),
                ("Medium".to_string(), 1),
                (UNSPECIFIED_DIFFICULTY.to_string(), 1),
            ]
        );
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), recipes.len());
    }

    #[test]
    fn test_cook_time_buckets_boundaries() {
        let recipes = vec![
            recipe(1, 30, None, None),
            recipe(2, 31, None, None),
            recipe(3, 60, None, None),
            recipe(4, 61, None, None),
        ];
        assert_eq!(
            cook_time_buckets(&recipes),
            vec![("<=30", 1), ("31-60", 2), (">60", 1)]
        );
    }

    #[test]
    fn test_cook_time_buckets_drop_empty() {
        let recipes = vec![recipe(1, 90, None, None)];
        assert_eq!(cook_time_buckets(&recipes), vec![(">60", 1)]);
    }

    #[test]
    fn test_growth_is_sorted_and_cumulative() {
        let growth = cumulative_growth(&sample());
        let days: Vec<(u32, usize)> = growth
            .iter()
            .map(|(at, n)| (chrono::Datelike::day(at), *n))
            .collect();
        assert_eq!(days, vec![(1, 1), (2, 2), (3, 3), (5, 4)]);
    }

    #[test]
    fn test_no_chart_without_kind_or_rows() {
        let renderer = ChartRenderer::default();
        assert!(renderer.render(None, &sample()).is_none());
        assert!(renderer
            .render(Some(ChartKind::Distribution), &[])
            .is_none());
        assert!(renderer
            .render(ChartKind::from_code("bogus"), &sample())
            .is_none());
    }

    #[test]
    fn test_growth_without_timestamps_is_no_chart() {
        let renderer = ChartRenderer::default();
        let recipes = vec![recipe(1, 10, None, None), recipe(2, 20, None, None)];
        assert!(renderer.render(Some(ChartKind::Growth), &recipes).is_none());
    }

    #[test]
    fn test_each_kind_renders_png() {
        let renderer = ChartRenderer::new(ChartConfig {
            width: 320,
            height: 200,
        });
        for kind in ChartKind::ALL {
            let chart = renderer.render(Some(kind), &sample()).unwrap();
            assert_eq!(chart.kind, kind);
            assert!(chart.image_base64.len() > 100);
            let png = STANDARD.decode(&chart.image_base64).unwrap();
            let img = image::load_from_memory(&png).unwrap();
            assert_eq!((img.width(), img.height()), (320, 200));
            assert!(!chart.legend.is_empty());
        }
    }

    #[test]
    fn test_legend_matches_series() {
        let renderer = ChartRenderer::new(ChartConfig {
            width: 128,
            height: 128,
        });
        let chart = renderer
            .render(Some(ChartKind::TimeBuckets), &sample())
            .unwrap();
        let legend: Vec<(&str, usize)> = chart
            .legend
            .iter()
            .map(|e| (e.label.as_str(), e.value))
            .collect();
        assert_eq!(legend, vec![("<=30", 3), ("31-60", 1), (">60", 1)]);
    }

    #[test]
    fn test_render_failure_is_no_chart() {
        let renderer = ChartRenderer::new(ChartConfig {
            width: 8,
            height: 8,
        });
        assert!(renderer
            .render(Some(ChartKind::Distribution), &sample())
            .is_none());
    }

    #[test]
    fn test_render_panic_is_no_chart() {
        let renderer = ChartRenderer::panicking();
        for kind in ChartKind::ALL {
            assert!(renderer.render(Some(kind), &sample()).is_none());
        }
        // The renderer stays usable after a caught panic
        assert!(renderer.render(Some(ChartKind::Growth), &sample()).is_none());
        assert!(ChartRenderer::default()
            .render(Some(ChartKind::Growth), &sample())
            .is_some());
    }
}
