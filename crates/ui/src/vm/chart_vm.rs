use std::f64::consts::{FRAC_PI_2, TAU};

use eco_core::scoring::{CategoryScore, category_color};

/// Pie geometry in SVG user units.
pub const CHART_SIZE: f64 = 200.0;
pub const CHART_RADIUS: f64 = 90.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSliceVm {
    pub category: String,
    pub score: u32,
    pub color: &'static str,
    pub percent_label: String,
    /// SVG path for the wedge; `None` for empty slices and for a slice that fills the pie.
    pub path: Option<String>,
    pub full_circle: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartVm {
    pub slices: Vec<ChartSliceVm>,
    pub total: u32,
}

impl ChartVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[must_use]
pub fn map_chart(categories: &[CategoryScore]) -> ChartVm {
    let total: u32 = categories.iter().map(|c| c.score).sum();
    let center = CHART_SIZE / 2.0;
    // Start at twelve o'clock, clockwise.
    let mut angle = -FRAC_PI_2;

    let slices = categories
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let share = if total == 0 {
                0.0
            } else {
                f64::from(category.score) / f64::from(total)
            };
            let full_circle = category.score > 0 && category.score == total;
            let path = (category.score > 0 && !full_circle).then(|| {
                let sweep = share * TAU;
                let end = angle + sweep;
                let point = |at: f64| {
                    (
                        center + CHART_RADIUS * at.cos(),
                        center + CHART_RADIUS * at.sin(),
                    )
                };
                let (x0, y0) = point(angle);
                let (x1, y1) = point(end);
                let large_arc = u8::from(sweep > std::f64::consts::PI);
                format!(
                    "M {center} {center} L {x0:.2} {y0:.2} A {CHART_RADIUS} {CHART_RADIUS} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
                )
            });
            angle += share * TAU;

            ChartSliceVm {
                category: category.category.clone(),
                score: category.score,
                color: category_color(index),
                percent_label: format!("{:.0}%", share * 100.0),
                path,
                full_circle,
            }
        })
        .collect();

    ChartVm { slices, total }
}
