//! Growth-curve chart description and rendering.
//!
//! Everything data-dependent (labels, error-bar extents, axis bounds, tick
//! positions) is resolved into a `ChartModel` before any backend is touched.
//! The same model is then drawn into the terminal (`tui`), the text plot
//! (`plot::ascii`) or a PNG (`png`).

use std::path::PathBuf;

use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::style::RGBColor;
use thiserror::Error;

use crate::domain::{Dataset, Series, X_LABEL, Y_LABEL};

pub mod draw;
pub mod png;

pub use draw::{ChartStyle, Layers, draw_growth_chart};
pub use png::save_png;

/// Number of labelled ticks requested per axis.
pub const AXIS_TICKS: usize = 8;

/// matplotlib's default `tab10` cycle.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

#[derive(Debug, Error)]
pub enum ChartError {
    /// Positional label lookup ran past the end of the label list.
    #[error("Label index out of range: series {index} has no label ({available} labels for {series} series)")]
    MissingLabel {
        index: usize,
        available: usize,
        series: usize,
    },

    /// The data range cannot be mapped onto an axis with a finite span.
    #[error("{axis} values span [{min:e}, {max:e}], too wide to plot")]
    AxisRange {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("Failed to write '{}': {message}", .path.display())]
    Output { path: PathBuf, message: String },
}

/// Vertical error bar at `x` spanning `lo..=hi` around `mid`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBarSpec {
    pub x: f64,
    pub lo: f64,
    pub mid: f64,
    pub hi: f64,
}

/// One drawable curve.
#[derive(Debug, Clone)]
pub struct Curve {
    pub label: String,
    /// Index into `PALETTE` (wrapping).
    pub color: usize,
    pub points: Vec<(f64, f64)>,
    /// Empty when the series carries no error data.
    pub error_bars: Vec<ErrorBarSpec>,
}

impl Curve {
    pub fn rgb(&self) -> RGBColor {
        PALETTE[self.color % PALETTE.len()]
    }
}

/// A render-only chart description.
#[derive(Debug, Clone)]
pub struct ChartModel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub curves: Vec<Curve>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Grid line positions; identical to where the mesh puts tick labels.
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
}

impl ChartModel {
    /// Resolve a dataset into a chart.
    ///
    /// Fails with `ChartError::MissingLabel` if there are fewer labels than
    /// series; nothing is truncated or padded.
    pub fn from_dataset(dataset: &Dataset, title: &str) -> Result<Self, ChartError> {
        let labels = resolve_labels(dataset)?;

        let curves: Vec<Curve> = dataset
            .series
            .iter()
            .zip(labels)
            .enumerate()
            .map(|(i, (series, label))| Curve {
                label: label.to_string(),
                color: i,
                points: series.points().collect(),
                error_bars: error_bars(series),
            })
            .collect();

        let (x_min, x_max) = extent(curves.iter().flat_map(|c| c.points.iter().map(|p| p.0)));
        let (y_min, y_max) = extent(curves.iter().flat_map(|c| {
            c.points
                .iter()
                .map(|p| p.1)
                .chain(c.error_bars.iter().flat_map(|b| [b.lo, b.hi]))
        }));

        let x_bounds = axis_bounds("radius", x_min, x_max)?;
        let y_bounds = axis_bounds("flux", y_min, y_max)?;

        Ok(Self {
            title: title.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            curves,
            x_ticks: key_points(x_bounds),
            y_ticks: key_points(y_bounds),
            x_bounds,
            y_bounds,
        })
    }

    pub fn has_error_bars(&self) -> bool {
        self.curves.iter().any(|c| !c.error_bars.is_empty())
    }
}

/// Match each series with its label by position.
pub fn resolve_labels(dataset: &Dataset) -> Result<Vec<&str>, ChartError> {
    (0..dataset.series.len())
        .map(|index| {
            dataset.label(index).ok_or(ChartError::MissingLabel {
                index,
                available: dataset.labels.len(),
                series: dataset.series.len(),
            })
        })
        .collect()
}

/// Scientific-notation tick label, e.g. `1.50e4`.
pub fn fmt_sci(v: f64) -> String {
    format!("{v:.2e}")
}

fn error_bars(series: &Series) -> Vec<ErrorBarSpec> {
    let Some(errs) = &series.flux_err else {
        return Vec::new();
    };
    series
        .points()
        .zip(errs.iter())
        .map(|((x, y), e)| {
            let e = e.abs();
            ErrorBarSpec {
                x,
                lo: y - e,
                mid: y,
                hi: y + e,
            }
        })
        .collect()
}

/// Min/max over finite values; `(NaN, NaN)` when there are none.
fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::NAN, f64::NAN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn axis_bounds(axis: &'static str, min: f64, max: f64) -> Result<[f64; 2], ChartError> {
    pad_range(min, max, 0.05).ok_or(ChartError::AxisRange { axis, min, max })
}

/// Pad a range by `frac` of its span on both sides.
///
/// Degenerate input widens around the single value; no input falls back to
/// `[0, 1]`. Padded bounds are clamped to finite values; if their span still
/// overflows the padding is dropped, and `None` means even the bare range has
/// no finite span.
fn pad_range(min: f64, max: f64, frac: f64) -> Option<[f64; 2]> {
    if !(min.is_finite() && max.is_finite()) {
        return Some([0.0, 1.0]);
    }
    let padded = if max <= min {
        let half = (min.abs() * frac).max(0.5);
        [min - half, max + half]
    } else {
        // Halves keep the span finite for values near f64::MAX.
        let half_span = max / 2.0 - min / 2.0;
        let pad = (half_span * (2.0 * frac)).max(1e-12);
        [min - pad, max + pad]
    };
    let clamped = [padded[0].max(f64::MIN), padded[1].min(f64::MAX)];
    [clamped, [min, max]]
        .into_iter()
        .find(|&[lo, hi]| (hi - lo).is_finite())
}

fn key_points(bounds: [f64; 2]) -> Vec<f64> {
    let axis: RangedCoordf64 = (bounds[0]..bounds[1]).into();
    axis.key_points(AXIS_TICKS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(radius: &[f64], flux: &[f64], err: Option<&[f64]>) -> Series {
        Series {
            radius: radius.to_vec(),
            flux: flux.to_vec(),
            flux_err: err.map(<[f64]>::to_vec),
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn two_series_one_label_is_index_error() {
        let ds = Dataset::new(
            vec![
                series(&[1.0, 2.0], &[10.0, 20.0], None),
                series(&[1.0, 2.0], &[5.0, 6.0], None),
            ],
            labels(&["Data 1"]),
        );
        let err = ChartModel::from_dataset(&ds, "t").unwrap_err();
        match err {
            ChartError::MissingLabel {
                index,
                available,
                series,
            } => {
                assert_eq!(index, 1);
                assert_eq!(available, 1);
                assert_eq!(series, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extra_labels_are_unused() {
        let ds = Dataset::new(
            vec![series(&[1.0, 2.0], &[10.0, 20.0], None)],
            labels(&["Data 1", "Data 2", "Data 3"]),
        );
        let model = ChartModel::from_dataset(&ds, "t").unwrap();
        assert_eq!(model.curves.len(), 1);
        assert_eq!(model.curves[0].label, "Data 1");
    }

    #[test]
    fn no_error_data_means_no_error_bars() {
        let ds = Dataset::new(
            vec![series(&[1.0, 2.0, 3.0], &[100.0, 250.0, 300.0], None)],
            labels(&["Data 1"]),
        );
        let model = ChartModel::from_dataset(&ds, "t").unwrap();
        assert!(model.curves[0].error_bars.is_empty());
        assert!(!model.has_error_bars());
    }

    #[test]
    fn error_bars_widen_y_bounds() {
        let ds = Dataset::new(
            vec![
                series(&[1.0, 2.0], &[100.0, 200.0], Some(&[50.0, 50.0])),
                series(&[1.0, 2.0], &[120.0, 180.0], None),
            ],
            labels(&["a", "b"]),
        );
        let model = ChartModel::from_dataset(&ds, "t").unwrap();
        assert_eq!(model.curves[0].error_bars.len(), 2);
        assert!(model.curves[1].error_bars.is_empty());
        assert_eq!(
            model.curves[0].error_bars[0],
            ErrorBarSpec {
                x: 1.0,
                lo: 50.0,
                mid: 100.0,
                hi: 150.0
            }
        );
        // 50..250 padded by 5%
        assert!((model.y_bounds[0] - 40.0).abs() < 1e-9);
        assert!((model.y_bounds[1] - 260.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_and_empty_ranges_are_widened() {
        assert_eq!(pad_range(f64::NAN, f64::NAN, 0.05), Some([0.0, 1.0]));
        assert_eq!(pad_range(3.0, 3.0, 0.05), Some([2.5, 3.5]));
        assert_eq!(pad_range(1000.0, 1000.0, 0.05), Some([950.0, 1050.0]));
    }

    #[test]
    fn huge_ranges_stay_finite_or_fail() {
        let [lo, hi] = pad_range(0.0, 1.7e308, 0.05).unwrap();
        assert!(lo.is_finite() && hi.is_finite() && (hi - lo).is_finite());
        assert!(lo <= 0.0 && hi >= 1.7e308);

        let [lo, hi] = pad_range(f64::MAX, f64::MAX, 0.05).unwrap();
        assert!(lo < hi);
        assert_eq!(hi, f64::MAX);
        assert!(pad_range(-1.0e308, 1.0e308, 0.05).is_none());
    }

    #[test]
    fn unplottable_radius_span_is_an_error() {
        let ds = Dataset::new(
            vec![series(&[-1.0e308, 1.0e308], &[1.0, 2.0], None)],
            labels(&["Data 1"]),
        );
        let err = ChartModel::from_dataset(&ds, "t").unwrap_err();
        assert!(matches!(err, ChartError::AxisRange { axis: "radius", .. }));
    }

    #[test]
    fn large_offset_with_tiny_spread_resolves() {
        let ds = Dataset::new(
            vec![series(&[1.0e16, 1.0e16 + 2.0], &[1.0e9, 1.0e9 + 1.0e-6], None)],
            labels(&["Data 1"]),
        );
        let model = ChartModel::from_dataset(&ds, "t").unwrap();
        assert!(model.x_bounds[0] < model.x_bounds[1]);
        assert!(!model.y_ticks.is_empty());
    }

    #[test]
    fn ticks_fall_inside_bounds() {
        let ds = Dataset::new(
            vec![series(&[0.0, 30.0], &[0.0, 2.5e5], None)],
            labels(&["Data 1"]),
        );
        let model = ChartModel::from_dataset(&ds, "t").unwrap();
        assert!(!model.x_ticks.is_empty());
        assert!(!model.y_ticks.is_empty());
        assert!(model.x_ticks.len() <= AXIS_TICKS);
        for t in &model.y_ticks {
            assert!(*t >= model.y_bounds[0] && *t <= model.y_bounds[1]);
        }
    }

    #[test]
    fn sci_format() {
        assert_eq!(fmt_sci(15000.0), "1.50e4");
        assert_eq!(fmt_sci(0.000123), "1.23e-4");
        assert_eq!(fmt_sci(-2.5e6), "-2.50e6");
        assert_eq!(fmt_sci(0.0), "0.00e0");
    }
}
