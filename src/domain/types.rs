//! Shared domain types.
//!
//! Measurement data is immutable once loaded: the loader builds a `Dataset`,
//! the renderer borrows it, and nothing writes back.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Input file used when `gc` is run without arguments.
pub const DEFAULT_INPUT: &str = "gc.txt";

/// Fixed legend labels, assigned to input files by position.
pub const DEFAULT_LABELS: [&str; 5] = ["Data 1", "Data 2", "Data 3", "Data 4", "Data 5"];

pub const DEFAULT_TITLE: &str = "Analysis of Flux Variation:\nGrowth Curves for Potential Variable Stars";
pub const X_LABEL: &str = "Radius [px]";
pub const Y_LABEL: &str = "Flux [ADU]";

/// Exported figures are square: `FIGURE_INCHES` × `FIGURE_INCHES` at `EXPORT_DPI`.
pub const FIGURE_INCHES: u32 = 10;
pub const EXPORT_DPI: u32 = 300;

/// One growth curve: parallel radius/flux samples and optional flux errors.
///
/// Invariant: `radius.len() == flux.len()`, and `flux_err` (when present) has
/// the same length. The loader is the only producer and upholds this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub radius: Vec<f64>,
    pub flux: Vec<f64>,
    pub flux_err: Option<Vec<f64>>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.flux_err.is_some()
    }

    /// `(radius, flux)` pairs in file order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.radius.iter().copied().zip(self.flux.iter().copied())
    }
}

/// All loaded series plus the label list they are matched against.
///
/// Labels are kept separate from the series on purpose: they are assigned by
/// position at render time and the two lists are never length-checked here.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub series: Vec<Series>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn new(series: Vec<Series>, labels: Vec<String>) -> Self {
        Self { series, labels }
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Total number of samples across all series.
    pub fn n_points(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}

/// Where the chart is shown before the optional PNG save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Full-screen interactive terminal chart.
    Tui,
    /// Fixed-size text plot printed to stdout.
    Ascii,
    /// No on-screen output (save/export only).
    None,
}

/// A `gc plot` run as understood by the pipeline.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub inputs: Vec<PathBuf>,
    pub labels: Vec<String>,
    /// Parse a third column as the flux error.
    pub with_errors: bool,
    pub title: String,
    pub display: DisplayMode,
    pub output: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub ascii_width: usize,
    pub ascii_height: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from(DEFAULT_INPUT)],
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            with_errors: false,
            title: DEFAULT_TITLE.to_string(),
            display: DisplayMode::Tui,
            output: None,
            export_json: None,
            ascii_width: 80,
            ascii_height: 24,
        }
    }
}

/// Parameters of the synthetic growth-curve generator.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    pub points: usize,
    /// Radius increment between samples (px).
    pub step: f64,
    /// PSF full width at half maximum (px).
    pub fwhm: f64,
    /// Total source flux (ADU).
    pub total_flux: f64,
    /// Residual sky level per px² (ADU); may be negative for over-subtracted sky.
    pub sky: f64,
    pub with_errors: bool,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            points: 30,
            step: 1.0,
            fwhm: 4.0,
            total_flux: 2.5e5,
            sky: 0.0,
            with_errors: false,
        }
    }
}

/// JSON export of a resolved dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFile {
    pub tool: String,
    pub series: Vec<LabeledSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub label: String,
    #[serde(flatten)]
    pub data: Series,
}
