//! Shared "load → chart" logic used by every display mode.
//!
//! Keeping this in one place means the TUI, the ASCII printer, the PNG export
//! and the JSON export all see the same resolved data.

use crate::chart::ChartModel;
use crate::domain::{Dataset, PlotConfig};
use crate::error::AppError;
use crate::io::load_dataset;

/// Everything computed before anything is shown or written.
#[derive(Debug, Clone)]
pub struct PlotRun {
    pub dataset: Dataset,
    pub model: ChartModel,
}

/// Load all inputs, then resolve the chart.
///
/// Loading finishes completely before labels are matched; a label shortfall
/// is reported from the chart step, after every file has been read.
pub fn prepare(config: &PlotConfig) -> Result<PlotRun, AppError> {
    let dataset = load_dataset(&config.inputs, &config.labels, config.with_errors)?;
    let model = ChartModel::from_dataset(&dataset, &config.title)?;

    log::debug!(
        "chart: {} curves, x={:?}, y={:?}",
        model.curves.len(),
        model.x_bounds,
        model.y_bounds
    );

    Ok(PlotRun { dataset, model })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXIT_INPUT, EXIT_LABELS};
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gc-pipeline-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn prepares_single_series_with_default_labels() {
        let dir = scratch_dir("single");
        let path = dir.join("gc.txt");
        std::fs::write(&path, "1.0 100.0\n2.0 250.0\n3.0 300.0\n").unwrap();

        let config = PlotConfig {
            inputs: vec![path],
            ..PlotConfig::default()
        };
        let run = prepare(&config).unwrap();
        assert_eq!(run.dataset.series[0].radius, vec![1.0, 2.0, 3.0]);
        assert_eq!(run.model.curves.len(), 1);
        assert_eq!(run.model.curves[0].label, "Data 1");
        assert!(run.model.curves[0].error_bars.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn label_shortfall_maps_to_label_exit_code() {
        let dir = scratch_dir("labels");
        let a = dir.join("a.txt");
        let b = dir.join("b.txt");
        std::fs::write(&a, "1 1\n").unwrap();
        std::fs::write(&b, "1 2\n").unwrap();

        let config = PlotConfig {
            inputs: vec![a, b],
            labels: vec!["Data 1".to_string()],
            ..PlotConfig::default()
        };
        let err = prepare(&config).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_LABELS);
        assert!(err.to_string().contains("out of range"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn malformed_input_maps_to_input_exit_code() {
        let dir = scratch_dir("bad");
        let path = dir.join("bad.txt");
        std::fs::write(&path, "1.0 2.0\nabc 1.0\n").unwrap();

        let config = PlotConfig {
            inputs: vec![path],
            ..PlotConfig::default()
        };
        let err = prepare(&config).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("abc"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
