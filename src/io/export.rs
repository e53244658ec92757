//! Write datasets back to disk.
//!
//! - `write_dataset_json`: labelled series as pretty JSON (for notebooks etc.)
//! - `write_series_text`: the loader's own two/three column format

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::chart::resolve_labels;
use crate::domain::{Dataset, DatasetFile, LabeledSeries, Series};
use crate::error::{AppError, EXIT_OUTPUT};

/// Write the dataset with its positional labels resolved.
///
/// Fails like the renderer does when a series has no label.
pub fn write_dataset_json(path: &Path, dataset: &Dataset) -> Result<(), AppError> {
    let labels = resolve_labels(dataset)?;

    let doc = DatasetFile {
        tool: "gc".to_string(),
        series: dataset
            .series
            .iter()
            .zip(labels)
            .map(|(s, label)| LabeledSeries {
                label: label.to_string(),
                data: s.clone(),
            })
            .collect(),
    };

    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to create JSON export '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &doc)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write JSON export: {e}")))?;
    out.flush()
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write JSON export: {e}")))?;

    log::info!("wrote {}", path.display());
    Ok(())
}

/// Write a series as `<radius> <flux>[ <error>]` lines.
pub fn write_series_text(path: &Path, series: &Series) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to create '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    for (i, (r, f)) in series.points().enumerate() {
        let res = match series.flux_err.as_ref().and_then(|errs| errs.get(i)) {
            Some(e) => writeln!(out, "{r} {f} {e}"),
            None => writeln!(out, "{r} {f}"),
        };
        res.map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write '{}': {e}", path.display())))?;
    }
    out.flush()
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write '{}': {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::load_series;

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("gc-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn text_writer_is_readable_by_loader() {
        let series = Series {
            radius: vec![1.0, 2.5, 4.0],
            flux: vec![10.0, 33.3, 1.0e6],
            flux_err: Some(vec![0.1, 0.2, 1000.0]),
        };
        let path = scratch("series.txt");
        write_series_text(&path, &series).unwrap();

        let back = load_series(&path, true).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn json_export_carries_labels() {
        let ds = Dataset::new(
            vec![Series {
                radius: vec![1.0],
                flux: vec![2.0],
                flux_err: None,
            }],
            vec!["Data 1".to_string()],
        );
        let path = scratch("dataset.json");
        write_dataset_json(&path, &ds).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let doc: DatasetFile = serde_json::from_str(&text).unwrap();
        assert_eq!(doc.tool, "gc");
        assert_eq!(doc.series.len(), 1);
        assert_eq!(doc.series[0].label, "Data 1");
        assert_eq!(doc.series[0].data.flux, vec![2.0]);
    }

    #[test]
    fn json_export_rejects_missing_label() {
        let s = Series {
            radius: vec![1.0],
            flux: vec![2.0],
            flux_err: None,
        };
        let ds = Dataset::new(vec![s.clone(), s], vec!["Data 1".to_string()]);
        let err = write_dataset_json(&scratch("bad.json"), &ds).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_LABELS);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn json_export_reports_buffered_write_failure() {
        // Small enough to sit in the buffer until the final flush.
        let ds = Dataset::new(
            vec![Series {
                radius: vec![1.0],
                flux: vec![2.0],
                flux_err: None,
            }],
            vec!["Data 1".to_string()],
        );
        let err = write_dataset_json(Path::new("/dev/full"), &ds).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_OUTPUT);
    }
}
