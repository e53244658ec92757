//! Growth-curve text ingest.
//!
//! Input format: one sample per line, whitespace separated,
//! `<radius> <flux>` or `<radius> <flux> <error>` when errors are requested.
//! There is no header and no comment syntax.
//!
//! Parsing is strict: the first malformed line aborts the whole load. Nothing
//! from a failing line is appended, and the file handle is dropped on every
//! return path.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{Dataset, Series};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read '{}' at line {line}: {source}", .path.display())]
    Read {
        path: PathBuf,
        line: usize,
        source: std::io::Error,
    },

    #[error("{}:{line}: missing {column} column", .path.display())]
    MissingColumn {
        path: PathBuf,
        line: usize,
        column: &'static str,
    },

    #[error("{}:{line}: invalid {column} value '{token}': {source}", .path.display())]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        column: &'static str,
        token: String,
        source: ParseFloatError,
    },
}

/// Load every file in order, one `Series` per path.
///
/// Labels are attached as given. A label list shorter than `paths` is not an
/// error here; the renderer reports it when it needs the missing label.
pub fn load_dataset(paths: &[PathBuf], labels: &[String], with_errors: bool) -> Result<Dataset, LoadError> {
    let mut series = Vec::with_capacity(paths.len());
    for path in paths {
        series.push(load_series(path, with_errors)?);
    }
    log::info!(
        "loaded {} series ({} labels available)",
        series.len(),
        labels.len()
    );
    Ok(Dataset::new(series, labels.to_vec()))
}

/// Load one growth-curve file.
pub fn load_series(path: &Path, with_errors: bool) -> Result<Series, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let series = read_series(BufReader::new(file), path, with_errors)?;
    log::debug!("{}: {} samples", path.display(), series.len());
    Ok(series)
}

/// Parse growth-curve samples from any buffered reader.
///
/// `path` is only used to label errors.
pub fn read_series<R: BufRead>(reader: R, path: &Path, with_errors: bool) -> Result<Series, LoadError> {
    let mut radius = Vec::new();
    let mut flux = Vec::new();
    let mut errors = with_errors.then(Vec::new);

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            line: line_no,
            source,
        })?;

        let Some(sample) = parse_line(&line, line_no, path, with_errors)? else {
            continue;
        };

        radius.push(sample.radius);
        flux.push(sample.flux);
        if let (Some(errs), Some(e)) = (errors.as_mut(), sample.error) {
            errs.push(e);
        }
    }

    Ok(Series {
        radius,
        flux,
        flux_err: errors,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    radius: f64,
    flux: f64,
    error: Option<f64>,
}

/// Parse a single line. Blank lines yield `None`; extra tokens are ignored.
fn parse_line(line: &str, line_no: usize, path: &Path, with_errors: bool) -> Result<Option<Sample>, LoadError> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };

    let radius = parse_field(Some(first), "radius", line_no, path)?;
    let flux = parse_field(tokens.next(), "flux", line_no, path)?;
    let error = if with_errors {
        Some(parse_field(tokens.next(), "error", line_no, path)?)
    } else {
        None
    };

    Ok(Some(Sample { radius, flux, error }))
}

fn parse_field(token: Option<&str>, column: &'static str, line: usize, path: &Path) -> Result<f64, LoadError> {
    let token = token.ok_or_else(|| LoadError::MissingColumn {
        path: path.to_path_buf(),
        line,
        column,
    })?;
    token.parse::<f64>().map_err(|source| LoadError::InvalidNumber {
        path: path.to_path_buf(),
        line,
        column,
        token: token.to_string(),
        source,
    })
}
