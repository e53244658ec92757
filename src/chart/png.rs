//! PNG export.

use std::path::Path;

use plotters::prelude::*;

use super::{ChartError, ChartModel, ChartStyle, Layers, draw_growth_chart};
use crate::domain::{EXPORT_DPI, FIGURE_INCHES};

/// Pixel side of the exported square figure.
pub fn figure_side() -> u32 {
    FIGURE_INCHES * EXPORT_DPI
}

/// Render `model` into a square PNG at `EXPORT_DPI`.
///
/// The resolution only sets the pixel size: the encoder writes no `pHYs`
/// chunk, so viewers report their own default DPI.
pub fn save_png(path: &Path, model: &ChartModel, layers: Layers) -> Result<(), ChartError> {
    let side = figure_side();
    let root = BitMapBackend::new(path, (side, side)).into_drawing_area();

    draw_growth_chart(&root, model, &ChartStyle::bitmap(EXPORT_DPI), layers)
        .map_err(|e| ChartError::Draw(e.to_string()))?;

    root.present().map_err(|e| ChartError::Output {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::info!("saved {side}x{side} PNG to {}", path.display());
    Ok(())
}
