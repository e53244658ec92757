//! Backend-agnostic growth-curve drawing.
//!
//! `draw_growth_chart` is generic over the Plotters backend so the PNG export
//! and the terminal widget share one implementation. Only sizes differ, and
//! those live in `ChartStyle`.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ChartModel, fmt_sci};

/// Grid colour: matplotlib grey `0.75`.
const GRID_GREY: RGBColor = RGBColor(191, 191, 191);

/// Dash-dot pattern as fractions of the axis span: dash, gap, dot, gap.
const DASH_DOT: [f64; 4] = [0.02, 0.008, 0.004, 0.008];

/// Fraction of the span covered by one dash-dot period.
const DASH_DOT_PERIOD: f64 = DASH_DOT[0] + DASH_DOT[1] + DASH_DOT[2] + DASH_DOT[3];

/// Size and colour settings for one output medium.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub font_family: &'static str,
    pub title_px: u32,
    pub label_px: u32,
    pub tick_px: u32,
    pub line_width: u32,
    pub grid_width: u32,
    pub error_cap: u32,
    pub legend_line: i32,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub foreground: RGBColor,
    /// `None` leaves the backend's existing content (terminal background).
    pub background: Option<RGBColor>,
}

impl ChartStyle {
    /// Raster output at `dpi`; point sizes follow matplotlib defaults.
    pub fn bitmap(dpi: u32) -> Self {
        let pt = |points: f64| ((points * dpi as f64) / 72.0).round().max(1.0) as u32;
        Self {
            font_family: "monospace",
            title_px: pt(12.0),
            label_px: pt(12.0),
            tick_px: pt(12.0),
            line_width: pt(1.5),
            grid_width: pt(0.8),
            error_cap: pt(6.0),
            legend_line: pt(20.0) as i32,
            margin: pt(18.0),
            x_label_area: pt(48.0),
            y_label_area: pt(84.0),
            foreground: BLACK,
            background: Some(WHITE),
        }
    }

    /// Terminal cells via `plotters-ratatui-backend`.
    pub fn terminal() -> Self {
        Self {
            font_family: "monospace",
            title_px: 1,
            label_px: 10,
            tick_px: 10,
            line_width: 1,
            grid_width: 1,
            error_cap: 1,
            legend_line: 4,
            margin: 1,
            x_label_area: 3,
            y_label_area: 9,
            foreground: WHITE,
            background: None,
        }
    }
}

/// Optional chart layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    pub title: bool,
    pub grid: bool,
    pub error_bars: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            title: true,
            grid: true,
            error_bars: true,
        }
    }
}

/// Draw the full chart into `root`.
pub fn draw_growth_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    model: &ChartModel,
    style: &ChartStyle,
    layers: Layers,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if let Some(bg) = style.background {
        root.fill(&bg)?;
    }

    let title_height = if layers.title {
        draw_title(root, &model.title, style)?
    } else {
        0
    };
    let (_, body) = root.split_vertically(title_height);

    let [x0, x1] = model.x_bounds;
    let [y0, y1] = model.y_bounds;

    let mut chart = ChartBuilder::on(&body)
        .margin(style.margin)
        .x_label_area_size(style.x_label_area)
        .y_label_area_size(style.y_label_area)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let tick_font = (style.font_family, f64::from(style.tick_px))
        .into_font()
        .color(&style.foreground);
    let desc_font = (style.font_family, f64::from(style.label_px))
        .into_font()
        .color(&style.foreground);

    // Mesh lines are off; the dash-dot grid below replaces them.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(super::AXIS_TICKS)
        .y_labels(super::AXIS_TICKS)
        .x_desc(model.x_label.as_str())
        .y_desc(model.y_label.as_str())
        .x_label_formatter(&|v| fmt_sci(*v))
        .y_label_formatter(&|v| fmt_sci(*v))
        .label_style(tick_font.clone())
        .axis_desc_style(desc_font)
        .axis_style(&style.foreground)
        .draw()?;

    if layers.grid {
        let grid = ShapeStyle::from(&GRID_GREY).stroke_width(style.grid_width);
        let vertical = model.x_ticks.iter().flat_map(|&x| {
            dash_dot(y0, y1)
                .into_iter()
                .map(move |(a, b)| PathElement::new(vec![(x, a), (x, b)], grid))
        });
        chart.draw_series(vertical)?;
        let horizontal = model.y_ticks.iter().flat_map(|&y| {
            dash_dot(x0, x1)
                .into_iter()
                .map(move |(a, b)| PathElement::new(vec![(a, y), (b, y)], grid))
        });
        chart.draw_series(horizontal)?;
    }

    for curve in &model.curves {
        let line = curve.rgb().stroke_width(style.line_width);
        let legend_len = style.legend_line;

        chart
            .draw_series(LineSeries::new(curve.points.iter().copied(), line))?
            .label(curve.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], line));

        if layers.error_bars && !curve.error_bars.is_empty() {
            chart.draw_series(
                curve
                    .error_bars
                    .iter()
                    .map(|b| ErrorBar::new_vertical(b.x, b.lo, b.mid, b.hi, line, style.error_cap)),
            )?;
        }
    }

    let mut legend = chart.configure_series_labels();
    legend
        .position(SeriesLabelPosition::UpperLeft)
        .border_style(&style.foreground)
        .label_font(tick_font);
    if let Some(bg) = style.background {
        legend.background_style(&bg.mix(0.8));
    }
    legend.draw()?;

    Ok(())
}

/// Draw the (possibly multi-line) title; returns the height it occupies.
fn draw_title<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    style: &ChartStyle,
) -> Result<u32, DrawingAreaErrorKind<DB::ErrorType>> {
    let lines: Vec<&str> = title.lines().collect();
    if lines.is_empty() {
        return Ok(0);
    }

    let line_h = style.title_px + style.title_px / 4;
    let (width, _) = root.dim_in_pixel();
    let font = (style.font_family, f64::from(style.title_px))
        .into_font()
        .color(&style.foreground)
        .pos(Pos::new(HPos::Center, VPos::Top));

    for (i, line) in lines.iter().enumerate() {
        let y = style.margin + line_h * i as u32;
        root.draw_text(line, &font, ((width / 2) as i32, y as i32))?;
    }

    Ok(style.margin + line_h * lines.len() as u32)
}

/// Split `[from, to]` into dash-dot segments along one axis.
///
/// Segment ends are computed from the period index rather than accumulated, so
/// the count is bounded even when the span is below the resolution of `from`.
/// Segments that collapse to a point are dropped.
pub(crate) fn dash_dot(from: f64, to: f64) -> Vec<(f64, f64)> {
    let span = to - from;
    if !(span.is_finite() && span > 0.0) {
        return Vec::new();
    }

    let at = |frac: f64| (from + frac * span).min(to);
    let periods = (1.0 / DASH_DOT_PERIOD).ceil() as usize;
    let dot_start = DASH_DOT[0] + DASH_DOT[1];

    let mut out = Vec::with_capacity(periods * 2);
    for k in 0..periods {
        let base = k as f64 * DASH_DOT_PERIOD;
        let ink = [
            (base, base + DASH_DOT[0]),
            (base + dot_start, base + dot_start + DASH_DOT[2]),
        ];
        for (a, b) in ink {
            let (start, end) = (at(a), at(b));
            if end > start {
                out.push((start, end));
            }
        }
    }
    out
}
