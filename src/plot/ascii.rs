//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks over ssh or in CI logs
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - curves: one marker per series (`*`, `+`, `x`, ...), joined by the same marker
//! - error bars: `|`
//! - legend below the grid

use crate::chart::{ChartModel, Curve, fmt_sci};

const MARKERS: [char; 10] = ['*', '+', 'x', 'o', '#', '@', '%', '&', '=', '~'];

/// Render a chart model as text.
pub fn render_ascii_plot(model: &ChartModel, width: usize, height: usize, error_bars: bool) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let [x_min, x_max] = model.x_bounds;
    let [y_min, y_max] = model.y_bounds;

    let mut grid = vec![vec![' '; width]; height];
    let project = |(x, y): (f64, f64)| {
        (
            map_x(x, x_min, x_max, width),
            map_y(y, y_min, y_max, height),
        )
    };

    for curve in &model.curves {
        draw_curve(&mut grid, curve, &project);
    }
    if error_bars {
        for curve in &model.curves {
            for bar in &curve.error_bars {
                let (x, top) = project((bar.x, bar.hi));
                let (_, bottom) = project((bar.x, bar.lo));
                for row in grid.iter_mut().take(bottom + 1).skip(top) {
                    if row[x] == ' ' {
                        row[x] = '|';
                    }
                }
            }
        }
    }
    // Sample markers last so they stay visible.
    for curve in &model.curves {
        let ch = marker(curve);
        for &p in &curve.points {
            if p.0.is_finite() && p.1.is_finite() {
                let (x, y) = project(p);
                grid[y][x] = ch;
            }
        }
    }

    let mut out = String::new();
    for line in model.title.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!(
        "radius=[{}, {}] px | flux=[{}, {}] ADU\n",
        fmt_sci(x_min),
        fmt_sci(x_max),
        fmt_sci(y_min),
        fmt_sci(y_max)
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for curve in &model.curves {
        out.push_str(&format!("{} {}\n", marker(curve), curve.label));
    }

    out
}

fn marker(curve: &Curve) -> char {
    MARKERS[curve.color % MARKERS.len()]
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &Curve, project: &impl Fn((f64, f64)) -> (usize, usize)) {
    let ch = marker(curve);
    let mut prev = None;
    for &p in &curve.points {
        if !(p.0.is_finite() && p.1.is_finite()) {
            prev = None;
            continue;
        }
        let (x, y) = project(p);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, ch);
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
