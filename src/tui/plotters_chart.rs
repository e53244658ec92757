//! Plotters-powered growth-curve widget for Ratatui.
//!
//! Drawing itself lives in `chart::draw_growth_chart`; this widget only adapts
//! it to the terminal buffer through `plotters-ratatui-backend`.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::{ChartModel, ChartStyle, Layers, draw_growth_chart};

/// A render-only view over a resolved chart.
pub struct GrowthPlottersChart<'a> {
    pub model: &'a ChartModel,
    pub layers: Layers,
}

impl<'a> Widget for GrowthPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 24 || area.height < 10 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let model = self.model;
        let layers = Layers {
            // The surrounding block already shows the title.
            title: false,
            ..self.layers
        };
        let style = ChartStyle::terminal();

        let widget = widget_fn(move |root| {
            draw_growth_chart(&root, model, &style, layers)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
