//! Chart Viewer Widget
//! Central panel that paints the animated bar chart with egui's painter.
//! The chart is laid out in a fixed view box and scaled to fit the panel.

use crate::charts::{BarGeometry, ChartFrame, ChartView};
use crate::config::ChartConfig;
use egui::epaint::TextShape;
use egui::{vec2, Align2, Color32, FontId, Painter, Pos2, Rect, RichText, Sense, Stroke};

/// Length of axis tick marks, in view box units
const TICK_SIZE: f32 = 6.0;
/// Gap between tick mark and label
const TICK_PADDING: f32 = 3.0;

/// Uniform scale from view box coordinates to screen, centred in the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    origin: Pos2,
    scale: f32,
}

impl ViewBox {
    pub fn fit(panel: Rect, width: f32, height: f32) -> Self {
        let scale = (panel.width() / width).min(panel.height() / height).max(0.0);
        let origin = panel.center() - vec2(width * scale, height * scale) / 2.0;
        Self { origin, scale }
    }

    pub fn pos(&self, x: f32, y: f32) -> Pos2 {
        self.origin + vec2(x, y) * self.scale
    }

    pub fn rect(&self, geometry: &BarGeometry) -> Rect {
        Rect::from_min_size(
            self.pos(geometry.x, geometry.y),
            vec2(geometry.width, geometry.height) * self.scale,
        )
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

/// Chart container: the chart once data is loaded, or a message.
pub struct ChartViewer {
    chart: Option<ChartView>,
    error: Option<String>,
    tick_font_size: f32,
    label_angle: f32,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self::new(&ChartConfig::default())
    }
}

impl ChartViewer {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            chart: None,
            error: None,
            tick_font_size: config.tick_font_size,
            label_angle: config.label_rotation_deg.to_radians(),
        }
    }

    pub fn set_chart(&mut self, chart: ChartView) {
        self.error = None;
        self.chart = Some(chart);
    }

    /// Replace the chart with an error message.
    pub fn set_error(&mut self, message: String) {
        self.chart = None;
        self.error = Some(message);
    }

    pub fn clear(&mut self) {
        self.chart = None;
        self.error = None;
    }

    #[cfg(test)]
    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn chart_mut(&mut self) -> Option<&mut ChartView> {
        self.chart.as_mut()
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, is_loading: bool) {
        if let Some(error) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(format!("⚠ {}", error))
                        .size(18.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            });
            return;
        }

        let Some(chart) = self.chart.as_mut() else {
            ui.centered_and_justified(|ui| {
                if is_loading {
                    ui.spinner();
                } else {
                    ui.label(RichText::new("No Data").size(20.0));
                }
            });
            return;
        };

        let now = ctx.input(|i| i.time);
        chart.prune(now);
        if chart.is_animating(now) {
            ctx.request_repaint();
        }

        let frame = chart.frame(now);
        let layout = *chart.layout();

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let view = ViewBox::fit(response.rect, layout.width, layout.height);
        let text_color = ui.visuals().text_color();

        let mut tooltip: Option<String> = None;
        for bar in &frame.bars {
            let rect = view.rect(&bar.rect);
            painter.rect_filled(rect, 0.0, bar.color);
            if let Some(pointer) = response.hover_pos() {
                if rect.contains(pointer) {
                    tooltip = Some(bar.tooltip.clone());
                }
            }
        }

        self.paint_y_axis(&painter, &view, &frame, layout.margins.left, text_color);
        self.paint_x_axis(&painter, &view, &frame, text_color);

        if let Some(text) = tooltip {
            response.on_hover_text_at_pointer(text);
        }
    }

    fn paint_y_axis(
        &self,
        painter: &Painter,
        view: &ViewBox,
        frame: &ChartFrame,
        axis_x: f32,
        color: Color32,
    ) {
        let stroke = Stroke::new(1.0, color);
        let font = FontId::proportional(self.tick_font_size * view.scale());

        for tick in &frame.y_ticks {
            painter.line_segment(
                [view.pos(axis_x - TICK_SIZE, tick.y), view.pos(axis_x, tick.y)],
                stroke,
            );
            painter.text(
                view.pos(axis_x - TICK_SIZE - TICK_PADDING, tick.y),
                Align2::RIGHT_CENTER,
                &tick.label,
                font.clone(),
                color,
            );
        }
    }

    fn paint_x_axis(&self, painter: &Painter, view: &ViewBox, frame: &ChartFrame, color: Color32) {
        let stroke = Stroke::new(1.0, color);
        let (left, right) = frame.x_range;
        painter.line_segment(
            [view.pos(left, frame.baseline), view.pos(right, frame.baseline)],
            stroke,
        );

        let font = FontId::proportional(self.tick_font_size * view.scale());
        for bar in frame.bars.iter().filter(|b| b.show_label) {
            let x = bar.rect.center_x();
            painter.line_segment(
                [
                    view.pos(x, frame.baseline),
                    view.pos(x, frame.baseline + TICK_SIZE),
                ],
                stroke,
            );
            let anchor = view.pos(x, frame.baseline + TICK_SIZE + TICK_PADDING);
            paint_rotated_label(painter, anchor, &bar.key, font.clone(), color, self.label_angle);
        }
    }
}

/// Paint `text` rotated by `angle` so that its end sits on `anchor`.
fn paint_rotated_label(
    painter: &Painter,
    anchor: Pos2,
    text: &str,
    font: FontId,
    color: Color32,
    angle: f32,
) {
    let galley = painter.layout_no_wrap(text.to_string(), font, color);
    let size = galley.size();
    let (sin, cos) = angle.sin_cos();
    let along = vec2(cos, sin);
    let across = vec2(-sin, cos);
    let pos = anchor - along * size.x - across * (size.y / 2.0);
    painter.add(TextShape::new(pos, galley, color).with_angle(angle));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_box_fits_width_and_centres_vertically() {
        let panel = Rect::from_min_size(Pos2::new(0.0, 0.0), vec2(750.0, 1000.0));
        let view = ViewBox::fit(panel, 1500.0, 950.0);

        assert_eq!(view.scale(), 0.5);
        let top_left = view.pos(0.0, 0.0);
        let bottom_right = view.pos(1500.0, 950.0);
        assert_eq!(top_left.x, 0.0);
        assert_eq!(bottom_right.x, 750.0);
        assert!((top_left.y - (1000.0 - 475.0) / 2.0).abs() < 1e-3);
    }

    #[test]
    fn bar_rect_is_scaled() {
        let panel = Rect::from_min_size(Pos2::new(10.0, 20.0), vec2(1500.0, 950.0));
        let view = ViewBox::fit(panel, 1500.0, 950.0);
        let rect = view.rect(&BarGeometry {
            x: 100.0,
            y: 200.0,
            width: 50.0,
            height: 400.0,
        });
        assert_eq!(rect.min, Pos2::new(110.0, 220.0));
        assert_eq!(rect.size(), vec2(50.0, 400.0));
    }

    #[test]
    fn error_replaces_chart() {
        let mut viewer = ChartViewer::default();
        viewer.set_error("Failed to load".to_string());
        assert!(viewer.chart_mut().is_none());
        assert_eq!(viewer.error.as_deref(), Some("Failed to load"));

        viewer.clear();
        assert!(viewer.error.is_none());
    }
}
