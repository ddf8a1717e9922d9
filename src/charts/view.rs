//! Chart View
//! Owns the selected year and sort mode, and turns the metric table into
//! keyed, animated bars with matching scales.

use crate::charts::palette::CategoryPalette;
use crate::charts::scale::{BandScale, LinearScale};
use crate::charts::transition::{AnimatedBar, BarGeometry, BarPhase, Transition};
use crate::config::{ChartConfig, Margins};
use crate::data::MetricRow;
use egui::Color32;
use std::collections::HashMap;
use tracing::{debug, info};

/// Approximate number of ticks on the count axis
const Y_TICK_COUNT: usize = 10;

/// Ordering applied to the bars of the selected year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Metric table order
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::None, SortMode::Ascending, SortMode::Descending];

    /// Identifier used by the sort control (`none`, `cntAsce`, `cntDesc`).
    pub fn id(&self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::Ascending => "cntAsce",
            SortMode::Descending => "cntDesc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::None => "No sorting",
            SortMode::Ascending => "Count ascending",
            SortMode::Descending => "Count descending",
        }
    }
}

/// User-controlled session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub year: i32,
    pub sort_mode: SortMode,
}

/// One visible bar before layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceEntry {
    pub disaster_type: String,
    pub value: u64,
}

/// State changes coming from the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMessage {
    YearChanged(i32),
    SortChanged(SortMode),
}

/// Rows of `year`, projected to (type, value) and ordered per `sort_mode`.
pub fn visible_slice(rows: &[MetricRow], state: ViewState) -> Vec<SliceEntry> {
    let mut slice: Vec<SliceEntry> = rows
        .iter()
        .filter(|r| r.year == state.year)
        .map(|r| SliceEntry {
            disaster_type: r.disaster_type.clone(),
            value: r.value,
        })
        .collect();
    sort_slice(&mut slice, state.sort_mode);
    slice
}

/// Stable sort by value; `SortMode::None` leaves the order untouched.
pub fn sort_slice(slice: &mut [SliceEntry], mode: SortMode) {
    match mode {
        SortMode::None => {}
        SortMode::Ascending => slice.sort_by(|a, b| a.value.cmp(&b.value)),
        SortMode::Descending => slice.sort_by(|a, b| b.value.cmp(&a.value)),
    }
}

/// Plotting rectangle inside the view box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub band_padding: f32,
}

impl ChartLayout {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            margins: config.margins,
            band_padding: config.band_padding,
        }
    }

    pub fn x_range(&self) -> (f32, f32) {
        (self.margins.left, self.width - self.margins.right)
    }

    /// Bottom first: counts grow upwards.
    pub fn y_range(&self) -> (f32, f32) {
        (self.height - self.margins.bottom, self.margins.top)
    }
}

/// A bar as it should be painted at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct BarFrame {
    pub key: String,
    pub color: Color32,
    pub rect: BarGeometry,
    pub tooltip: String,
    /// Exiting bars lose their axis label immediately.
    pub show_label: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YTick {
    pub value: f64,
    pub y: f32,
    pub label: String,
}

/// Interpolated snapshot of the chart for painting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub bars: Vec<BarFrame>,
    pub y_ticks: Vec<YTick>,
    pub baseline: f32,
    pub x_range: (f32, f32),
}

/// Bar chart of one year's disaster counts.
pub struct ChartView {
    rows: Vec<MetricRow>,
    palette: CategoryPalette,
    state: ViewState,
    slice: Vec<SliceEntry>,
    layout: ChartLayout,
    duration: f64,
    y_from: LinearScale,
    y_to: LinearScale,
    bars: Vec<AnimatedBar>,
    transition: Transition,
}

impl ChartView {
    /// Build the view from the metric table and the controls' initial state,
    /// and lay out the first frame without animation.
    pub fn initialize(
        rows: Vec<MetricRow>,
        categories: &[String],
        initial: ViewState,
        config: &ChartConfig,
        now: f64,
    ) -> Self {
        let layout = ChartLayout::from_config(config);
        let y_scale = LinearScale::for_counts(None, layout.y_range());
        let slice = visible_slice(&rows, initial);

        let mut view = Self {
            rows,
            palette: CategoryPalette::new(categories),
            state: initial,
            slice,
            layout,
            duration: config.transition_secs(),
            y_from: y_scale,
            y_to: y_scale,
            bars: Vec::new(),
            transition: Transition::immediate(now),
        };
        view.render(false, now);

        info!(
            year = initial.year,
            sort = initial.sort_mode.id(),
            visible = view.slice.len(),
            "chart initialized"
        );
        view
    }

    pub fn on_year_change(&mut self, year: i32, now: f64) {
        self.dispatch(ChartMessage::YearChanged(year), now);
    }

    pub fn on_sort_change(&mut self, mode: SortMode, now: f64) {
        self.dispatch(ChartMessage::SortChanged(mode), now);
    }

    /// Apply a control change: update state, recompute the slice and run one
    /// animated render pass.
    pub fn dispatch(&mut self, message: ChartMessage, now: f64) {
        match message {
            ChartMessage::YearChanged(year) => self.state.year = year,
            ChartMessage::SortChanged(mode) => self.state.sort_mode = mode,
        }
        self.slice = visible_slice(&self.rows, self.state);

        debug!(
            year = self.state.year,
            sort = self.state.sort_mode.id(),
            visible = self.slice.len(),
            "chart state changed"
        );

        self.render(true, now);
    }

    /// Rebuild scales and re-key the bars against the current slice.
    ///
    /// Bars already on screen (including ones still exiting) continue from
    /// wherever they are at `now`.
    pub fn render(&mut self, animated: bool, now: f64) {
        self.prune(now);
        let t_prev = self.transition.progress(now);
        let current_y = self.y_from.lerp(&self.y_to, t_prev);

        let keys: Vec<String> = self.slice.iter().map(|e| e.disaster_type.clone()).collect();
        let x_scale = BandScale::new(keys, self.layout.x_range(), self.layout.band_padding);
        let max_value = self.slice.iter().map(|e| e.value).max();
        let y_scale = LinearScale::for_counts(max_value, self.layout.y_range());
        let baseline = y_scale.map(0.0);
        let bandwidth = x_scale.bandwidth();

        let mut current: HashMap<&str, BarGeometry> = self
            .bars
            .iter()
            .map(|b| (b.key.as_str(), b.geometry_at(t_prev)))
            .collect();

        let mut next: Vec<AnimatedBar> = Vec::with_capacity(self.slice.len());
        for entry in &self.slice {
            let key = entry.disaster_type.as_str();
            let x = x_scale.position(key).unwrap_or(self.layout.margins.left);
            let top = y_scale.map(entry.value as f64);
            let target = BarGeometry {
                x,
                y: top,
                width: bandwidth,
                height: baseline - top,
            };

            let (phase, from) = match current.remove(key) {
                Some(geometry) => (BarPhase::Update, geometry),
                None => (BarPhase::Enter, BarGeometry::collapsed(x, bandwidth, baseline)),
            };

            next.push(AnimatedBar {
                key: entry.disaster_type.clone(),
                value: entry.value,
                color: self.palette.color(key),
                phase,
                from: if animated { from } else { target },
                to: target,
            });
        }

        if animated {
            for bar in &self.bars {
                let Some(geometry) = current.get(bar.key.as_str()) else {
                    continue;
                };
                next.push(AnimatedBar {
                    key: bar.key.clone(),
                    value: bar.value,
                    color: bar.color,
                    phase: BarPhase::Exit,
                    from: *geometry,
                    to: BarGeometry::collapsed(geometry.x, geometry.width, baseline),
                });
            }
        }

        self.bars = next;
        self.y_from = if animated { current_y } else { y_scale };
        self.y_to = y_scale;
        self.transition = if animated {
            Transition::new(now, self.duration)
        } else {
            Transition::immediate(now)
        };
    }

    /// Drop bars whose exit has completed.
    pub fn prune(&mut self, now: f64) {
        if self.transition.is_finished(now) {
            self.bars.retain(|b| b.phase != BarPhase::Exit);
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        !self.transition.is_finished(now)
    }

    /// Interpolated bars and axis ticks at time `now`.
    pub fn frame(&self, now: f64) -> ChartFrame {
        let t = self.transition.progress(now);
        let y_scale = self.y_from.lerp(&self.y_to, t);

        let bars = self
            .bars
            .iter()
            .map(|bar| BarFrame {
                key: bar.key.clone(),
                color: bar.color,
                rect: bar.geometry_at(t),
                tooltip: bar.tooltip(),
                show_label: bar.phase != BarPhase::Exit,
            })
            .collect();

        let ticks = y_scale.ticks(Y_TICK_COUNT);
        let step = match ticks.as_slice() {
            [a, b, ..] => (b - a).abs(),
            _ => 1.0,
        };
        let y_ticks = ticks
            .into_iter()
            .map(|value| YTick {
                value,
                y: y_scale.map(value),
                label: format_tick(value, step),
            })
            .collect();

        ChartFrame {
            bars,
            y_ticks,
            baseline: self.y_to.map(0.0),
            x_range: self.layout.x_range(),
        }
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }
}

#[cfg(test)]
impl ChartView {
    fn slice(&self) -> &[SliceEntry] {
        &self.slice
    }

    /// Target count scale of the latest render.
    fn y_scale(&self) -> &LinearScale {
        &self.y_to
    }

    fn bars(&self) -> &[AnimatedBar] {
        &self.bars
    }

    fn palette(&self) -> &CategoryPalette {
        &self.palette
    }
}

fn format_tick(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{:.0}", value)
    } else {
        let decimals = (1..=6)
            .find(|&d| {
                let scaled = step * 10f64.powi(d);
                (scaled - scaled.round()).abs() < 1e-6
            })
            .unwrap_or(6) as usize;
        format!("{:.*}", decimals, value)
    }
}
