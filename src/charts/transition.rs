//! Bar transitions
//! Keyed bar geometry animated on a shared linear time base.

use egui::Color32;

/// Rectangle of one bar in view box coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BarGeometry {
    /// Zero-height bar sitting on the baseline.
    pub fn collapsed(x: f32, width: f32, baseline: f32) -> Self {
        Self {
            x,
            y: baseline,
            width,
            height: 0.0,
        }
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            x: mix(self.x, other.x),
            y: mix(self.y, other.y),
            width: mix(self.width, other.width),
            height: mix(self.height, other.height),
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPhase {
    Enter,
    Update,
    Exit,
}

/// A bar bound to one disaster type, moving from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedBar {
    pub key: String,
    pub value: u64,
    pub color: Color32,
    pub phase: BarPhase,
    pub from: BarGeometry,
    pub to: BarGeometry,
}

impl AnimatedBar {
    pub fn geometry_at(&self, t: f32) -> BarGeometry {
        self.from.lerp(&self.to, t)
    }

    pub fn tooltip(&self) -> String {
        format!("{}: {} disasters", self.key, self.value)
    }
}

/// Shared clock for one render pass. Easing is linear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub started_at: f64,
    pub duration: f64,
}

impl Transition {
    pub fn new(started_at: f64, duration: f64) -> Self {
        Self {
            started_at,
            duration,
        }
    }

    /// A transition that is already at its end state.
    pub fn immediate(now: f64) -> Self {
        Self::new(now, 0.0)
    }

    /// Progress in `[0, 1]` at time `now`.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_linear_and_clamped() {
        let t = Transition::new(10.0, 2.0);
        assert_eq!(t.progress(9.0), 0.0);
        assert_eq!(t.progress(10.0), 0.0);
        assert_eq!(t.progress(10.5), 0.25);
        assert_eq!(t.progress(11.0), 0.5);
        assert_eq!(t.progress(12.0), 1.0);
        assert_eq!(t.progress(50.0), 1.0);
        assert!(!t.is_finished(11.9));
        assert!(t.is_finished(12.0));
    }

    #[test]
    fn immediate_transition_is_done() {
        let t = Transition::immediate(3.0);
        assert_eq!(t.progress(3.0), 1.0);
        assert!(t.is_finished(3.0));
    }

    #[test]
    fn collapsed_bar_grows_to_target() {
        let target = BarGeometry {
            x: 100.0,
            y: 200.0,
            width: 40.0,
            height: 400.0,
        };
        let start = BarGeometry::collapsed(100.0, 40.0, 600.0);
        let bar = AnimatedBar {
            key: "Flood".to_string(),
            value: 3,
            color: Color32::RED,
            phase: BarPhase::Enter,
            from: start,
            to: target,
        };

        let mid = bar.geometry_at(0.5);
        assert_eq!(mid.height, 200.0);
        assert_eq!(mid.y, 400.0);
        assert_eq!(mid.y + mid.height, 600.0);
        assert_eq!(bar.geometry_at(1.0), target);
        assert_eq!(bar.tooltip(), "Flood: 3 disasters");
        assert_eq!(target.center_x(), 120.0);
    }
}
