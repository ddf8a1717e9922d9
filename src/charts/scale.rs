//! Chart scales
//! Categorical band scale for the x axis and linear scale for counts.

/// Maps category keys to evenly spaced bands over a pixel range.
///
/// Padding is a fraction of the step and applies both between bands and at
/// the two outer edges; leftover space is split evenly on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    padding: f32,
    step: f32,
    start: f32,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f32, f32), padding: f32) -> Self {
        let n = domain.len() as f32;
        let (r0, r1) = range;
        let step = (r1 - r0) / (n - padding + 2.0 * padding).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self {
            domain,
            padding,
            step,
            start,
        }
    }

    #[cfg(test)]
    fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn bandwidth(&self) -> f32 {
        self.step * (1.0 - self.padding)
    }

    /// Left edge of the band for `key`, if the key is in the domain.
    pub fn position(&self, key: &str) -> Option<f32> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f32)
    }
}

/// Linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Count scale for the visible values: `[0, max(max_value, 1)]`.
    pub fn for_counts(max_value: Option<u64>, range: (f32, f32)) -> Self {
        let top = max_value.unwrap_or(0).max(1) as f64;
        Self::new((0.0, top), range)
    }

    pub fn map(&self, value: f64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        let t = (value - d0) / span;
        r0 + (t as f32) * (r1 - r0)
    }

    /// Scale whose domain is interpolated between `self` and `other`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t64 = t as f64;
        Self {
            domain: (
                self.domain.0 + (other.domain.0 - self.domain.0) * t64,
                self.domain.1 + (other.domain.1 - self.domain.1) * t64,
            ),
            range: other.range,
        }
    }

    /// Round tick values covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut start, mut stop) = self.domain;
        if count == 0 || !start.is_finite() || !stop.is_finite() {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let reverse = stop < start;
        if reverse {
            std::mem::swap(&mut start, &mut stop);
        }

        let step = tick_increment(start, stop, count);
        let mut ticks: Vec<f64> = if step > 0.0 {
            let lo = (start / step).ceil() as i64;
            let hi = (stop / step).floor() as i64;
            (lo..=hi).map(|i| i as f64 * step).collect()
        } else {
            let inv = -step;
            let lo = (start * inv).ceil() as i64;
            let hi = (stop * inv).floor() as i64;
            (lo..=hi).map(|i| i as f64 / inv).collect()
        };

        if reverse {
            ticks.reverse();
        }
        ticks
    }
}

/// Step between ticks drawn from 1, 2, 5 times a power of ten.
/// Negative results are inverse steps (`-10` means 0.1).
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bands_split_the_range_with_padding() {
        let scale = BandScale::new(keys(&["a", "b", "c", "d"]), (0.0, 100.0), 0.2);
        // step = 100 / (4 - 0.2 + 0.4) = 23.8095
        let step = 100.0 / 4.2;
        assert!((scale.bandwidth() - step * 0.8).abs() < 1e-4);
        let a = scale.position("a").unwrap();
        let d = scale.position("d").unwrap();
        assert!((a - step * 0.2).abs() < 1e-4);
        assert!((d + scale.bandwidth() - (100.0 - step * 0.2)).abs() < 1e-3);
        assert_eq!(scale.position("z"), None);
    }

    #[test]
    fn single_band_is_centred() {
        let scale = BandScale::new(keys(&["only"]), (60.0, 1490.0), 0.2);
        let x = scale.position("only").unwrap();
        let centre = x + scale.bandwidth() / 2.0;
        assert!((centre - 775.0).abs() < 1e-3);
    }

    #[test]
    fn empty_domain_has_no_positions() {
        let scale = BandScale::new(Vec::new(), (0.0, 100.0), 0.2);
        assert!(scale.domain().is_empty());
        assert_eq!(scale.position("a"), None);
    }

    #[test]
    fn count_scale_has_a_floor_of_one() {
        let empty = LinearScale::for_counts(None, (600.0, 10.0));
        assert_eq!(empty.domain, (0.0, 1.0));

        let zeros = LinearScale::for_counts(Some(0), (600.0, 10.0));
        assert_eq!(zeros.domain, (0.0, 1.0));

        let some = LinearScale::for_counts(Some(42), (600.0, 10.0));
        assert_eq!(some.domain, (0.0, 42.0));
    }

    #[test]
    fn linear_map_inverts_vertical_range() {
        let scale = LinearScale::new((0.0, 10.0), (600.0, 10.0));
        assert_eq!(scale.map(0.0), 600.0);
        assert_eq!(scale.map(10.0), 10.0);
        assert!((scale.map(5.0) - 305.0).abs() < 1e-4);
    }

    #[test]
    fn lerp_moves_the_domain() {
        let a = LinearScale::new((0.0, 10.0), (600.0, 10.0));
        let b = LinearScale::new((0.0, 30.0), (600.0, 10.0));
        assert_eq!(a.lerp(&b, 0.0).domain, (0.0, 10.0));
        assert_eq!(a.lerp(&b, 0.5).domain, (0.0, 20.0));
        assert_eq!(a.lerp(&b, 1.0).domain, (0.0, 30.0));
    }

    #[test]
    fn ticks_use_round_steps() {
        let scale = LinearScale::new((0.0, 42.0), (0.0, 1.0));
        assert_eq!(
            scale.ticks(10),
            vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0]
        );

        let unit = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        let ticks = unit.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert!((ticks[3] - 0.3).abs() < 1e-12);
    }
}
