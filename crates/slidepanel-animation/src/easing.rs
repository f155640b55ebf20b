/// Easing functions applied to a linear time fraction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Fast out, slow in (material design standard).
    FastOutSlowInEasing,
    /// `1 + (t - 1)^5`: leaves quickly and glides into place. The classic
    /// drag-helper settle curve.
    #[default]
    QuinticEaseOut,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            Easing::LinearEasing => fraction,
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::QuinticEaseOut => {
                let t = fraction - 1.0;
                t * t * t * t * t + 1.0
            }
        }
    }
}

/// Cubic bezier easing through (0,0), (x1,y1), (x2,y2), (1,1).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let derivative = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson for the parametric t matching the x fraction, with
    // bisection as the fallback when the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            solved = true;
            break;
        }
        let dx = derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let mut lo = 0.0;
        let mut hi = 1.0;
        t = fraction;
        for _ in 0..16 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for easing in [
            Easing::LinearEasing,
            Easing::FastOutSlowInEasing,
            Easing::QuinticEaseOut,
        ] {
            assert!(easing.transform(0.0).abs() < 0.001, "{:?}", easing);
            assert!((easing.transform(1.0) - 1.0).abs() < 0.001, "{:?}", easing);
        }
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        assert_eq!(Easing::QuinticEaseOut.transform(-1.0), 0.0);
        assert_eq!(Easing::QuinticEaseOut.transform(2.0), 1.0);
        assert_eq!(Easing::LinearEasing.transform(0.25), 0.25);
    }

    #[test]
    fn ease_out_curves_lead_linear_at_midpoint() {
        assert!(Easing::QuinticEaseOut.transform(0.5) > 0.9);
        assert!(Easing::FastOutSlowInEasing.transform(0.5) > 0.5);
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in [Easing::FastOutSlowInEasing, Easing::QuinticEaseOut] {
            let mut previous = 0.0;
            for step in 1..=50 {
                let value = easing.transform(step as f32 / 50.0);
                assert!(value + 1e-4 >= previous, "{:?} dipped at {}", easing, step);
                previous = value;
            }
        }
    }
}
