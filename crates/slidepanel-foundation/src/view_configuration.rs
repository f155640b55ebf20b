use crate::gesture_constants::{MAX_FLING_VELOCITY, MIN_FLING_VELOCITY, TOUCH_SLOP};

/// Gesture thresholds supplied by the host platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfiguration {
    pub touch_slop: f32,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
}

impl ViewConfiguration {
    /// Scales the default thresholds by a display density factor.
    pub fn scaled(density: f32) -> Self {
        Self {
            touch_slop: TOUCH_SLOP * density,
            min_fling_velocity: MIN_FLING_VELOCITY * density,
            max_fling_velocity: MAX_FLING_VELOCITY * density,
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_max_fling_velocity(mut self, max_fling_velocity: f32) -> Self {
        self.max_fling_velocity = max_fling_velocity;
        self
    }

    pub fn with_min_fling_velocity(mut self, min_fling_velocity: f32) -> Self {
        self.min_fling_velocity = min_fling_velocity;
        self
    }

    /// Zeroes velocities below the minimum and caps the rest at the maximum,
    /// keeping the sign.
    pub fn clamp_fling_velocity(&self, velocity: f32) -> f32 {
        if !velocity.is_finite() {
            return 0.0;
        }
        let magnitude = velocity.abs();
        if magnitude < self.min_fling_velocity {
            0.0
        } else if magnitude > self.max_fling_velocity {
            self.max_fling_velocity.copysign(velocity)
        } else {
            velocity
        }
    }
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self::scaled(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_velocities_are_zeroed() {
        let config = ViewConfiguration::default();
        assert_eq!(config.clamp_fling_velocity(49.0), 0.0);
        assert_eq!(config.clamp_fling_velocity(-49.0), 0.0);
        assert_eq!(config.clamp_fling_velocity(-50.0), -50.0);
    }

    #[test]
    fn fast_velocities_are_capped_with_sign() {
        let config = ViewConfiguration::default().with_max_fling_velocity(1_000.0);
        assert_eq!(config.clamp_fling_velocity(5_000.0), 1_000.0);
        assert_eq!(config.clamp_fling_velocity(-5_000.0), -1_000.0);
        assert_eq!(config.clamp_fling_velocity(f32::NAN), 0.0);
    }

    #[test]
    fn density_scales_every_threshold() {
        let config = ViewConfiguration::scaled(2.0);
        assert_eq!(config.touch_slop, 16.0);
        assert_eq!(config.min_fling_velocity, 100.0);
        assert_eq!(config.max_fling_velocity, 16_000.0);
    }

    #[test]
    fn builders_override_single_thresholds() {
        let config = ViewConfiguration::default()
            .with_touch_slop(24.0)
            .with_min_fling_velocity(200.0);
        assert_eq!(config.touch_slop, 24.0);
        assert_eq!(config.clamp_fling_velocity(150.0), 0.0);
        assert_eq!(config.clamp_fling_velocity(-200.0), -200.0);
        assert_eq!(config.max_fling_velocity, ViewConfiguration::default().max_fling_velocity);
    }
}
