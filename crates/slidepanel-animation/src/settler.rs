use crate::easing::Easing;

/// Settle time for a release with no velocity across the full drag range is
/// twice this; shorter travel scales down towards it.
pub const BASE_SETTLE_DURATION_MS: u64 = 256;
pub const MAX_SETTLE_DURATION_MS: u64 = 600;

/// Duration of a settle covering `delta` pixels.
///
/// With a release velocity the settle lasts roughly four times as long as the
/// pointer would need to cover a distance-weighted span at that speed. With
/// no velocity it is proportional to the share of `drag_range` travelled.
/// `extent` is the container dimension along the settle axis.
pub fn settle_duration_millis(delta: f32, velocity: f32, drag_range: f32, extent: f32) -> u64 {
    let distance = delta.abs();
    if distance == 0.0 || !distance.is_finite() {
        return 0;
    }
    let extent = if extent > 0.0 { extent } else { distance };
    let drag_range = if drag_range > 0.0 { drag_range } else { distance };

    let half_extent = extent / 2.0;
    let distance_ratio = (distance / extent).min(1.0);
    let weighted_distance = half_extent + half_extent * distance_influence(distance_ratio);

    let speed = velocity.abs();
    let duration = if speed > 0.0 && speed.is_finite() {
        4 * (1000.0 * (weighted_distance / speed)).round() as u64
    } else {
        let range_ratio = distance / drag_range;
        ((range_ratio + 1.0) * BASE_SETTLE_DURATION_MS as f32) as u64
    };
    duration.min(MAX_SETTLE_DURATION_MS)
}

/// Centers the ratio around 0 and flattens it with a sine, so long throws do
/// not take proportionally longer.
fn distance_influence(ratio: f32) -> f32 {
    let centered = (ratio - 0.5) * (0.3 * std::f32::consts::FRAC_PI_2);
    centered.sin()
}

/// Result of advancing a settle by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleFrame {
    pub offset: f32,
    /// Whether another frame is needed to finish.
    pub running: bool,
}

/// Time-based motion from one offset to another, advanced by frame time.
///
/// The settle clock starts at the first frame it sees, so the first
/// [`step`](Self::step) always reports the start offset. This keeps the
/// motion deterministic regardless of how long ago the settle was requested.
#[derive(Debug, Clone)]
pub struct OffsetSettler {
    from: f32,
    to: f32,
    current: f32,
    duration_ms: u64,
    easing: Easing,
    started_at_nanos: Option<u64>,
    running: bool,
}

impl Default for OffsetSettler {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

impl OffsetSettler {
    pub fn new(easing: Easing) -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            current: 0.0,
            duration_ms: 0,
            easing,
            started_at_nanos: None,
            running: false,
        }
    }

    /// Begins a settle from `from` to `to`.
    ///
    /// Returns `false`, and stays idle, when there is nothing to travel.
    pub fn start(&mut self, from: f32, to: f32, duration_ms: u64) -> bool {
        self.from = from;
        self.to = to;
        self.started_at_nanos = None;
        if from == to {
            self.current = to;
            self.duration_ms = 0;
            self.running = false;
            return false;
        }
        self.current = from;
        self.duration_ms = duration_ms;
        self.running = true;
        true
    }

    /// Advances to `frame_time_nanos`.
    pub fn step(&mut self, frame_time_nanos: u64) -> SettleFrame {
        if !self.running {
            return SettleFrame {
                offset: self.current,
                running: false,
            };
        }

        let started = *self.started_at_nanos.get_or_insert(frame_time_nanos);
        let elapsed_ms = frame_time_nanos.saturating_sub(started) as f32 / 1_000_000.0;
        let duration_ms = self.duration_ms as f32;

        if self.duration_ms == 0 || elapsed_ms >= duration_ms {
            self.current = self.to;
            self.running = false;
        } else {
            let fraction = self.easing.transform(elapsed_ms / duration_ms);
            self.current = self.from + (self.to - self.from) * fraction;
            // Rounding can land on the target before the clock runs out.
            if self.current == self.to {
                self.running = false;
            }
        }

        SettleFrame {
            offset: self.current,
            running: self.running,
        }
    }

    /// Stops where it is. The current offset is kept; no jump to the target.
    pub fn cancel(&mut self) {
        self.running = false;
        self.started_at_nanos = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn final_offset(&self) -> f32 {
        self.to
    }

    pub fn duration_millis(&self) -> u64 {
        self.duration_ms
    }
}

#[cfg(test)]
#[path = "tests/settler_tests.rs"]
mod tests;
