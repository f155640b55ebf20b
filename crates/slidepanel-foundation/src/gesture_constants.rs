//! Shared gesture constants for consistent touch/pointer handling.
//!
//! These values are in logical pixels. For very high-density touch screens,
//! scale them by the device's DPI factor through a custom
//! [`ViewConfiguration`](crate::ViewConfiguration).

/// Touch slop in logical pixels.
///
/// A pointer has to travel more than this distance vertically from its
/// initial press position before the panel may take over the gesture.
/// Matches common platform conventions (Android uses ~8dp for
/// ViewConfiguration.TOUCH_SLOP).
pub const TOUCH_SLOP: f32 = 8.0;

/// Minimum fling velocity in logical pixels per second.
///
/// Release velocities with a smaller magnitude are treated as zero, so a slow
/// release snaps to the nearest anchor instead of following its direction.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
