//! Easing functions
//!
//! Maps linear progress `t` in `0.0..=1.0` to eased progress.

/// Easing curve applied to a tween's progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Quadratic ease in (slow start)
    EaseIn,
    /// Quadratic ease out (slow end)
    EaseOut,
    /// Quadratic ease in and out
    EaseInOut,
    /// Fast start that slows down; the factor sets how hard it brakes.
    ///
    /// `1.0 - (1.0 - t)^(2 * factor)`, matching Android's `DecelerateInterpolator`.
    Decelerate(f32),
    /// Slow start that speeds up: `t^(2 * factor)`
    Accelerate(f32),
}

impl Easing {
    /// Apply the curve to linear progress. Input is clamped to `0.0..=1.0`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Decelerate(factor) => {
                if factor == 1.0 {
                    1.0 - (1.0 - t) * (1.0 - t)
                } else {
                    1.0 - (1.0 - t).powf(2.0 * factor)
                }
            }
            Easing::Accelerate(factor) => {
                if factor == 1.0 {
                    t * t
                } else {
                    t.powf(2.0 * factor)
                }
            }
        }
    }
}
