//! Animatable value types
//!
//! Provides the interpolation trait and a timed tween over any
//! interpolatable value.

use crate::easing::Easing;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

/// A timed animation from one value to another
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    /// Duration in milliseconds
    duration_ms: u32,
    easing: Easing,
    /// Elapsed time in milliseconds
    current_time: f32,
}

impl<T: Interpolate> Tween<T> {
    /// Create a linear tween
    pub fn new(from: T, to: T, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing: Easing::Linear,
            current_time: 0.0,
        }
    }

    /// Set the easing curve (builder pattern)
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Start value
    pub fn from(&self) -> &T {
        &self.from
    }

    /// End value
    pub fn to(&self) -> &T {
        &self.to
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Get progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.current_time / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// True once the full duration has elapsed
    pub fn is_finished(&self) -> bool {
        self.current_time >= self.duration_ms as f32
    }

    /// Get current interpolated value
    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to.clone();
        }
        let eased = self.easing.apply(self.progress());
        self.from.lerp(&self.to, eased)
    }

    /// Advance by delta time (in milliseconds). Returns true when finished.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.is_finished() {
            self.current_time = (self.current_time + dt_ms).min(self.duration_ms as f32);
        }
        self.is_finished()
    }
}

/// Tween over a single float, the common case for positions
pub type FloatTween = Tween<f32>;
