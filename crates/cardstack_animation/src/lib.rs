//! Card Stack Animation System
//!
//! Timed tweens and synchronized animation groups driven by a frame clock.
//!
//! # Features
//!
//! - **Easing Curves**: Linear, quadratic, and Android-style accelerate/decelerate
//! - **Tweens**: Single-value timed animations from a start to an end value
//! - **Groups**: Many tweens played together with one completion event
//! - **Timers**: Delayed one-shot events on the same clock as the animations
//! - **Deterministic**: Time only advances when the host calls [`AnimationScheduler::tick`]

pub mod easing;
pub mod scheduler;
pub mod values;

pub use easing::Easing;
pub use scheduler::{AnimationGroup, AnimationScheduler, FrameUpdate, GroupId, TimerId};
pub use values::{FloatTween, Interpolate, Tween};
