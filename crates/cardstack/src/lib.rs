//! Card Stack
//!
//! A vertically stacked deck of cards inside a scroll viewport. Cards can be
//! dragged downward, tapped to expand into a selected state, and animated back
//! to their resting arrangement.
//!
//! # Features
//!
//! - **Geometry**: Resting, collapsed, and elastic drag positions with optional parallax
//! - **Gestures**: Single-pointer session tracking with tap detection
//! - **Choreography**: Synchronized select and restore transitions with one completion
//! - **Adapter Contract**: Consumers supply views once per bind and may override the
//!   select animation per card
//! - **Scroll Gating**: The outer viewport is locked while a card is selected or moving
//!
//! # Example
//!
//! ```ignore
//! use cardstack::prelude::*;
//!
//! let metrics = DisplayMetrics::new(1920.0, 2.625).padding_top(24.0);
//! let mut stack = CardStackLayout::new(CardStackConfig::default(), metrics);
//! stack.set_on_card_selected(|_view, index| tracing::info!(index, "card opened"));
//! stack.bind(MyAdapter::new())?;
//!
//! stack.dispatch_touch(&TouchEvent::down(400.0));
//! stack.dispatch_touch(&TouchEvent::up(400.0));
//! while stack.tick(16.0) {}
//! ```
//!
//! Everything runs on the host's UI thread. Time only advances through
//! [`CardStackLayout::tick`], so a test can play a whole transition in one call.

pub mod adapter;
pub mod choreographer;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod scroll;
pub mod slot;

#[cfg(test)]
mod tests;

pub use adapter::{
    default_animator, AnimatorContext, AnimatorProvider, CardAnimation, CardContainer,
    CardStackAdapter,
};
pub use choreographer::{Choreographer, Completion, CompletionCallback, TransitionKind};
pub use config::{CardStackConfig, DisplayMetrics, TransitionTiming};
pub use error::{CardStackError, Result};
pub use geometry::{CardGeometry, Parallax};
pub use gesture::{GestureOutcome, GestureState, GestureTracker, TouchGate};
pub use layout::{CardSelectedListener, CardStackLayout};
pub use scroll::{ScrollState, ScrollViewport};
pub use slot::{CardFrame, CardSlot};

pub use cardstack_animation::Easing;
pub use cardstack_platform::TouchEvent;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapter::{
        AnimatorContext, AnimatorProvider, CardAnimation, CardContainer, CardStackAdapter,
    };
    pub use crate::config::{CardStackConfig, DisplayMetrics};
    pub use crate::error::{CardStackError, Result};
    pub use crate::layout::CardStackLayout;
    pub use cardstack_animation::Easing;
    pub use cardstack_platform::TouchEvent;
}
