//! Adapter contract
//!
//! Consumers implement [`CardStackAdapter`] to supply card content. There is
//! no view recycling: the stack asks for each card exactly once per bind and
//! keeps every view until it is unbound.
//!
//! The select transition asks the adapter where each card should go through
//! [`AnimatorProvider`]. The default method puts the tapped card at the top
//! and pins the rest to the bottom; adapters override it for different
//! choreography, and may look at the card's view to decide.
//!
//! # Example
//!
//! ```ignore
//! use cardstack::prelude::*;
//!
//! struct Titles(Vec<String>);
//!
//! impl AnimatorProvider for Titles {
//!     type View = String;
//! }
//!
//! impl CardStackAdapter for Titles {
//!     fn count(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn create_view(&mut self, position: usize, _container: &CardContainer) -> Option<String> {
//!         self.0.get(position).cloned()
//!     }
//! }
//! ```

use cardstack_animation::Easing;

use crate::geometry::CardGeometry;

/// Destination of one card in the select transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardAnimation {
    /// Target Y in frame coordinates
    pub to: f32,
    /// Overrides the transition easing for this card
    pub easing: Option<Easing>,
}

impl CardAnimation {
    /// Move to `y` on the transition's curve
    pub fn to(y: f32) -> Self {
        Self { to: y, easing: None }
    }

    /// Use a different curve for this card
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// Everything an animator needs to place a card
#[derive(Clone, Copy, Debug)]
pub struct AnimatorContext<'a> {
    pub geometry: &'a CardGeometry,
    /// Vertical scroll of the stack viewport
    pub scroll_offset: f32,
    /// Number of cards in the stack
    pub count: usize,
    /// Y of the card being placed, before the transition
    pub current_y: f32,
}

/// Default select destination: the selected card moves to the first resting
/// slot, every other card collapses to the bottom. Both follow the scroll.
pub fn default_animator(
    ctx: &AnimatorContext<'_>,
    current: usize,
    selected: usize,
) -> CardAnimation {
    let g = ctx.geometry;
    if current == selected {
        CardAnimation::to(ctx.scroll_offset + g.resting_y(0))
    } else {
        CardAnimation::to(ctx.scroll_offset + g.collapsed_y(current, ctx.count))
    }
}

/// Supplies per-card destinations for the select transition
pub trait AnimatorProvider {
    /// Host view handle, owned by the stack once created
    type View;

    /// Where card `current`, showing `view`, goes when card `selected` is tapped
    fn animator_for(
        &self,
        _view: &Self::View,
        ctx: &AnimatorContext<'_>,
        current: usize,
        selected: usize,
    ) -> CardAnimation {
        default_animator(ctx, current, selected)
    }
}

/// Size information handed to [`CardStackAdapter::create_view`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardContainer {
    /// Height every card view should take
    pub card_height: f32,
    /// Measured height of the frame holding the cards
    pub frame_height: f32,
    /// Number of cards being created
    pub count: usize,
}

/// Content provider for a card stack
pub trait CardStackAdapter: AnimatorProvider {
    /// Number of cards. Read once at bind; must not change while bound.
    fn count(&self) -> usize;

    /// Build the view for `position`
    ///
    /// Called exactly once per position per bind. Returning `None` is a
    /// contract violation and fails the bind.
    fn create_view(&mut self, position: usize, container: &CardContainer) -> Option<Self::View>;

    /// Inner top padding of the card views, subtracted from collapsed positions
    fn card_padding_top(&self) -> f32 {
        0.0
    }
}
