//! Card geometry
//!
//! Pure position math for the stack. Every function here depends only on the
//! configuration captured at bind time and its arguments, so the gesture
//! tracker, the choreographer, and custom animators all agree on where a card
//! belongs.
//!
//! ```text
//!  resting                         selected (card 1)
//!  ┌──────────┐ top_padding        ┌──────────┐ resting_y(0)
//!  │ card 0   │                    │ card 1   │
//!  ├──────────┤ + card_gap         │          │
//!  │ card 1   │                    │          │
//!  ├──────────┤ + card_gap         ├──────────┤ collapsed_y(0)
//!  │ card 2   │                    ├──────────┤ collapsed_y(2)
//!  │          │                    └──────────┘ screen - bottom margin
//! ```

use crate::config::{CardStackConfig, DisplayMetrics, BOTTOM_MARGIN_DP, ELASTIC_SCALE_DP};

/// How drag displacement is distributed over the cards below the touch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallax {
    /// Every moving card moves by the same amount
    Disabled,
    /// Positive scale: upper cards move further. Holds `scale / 3`.
    Forward(i32),
    /// Negative scale: lower cards move further. Holds `|scale| / 3`.
    Reverse(i32),
}

impl Parallax {
    /// Resolve the configured flag and scale. A zero scale disables parallax.
    pub fn from_config(enabled: bool, scale: i32) -> Self {
        if !enabled || scale == 0 {
            Parallax::Disabled
        } else if scale > 0 {
            Parallax::Forward(scale / 3)
        } else {
            Parallax::Reverse(-scale / 3)
        }
    }

    /// Multiplier applied to the damped drag distance of card `index`
    fn factor(&self, index: usize, count: usize) -> f32 {
        match *self {
            Parallax::Disabled => (count * 2 + 1) as f32,
            Parallax::Forward(step) => step as f32 * (count + 1 - index) as f32,
            Parallax::Reverse(step) => (index as i32 * step + 1) as f32,
        }
    }
}

/// Position math for one bind of the stack
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardGeometry {
    pub card_gap: f32,
    pub card_gap_bottom: f32,
    pub top_padding: f32,
    pub screen_height: f32,
    /// Space below the lowest collapsed card
    pub bottom_margin: f32,
    /// Inner top padding of a card view
    pub card_padding: f32,
    /// Divisor applied to raw drag distance
    pub elastic_scale: f32,
    pub parallax: Parallax,
}

impl CardGeometry {
    pub fn new(config: &CardStackConfig, metrics: &DisplayMetrics) -> Self {
        Self {
            card_gap: config.card_gap,
            card_gap_bottom: config.card_gap_bottom,
            top_padding: metrics.padding_top,
            screen_height: metrics.screen_height,
            bottom_margin: metrics.dp(BOTTOM_MARGIN_DP),
            card_padding: 0.0,
            elastic_scale: metrics.dp(ELASTIC_SCALE_DP).max(1.0),
            parallax: Parallax::from_config(config.parallax_enabled, config.parallax_scale),
        }
    }

    /// Set the card view's inner top padding
    pub fn with_card_padding(mut self, padding: f32) -> Self {
        self.card_padding = padding;
        self
    }

    /// Y of card `index` when nothing is selected
    pub fn resting_y(&self, index: usize) -> f32 {
        self.top_padding + self.card_gap * index as f32
    }

    /// Y of card `index` when pinned to the bottom behind a selected card
    pub fn collapsed_y(&self, index: usize, count: usize) -> f32 {
        self.screen_height
            - self.bottom_margin
            - (count as f32 - index as f32) * self.card_gap_bottom
            - self.card_padding
    }

    /// Height of one card: whatever the screen leaves above the collapsed deck
    pub fn full_card_height(&self, count: usize) -> f32 {
        (self.screen_height - self.bottom_margin - count as f32 * self.card_gap_bottom)
            .trunc()
            .max(0.0)
    }

    /// Measured height of the card frame: one full card plus a gap per extra card
    pub fn frame_height(&self, count: usize) -> f32 {
        self.full_card_height(count) + count.saturating_sub(1) as f32 * self.card_gap
    }

    /// Displacement of card `index` while card `touched` is dragged by `delta`
    ///
    /// Returns `None` for cards that stay put: every card above the touched
    /// one, any card when the drag goes upward, and out-of-range indices.
    pub fn drag_offset(
        &self,
        delta: f32,
        touched: usize,
        index: usize,
        count: usize,
    ) -> Option<f32> {
        if delta < 0.0 || touched >= count || index < touched || index >= count {
            return None;
        }
        Some(delta / self.elastic_scale * self.parallax.factor(index, count))
    }

    /// New Y of every card that moves while `touched` is dragged by `delta`
    pub fn drag_positions(
        &self,
        delta: f32,
        touched: usize,
        count: usize,
    ) -> impl Iterator<Item = (usize, f32)> + '_ {
        (touched..count).filter_map(move |index| {
            self.drag_offset(delta, touched, index, count)
                .map(|offset| (index, self.resting_y(index) + offset))
        })
    }
}
