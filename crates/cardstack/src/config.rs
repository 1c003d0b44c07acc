//! Card stack configuration
//!
//! Plain values handed to the stack by the host. Nothing here reads global
//! state: the host owns preference storage and resource lookup, converts its
//! values to pixels, and passes them in before binding an adapter.

use cardstack_animation::Easing;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Duration of the select and restore transitions
pub const ANIM_DURATION_MS: u32 = 600;

/// Deceleration factor of the select and restore easing curve
pub const DECELERATION_FACTOR: f32 = 2.0;

/// Delay between binding and the init transition
pub const INIT_ANIMATION_DELAY_MS: u32 = 500;

/// Space kept free below the collapsed cards, in dp
pub const BOTTOM_MARGIN_DP: f32 = 30.0;

/// Divisor damping raw drag distance before parallax scaling, in dp
pub const ELASTIC_SCALE_DP: f32 = 8.0;

/// Travel below which a pointer sequence counts as a tap, in dp
pub const CLICK_DISTANCE_DP: f32 = 8.0;

/// Travel after which the outer viewport takes over a gesture, in dp
pub const TOUCH_SLOP_DP: f32 = 8.0;

pub const PARALLAX_ENABLED_DEFAULT: bool = false;
pub const SHOW_INIT_ANIMATION_DEFAULT: bool = true;
pub const PARALLAX_SCALE_DEFAULT: i32 = -5;
pub const CARD_GAP_DEFAULT: f32 = 50.0;
pub const CARD_GAP_BOTTOM_DEFAULT: f32 = 20.0;

// ============================================================================
// Stack configuration
// ============================================================================

/// Behaviour and spacing of a card stack, in pixels
///
/// Treated as immutable while an adapter is bound.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStackConfig {
    /// Gap between two consecutive resting cards
    pub card_gap: f32,
    /// Gap between two consecutive cards collapsed to the bottom
    pub card_gap_bottom: f32,
    /// Scale drag displacement per card
    pub parallax_enabled: bool,
    /// Parallax strength and direction. Zero disables parallax.
    pub parallax_scale: i32,
    /// Slide the cards up from the bottom after binding
    pub show_init_animation: bool,
    /// Animate the deck back to rest when a drag is released
    pub settle_after_drag: bool,
}

impl Default for CardStackConfig {
    fn default() -> Self {
        Self {
            card_gap: CARD_GAP_DEFAULT,
            card_gap_bottom: CARD_GAP_BOTTOM_DEFAULT,
            parallax_enabled: PARALLAX_ENABLED_DEFAULT,
            parallax_scale: PARALLAX_SCALE_DEFAULT,
            show_init_animation: SHOW_INIT_ANIMATION_DEFAULT,
            settle_after_drag: false,
        }
    }
}

impl CardStackConfig {
    /// Set the resting gap between cards
    pub fn card_gap(mut self, gap: f32) -> Self {
        self.card_gap = gap;
        self
    }

    /// Set the gap between collapsed cards
    pub fn card_gap_bottom(mut self, gap: f32) -> Self {
        self.card_gap_bottom = gap;
        self
    }

    /// Enable parallax with the given scale
    pub fn parallax(mut self, scale: i32) -> Self {
        self.parallax_enabled = true;
        self.parallax_scale = scale;
        self
    }

    /// Turn parallax off, keeping the scale
    pub fn no_parallax(mut self) -> Self {
        self.parallax_enabled = false;
        self
    }

    /// Enable or disable the init transition
    pub fn show_init_animation(mut self, show: bool) -> Self {
        self.show_init_animation = show;
        self
    }

    /// Enable or disable settling after a drag
    pub fn settle_after_drag(mut self, settle: bool) -> Self {
        self.settle_after_drag = settle;
        self
    }
}

// ============================================================================
// Display metrics
// ============================================================================

/// Screen and container measurements supplied by the host
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// Full screen height in pixels
    pub screen_height: f32,
    /// Pixels per dp
    pub density: f32,
    /// Top padding of the stack container
    pub padding_top: f32,
    /// Height of the scroll viewport
    pub viewport_height: f32,
}

impl DisplayMetrics {
    /// Metrics for a full-screen stack without padding
    pub fn new(screen_height: f32, density: f32) -> Self {
        Self {
            screen_height,
            density,
            padding_top: 0.0,
            viewport_height: screen_height,
        }
    }

    /// Set the container's top padding
    pub fn padding_top(mut self, padding: f32) -> Self {
        self.padding_top = padding;
        self
    }

    /// Set the viewport height when the stack is not full-screen
    pub fn viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }

    /// Convert dp to whole pixels, truncating like a dimension resource lookup
    pub fn dp(&self, dp: f32) -> f32 {
        (dp * self.density).trunc()
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::new(1920.0, 1.0)
    }
}

// ============================================================================
// Transition timing
// ============================================================================

/// Timing shared by every select and restore transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTiming {
    pub duration_ms: u32,
    pub easing: Easing,
    /// Delay between bind and the init transition
    pub init_delay_ms: u32,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            duration_ms: ANIM_DURATION_MS,
            easing: Easing::Decelerate(DECELERATION_FACTOR),
            init_delay_ms: INIT_ANIMATION_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_truncates() {
        let metrics = DisplayMetrics::new(1000.0, 2.625);
        assert_eq!(metrics.dp(8.0), 21.0);
        assert_eq!(metrics.dp(30.0), 78.0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        use serde::de::value::{Error, MapDeserializer};

        let fields = [("card_gap", 12.0_f32)];
        let de = MapDeserializer::<_, Error>::new(fields.into_iter());
        let config = CardStackConfig::deserialize(de).unwrap();
        assert_eq!(config.card_gap, 12.0);
        assert_eq!(config.card_gap_bottom, CARD_GAP_BOTTOM_DEFAULT);
        assert_eq!(config.parallax_scale, PARALLAX_SCALE_DEFAULT);
    }

    #[test]
    fn test_builder() {
        let config = CardStackConfig::default()
            .card_gap(10.0)
            .parallax(6)
            .show_init_animation(false);
        assert!(config.parallax_enabled);
        assert_eq!(config.parallax_scale, 6);
        assert!(!config.show_init_animation);
        assert!(!config.no_parallax().parallax_enabled);
    }
}
