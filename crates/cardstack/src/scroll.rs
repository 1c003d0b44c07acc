//! Scroll viewport hosting the card frame
//!
//! A plain vertical scroller without momentum or edge bounce: the offset
//! follows the pointer and is always clamped to the content. The viewport
//! competes with the cards for every pointer sequence. It only takes a
//! sequence over once the pointer has travelled beyond the touch slop, and
//! never while scrolling is disabled.
//!
//! # State Machine
//!
//! ```text
//!          Started                  |dy| > slop
//!   Idle ─────────▶ Pending ───────────────────▶ Dragging
//!    ▲                 │                            │
//!    └──── Ended / Cancelled ───────────────────────┘
//! ```

use cardstack_platform::TouchEvent;

// ============================================================================
// Scroll State
// ============================================================================

/// Gesture state of the viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollState {
    /// No pointer down
    #[default]
    Idle,
    /// Pointer down, not yet beyond the touch slop
    Pending,
    /// The viewport owns the sequence and scrolls with the pointer
    Dragging,
}

// ============================================================================
// Scroll Viewport
// ============================================================================

/// Vertical scroll container with interception gating
#[derive(Clone, Debug)]
pub struct ScrollViewport {
    /// Current scroll offset (0 = top edge, positive = scrolled down)
    scroll_y: f32,
    /// Measured height of the hosted frame
    content_height: f32,
    viewport_height: f32,
    /// Outer scroll gate, cleared while a card is selected or animating
    enabled: bool,
    /// Travel before the viewport takes over a sequence
    touch_slop: f32,
    state: ScrollState,
    start_y: f32,
    last_y: f32,
}

impl ScrollViewport {
    pub fn new(viewport_height: f32, touch_slop: f32) -> Self {
        Self {
            scroll_y: 0.0,
            content_height: 0.0,
            viewport_height,
            enabled: true,
            touch_slop,
            state: ScrollState::Idle,
            start_y: 0.0,
            last_y: 0.0,
        }
    }

    /// Update the content height, re-clamping the offset
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Largest reachable offset
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// True if the content overflows the viewport
    pub fn can_scroll(&self) -> bool {
        self.max_scroll() > 0.0
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Jump to `y`, clamped to the content
    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Scroll by `delta` (positive = further down the content)
    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.scroll_y + delta);
    }

    /// Open or close the outer scroll gate
    ///
    /// Closing it abandons a drag in progress; the offset stays where it is.
    pub fn set_scrolling_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            tracing::trace!(enabled, "outer scroll gate changed");
        }
        self.enabled = enabled;
        if !enabled {
            self.state = ScrollState::Idle;
        }
    }

    pub fn is_scrolling_enabled(&self) -> bool {
        self.enabled
    }

    /// True if a drag would actually scroll
    pub fn is_scrollable(&self) -> bool {
        self.enabled && self.can_scroll()
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == ScrollState::Dragging
    }

    /// Watch an event on its way to a card
    ///
    /// Returns true once the viewport takes the sequence over. The card that
    /// had it must then receive a cancel, and later events of the sequence go
    /// to [`on_touch_event`](Self::on_touch_event).
    pub fn on_intercept_touch(&mut self, event: &TouchEvent) -> bool {
        match *event {
            TouchEvent::Started { y, .. } => {
                self.state = ScrollState::Pending;
                self.start_y = y;
                self.last_y = y;
                false
            }
            TouchEvent::Moved { y, .. } => {
                if self.state != ScrollState::Pending {
                    return false;
                }
                let step = self.last_y - y;
                self.last_y = y;
                if !self.is_scrollable() || (y - self.start_y).abs() <= self.touch_slop {
                    return false;
                }
                tracing::trace!(y, "viewport intercepted touch sequence");
                self.state = ScrollState::Dragging;
                self.scroll_by(step);
                true
            }
            TouchEvent::Ended { .. } | TouchEvent::Cancelled { .. } => {
                self.state = ScrollState::Idle;
                false
            }
        }
    }

    /// Handle an event the viewport owns
    ///
    /// Returns true if the event was consumed.
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> bool {
        match *event {
            TouchEvent::Started { y, .. } => {
                if !self.is_scrollable() {
                    return false;
                }
                self.state = ScrollState::Dragging;
                self.start_y = y;
                self.last_y = y;
                true
            }
            TouchEvent::Moved { y, .. } => {
                if self.state != ScrollState::Dragging || !self.enabled {
                    return false;
                }
                self.scroll_by(self.last_y - y);
                self.last_y = y;
                true
            }
            TouchEvent::Ended { .. } | TouchEvent::Cancelled { .. } => {
                let was_dragging = self.is_dragging();
                self.state = ScrollState::Idle;
                was_dragging
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ScrollViewport {
        let mut viewport = ScrollViewport::new(500.0, 8.0);
        viewport.set_content_height(1200.0);
        viewport
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut viewport = viewport();
        assert_eq!(viewport.max_scroll(), 700.0);
        viewport.scroll_to(900.0);
        assert_eq!(viewport.scroll_y(), 700.0);
        viewport.scroll_by(-1000.0);
        assert_eq!(viewport.scroll_y(), 0.0);

        viewport.scroll_to(600.0);
        viewport.set_content_height(800.0);
        assert_eq!(viewport.scroll_y(), 300.0);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut viewport = ScrollViewport::new(500.0, 8.0);
        viewport.set_content_height(400.0);
        assert!(!viewport.is_scrollable());
        viewport.on_intercept_touch(&TouchEvent::down(100.0));
        assert!(!viewport.on_intercept_touch(&TouchEvent::move_to(20.0)));
    }

    #[test]
    fn test_intercepts_beyond_slop() {
        let mut viewport = viewport();
        assert!(!viewport.on_intercept_touch(&TouchEvent::down(300.0)));
        assert!(!viewport.on_intercept_touch(&TouchEvent::move_to(294.0)));
        assert!(viewport.on_intercept_touch(&TouchEvent::move_to(280.0)));
        assert!(viewport.is_dragging());
        assert_eq!(viewport.scroll_y(), 14.0);

        assert!(viewport.on_touch_event(&TouchEvent::move_to(250.0)));
        assert_eq!(viewport.scroll_y(), 44.0);
        assert!(viewport.on_touch_event(&TouchEvent::up(250.0)));
        assert_eq!(viewport.state(), ScrollState::Idle);
    }

    #[test]
    fn test_disabled_viewport_never_intercepts() {
        let mut viewport = viewport();
        viewport.set_scrolling_enabled(false);
        viewport.on_intercept_touch(&TouchEvent::down(300.0));
        assert!(!viewport.on_intercept_touch(&TouchEvent::move_to(100.0)));
        assert!(!viewport.on_touch_event(&TouchEvent::down(300.0)));
        assert_eq!(viewport.scroll_y(), 0.0);
    }
}
