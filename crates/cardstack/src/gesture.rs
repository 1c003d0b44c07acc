//! Card gesture tracking
//!
//! A single-pointer state machine over raw touch events. The tracker does not
//! move cards or start animations itself; it reports what the sequence means
//! ([`GestureOutcome`]) and the layout acts on it.
//!
//! # State Machine
//!
//! ```text
//!           Started (touchable, no open session)
//!   Idle ─────────────────────────────────────────▶ Tracking
//!    ▲                                                 │ Moved: Drag / Tracking
//!    └──────────────── Ended / Cancelled ──────────────┘
//!                      (Tap or Released)
//! ```
//!
//! Only one session exists at a time. A second pointer going down while a
//! session is open is ignored rather than tracked.

use cardstack_platform::TouchEvent;

/// Tracker state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No pointer down
    #[default]
    Idle,
    /// A pointer sequence is open
    Tracking,
}

/// What the stack knows about itself when an event arrives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchGate {
    /// False while an animation group runs or the init transition is pending
    pub screen_touchable: bool,
    /// A card is currently selected
    pub card_selected: bool,
}

/// Meaning of one touch event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// Event was not for the tracker (gated, stray, or second pointer)
    Ignored,
    /// Event was consumed with nothing to apply
    Tracking,
    /// Cards from `target` down should follow the pointer, `delta` below the first touch
    Drag { target: usize, delta: f32 },
    /// The sequence was a tap on `target`
    Tap { target: usize },
    /// The sequence ended after moving too far to be a tap
    Released { target: usize },
}

impl GestureOutcome {
    /// True if the event should be reported as handled
    pub fn is_consumed(&self) -> bool {
        !matches!(self, GestureOutcome::Ignored)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TouchSession {
    first_y: f32,
    prev_y: f32,
    /// Sum of absolute vertical steps
    distance: f32,
    target: usize,
}

/// Turns pointer events on cards into drags and taps
#[derive(Clone, Debug)]
pub struct GestureTracker {
    session: Option<TouchSession>,
    /// Maximum travel of a tap, in pixels
    click_threshold: f32,
}

impl GestureTracker {
    pub fn new(click_threshold: f32) -> Self {
        Self {
            session: None,
            click_threshold,
        }
    }

    pub fn state(&self) -> GestureState {
        if self.session.is_some() {
            GestureState::Tracking
        } else {
            GestureState::Idle
        }
    }

    /// Card that received the open session's pointer-down
    pub fn target(&self) -> Option<usize> {
        self.session.map(|s| s.target)
    }

    /// Accumulated travel of the open session
    pub fn distance(&self) -> f32 {
        self.session.map_or(0.0, |s| s.distance)
    }

    pub fn click_threshold(&self) -> f32 {
        self.click_threshold
    }

    /// Drop any open session
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Feed one event delivered to card `position`
    pub fn handle(
        &mut self,
        position: usize,
        event: &TouchEvent,
        gate: TouchGate,
    ) -> GestureOutcome {
        match *event {
            TouchEvent::Started { y, .. } => {
                if !gate.screen_touchable || self.session.is_some() {
                    return GestureOutcome::Ignored;
                }
                tracing::trace!(position, y, "touch session opened");
                self.session = Some(TouchSession {
                    first_y: y,
                    prev_y: y,
                    distance: 0.0,
                    target: position,
                });
                GestureOutcome::Tracking
            }
            TouchEvent::Moved { y, .. } => {
                if !gate.screen_touchable {
                    return GestureOutcome::Ignored;
                }
                let Some(session) = self.session.as_mut() else {
                    return GestureOutcome::Ignored;
                };
                session.distance += (y - session.prev_y).abs();
                session.prev_y = y;
                if gate.card_selected {
                    GestureOutcome::Tracking
                } else {
                    GestureOutcome::Drag {
                        target: session.target,
                        delta: y - session.first_y,
                    }
                }
            }
            TouchEvent::Ended { y, .. } => self.finish(Some(y), gate),
            TouchEvent::Cancelled { .. } => self.finish(None, gate),
        }
    }

    /// Close the session. A cancel carries no position, so the last seen one is used.
    fn finish(&mut self, y: Option<f32>, gate: TouchGate) -> GestureOutcome {
        let Some(session) = self.session.take() else {
            return GestureOutcome::Ignored;
        };
        if !gate.screen_touchable {
            tracing::trace!(card = session.target, "touch session dropped while animating");
            return GestureOutcome::Ignored;
        }

        let y = y.unwrap_or(session.prev_y);
        let displacement = (y - session.first_y).abs();
        if session.distance < self.click_threshold && displacement < self.click_threshold {
            tracing::debug!(card = session.target, "tap detected");
            GestureOutcome::Tap {
                target: session.target,
            }
        } else {
            tracing::trace!(
                card = session.target,
                distance = session.distance,
                "touch session released"
            );
            GestureOutcome::Released {
                target: session.target,
            }
        }
    }
}
