//! Touch input events

/// Phase of a touch event, without its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Pointer went down
    Started,
    /// Pointer moved while down
    Moved,
    /// Pointer lifted
    Ended,
    /// Sequence aborted by the system or a parent that took over the gesture
    Cancelled,
}

/// Touch events for touchscreens
///
/// Coordinates are raw window coordinates, so a card that moves under the
/// finger does not change the reported `y` of an unmoving pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum TouchEvent {
    /// A touch started
    Started {
        /// Unique identifier for this touch
        id: u64,
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// A touch moved
    Moved {
        /// Unique identifier for this touch
        id: u64,
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// A touch ended
    Ended {
        /// Unique identifier for this touch
        id: u64,
        /// X position when ended
        x: f32,
        /// Y position when ended
        y: f32,
    },
    /// A touch was cancelled (e.g., by system gesture)
    Cancelled {
        /// Unique identifier for this touch
        id: u64,
    },
}

impl TouchEvent {
    /// Pointer-down at `y` with the default pointer id
    pub fn down(y: f32) -> Self {
        TouchEvent::Started { id: 0, x: 0.0, y }
    }

    /// Pointer-move to `y` with the default pointer id
    pub fn move_to(y: f32) -> Self {
        TouchEvent::Moved { id: 0, x: 0.0, y }
    }

    /// Pointer-up at `y` with the default pointer id
    pub fn up(y: f32) -> Self {
        TouchEvent::Ended { id: 0, x: 0.0, y }
    }

    /// Cancellation with the default pointer id
    pub fn cancel() -> Self {
        TouchEvent::Cancelled { id: 0 }
    }

    /// Get the touch ID
    pub fn id(&self) -> u64 {
        match self {
            TouchEvent::Started { id, .. } => *id,
            TouchEvent::Moved { id, .. } => *id,
            TouchEvent::Ended { id, .. } => *id,
            TouchEvent::Cancelled { id } => *id,
        }
    }

    /// Get the phase of this event
    pub fn phase(&self) -> TouchPhase {
        match self {
            TouchEvent::Started { .. } => TouchPhase::Started,
            TouchEvent::Moved { .. } => TouchPhase::Moved,
            TouchEvent::Ended { .. } => TouchPhase::Ended,
            TouchEvent::Cancelled { .. } => TouchPhase::Cancelled,
        }
    }

    /// Get the position (returns None for Cancelled)
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            TouchEvent::Started { x, y, .. } => Some((*x, *y)),
            TouchEvent::Moved { x, y, .. } => Some((*x, *y)),
            TouchEvent::Ended { x, y, .. } => Some((*x, *y)),
            TouchEvent::Cancelled { .. } => None,
        }
    }

    /// Vertical position, if the event carries one
    pub fn y(&self) -> Option<f32> {
        self.position().map(|(_, y)| y)
    }

    /// True for the events that close a touch sequence
    pub fn is_terminal(&self) -> bool {
        matches!(self, TouchEvent::Ended { .. } | TouchEvent::Cancelled { .. })
    }
}
