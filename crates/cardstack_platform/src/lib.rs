//! Card Stack Platform Types
//!
//! Raw input types delivered by the host toolkit to the card stack. The host
//! translates its native pointer events (Android `MotionEvent`, UIKit touches,
//! winit touch events) into [`TouchEvent`] values in window coordinates and
//! feeds them to the stack on the UI thread.

mod input;

pub use input::{TouchEvent, TouchPhase};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::input::{TouchEvent, TouchPhase};
}
