//! Collaborator interfaces consumed by the game session
//!
//! The core never touches a console, a wall clock, or a real sleep directly;
//! it drives these traits. Console implementations live in
//! [`crate::adapters`], and tests substitute scripted fakes.

use std::time::Duration;

use crate::{board::Board, error::Result, session::SessionEvent};

/// Produces a human-readable depiction of the board and narrates session
/// events. The core consumes no return value from either call.
pub trait Renderer {
    fn render(&mut self, board: &Board);

    /// Report something that happened during a turn (a committed move, a
    /// vanished mark, a rejected entry, the outcome). Every recoverable
    /// condition passes through here before the session retries.
    fn announce(&mut self, event: &SessionEvent);
}

/// Supplies candidate moves as positions 0-8.
pub trait InputSource {
    /// Read one candidate move.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidInput`] for non-numeric or out-of-range
    /// entries; the session treats it as "no move consumed, retry". I/O
    /// failures are fatal and propagate.
    fn read_move(&mut self) -> Result<usize>;
}

/// Monotonic time source for the player clocks
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Cosmetic pacing for the computer's "thinking" time. Has no effect on
/// search correctness, only on wall-clock pacing and the computer's own
/// clock consumption.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}
