//! Console implementations of the session's collaborator traits

mod console;

pub use console::{ConsoleInput, ConsoleRenderer, SystemClock, ThreadSleeper};
