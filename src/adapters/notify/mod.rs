//! Notification adapters.
//!
//! Implementations of the `Notifier` port:
//!
//! - `logging` - Writes notifications to the structured log
//! - `recording` - Captures notifications in memory for assertions

mod logging;
mod recording;

pub use logging::TracingNotifier;
pub use recording::RecordingNotifier;
