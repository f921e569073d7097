//! CLI output helpers

pub mod progress;

pub use progress::{create_spinner, ProgressBarExt};
