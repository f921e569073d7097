//! Display primitives for the interactive terminal surface.

pub mod colors;
pub mod format;

pub use colors::*;
pub use format::*;
