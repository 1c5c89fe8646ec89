//! loglabel application library
//!
//! Project components that log through labeled loggers, plus the process-wide
//! registry they bind against.

pub mod modules;
pub mod utils;

/// Re-export commonly used types
pub use modules::*;
