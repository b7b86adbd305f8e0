//! Utility modules for Spyglass.

pub mod concurrent_map;
pub mod timer;

// Re-export commonly used types
pub use concurrent_map::ConcurrentMap;
pub use timer::{LogDuration, Timer};
