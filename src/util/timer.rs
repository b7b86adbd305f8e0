//! Helpers for timing operations.

use std::time::{Duration, Instant};

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return elapsed time.
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}

/// Scoped guard that logs how long an operation took when dropped.
///
/// ```
/// use spyglass::util::LogDuration;
///
/// {
///     let _guard = LogDuration::new("rebuild");
///     // ... work ...
/// } // logs "rebuild: <n> ms" at info level
/// ```
pub struct LogDuration {
    operation: String,
    timer: Timer,
}

impl LogDuration {
    pub fn new<S: Into<String>>(operation: S) -> Self {
        LogDuration {
            operation: operation.into(),
            timer: Timer::start(),
        }
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed = self.timer.elapsed();
        tracing::info!(
            operation = %self.operation,
            elapsed_ms = elapsed.as_millis() as u64,
            "{}: {} ms",
            self.operation,
            elapsed.as_millis()
        );
    }
}
