use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop flag shared between a host and a running evaluator.
///
/// The evaluator checks the flag before every statement and between the unit
/// calls of a repeated action; raising it makes execution return
/// [`Error::Interrupted`](crate::Error::Interrupted) at the next check.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    /// Creates a lowered signal
    pub fn new() -> Self {
        StopSignal {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Ask the running program to stop
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Lower the signal so the evaluator can run again
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// Whether a stop has been requested
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
