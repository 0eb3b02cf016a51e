//! Structured error types for netsiege.
//!
//! All fallible public APIs return `Result<T, SimError>`. Probabilistic
//! "failures" (a missed attack, a detection that does not fire) are normal
//! simulation branches and never travel through this channel; only genuine
//! defects and invalid configurations do.

use thiserror::Error;

/// The top-level error type for the simulation crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// `pop` was called on an empty heap or queue.
    ///
    /// At the simulator level this is an internal-invariant violation: the
    /// attacker's standing deploy event keeps the queue populated forever,
    /// so emptiness means a logic defect, not a normal outcome.
    #[error("the event queue is empty; this is not intended")]
    EmptyQueue,

    /// Fewer than two computers were configured. Picking a random computer
    /// other than a given one cannot terminate on a one-machine network.
    #[error("a network needs at least 2 computers, got {0}")]
    TooFewComputers(usize),

    /// A percentage parameter fell outside `0..=100`.
    #[error("probability must be a percentage in 0..=100, got {0}")]
    ProbabilityOutOfRange(u32),
}

/// Convenience alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;
