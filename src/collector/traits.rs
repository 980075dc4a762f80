//! Abstraction over HAProxy statistics endpoints.
//!
//! The `StatsSource` trait lets the aggregator poll a real HAProxy stats page
//! or a scripted mock implementation in tests.

use std::fmt;

use crate::model::Backend;

/// Failure while polling a stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Connection refused, timed out, or answered with a non-success status.
    Unreachable(String),
    /// The endpoint answered but the payload is not HAProxy CSV.
    Malformed(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Unreachable(msg) => write!(f, "unreachable: {}", msg),
            StatsError::Malformed(msg) => write!(f, "malformed stats: {}", msg),
        }
    }
}

impl std::error::Error for StatsError {}

/// A single HAProxy instance that can be polled for backend statistics.
///
/// Implementations are used through `Box<dyn StatsSource>`.
pub trait StatsSource {
    /// Endpoint identity as given on the command line.
    fn endpoint(&self) -> &str;

    /// Fetches the current backends, each with its servers attached.
    ///
    /// Every call returns a complete, fresh set; callers replace rather
    /// than merge.
    fn refresh(&mut self) -> Result<Vec<Backend>, StatsError>;
}
