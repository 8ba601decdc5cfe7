//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from query and IO errors.

use super::AirportCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Consecutive flights don't meet at a shared airport
    #[error("flight into {0} does not connect to flight out of {1}")]
    NotChained(AirportCode, AirportCode),

    /// Connecting flights depart on different dates
    #[error("connecting flights must share a departure date")]
    DateMismatch,
}
