//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - The dialogue oracle (HTTP today, anything that can chat and judge tomorrow)
//! - The upstream text generator behind the oracle proxy
//! - Durable progress storage (JSON file, in-memory)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::StateStore;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{DialogueOraclePort, LlmPort, LlmRequest};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockDialogueOraclePort, MockLlmPort};

#[cfg(test)]
pub use repos::MockStateStore;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{LlmError, OracleError, RepoError};
