//! Repository port traits.

use civicsim_domain::CivicProgress;

use super::error::RepoError;

/// Durable storage for the single progress record.
///
/// Synchronous on purpose: every mutation in the tick loop is written through
/// before the tick returns, and the tick never suspends.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<CivicProgress>, RepoError>;
    fn save(&self, progress: &CivicProgress) -> Result<(), RepoError>;
    /// Remove the record entirely. Removing a missing record is not an error.
    fn remove(&self) -> Result<(), RepoError>;
}
