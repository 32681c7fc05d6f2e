//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area. The synchronous
//! pieces (movement, interaction, progress) run inside the simulation tick;
//! the async ones talk to the dialogue oracle or the upstream generator.

pub mod conversation;
pub mod interaction;
pub mod movement;
pub mod oracle;
pub mod ordinance;
pub mod progress;

// Re-export main types
pub use conversation::ConversationUseCases;
pub use oracle::OracleUseCases;
pub use ordinance::OrdinanceUseCases;
