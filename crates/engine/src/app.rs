//! Application state and composition for the oracle proxy.

use std::sync::Arc;

use crate::infrastructure::ports::LlmPort;
use crate::use_cases;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub oracle: use_cases::OracleUseCases,
}

impl App {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        let oracle = use_cases::OracleUseCases::new(
            Arc::new(use_cases::oracle::ForwardChat::new(llm.clone())),
            Arc::new(use_cases::oracle::EvaluateOrdinance::new(llm)),
        );
        Self {
            use_cases: UseCases { oracle },
        }
    }
}
