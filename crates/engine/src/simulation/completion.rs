//! Replies travelling from oracle tasks back into the tick loop.

use civicsim_domain::{ActorId, IssueKey, OrdinanceOutcome};

use crate::infrastructure::ports::OracleError;

#[derive(Debug)]
pub(crate) enum OracleCompletion {
    Chat {
        generation: u64,
        actor_id: ActorId,
        result: Result<String, OracleError>,
    },
    Judge {
        generation: u64,
        issue_key: IssueKey,
        proposal: String,
        result: Result<OrdinanceOutcome, OracleError>,
    },
}

impl OracleCompletion {
    pub(crate) fn generation(&self) -> u64 {
        match self {
            OracleCompletion::Chat { generation, .. } | OracleCompletion::Judge { generation, .. } => {
                *generation
            }
        }
    }
}
