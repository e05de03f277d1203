//! Engine-level errors

use hecs::Entity;
use replimat_logic::error::DispenseError;
use thiserror::Error;

use crate::components::NetworkId;

/// Errors from engine commands (batch requests, building control)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("entity {0:?} is not a replicator terminal")]
    NotATerminal(Entity),
    #[error("entity {0:?} is not a replicator computer")]
    NotAComputer(Entity),
    #[error("entity {0:?} is not attached to a network")]
    Detached(Entity),
    #[error("unknown network {0}")]
    UnknownNetwork(NetworkId),
    #[error(transparent)]
    Dispense(#[from] DispenseError),
}
