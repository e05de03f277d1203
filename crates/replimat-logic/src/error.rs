//! Error types for replicator requests.
//!
//! Every variant is a soft failure: the caller gets nothing, the feedstock
//! pool and production state are left untouched, and it may retry later.

use thiserror::Error;

/// Why a terminal cannot act right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotReadyReason {
    /// Unpowered, obstructed or otherwise unavailable.
    #[error("the terminal is unavailable")]
    Unavailable,
    /// No working replicator computer on the terminal's network.
    #[error("not connected to a replicator computer")]
    NoComputer,
}

/// Errors that can occur during dispense and batch operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispenseError {
    /// The terminal is not ready to dispense.
    #[error("cannot dispense: {0}")]
    NotReady(NotReadyReason),

    /// No meal passes the consumer's policy and the system filters.
    #[error("no eligible meal for this consumer")]
    NoEligibleItem,

    /// The network does not hold enough feedstock.
    #[error("insufficient feedstock: needed {needed:.2} L, available {available:.2} L")]
    InsufficientStock { needed: f64, available: f64 },

    /// A batch cannot produce even a single item.
    #[error("not enough feedstock to batch-produce a single item")]
    BatchCapacityZero,

    /// A confirmed batch count is outside the offered range.
    #[error("invalid batch count {requested}: must be between 1 and {max}")]
    InvalidBatchCount { requested: u32, max: u32 },

    /// A batch plan was made for a different item, price or terminal.
    #[error("batch plan no longer matches this terminal's batch item")]
    PlanMismatch,

    /// The configured item does not exist in the catalog.
    #[error("unknown item: {0}")]
    UnknownItem(String),
}

impl From<NotReadyReason> for DispenseError {
    fn from(reason: NotReadyReason) -> Self {
        DispenseError::NotReady(reason)
    }
}
