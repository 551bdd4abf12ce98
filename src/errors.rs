use thiserror::Error;

use crate::types::SearchDirection;

/// Failure reported by an external collaborator (margin oracle, fee
/// accounting, pool math).
///
/// The solvers pattern-match on the variant: `InvalidNotional` has a
/// documented internal recovery path in the max-size search, everything
/// else aborts the query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The candidate size violates the protocol's minimum tradeable
    /// notional at the probed size.
    #[error("position notional below protocol minimum")]
    InvalidNotional,

    /// Any other collaborator failure.
    #[error("oracle failure: {0}")]
    Other(String),
}

impl OracleError {
    /// Create a generic oracle failure.
    pub fn other(msg: impl Into<String>) -> Self {
        OracleError::Other(msg.into())
    }
}

/// Failure surfaced by a solver query.
///
/// A query either fully succeeds or fails as a whole; there is no partial
/// ladder result. Variants carry enough context (ladder entry, search
/// direction) to diagnose which probe failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Bracket expansion pushed the upper bound past the largest
    /// representable leg size without finding a sign change.
    #[error("ladder entry {ladder_index} ({percent}%): bracket exceeds maximum representable size")]
    ExceedsMaximumSize { ladder_index: usize, percent: u32 },

    /// The candidate position cannot be sized under the current account
    /// state.
    #[error("ladder entry {ladder_index} ({percent}%): cannot size position: {reason}")]
    InvalidPosition {
        ladder_index: usize,
        percent: u32,
        reason: String,
    },

    /// The secant search hit a flat net-equity region or an iteration cap
    /// without finding a crossing.
    #[error("liquidation search {direction} did not converge: {reason}")]
    NonConvergent {
        direction: SearchDirection,
        reason: String,
    },

    /// An iterative solver exhausted its iteration cap.
    #[error("ladder entry {ladder_index} ({percent}%): iteration cap reached during {phase}")]
    IterationCap {
        ladder_index: usize,
        percent: u32,
        phase: &'static str,
    },

    /// Collaborator failure outside any solver retry path.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
