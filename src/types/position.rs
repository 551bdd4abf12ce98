//! Decoded option positions.
//!
//! Position identifiers are encoded and validated upstream; this crate
//! consumes the decoded form read-only. A position holds up to four legs
//! on a single pool.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which of the pool's two tokens an amount is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSelector {
    Token0,
    Token1,
}

impl TokenSelector {
    /// The pool's other token.
    pub fn other(self) -> Self {
        match self {
            TokenSelector::Token0 => TokenSelector::Token1,
            TokenSelector::Token1 => TokenSelector::Token0,
        }
    }
}

/// Option kind of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    Call,
    Put,
}

/// Identifier of the underlying AMM pool.
pub type PoolId = u64;

/// One component of a multi-leg option position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Token whose notional this leg controls.
    pub asset: TokenSelector,
    /// Relative contract multiplier within the position (positive).
    pub option_ratio: u32,
    /// Call or put.
    pub token_type: TokenType,
    /// Long (bought) or short (sold) leg.
    pub is_long: bool,
    /// Index of the offsetting leg in the same position, if any.
    /// Compatibility with the partner is enforced by the upstream encoding.
    pub risk_partner: Option<u8>,
    /// Strike, as a price tick.
    pub strike: i32,
    /// Range width, in tick-spacing multiples.
    pub width: i32,
}

/// A decoded option position: up to four legs on one pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Pool the position trades on.
    pub pool: PoolId,
    /// Tick spacing of that pool.
    pub tick_spacing: i32,
    /// The position's legs, in encoding order.
    pub legs: SmallVec<[Leg; 4]>,
}

impl Position {
    /// An empty position on `pool`.
    pub fn new(pool: PoolId, tick_spacing: i32) -> Self {
        Self {
            pool,
            tick_spacing,
            legs: SmallVec::new(),
        }
    }

    /// A position with the given legs.
    pub fn with_legs(pool: PoolId, tick_spacing: i32, legs: impl IntoIterator<Item = Leg>) -> Self {
        Self {
            pool,
            tick_spacing,
            legs: legs.into_iter().collect(),
        }
    }

    /// Number of legs (0–4).
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }
}
