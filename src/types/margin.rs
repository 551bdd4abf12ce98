//! Balance, requirement, and utilization views.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::position::{Position, TokenSelector};

/// Unsigned per-token amount pair (token0 in slot 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmounts {
    pub token0: u128,
    pub token1: u128,
}

impl TokenAmounts {
    /// The amount in the selected token's slot.
    pub fn get(self, token: TokenSelector) -> u128 {
        match token {
            TokenSelector::Token0 => self.token0,
            TokenSelector::Token1 => self.token1,
        }
    }
}

/// Signed per-token amount pair, used for ITM and premium amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAmounts {
    pub token0: i128,
    pub token1: i128,
}

impl SignedAmounts {
    /// The amount in the selected token's slot.
    pub fn get(self, token: TokenSelector) -> i128 {
        match token {
            TokenSelector::Token0 => self.token0,
            TokenSelector::Token1 => self.token1,
        }
    }
}

/// Margin detail for one account in one token: what it holds and what its
/// open positions require, both in that token's units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMargin {
    pub balance: u128,
    pub required: u128,
}

/// Size of one open position, as tracked by fee accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBalance {
    pub position: Position,
    pub size: u128,
}

/// Utilization snapshot of one collateral tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolUtilization {
    /// Assets currently committed inside the AMM.
    pub in_amm: u128,
    /// Total assets held by the tracker.
    pub total_balance: u128,
    /// Committed fraction in basis points (10_000 = 100%).
    pub utilization_bps: i128,
}

/// Aggregated single-token view of an account at a reference tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralStatus {
    /// Collateral balance, cross-collected into one token.
    pub balance: u128,
    /// Required collateral, cross-collected into one token.
    pub required: u128,
}

impl CollateralStatus {
    /// Balance minus requirement. Negative means undercollateralized.
    pub fn net_equity(&self) -> i128 {
        self.balance as i128 - self.required as i128
    }
}

/// ITM-netted collateral requirement for a candidate position.
///
/// The signed requirements can come out slightly negative from integer
/// rounding in the ITM estimate; that means "no capital needed, possible
/// small credit", not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItmRequirement {
    /// Token0 requirement net of in-the-money offsets.
    pub required0: i128,
    /// Token1 requirement net of in-the-money offsets.
    pub required1: i128,
    /// Estimated token0 exercise amount applied as the offset.
    pub itm0: i128,
    /// Estimated token1 exercise amount applied as the offset.
    pub itm1: i128,
}

/// Direction of a liquidation-tick search relative to the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchDirection {
    Down,
    Up,
}

impl fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDirection::Down => write!(f, "down"),
            SearchDirection::Up => write!(f, "up"),
        }
    }
}
