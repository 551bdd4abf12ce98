//! Sizing and liquidation-price solvers for a leveraged options protocol
//! quoted on an AMM price oracle.
//!
//! Required collateral for an option position depends on in-the-money
//! netting, per-token pool utilization, and percentage margin ratios, so it
//! cannot be inverted in closed form. This crate answers the two questions
//! that need inversion anyway:
//!
//! - **How big can a new position be?** [`RiskQuery::max_position_size`]
//!   brackets and bisects the requirement curve for each entry of a fixed
//!   percent-of-headroom ladder.
//! - **Where does an account get liquidated?** [`RiskQuery::liquidation_tick_down`]
//!   and [`RiskQuery::liquidation_tick_up`] run the secant method on net
//!   equity as a function of price tick.
//!
//! The protocol itself (margin accounting, fee accrual, tick math) is
//! consumed through the read-only traits in [`oracle`]; this crate holds no
//! state and performs no mutation.

#![deny(unreachable_pub)]

mod consts;
mod errors;

pub mod oracle;
pub mod solver;
pub mod types;

pub use consts::{
    BPS, BRACKET_START_HIGH, LADDER, MAX_BISECTION_ITERS, MAX_BRACKET_STEPS, MAX_POSITION_SIZE,
    MAX_SECANT_ITERS, MAX_TICK, MIN_TICK, SECANT_OFFSET, SIZE_EPSILON, TICK_WINDOW,
};
pub use errors::{OracleError, SolverError};
pub use oracle::{FeeAccounting, MarginOracle, MockOracle, PoolMath, ProtocolOracle};
pub use solver::{RiskQuery, SolverConfig};
pub use types::{
    CollateralStatus, ItmRequirement, Leg, PoolId, PoolUtilization, Position, PositionBalance,
    SearchDirection, SignedAmounts, TokenAmounts, TokenMargin, TokenSelector, TokenType,
};
