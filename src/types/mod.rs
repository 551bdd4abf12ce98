//! Domain types consumed and produced by the solvers.
//!
//! - `position`: decoded option positions and their legs
//! - `margin`: balance, requirement, and utilization views

mod margin;
mod position;

pub use margin::{
    CollateralStatus, ItmRequirement, PoolUtilization, PositionBalance, SearchDirection,
    SignedAmounts, TokenAmounts, TokenMargin,
};
pub use position::{Leg, PoolId, Position, TokenSelector, TokenType};
