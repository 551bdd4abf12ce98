//! Collaborator seams: the external protocol machinery the solvers query.
//!
//! Everything here is a synchronous, read-only query. The solvers never
//! retry a collaborator failure; the one documented recovery path is the
//! max-size search shrinking its bracket on [`OracleError::InvalidNotional`].
//!
//! - [`MarginOracle`]: collateral tracker state and single-position
//!   requirements
//! - [`FeeAccounting`]: accrued premia and per-position balances
//! - [`PoolMath`]: exercise amounts, ITM estimates, and tick/price math
//!   (assumed correct, invoked as a library)
//! - [`ProtocolOracle`]: blanket supertrait so solver entry points take a
//!   single bound

mod mock;

pub use mock::{EquityModel, MockOracle, RequirementModel};

use alloy::primitives::Address;

use crate::errors::OracleError;
use crate::types::{
    PoolUtilization, Position, PositionBalance, SignedAmounts, TokenAmounts, TokenMargin,
    TokenSelector,
};

/// Margin/collateral tracker queries. The protocol runs one tracker per
/// token, so the per-pool queries are parameterized by [`TokenSelector`].
pub trait MarginOracle: Send + Sync {
    /// Margin detail for `account` at `tick` in `token` terms, aggregated
    /// over the given position balances plus the accrued `premium` in that
    /// token. No cross-token conversion happens here.
    fn account_margin_details(
        &self,
        account: Address,
        tick: i32,
        balances: &[PositionBalance],
        premium: i128,
        token: TokenSelector,
    ) -> Result<TokenMargin, OracleError>;

    /// Collateral required in `token` for a single position of `size` at
    /// `tick`, evaluated at the supplied pool utilization.
    fn required_collateral_at_tick(
        &self,
        position: &Position,
        size: u128,
        tick: i32,
        token: TokenSelector,
        utilization_bps: i128,
    ) -> Result<u128, OracleError>;

    /// Current utilization snapshot of `token`'s collateral tracker.
    fn pool_utilization(&self, token: TokenSelector) -> Result<PoolUtilization, OracleError>;

    /// Total assets held by `token`'s collateral tracker.
    fn total_assets(&self, token: TokenSelector) -> Result<u128, OracleError>;
}

/// Premium and position-balance accounting.
pub trait FeeAccounting: Send + Sync {
    /// Accrued premia (token0, token1) and the tracked size of every
    /// position in `positions` for `account`.
    #[allow(clippy::type_complexity)]
    fn accumulated_fees_batch(
        &self,
        account: Address,
        positions: &[Position],
    ) -> Result<(i128, i128, Vec<PositionBalance>), OracleError>;
}

/// Exercise and tick/price math primitives.
pub trait PoolMath: Send + Sync {
    /// Raw exercised (long, short) amounts for `position` at `size`.
    fn exercised_amounts(
        &self,
        position: &Position,
        size: u128,
        tick_spacing: i32,
    ) -> Result<(TokenAmounts, TokenAmounts), OracleError>;

    /// Net in-the-money amounts for `position` at `size` and `tick`.
    fn net_itm_amounts(
        &self,
        position: &Position,
        size: u128,
        tick_spacing: i32,
        tick: i32,
    ) -> Result<SignedAmounts, OracleError>;

    /// Convert a token0 amount into token1 terms at `sqrt_price`.
    fn convert_0_to_1(&self, amount: i128, sqrt_price: u128) -> Result<i128, OracleError>;

    /// Convert a token1 amount into token0 terms at `sqrt_price`.
    fn convert_1_to_0(&self, amount: i128, sqrt_price: u128) -> Result<i128, OracleError>;

    /// Square-root price at `tick`.
    fn sqrt_price_at_tick(&self, tick: i32) -> Result<u128, OracleError>;

    /// The pool's current tick.
    fn current_tick(&self) -> Result<i32, OracleError>;
}

/// Everything the solvers need, as one bound.
pub trait ProtocolOracle: MarginOracle + FeeAccounting + PoolMath {}

impl<T: MarginOracle + FeeAccounting + PoolMath> ProtocolOracle for T {}
