//! Mock protocol oracle for testing.
//!
//! Shapes the requirement curve and the net-equity curve through small
//! model enums so tests can exercise every solver path without a live
//! protocol deployment.

use alloy::primitives::Address;

use super::{FeeAccounting, MarginOracle, PoolMath};
use crate::errors::OracleError;
use crate::types::{
    PoolUtilization, Position, PositionBalance, SignedAmounts, TokenAmounts, TokenMargin,
    TokenSelector,
};

/// Fixed-point sqrt price for a 1:1 exchange rate. The mock's conversions
/// are identity, so cross-token sums stay readable in tests.
const SQRT_PRICE_ONE: u128 = 1 << 96;

/// Offset base used to express possibly-negative net equity through the
/// unsigned balance/requirement pair of [`TokenMargin`].
const EQUITY_BASE: i128 = 1 << 40;

/// Shape of the single-position requirement curve.
#[derive(Debug, Clone, Copy)]
pub enum RequirementModel {
    /// `required = size × num / den` (truncating).
    Linear { num: u128, den: u128 },
    /// Zero below `flat_below`, linear in between, `InvalidNotional`
    /// above `invalid_above`.
    Banded {
        flat_below: u128,
        num: u128,
        den: u128,
        invalid_above: u128,
    },
    /// Same requirement regardless of size.
    Constant(u128),
    /// Linear, except probes inside `[lo, hi]` report `InvalidNotional`.
    /// Models a notional floor that rejects a band of interior sizes.
    InvalidBand {
        lo: u128,
        hi: u128,
        num: u128,
        den: u128,
    },
    /// Every probe fails with `InvalidNotional`.
    AlwaysInvalid,
    /// Echo the supplied utilization (for asserting the projection math).
    EchoUtilization,
}

/// Shape of account net equity as a function of tick.
#[derive(Debug, Clone, Copy)]
pub enum EquityModel {
    /// Tick-independent: the per-token balance/required fields are used
    /// as-is.
    Flat,
    /// `equity(tick) = slope × (tick − root)`.
    Linear { root: i32, slope: i128 },
    /// `equity(tick) = half_width − |tick − center|`; zero crossings
    /// symmetric around `center`.
    Vee { center: i32, half_width: i128 },
    /// Same equity at every tick (never crosses zero unless zero).
    Constant(i128),
}

/// Mock oracle with configurable curves.
#[derive(Debug, Clone)]
pub struct MockOracle {
    pub tick: i32,
    pub utilization_bps: i128,
    pub total_assets: u128,
    pub requirement: RequirementModel,
    pub equity: EquityModel,
    pub balance0: u128,
    pub balance1: u128,
    pub required0: u128,
    pub required1: u128,
    pub premium0: i128,
    pub premium1: i128,
    pub itm: SignedAmounts,
    /// Size reported for every tracked position.
    pub position_size: u128,
}

impl Default for MockOracle {
    fn default() -> Self {
        Self {
            tick: 0,
            utilization_bps: 2_000,
            total_assets: 1 << 40,
            requirement: RequirementModel::Linear { num: 1, den: 1 },
            equity: EquityModel::Flat,
            balance0: 0,
            balance1: 0,
            required0: 0,
            required1: 0,
            premium0: 0,
            premium1: 0,
            itm: SignedAmounts::default(),
            position_size: 1,
        }
    }
}

impl MockOracle {
    /// Mock with neutral defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the requirement curve.
    pub fn with_requirement(mut self, requirement: RequirementModel) -> Self {
        self.requirement = requirement;
        self
    }

    /// Replace the net-equity curve.
    pub fn with_equity(mut self, equity: EquityModel) -> Self {
        self.equity = equity;
        self
    }

    fn equity_at(&self, tick: i32) -> Option<i128> {
        match self.equity {
            EquityModel::Flat => None,
            EquityModel::Linear { root, slope } => Some(slope * (tick as i128 - root as i128)),
            EquityModel::Vee { center, half_width } => {
                Some(half_width - (tick as i128 - center as i128).abs())
            }
            EquityModel::Constant(e) => Some(e),
        }
    }
}

impl MarginOracle for MockOracle {
    fn account_margin_details(
        &self,
        _account: Address,
        tick: i32,
        _balances: &[PositionBalance],
        _premium: i128,
        token: TokenSelector,
    ) -> Result<TokenMargin, OracleError> {
        match self.equity_at(tick) {
            // Shaped curves put all equity in token0 and leave token1 empty.
            Some(e) => Ok(match token {
                TokenSelector::Token0 => TokenMargin {
                    balance: (EQUITY_BASE + e).max(0) as u128,
                    required: EQUITY_BASE as u128,
                },
                TokenSelector::Token1 => TokenMargin::default(),
            }),
            None => Ok(match token {
                TokenSelector::Token0 => TokenMargin {
                    balance: self.balance0,
                    required: self.required0,
                },
                TokenSelector::Token1 => TokenMargin {
                    balance: self.balance1,
                    required: self.required1,
                },
            }),
        }
    }

    fn required_collateral_at_tick(
        &self,
        _position: &Position,
        size: u128,
        _tick: i32,
        _token: TokenSelector,
        utilization_bps: i128,
    ) -> Result<u128, OracleError> {
        match self.requirement {
            RequirementModel::Linear { num, den } => Ok(size * num / den),
            RequirementModel::Banded {
                flat_below,
                num,
                den,
                invalid_above,
            } => {
                if size > invalid_above {
                    Err(OracleError::InvalidNotional)
                } else if size < flat_below {
                    Ok(0)
                } else {
                    Ok(size * num / den)
                }
            }
            RequirementModel::Constant(c) => Ok(c),
            RequirementModel::InvalidBand { lo, hi, num, den } => {
                if size >= lo && size <= hi {
                    Err(OracleError::InvalidNotional)
                } else {
                    Ok(size * num / den)
                }
            }
            RequirementModel::AlwaysInvalid => Err(OracleError::InvalidNotional),
            RequirementModel::EchoUtilization => Ok(utilization_bps.max(0) as u128),
        }
    }

    fn pool_utilization(&self, _token: TokenSelector) -> Result<PoolUtilization, OracleError> {
        Ok(PoolUtilization {
            in_amm: self.total_assets * self.utilization_bps.max(0) as u128 / 10_000,
            total_balance: self.total_assets,
            utilization_bps: self.utilization_bps,
        })
    }

    fn total_assets(&self, _token: TokenSelector) -> Result<u128, OracleError> {
        Ok(self.total_assets)
    }
}

impl FeeAccounting for MockOracle {
    fn accumulated_fees_batch(
        &self,
        _account: Address,
        positions: &[Position],
    ) -> Result<(i128, i128, Vec<PositionBalance>), OracleError> {
        let balances = positions
            .iter()
            .map(|p| PositionBalance {
                position: p.clone(),
                size: self.position_size,
            })
            .collect();
        Ok((self.premium0, self.premium1, balances))
    }
}

impl PoolMath for MockOracle {
    fn exercised_amounts(
        &self,
        _position: &Position,
        size: u128,
        _tick_spacing: i32,
    ) -> Result<(TokenAmounts, TokenAmounts), OracleError> {
        // Pure short exposure: the candidate adds `size` notional on both
        // slots, so projected utilization moves with size.
        Ok((
            TokenAmounts::default(),
            TokenAmounts {
                token0: size,
                token1: size,
            },
        ))
    }

    fn net_itm_amounts(
        &self,
        _position: &Position,
        _size: u128,
        _tick_spacing: i32,
        _tick: i32,
    ) -> Result<SignedAmounts, OracleError> {
        Ok(self.itm)
    }

    fn convert_0_to_1(&self, amount: i128, _sqrt_price: u128) -> Result<i128, OracleError> {
        Ok(amount)
    }

    fn convert_1_to_0(&self, amount: i128, _sqrt_price: u128) -> Result<i128, OracleError> {
        Ok(amount)
    }

    fn sqrt_price_at_tick(&self, _tick: i32) -> Result<u128, OracleError> {
        Ok(SQRT_PRICE_ONE)
    }

    fn current_tick(&self) -> Result<i32, OracleError> {
        Ok(self.tick)
    }
}
