//! Iterative sizing and liquidation solvers.
//!
//! - `requirement`: utilization-projected collateral for a single position
//! - `aggregate`: account-level balance/requirement roll-up
//! - `max_size`: percent-of-headroom ladder via adaptive-bracket bisection
//! - `liquidation`: liquidation-tick search via the secant method
//!
//! All entry points hang off [`RiskQuery`], which borrows a
//! [`ProtocolOracle`] for the duration of each query and owns nothing else.

mod aggregate;
mod liquidation;
mod max_size;
mod requirement;

#[cfg(test)]
mod tests;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::consts::{
    MAX_BISECTION_ITERS, MAX_BRACKET_STEPS, MAX_SECANT_ITERS, SECANT_OFFSET, SIZE_EPSILON,
    TICK_WINDOW,
};
use crate::errors::SolverError;
use crate::oracle::ProtocolOracle;
use crate::types::{
    CollateralStatus, ItmRequirement, Position, SearchDirection, TokenSelector,
};

/// Tunable bounds for the iterative solvers.
///
/// `Default` carries the protocol constants; overriding is mainly useful
/// for tests and for callers that want tighter iteration caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Size resolution the bisection settles to, in token units.
    pub size_epsilon: u128,
    /// Search radius around the current tick for the liquidation solver.
    pub tick_window: i32,
    /// Initial secant trial offset from the current tick.
    pub secant_offset: i32,
    /// Cap on bracket expansion/shrink steps per ladder entry.
    pub max_bracket_steps: u32,
    /// Cap on bisection iterations per ladder entry.
    pub max_bisection_iters: u32,
    /// Cap on secant iterations per search direction.
    pub max_secant_iters: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            size_epsilon: SIZE_EPSILON,
            tick_window: TICK_WINDOW,
            secant_offset: SECANT_OFFSET,
            max_bracket_steps: MAX_BRACKET_STEPS,
            max_bisection_iters: MAX_BISECTION_ITERS,
            max_secant_iters: MAX_SECANT_ITERS,
        }
    }
}

/// Query surface over a borrowed protocol oracle.
///
/// Stateless between calls: every query reads the oracle fresh and discards
/// its intermediate brackets on return.
pub struct RiskQuery<'a, O: ProtocolOracle> {
    oracle: &'a O,
    config: SolverConfig,
}

impl<'a, O: ProtocolOracle> RiskQuery<'a, O> {
    /// Query surface with the protocol-default solver bounds.
    pub fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            config: SolverConfig::default(),
        }
    }

    /// Query surface with custom solver bounds.
    pub fn with_config(oracle: &'a O, config: SolverConfig) -> Self {
        Self { oracle, config }
    }

    /// Largest size of `candidate` the account's free collateral supports,
    /// one entry per percentage of [`crate::LADDER`].
    ///
    /// `mmr_bps` is the maintenance margin ratio applied to the existing
    /// requirement when computing headroom.
    pub fn max_position_size(
        &self,
        account: Address,
        positions: &[Position],
        candidate: &Position,
        at_tick: i32,
        token: TokenSelector,
        mmr_bps: u32,
    ) -> Result<[u128; 7], SolverError> {
        max_size::max_position_size(
            self.oracle,
            &self.config,
            account,
            positions,
            candidate,
            at_tick,
            token,
            mmr_bps,
        )
    }

    /// Tick below the current price at which the account's net equity
    /// crosses zero, or [`crate::MIN_TICK`] if there is no crossing
    /// inside the tolerance window.
    pub fn liquidation_tick_down(
        &self,
        account: Address,
        positions: &[Position],
    ) -> Result<i32, SolverError> {
        liquidation::liquidation_tick(
            self.oracle,
            &self.config,
            account,
            positions,
            SearchDirection::Down,
        )
    }

    /// Tick above the current price at which the account's net equity
    /// crosses zero, or [`crate::MAX_TICK`] if there is no crossing
    /// inside the tolerance window.
    pub fn liquidation_tick_up(
        &self,
        account: Address,
        positions: &[Position],
    ) -> Result<i32, SolverError> {
        liquidation::liquidation_tick(
            self.oracle,
            &self.config,
            account,
            positions,
            SearchDirection::Up,
        )
    }

    /// Raw per-token collateral requirement for `candidate` at `size`,
    /// evaluated at the projected utilization. No ITM netting.
    pub fn collateral_requirement(
        &self,
        candidate: &Position,
        size: u128,
        at_tick: i32,
    ) -> Result<(u128, u128), SolverError> {
        let required0 = requirement::required_collateral(
            self.oracle,
            candidate,
            TokenSelector::Token0,
            size,
            at_tick,
        )?;
        let required1 = requirement::required_collateral(
            self.oracle,
            candidate,
            TokenSelector::Token1,
            size,
            at_tick,
        )?;
        Ok((required0, required1))
    }

    /// ITM-netted signed requirement for `candidate` at `size`, with the
    /// estimated exercise amounts that were applied as offsets.
    pub fn collateral_requirement_itm(
        &self,
        candidate: &Position,
        size: u128,
        at_tick: i32,
    ) -> Result<ItmRequirement, SolverError> {
        Ok(requirement::required_collateral_itm(
            self.oracle,
            candidate,
            size,
            at_tick,
        )?)
    }

    /// Aggregated (balance, requirement) of the account in `token` terms at
    /// `at_tick`. Both solvers derive headroom and net equity from this.
    pub fn collateral_status(
        &self,
        account: Address,
        at_tick: i32,
        positions: &[Position],
        token: TokenSelector,
    ) -> Result<CollateralStatus, SolverError> {
        Ok(aggregate::collateral_status(
            self.oracle,
            account,
            at_tick,
            positions,
            token,
        )?)
    }
}
