//! Account-level collateral aggregation.
//!
//! A pass-through composition with no iteration of its own: fetch accrued
//! premia and per-position balances from fee accounting, ask the margin
//! oracle for each token's detail, and collapse the two-token view into the
//! requested token at the reference price. Both solvers build on this.

use alloy::primitives::Address;

use crate::errors::OracleError;
use crate::oracle::{FeeAccounting, MarginOracle, PoolMath};
use crate::types::{CollateralStatus, Position, TokenSelector};

/// Aggregated (balance, requirement) of `account` in `token` terms at
/// `at_tick`, over every position in `positions` plus accrued premium.
pub(crate) fn collateral_status<O: MarginOracle + FeeAccounting + PoolMath>(
    oracle: &O,
    account: Address,
    at_tick: i32,
    positions: &[Position],
    token: TokenSelector,
) -> Result<CollateralStatus, OracleError> {
    let (premium0, premium1, balances) = oracle.accumulated_fees_batch(account, positions)?;

    let margin0 = oracle.account_margin_details(
        account,
        at_tick,
        &balances,
        premium0,
        TokenSelector::Token0,
    )?;
    let margin1 = oracle.account_margin_details(
        account,
        at_tick,
        &balances,
        premium1,
        TokenSelector::Token1,
    )?;

    let sqrt_price = oracle.sqrt_price_at_tick(at_tick)?;
    let (own, other) = match token {
        TokenSelector::Token0 => (margin0, margin1),
        TokenSelector::Token1 => (margin1, margin0),
    };

    let convert = |amount: u128| -> Result<u128, OracleError> {
        let converted = match token {
            TokenSelector::Token0 => oracle.convert_1_to_0(amount as i128, sqrt_price)?,
            TokenSelector::Token1 => oracle.convert_0_to_1(amount as i128, sqrt_price)?,
        };
        Ok(converted.max(0) as u128)
    };

    Ok(CollateralStatus {
        balance: own.balance + convert(other.balance)?,
        required: own.required + convert(other.required)?,
    })
}

/// Net equity of the account at a hypothetical tick, in token0 terms.
///
/// Recomputed at every trial tick by the secant solver; the curve is not
/// monotonic in general, so values are never reused across ticks.
pub(crate) fn net_equity_at<O: MarginOracle + FeeAccounting + PoolMath>(
    oracle: &O,
    account: Address,
    positions: &[Position],
    tick: i32,
) -> Result<i128, OracleError> {
    let status = collateral_status(oracle, account, tick, positions, TokenSelector::Token0)?;
    Ok(status.net_equity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{EquityModel, MockOracle};

    fn account() -> Address {
        Address::ZERO
    }

    #[test]
    fn collapses_both_tokens_at_identity_price() {
        let oracle = MockOracle {
            balance0: 600,
            balance1: 400,
            required0: 150,
            required1: 50,
            ..MockOracle::default()
        };

        let status =
            collateral_status(&oracle, account(), 0, &[], TokenSelector::Token0).unwrap();
        assert_eq!(status.balance, 1_000);
        assert_eq!(status.required, 200);
        assert_eq!(status.net_equity(), 800);

        // Identity conversion makes the two selectors agree.
        let status1 =
            collateral_status(&oracle, account(), 0, &[], TokenSelector::Token1).unwrap();
        assert_eq!(status1, status);
    }

    #[test]
    fn net_equity_follows_the_shaped_curve() {
        let oracle = MockOracle::new().with_equity(EquityModel::Linear { root: 100, slope: 2 });

        assert_eq!(net_equity_at(&oracle, account(), &[], 100).unwrap(), 0);
        assert_eq!(net_equity_at(&oracle, account(), &[], 110).unwrap(), 20);
        assert_eq!(net_equity_at(&oracle, account(), &[], 90).unwrap(), -20);
    }

    #[test]
    fn undercollateralized_account_has_negative_equity() {
        let oracle = MockOracle {
            balance0: 100,
            required0: 250,
            ..MockOracle::default()
        };

        let status =
            collateral_status(&oracle, account(), 0, &[], TokenSelector::Token0).unwrap();
        assert_eq!(status.net_equity(), -150);
    }
}
