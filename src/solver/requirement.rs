//! Requirement evaluation: collateral for one position at a projected
//! utilization.
//!
//! The margin oracle prices a requirement at a given utilization; the
//! evaluator's job is to project what utilization the candidate position
//! itself would create, then net the in-the-money exercise value out of the
//! raw answer.

use crate::consts::BPS;
use crate::errors::OracleError;
use crate::oracle::{MarginOracle, PoolMath};
use crate::types::{ItmRequirement, Position, TokenSelector};

/// Raw collateral required in `token` for `position` at `size` and
/// `at_tick`, evaluated at the utilization the position would project.
pub(crate) fn required_collateral<O: MarginOracle + PoolMath>(
    oracle: &O,
    position: &Position,
    token: TokenSelector,
    size: u128,
    at_tick: i32,
) -> Result<u128, OracleError> {
    let (long, short) = oracle.exercised_amounts(position, size, position.tick_spacing)?;
    let long_amt = long.get(token) as i128;
    let short_amt = short.get(token) as i128;

    let current = oracle.pool_utilization(token)?.utilization_bps;
    let total_assets = oracle.total_assets(token)?;
    if total_assets == 0 {
        return Err(OracleError::other("collateral pool has no assets"));
    }

    // Truncating division matches the protocol's accounting; do not round.
    let projected = current + (short_amt - long_amt) * BPS / total_assets as i128;

    oracle.required_collateral_at_tick(position, size, at_tick, token, projected)
}

/// ITM-netted signed requirement for both tokens.
///
/// Integer rounding in the ITM estimate can push a result slightly
/// negative; that is "no capital needed, possible small credit", never an
/// error.
pub(crate) fn required_collateral_itm<O: MarginOracle + PoolMath>(
    oracle: &O,
    position: &Position,
    size: u128,
    at_tick: i32,
) -> Result<ItmRequirement, OracleError> {
    let required0 = required_collateral(oracle, position, TokenSelector::Token0, size, at_tick)?;
    let required1 = required_collateral(oracle, position, TokenSelector::Token1, size, at_tick)?;
    let itm = oracle.net_itm_amounts(position, size, position.tick_spacing, at_tick)?;

    Ok(ItmRequirement {
        required0: required0 as i128 - itm.token0,
        required1: required1 as i128 - itm.token1,
        itm0: itm.token0,
        itm1: itm.token1,
    })
}

/// ITM-netted requirement collapsed into `token` terms at `at_tick`'s
/// price. This is the quantity the max-size bisection compares against its
/// headroom target.
pub(crate) fn required_in_token<O: MarginOracle + PoolMath>(
    oracle: &O,
    position: &Position,
    token: TokenSelector,
    size: u128,
    at_tick: i32,
) -> Result<i128, OracleError> {
    let itm = required_collateral_itm(oracle, position, size, at_tick)?;
    let sqrt_price = oracle.sqrt_price_at_tick(at_tick)?;
    match token {
        TokenSelector::Token0 => {
            Ok(itm.required0 + oracle.convert_1_to_0(itm.required1, sqrt_price)?)
        }
        TokenSelector::Token1 => {
            Ok(itm.required1 + oracle.convert_0_to_1(itm.required0, sqrt_price)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{MockOracle, RequirementModel};
    use crate::types::SignedAmounts;

    fn candidate() -> Position {
        Position::new(1, 60)
    }

    #[test]
    fn projects_utilization_from_short_exposure() {
        // Mock exercises size as pure short notional, so the projection is
        // current + size × 10_000 / total_assets, truncating.
        let oracle = MockOracle {
            utilization_bps: 2_000,
            total_assets: 1_000_000,
            requirement: RequirementModel::EchoUtilization,
            ..MockOracle::default()
        };

        let required =
            required_collateral(&oracle, &candidate(), TokenSelector::Token0, 250_000, 0).unwrap();
        // 2_000 + 250_000 × 10_000 / 1_000_000 = 4_500
        assert_eq!(required, 4_500);
    }

    #[test]
    fn projection_truncates_toward_zero() {
        let oracle = MockOracle {
            utilization_bps: 0,
            total_assets: 3_000_000,
            requirement: RequirementModel::EchoUtilization,
            ..MockOracle::default()
        };

        let required =
            required_collateral(&oracle, &candidate(), TokenSelector::Token1, 1_000_000, 0)
                .unwrap();
        // 1_000_000 × 10_000 / 3_000_000 = 3333.33… → 3333
        assert_eq!(required, 3_333);
    }

    #[test]
    fn empty_pool_is_an_oracle_error() {
        let oracle = MockOracle {
            total_assets: 0,
            ..MockOracle::default()
        };

        let err = required_collateral(&oracle, &candidate(), TokenSelector::Token0, 100, 0)
            .unwrap_err();
        assert!(matches!(err, OracleError::Other(_)));
    }

    #[test]
    fn itm_netting_may_go_slightly_negative() {
        let oracle = MockOracle {
            requirement: RequirementModel::Constant(100),
            itm: SignedAmounts {
                token0: 103,
                token1: 40,
            },
            ..MockOracle::default()
        };

        let itm = required_collateral_itm(&oracle, &candidate(), 1_000, 0).unwrap();
        // Rounding in the ITM estimate legitimately produces a small credit.
        assert_eq!(itm.required0, -3);
        assert_eq!(itm.required1, 60);
        assert_eq!(itm.itm0, 103);
    }

    #[test]
    fn invalid_notional_passes_through_untouched() {
        let oracle = MockOracle::new().with_requirement(RequirementModel::AlwaysInvalid);

        let err = required_collateral(&oracle, &candidate(), TokenSelector::Token0, 100, 0)
            .unwrap_err();
        assert_eq!(err, OracleError::InvalidNotional);
    }

    #[test]
    fn cross_token_collapse_sums_both_requirements() {
        // Identity conversion in the mock: collapsed = required0 + required1.
        let oracle = MockOracle::new().with_requirement(RequirementModel::Constant(100));

        let collapsed =
            required_in_token(&oracle, &candidate(), TokenSelector::Token0, 1_000, 0).unwrap();
        assert_eq!(collapsed, 200);
    }
}
