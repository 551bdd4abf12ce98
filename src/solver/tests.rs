//! Cross-component scenarios through the public query surface.

use alloy::primitives::Address;

use crate::consts::{MAX_TICK, MIN_TICK, SIZE_EPSILON};
use crate::errors::{OracleError, SolverError};
use crate::oracle::{EquityModel, MockOracle, RequirementModel};
use crate::solver::{RiskQuery, SolverConfig};
use crate::types::{Leg, Position, TokenSelector, TokenType};

fn account() -> Address {
    Address::ZERO
}

fn single_leg_call() -> Position {
    Position::with_legs(
        1,
        60,
        [Leg {
            asset: TokenSelector::Token0,
            option_ratio: 1,
            token_type: TokenType::Call,
            is_long: false,
            risk_partner: None,
            strike: 0,
            width: 4,
        }],
    )
}

#[test]
fn worked_sizing_example_through_the_query_surface() {
    // Zero existing positions, headroom 1_000_000, total requirement
    // 2 × size: the 50% ladder entry converges to 250_000 within epsilon.
    let oracle = MockOracle {
        balance0: 1_000_000,
        ..MockOracle::default()
    };
    let query = RiskQuery::new(&oracle);

    let sizes = query
        .max_position_size(account(), &[], &single_leg_call(), 0, TokenSelector::Token0, 10_000)
        .unwrap();

    assert!(sizes[4].abs_diff(250_000) <= SIZE_EPSILON);
    for pair in sizes.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn sizing_and_liquidation_agree_on_the_same_oracle() {
    let oracle = MockOracle {
        tick: 2_000,
        balance0: 1_000_000,
        ..MockOracle::default()
    }
    .with_equity(EquityModel::Vee {
        center: 2_000,
        half_width: 30_000,
    });
    let query = RiskQuery::new(&oracle);

    let down = query.liquidation_tick_down(account(), &[]).unwrap();
    let up = query.liquidation_tick_up(account(), &[]).unwrap();
    assert_eq!(down, -28_000);
    assert_eq!(up, 32_000);
}

#[test]
fn collateral_requirement_reports_both_tokens() {
    let oracle = MockOracle::new().with_requirement(RequirementModel::Linear { num: 3, den: 2 });
    let query = RiskQuery::new(&oracle);

    let (required0, required1) = query
        .collateral_requirement(&single_leg_call(), 1_000, 0)
        .unwrap();
    assert_eq!(required0, 1_500);
    assert_eq!(required1, 1_500);
}

#[test]
fn itm_variant_exposes_the_applied_offsets() {
    let oracle = MockOracle {
        itm: crate::types::SignedAmounts {
            token0: 200,
            token1: -50,
        },
        ..MockOracle::default()
    }
    .with_requirement(RequirementModel::Constant(1_000));
    let query = RiskQuery::new(&oracle);

    let itm = query
        .collateral_requirement_itm(&single_leg_call(), 5_000, 0)
        .unwrap();
    assert_eq!(itm.required0, 800);
    assert_eq!(itm.required1, 1_050);
    assert_eq!(itm.itm0, 200);
    assert_eq!(itm.itm1, -50);
}

#[test]
fn collateral_status_matches_the_headroom_inputs() {
    let oracle = MockOracle {
        balance0: 700,
        balance1: 300,
        required0: 100,
        required1: 150,
        ..MockOracle::default()
    };
    let query = RiskQuery::new(&oracle);

    let status = query
        .collateral_status(account(), 0, &[], TokenSelector::Token1)
        .unwrap();
    assert_eq!(status.balance, 1_000);
    assert_eq!(status.required, 250);
}

#[test]
fn invalid_notional_surfaces_untranslated_outside_the_retry_path() {
    // The shrink-and-retry path is private to the max-size search; a direct
    // requirement query reports the oracle's condition as-is.
    let oracle = MockOracle::new().with_requirement(RequirementModel::AlwaysInvalid);
    let query = RiskQuery::new(&oracle);

    let err = query
        .collateral_requirement(&single_leg_call(), 1_000, 0)
        .unwrap_err();
    assert_eq!(err, SolverError::Oracle(OracleError::InvalidNotional));
}

#[test]
fn tighter_window_turns_a_crossing_into_a_sentinel() {
    // Root at ±30_000 is inside the default window but outside a 20_000
    // override, so the override must flip the result to the sentinels.
    let oracle = MockOracle::new().with_equity(EquityModel::Vee {
        center: 0,
        half_width: 30_000,
    });

    let default_query = RiskQuery::new(&oracle);
    assert_eq!(
        default_query.liquidation_tick_down(account(), &[]).unwrap(),
        -30_000
    );

    let config = SolverConfig {
        tick_window: 20_000,
        ..SolverConfig::default()
    };
    let tight_query = RiskQuery::with_config(&oracle, config);
    assert_eq!(
        tight_query.liquidation_tick_down(account(), &[]).unwrap(),
        MIN_TICK
    );
    assert_eq!(
        tight_query.liquidation_tick_up(account(), &[]).unwrap(),
        MAX_TICK
    );
}

#[test]
fn solver_config_round_trips_through_serde() {
    // Callers persist config overrides alongside deployment settings.
    let config = SolverConfig {
        tick_window: 50_000,
        ..SolverConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: SolverConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn ladder_failure_names_the_failing_entry() {
    // Constant-zero requirement never crosses any target; the first entry
    // (1%) is the one reported.
    let oracle = MockOracle {
        balance0: 1_000_000,
        ..MockOracle::default()
    }
    .with_requirement(RequirementModel::Constant(0));
    let query = RiskQuery::new(&oracle);

    let err = query
        .max_position_size(account(), &[], &single_leg_call(), 0, TokenSelector::Token0, 10_000)
        .unwrap_err();
    assert_eq!(
        err,
        SolverError::ExceedsMaximumSize {
            ladder_index: 0,
            percent: 1
        }
    );
    assert!(err.to_string().contains("ladder entry 0"));
}
