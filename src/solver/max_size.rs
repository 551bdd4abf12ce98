//! Maximum position size across the percent-of-headroom ladder.
//!
//! For each ladder percentage the solver finds the largest candidate size
//! whose collateral requirement consumes exactly that share of the
//! account's headroom. The requirement curve is externally computed and not
//! invertible, so each entry runs an adaptive-bracket bisection:
//!
//! - **Bracket expansion**: start at `[1, i64::MAX]`; shrink the upper
//!   bound by 5% whenever the evaluator reports an invalid notional, grow
//!   it by 10% while both endpoints sit on the same side of the target,
//!   and abort past 2^104 − 1.
//! - **Bisection**: halve until the bracket is within `size_epsilon`,
//!   comparing signs without multiplication so probes at the
//!   representable-size boundary cannot overflow.

use alloy::primitives::Address;
use tracing::{debug, trace};

use super::{aggregate, requirement, SolverConfig};
use crate::consts::{BPS, BRACKET_START_HIGH, LADDER, MAX_POSITION_SIZE};
use crate::errors::{OracleError, SolverError};
use crate::oracle::ProtocolOracle;
use crate::types::{Position, TokenSelector};

/// Solve every ladder entry for `candidate` against the account's current
/// headroom. Fails as a whole: one bad entry aborts the ladder.
#[allow(clippy::too_many_arguments)]
pub(crate) fn max_position_size<O: ProtocolOracle>(
    oracle: &O,
    config: &SolverConfig,
    account: Address,
    positions: &[Position],
    candidate: &Position,
    at_tick: i32,
    token: TokenSelector,
    mmr_bps: u32,
) -> Result<[u128; 7], SolverError> {
    let status = aggregate::collateral_status(oracle, account, at_tick, positions, token)?;
    // Headroom is computed once; all seven entries see the same collateral
    // and price snapshot.
    let headroom = status.balance as i128 - status.required as i128 * mmr_bps as i128 / BPS;
    debug!(headroom, ?token, at_tick, "max-size ladder start");

    let mut sizes = [0u128; 7];
    for (index, percent) in LADDER.into_iter().enumerate() {
        sizes[index] = solve_entry(
            oracle, config, candidate, at_tick, token, headroom, index, percent,
        )?;
        trace!(index, percent, size = sizes[index], "ladder entry solved");
    }
    Ok(sizes)
}

/// Largest size whose requirement equals `headroom × percent / 100`,
/// within `size_epsilon`.
#[allow(clippy::too_many_arguments)]
fn solve_entry<O: ProtocolOracle>(
    oracle: &O,
    config: &SolverConfig,
    candidate: &Position,
    at_tick: i32,
    token: TokenSelector,
    headroom: i128,
    ladder_index: usize,
    percent: u32,
) -> Result<u128, SolverError> {
    let target = headroom * percent as i128 / 100;

    let f = |size: u128| -> Result<i128, OracleError> {
        Ok(target - requirement::required_in_token(oracle, candidate, token, size, at_tick)?)
    };
    let fatal = |reason: String| SolverError::InvalidPosition {
        ladder_index,
        percent,
        reason,
    };

    // Phase 1: bracket a sign change of f.
    let mut low: u128 = 1;
    let mut high: u128 = BRACKET_START_HIGH;
    let mut steps = 0u32;
    loop {
        if steps >= config.max_bracket_steps {
            return Err(SolverError::IterationCap {
                ladder_index,
                percent,
                phase: "bracket expansion",
            });
        }
        steps += 1;

        match (f(low), f(high)) {
            (Err(OracleError::InvalidNotional), _) | (_, Err(OracleError::InvalidNotional)) => {
                // Too large relative to the position's minimum-notional
                // floor: walk the upper bound down and retry.
                high = high * 95 / 100;
                trace!(high, ladder_index, "bracket shrink on invalid notional");
                if high <= low {
                    return Err(fatal("no valid size above the minimum notional floor".into()));
                }
            }
            (Err(e), _) | (_, Err(e)) => return Err(fatal(e.to_string())),
            (Ok(f_low), Ok(f_high)) => {
                if opposite_signs(f_low, f_high) {
                    trace!(low, high, ladder_index, "bracket found");
                    break;
                }
                // Requirement has not crossed the target yet: widen upward.
                let grown = high + high / 10;
                if grown > MAX_POSITION_SIZE {
                    return Err(SolverError::ExceedsMaximumSize {
                        ladder_index,
                        percent,
                    });
                }
                high = grown;
            }
        }
    }

    // Phase 2: bisect the bracket down to size_epsilon.
    let mut iters = 0u32;
    let mut mid = low + (high - low) / 2;
    while high - low >= config.size_epsilon {
        if iters >= config.max_bisection_iters {
            return Err(SolverError::IterationCap {
                ladder_index,
                percent,
                phase: "bisection",
            });
        }
        iters += 1;
        mid = low + (high - low) / 2;

        match (f(low), f(high), f(mid)) {
            (Err(OracleError::InvalidNotional), _, _)
            | (_, Err(OracleError::InvalidNotional), _)
            | (_, _, Err(OracleError::InvalidNotional)) => {
                // The shrink-and-retry path survives into this phase: the
                // search makes no phase distinction for that error.
                high = high * 95 / 100;
                if high <= low {
                    return Err(fatal("no valid size above the minimum notional floor".into()));
                }
                // The answer must stay inside the bracket even if the
                // shrink collapses it below epsilon; the stale midpoint is
                // the probe that just failed.
                mid = low + (high - low) / 2;
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => return Err(fatal(e.to_string())),
            (Ok(f_low), Ok(f_high), Ok(f_mid)) => {
                if f_mid == 0 {
                    // Exact root.
                    return Ok(mid);
                }
                if !opposite_signs(f_low, f_high) {
                    // Bracket lost mid-search: the requirement curve is not
                    // monotone over this range (known limitation). Abort
                    // loudly rather than bisect toward a root that is not
                    // there.
                    return Err(fatal("requirement is not monotone over the bracket".into()));
                }
                if opposite_signs(f_low, f_mid) {
                    high = mid;
                } else {
                    low = mid;
                }
            }
        }
    }
    Ok(mid)
}

/// Sign comparison without multiplication. Zero sits on the non-negative
/// side.
fn opposite_signs(a: i128, b: i128) -> bool {
    (a < 0) != (b < 0)
}
