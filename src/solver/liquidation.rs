//! Liquidation-tick search via the secant method.
//!
//! Net equity (balance − requirement) is evaluated at trial ticks on one
//! side of the current price; the secant update walks toward the zero
//! crossing. The curve is only locally monotonic, so the search carries a
//! hard tolerance window: once a trial tick leaves ±`tick_window` of the
//! current tick, the protocol's extreme tick is returned as a sentinel
//! instead of a crossing.

use alloy::primitives::Address;
use tracing::{debug, trace};

use super::{aggregate, SolverConfig};
use crate::consts::{MAX_TICK, MIN_TICK};
use crate::errors::SolverError;
use crate::oracle::ProtocolOracle;
use crate::types::{Position, SearchDirection};

/// Estimated tick at which the account's net equity crosses zero in the
/// given direction, or the direction's sentinel extreme if no crossing is
/// reachable inside the tolerance window.
pub(crate) fn liquidation_tick<O: ProtocolOracle>(
    oracle: &O,
    config: &SolverConfig,
    account: Address,
    positions: &[Position],
    direction: SearchDirection,
) -> Result<i32, SolverError> {
    let current = oracle.current_tick()? as i128;
    let offset = match direction {
        SearchDirection::Down => -(config.secant_offset as i128),
        SearchDirection::Up => config.secant_offset as i128,
    };

    let mut x0 = current;
    let mut x1 = current + offset;
    let mut g0 = equity(oracle, account, positions, x0)?;

    for iter in 0..config.max_secant_iters {
        let g1 = equity(oracle, account, positions, x1)?;
        if g1 == g0 {
            // Flat net-equity region: the secant update is undefined.
            return Err(SolverError::NonConvergent {
                direction,
                reason: format!("flat net equity between ticks {x0} and {x1}"),
            });
        }

        let next = x1 - g1 * (x1 - x0) / (g1 - g0);
        trace!(iter, x0, x1, next, g1, "secant step");
        x0 = x1;
        g0 = g1;
        x1 = next;

        if (x1 - current).abs() > config.tick_window as i128 {
            debug!(%direction, x1, "no crossing inside tolerance window");
            return Ok(sentinel(direction));
        }

        // Termination is a boolean equality, not a conjunction: the search
        // stops when both neighbor probes agree (both hold or both fail),
        // which is what pins the sign flip to exactly x1.
        let above = equity(oracle, account, positions, x1 + 1)? >= 0;
        let below = equity(oracle, account, positions, x1 - 1)? <= 0;
        if above == below {
            debug!(%direction, tick = x1, "liquidation tick found");
            return Ok(x1 as i32);
        }
    }

    Err(SolverError::NonConvergent {
        direction,
        reason: format!("no sign change within {} iterations", config.max_secant_iters),
    })
}

fn equity<O: ProtocolOracle>(
    oracle: &O,
    account: Address,
    positions: &[Position],
    tick: i128,
) -> Result<i128, SolverError> {
    // Trial ticks are kept inside the tolerance window, so the narrowing
    // cannot lose range.
    Ok(aggregate::net_equity_at(
        oracle,
        account,
        positions,
        tick as i32,
    )?)
}

fn sentinel(direction: SearchDirection) -> i32 {
    match direction {
        SearchDirection::Down => MIN_TICK,
        SearchDirection::Up => MAX_TICK,
    }
}
