//! Protocol-level numeric constants shared by the solvers.

/// Fixed-point percent denominator: 10_000 = 100% (1 unit = 0.01%).
pub const BPS: i128 = 10_000;

/// Percent-of-headroom ladder targeted by the max-size solver, in order.
pub const LADDER: [u32; 7] = [1, 5, 10, 25, 50, 75, 100];

/// Size resolution the bisection settles to, in native token units.
pub const SIZE_EPSILON: u128 = 10;

/// Largest representable leg size: 2^104 − 1.
pub const MAX_POSITION_SIZE: u128 = (1u128 << 104) - 1;

/// Upper bracket seed for the max-size search.
pub const BRACKET_START_HIGH: u128 = i64::MAX as u128;

/// Initial secant trial offset from the current tick.
pub const SECANT_OFFSET: i32 = 10_000;

/// Search radius around the current tick. Past it the liquidation solver
/// returns the direction's sentinel tick instead of a crossing.
pub const TICK_WINDOW: i32 = 100_000;

/// Lowest representable tick, returned as the downward sentinel.
pub const MIN_TICK: i32 = -887_272;

/// Highest representable tick, returned as the upward sentinel.
pub const MAX_TICK: i32 = 887_272;

/// Cap on bracket expansion/shrink steps. Covers the worst case of walking
/// the upper bound from i64::MAX down to 1 in 5% shrinks (~850 steps).
pub const MAX_BRACKET_STEPS: u32 = 2_048;

/// Cap on bisection iterations. Halving 2^104 down to [`SIZE_EPSILON`]
/// needs ~101 steps.
pub const MAX_BISECTION_ITERS: u32 = 200;

/// Cap on secant iterations. The secant method is superlinear when it
/// converges at all; anything still searching after this many updates
/// inside a ±[`TICK_WINDOW`] band is not going to converge.
pub const MAX_SECANT_ITERS: u32 = 64;
