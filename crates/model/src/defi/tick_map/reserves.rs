// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Reconstruction of the token reserves held within the active tick range.
//!
//! The reconstructor walks the spacing grid from the lowest initialized tick up to the
//! bottom of the range containing the current tick, accumulating net liquidity as it
//! crosses each tick. The accumulated liquidity is then converted into token amounts with
//! the constant-product range formulas:
//!
//! ```text
//! amount0 = L * (sqrt_b - sqrt_p) / (sqrt_p * sqrt_b)
//! amount1 = L * (sqrt_p - sqrt_a)
//! ```

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::defi::{
    error::PoolAnalysisError,
    pool::PoolSnapshot,
    tick_map::LiquidityDeltaMap,
    tick_math::{TickMath, floor_to_spacing},
};

/// The half-open tick interval `[bottom, top)` containing the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveRange {
    /// The spacing-aligned bottom tick (inclusive).
    pub bottom: i32,
    /// The top tick (exclusive), one spacing above the bottom.
    pub top: i32,
}

impl ActiveRange {
    /// Returns the range of width `tick_spacing` containing `current_tick`.
    ///
    /// Returns `None` if `tick_spacing` is not positive or the range does not fit in `i32`.
    #[must_use]
    pub fn containing(current_tick: i32, tick_spacing: i32) -> Option<Self> {
        let bottom = floor_to_spacing(current_tick, tick_spacing)?;
        let top = bottom.checked_add(tick_spacing)?;
        Some(Self { bottom, top })
    }

    /// Returns whether `tick` lies within this range.
    #[must_use]
    pub fn contains(&self, tick: i32) -> bool {
        (self.bottom..self.top).contains(&tick)
    }
}

impl Display for ActiveRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.bottom, self.top)
    }
}

/// Amounts of token0 and token1 held within the active range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservePair {
    /// Amount of token0.
    pub amount0: f64,
    /// Amount of token1.
    pub amount1: f64,
}

impl ReservePair {
    /// Creates a new [`ReservePair`] instance.
    #[must_use]
    pub const fn new(amount0: f64, amount1: f64) -> Self {
        Self { amount0, amount1 }
    }
}

/// Result of reconstructing the active range of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeLiquidity {
    /// The range containing the current tick.
    pub range: ActiveRange,
    /// The accumulated net liquidity active within the range.
    pub liquidity: i128,
    /// The number of grid ticks visited by the walk, including the range bottom.
    pub ticks_walked: usize,
    /// The decimal-adjusted reserves held within the range.
    pub reserves: ReservePair,
}

/// Accumulates liquidity deltas along the spacing grid from the lowest initialized tick
/// until `range_bottom` is visited.
///
/// Returns the liquidity active immediately after crossing `range_bottom`, and the number
/// of ticks visited.
///
/// # Errors
///
/// Returns an error if:
/// - `deltas` is empty.
/// - `range_bottom` is not on the grid walked from the lowest tick, or lies outside the
///   initialized tick bounds.
/// - The accumulated liquidity overflows.
pub fn accumulate_liquidity(
    deltas: &LiquidityDeltaMap,
    range_bottom: i32,
    tick_spacing: i32,
) -> Result<(i128, usize), PoolAnalysisError> {
    if tick_spacing <= 0 {
        return Err(PoolAnalysisError::InvalidTickSpacing(tick_spacing));
    }

    let (min_tick, max_tick) = match (deltas.min_tick(), deltas.max_tick()) {
        (Some(min_tick), Some(max_tick)) => (min_tick, max_tick),
        _ => return Err(PoolAnalysisError::InsufficientData),
    };
    let range_not_found = PoolAnalysisError::RangeNotFound {
        bottom: range_bottom,
        min_tick,
        max_tick,
        tick_spacing,
    };

    // The walk only ever visits min_tick + k * spacing within the initialized bounds
    let offset = i64::from(range_bottom) - i64::from(min_tick);
    if range_bottom > max_tick || offset < 0 || offset % i64::from(tick_spacing) != 0 {
        log::debug!("Range bottom {range_bottom} unreachable from {min_tick} by {tick_spacing}");
        return Err(range_not_found);
    }

    let mut liquidity: i128 = 0;
    let mut ticks_walked = 0;
    let mut tick = min_tick;

    while tick <= max_tick {
        liquidity = liquidity
            .checked_add(deltas.get(tick))
            .ok_or(PoolAnalysisError::LiquidityOverflow { tick })?;
        ticks_walked += 1;

        if tick == range_bottom {
            log::debug!(
                "Liquidity {liquidity} at range bottom {range_bottom} after {ticks_walked} ticks"
            );
            return Ok((liquidity, ticks_walked));
        }

        tick = match tick.checked_add(tick_spacing) {
            Some(next) => next,
            None => break,
        };
    }

    Err(range_not_found)
}

/// Returns the raw token amounts for `liquidity` spread over a range with square-root
/// price bounds `sqrt_price_lower` and `sqrt_price_upper`, at `sqrt_price_current`.
#[must_use]
pub fn range_amounts(
    liquidity: f64,
    sqrt_price_lower: f64,
    sqrt_price_upper: f64,
    sqrt_price_current: f64,
) -> ReservePair {
    ReservePair {
        amount0: liquidity * (sqrt_price_upper - sqrt_price_current)
            / (sqrt_price_current * sqrt_price_upper),
        amount1: liquidity * (sqrt_price_current - sqrt_price_lower),
    }
}

/// Reconstructs the reserves held in the active range of a pool from its liquidity deltas.
#[derive(Debug, Clone, Copy)]
pub struct TickRangeReconstructor<'a> {
    tick_math: &'a TickMath,
}

impl<'a> TickRangeReconstructor<'a> {
    /// Creates a new [`TickRangeReconstructor`] using the given tick math.
    #[must_use]
    pub const fn new(tick_math: &'a TickMath) -> Self {
        Self { tick_math }
    }

    /// Returns the active range liquidity and decimal-adjusted reserves for `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `deltas` is empty ([`PoolAnalysisError::InsufficientData`]).
    /// - The walk never reaches the active range bottom ([`PoolAnalysisError::RangeNotFound`]).
    /// - The accumulated liquidity overflows ([`PoolAnalysisError::LiquidityOverflow`]).
    pub fn reconstruct(
        &self,
        snapshot: &PoolSnapshot,
        deltas: &LiquidityDeltaMap,
    ) -> Result<RangeLiquidity, PoolAnalysisError> {
        if deltas.is_empty() {
            return Err(PoolAnalysisError::InsufficientData);
        }

        let misaligned = deltas.misaligned_ticks(snapshot.tick_spacing);
        if !misaligned.is_empty() {
            log::warn!(
                "{} of {} initialized ticks are off the spacing {} grid and skipped",
                misaligned.len(),
                deltas.len(),
                snapshot.tick_spacing,
            );
        }

        let range = ActiveRange::containing(snapshot.current_tick, snapshot.tick_spacing)
            .ok_or(PoolAnalysisError::TickOutOfBounds(snapshot.current_tick))?;
        let (liquidity, ticks_walked) =
            accumulate_liquidity(deltas, range.bottom, snapshot.tick_spacing)?;

        let sqrt_price_lower = self.tick_math.tick_to_sqrt_price(range.bottom);
        let sqrt_price_upper = self.tick_math.tick_to_sqrt_price(range.top);
        let sqrt_price_current = self.tick_math.tick_to_sqrt_price(snapshot.current_tick);

        let raw = range_amounts(
            liquidity as f64,
            sqrt_price_lower,
            sqrt_price_upper,
            sqrt_price_current,
        );
        let reserves = ReservePair::new(
            snapshot.token0.scale_amount(raw.amount0),
            snapshot.token1.scale_amount(raw.amount1),
        );

        log::debug!(
            "Active range {range} holds liquidity={liquidity}, {}={}, {}={}",
            snapshot.token0.symbol,
            reserves.amount0,
            snapshot.token1.symbol,
            reserves.amount1,
        );

        Ok(RangeLiquidity {
            range,
            liquidity,
            ticks_walked,
            reserves,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tickvol_core::approx_eq;

    use super::*;
    use crate::defi::{tick_map::tick::TickDelta, token::Token};

    fn snapshot(
        current_tick: i32,
        tick_spacing: i32,
        decimals0: u8,
        decimals1: u8,
    ) -> PoolSnapshot {
        PoolSnapshot::new(
            "0xpool",
            current_tick,
            3000,
            tick_spacing,
            Token::new("AAA", decimals0),
            Token::new("BBB", decimals1),
        )
        .unwrap()
    }

    #[fixture]
    fn tick_math() -> TickMath {
        TickMath::default()
    }

    #[fixture]
    fn delta_map() -> LiquidityDeltaMap {
        LiquidityDeltaMap::from_deltas([
            TickDelta::new(-120, 100),
            TickDelta::new(0, 50),
            TickDelta::new(60, -30),
        ])
    }

    #[rstest]
    #[case(10, 60, 0, 60)]
    #[case(0, 60, 0, 60)]
    #[case(-1, 60, -60, 0)]
    #[case(-60, 60, -60, 0)]
    #[case(201_234, 10, 201_230, 201_240)]
    fn test_active_range_containing(
        #[case] current_tick: i32,
        #[case] spacing: i32,
        #[case] bottom: i32,
        #[case] top: i32,
    ) {
        let range = ActiveRange::containing(current_tick, spacing).unwrap();
        assert_eq!(range, ActiveRange { bottom, top });
        assert!(range.contains(current_tick));
        assert!(!range.contains(top));
    }

    #[rstest]
    fn test_accumulate_liquidity_stops_at_range_bottom(delta_map: LiquidityDeltaMap) {
        let (liquidity, ticks_walked) = accumulate_liquidity(&delta_map, 0, 60).unwrap();
        assert_eq!(liquidity, 150);
        assert_eq!(ticks_walked, 3); // -120, -60, 0
    }

    #[rstest]
    #[case(-120, 100, 1)]
    #[case(-60, 100, 2)]
    #[case(60, 120, 4)]
    fn test_accumulate_liquidity_matches_prefix_sum(
        delta_map: LiquidityDeltaMap,
        #[case] bottom: i32,
        #[case] expected: i128,
        #[case] expected_walked: usize,
    ) {
        let (liquidity, ticks_walked) = accumulate_liquidity(&delta_map, bottom, 60).unwrap();
        assert_eq!(liquidity, expected);
        assert_eq!(ticks_walked, expected_walked);
        assert_eq!(delta_map.cumulative_liquidity(bottom), Some(liquidity));
    }

    #[rstest]
    fn test_accumulate_liquidity_empty_map() {
        let result = accumulate_liquidity(&LiquidityDeltaMap::new(), 0, 60);
        assert_eq!(result, Err(PoolAnalysisError::InsufficientData));
    }

    #[rstest]
    #[case(120)] // Above the highest initialized tick
    #[case(-180)] // Below the lowest initialized tick
    fn test_accumulate_liquidity_range_outside_bounds(
        delta_map: LiquidityDeltaMap,
        #[case] bottom: i32,
    ) {
        let result = accumulate_liquidity(&delta_map, bottom, 60);
        assert_eq!(
            result,
            Err(PoolAnalysisError::RangeNotFound {
                bottom,
                min_tick: -120,
                max_tick: 60,
                tick_spacing: 60,
            })
        );
    }

    #[rstest]
    fn test_accumulate_liquidity_off_grid_minimum() {
        // Walk visits -130, -70, -10, 50 and never lands on 0
        let map =
            LiquidityDeltaMap::from_deltas([TickDelta::new(-130, 100), TickDelta::new(60, -100)]);
        let result = accumulate_liquidity(&map, 0, 60);
        assert!(matches!(result, Err(PoolAnalysisError::RangeNotFound { bottom: 0, .. })));
    }

    #[rstest]
    fn test_accumulate_liquidity_overflow() {
        let map = LiquidityDeltaMap::from_deltas([
            TickDelta::new(-60, i128::MAX),
            TickDelta::new(0, 1),
        ]);
        let result = accumulate_liquidity(&map, 0, 60);
        assert_eq!(result, Err(PoolAnalysisError::LiquidityOverflow { tick: 0 }));
    }

    #[rstest]
    fn test_accumulate_liquidity_invalid_spacing(delta_map: LiquidityDeltaMap) {
        let result = accumulate_liquidity(&delta_map, 0, 0);
        assert_eq!(result, Err(PoolAnalysisError::InvalidTickSpacing(0)));
    }

    #[rstest]
    fn test_reconstruct_uses_accumulated_liquidity(
        tick_math: TickMath,
        delta_map: LiquidityDeltaMap,
    ) {
        let snapshot = snapshot(10, 60, 0, 0);
        let result = TickRangeReconstructor::new(&tick_math)
            .reconstruct(&snapshot, &delta_map)
            .unwrap();

        assert_eq!(result.range, ActiveRange { bottom: 0, top: 60 });
        assert_eq!(result.liquidity, 150);

        let sa = tick_math.tick_to_price(0);
        let sb = tick_math.tick_to_price(30);
        let sp = tick_math.price_at(5.0);
        let expected0 = 150.0 * (sb - sp) / (sp * sb);
        let expected1 = 150.0 * (sp - sa);
        assert!(approx_eq!(f64, result.reserves.amount0, expected0, epsilon = 1e-12));
        assert!(approx_eq!(f64, result.reserves.amount1, expected1, epsilon = 1e-12));
    }

    #[rstest]
    fn test_reconstruct_single_tick_at_range_bottom(tick_math: TickMath) {
        let snapshot = snapshot(0, 60, 18, 18);
        let map = LiquidityDeltaMap::from_deltas([TickDelta::new(0, 1000)]);
        let result = TickRangeReconstructor::new(&tick_math)
            .reconstruct(&snapshot, &map)
            .unwrap();

        let sb = 1.0001_f64.powf(30.0);
        let expected0 = 1000.0 * (sb - 1.0) / sb / 1e18;
        assert_eq!(result.liquidity, 1000);
        assert_eq!(result.ticks_walked, 1);
        assert_eq!(result.reserves.amount1, 0.0);
        assert!(approx_eq!(f64, result.reserves.amount0, expected0, epsilon = 1e-30));
    }

    #[rstest]
    fn test_reconstruct_negative_current_tick(tick_math: TickMath) {
        let snapshot = snapshot(-1, 60, 0, 0);
        let map = LiquidityDeltaMap::from_deltas([
            TickDelta::new(-120, 10),
            TickDelta::new(-60, 5),
            TickDelta::new(60, -15),
        ]);
        let result = TickRangeReconstructor::new(&tick_math)
            .reconstruct(&snapshot, &map)
            .unwrap();

        assert_eq!(result.range, ActiveRange { bottom: -60, top: 0 });
        assert_eq!(result.liquidity, 15);
        assert!(result.reserves.amount0 > 0.0);
        assert!(result.reserves.amount1 > 0.0);
    }

    #[rstest]
    fn test_reconstruct_odd_tick_uses_fractional_exponent(tick_math: TickMath) {
        let snapshot = snapshot(-7, 1, 0, 0);
        let map =
            LiquidityDeltaMap::from_deltas([TickDelta::new(-9, 400), TickDelta::new(-5, -400)]);
        let result = TickRangeReconstructor::new(&tick_math)
            .reconstruct(&snapshot, &map)
            .unwrap();

        // Current tick sits on the range bottom, so no token1 is held
        assert_eq!(result.range, ActiveRange { bottom: -7, top: -6 });
        assert_eq!(result.reserves.amount1, 0.0);
        let sb = tick_math.price_at(-3.0);
        let sp = tick_math.price_at(-3.5);
        assert!(approx_eq!(
            f64,
            result.reserves.amount0,
            400.0 * (sb - sp) / (sp * sb),
            epsilon = 1e-12
        ));
    }

    #[rstest]
    #[case(i32::MIN + 1, 60)]
    #[case(i32::MAX, 60)]
    #[case(10, 0)]
    fn test_active_range_not_representable(#[case] current_tick: i32, #[case] spacing: i32) {
        assert_eq!(ActiveRange::containing(current_tick, spacing), None);
    }

    #[rstest]
    fn test_reconstruct_tick_near_i32_min_is_error(tick_math: TickMath) {
        // Built directly so the constructor bounds check does not intercept it
        let snapshot = PoolSnapshot {
            current_tick: i32::MIN + 1,
            ..snapshot(0, 60, 18, 18)
        };
        let map = LiquidityDeltaMap::from_deltas([TickDelta::new(0, 1)]);

        let result = TickRangeReconstructor::new(&tick_math).reconstruct(&snapshot, &map);

        assert_eq!(result, Err(PoolAnalysisError::TickOutOfBounds(i32::MIN + 1)));
    }

    #[rstest]
    fn test_reconstruct_empty_map(tick_math: TickMath) {
        let result = TickRangeReconstructor::new(&tick_math)
            .reconstruct(&snapshot(0, 60, 18, 18), &LiquidityDeltaMap::new());
        assert_eq!(result, Err(PoolAnalysisError::InsufficientData));
    }

    #[rstest]
    fn test_reconstruct_decimal_adjustment(tick_math: TickMath, delta_map: LiquidityDeltaMap) {
        let raw = TickRangeReconstructor::new(&tick_math)
            .reconstruct(&snapshot(10, 60, 0, 0), &delta_map)
            .unwrap();
        let scaled = TickRangeReconstructor::new(&tick_math)
            .reconstruct(&snapshot(10, 60, 6, 18), &delta_map)
            .unwrap();

        assert!(approx_eq!(
            f64,
            scaled.reserves.amount0 * 1e6,
            raw.reserves.amount0,
            epsilon = 1e-9
        ));
        assert!(approx_eq!(
            f64,
            scaled.reserves.amount1 * 1e18,
            raw.reserves.amount1,
            epsilon = 1e-9
        ));
    }

    #[rstest]
    fn test_range_amounts_at_bounds() {
        let lower = range_amounts(100.0, 1.0, 2.0, 1.0);
        assert_eq!(lower, ReservePair::new(50.0, 0.0));

        let upper = range_amounts(100.0, 1.0, 2.0, 2.0);
        assert_eq!(upper, ReservePair::new(0.0, 100.0));
    }
}
