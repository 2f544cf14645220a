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

//! Conversions between tick indices, prices and fee-tier tick spacings.
//!
//! Prices live on the geometric grid `price(tick) = 1.0001^tick`. Square-root prices are
//! obtained by halving the tick exponent rather than taking a literal square root, which
//! mirrors the square-root price invariant of the underlying AMM.

use std::collections::BTreeMap;

/// Base of the geometric tick price grid.
pub const TICK_BASE: f64 = 1.0001;

/// Lowest tick supported by the protocol.
pub const MIN_TICK: i32 = -887_272;

/// Highest tick supported by the protocol.
pub const MAX_TICK: i32 = 887_272;

/// Tick spacing used for fee tiers missing from the lookup table.
pub const DEFAULT_TICK_SPACING: i32 = 60;

/// Tick spacing for each standard fee tier (fee tier in hundredths of a basis point).
pub const FEE_TIER_TICK_SPACINGS: [(u32, i32); 4] =
    [(100, 1), (500, 10), (3000, 60), (10000, 200)];

/// Returns the price at `tick` on the standard `1.0001` grid.
///
/// No bounds checking is performed, extreme ticks overflow to infinity or underflow to zero.
#[inline]
#[must_use]
pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powf(f64::from(tick))
}

/// Returns the tick spacing for `fee_tier`.
///
/// Unknown tiers default to [`DEFAULT_TICK_SPACING`].
#[must_use]
pub fn fee_tier_to_tick_spacing(fee_tier: u32) -> i32 {
    FEE_TIER_TICK_SPACINGS
        .iter()
        .find(|(tier, _)| *tier == fee_tier)
        .map_or(DEFAULT_TICK_SPACING, |(_, spacing)| *spacing)
}

/// Returns the bottom tick of the spacing-aligned range containing `tick`.
///
/// Uses floored division, so negative ticks round towards negative infinity
/// (`-1` with spacing `60` maps to `-60`, not `0`).
///
/// Returns `None` if `tick_spacing` is not positive or the bottom is below `i32::MIN`.
#[inline]
#[must_use]
pub fn floor_to_spacing(tick: i32, tick_spacing: i32) -> Option<i32> {
    if tick_spacing <= 0 {
        return None;
    }
    // Euclidean remainder is the floored remainder for a positive divisor
    tick.checked_sub(tick.rem_euclid(tick_spacing))
}

/// Tick math parameterized by the grid base and the fee-tier spacing table.
///
/// [`TickMath::default`] holds the protocol constants; custom instances exist for
/// forks that deploy different fee tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMath {
    base: f64,
    tick_spacings: BTreeMap<u32, i32>,
    default_tick_spacing: i32,
}

impl Default for TickMath {
    fn default() -> Self {
        Self {
            base: TICK_BASE,
            tick_spacings: FEE_TIER_TICK_SPACINGS.into_iter().collect(),
            default_tick_spacing: DEFAULT_TICK_SPACING,
        }
    }
}

impl TickMath {
    /// Creates a new [`TickMath`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not finite and greater than one, or if any
    /// spacing (including the default) is not positive.
    pub fn new(
        base: f64,
        tick_spacings: BTreeMap<u32, i32>,
        default_tick_spacing: i32,
    ) -> anyhow::Result<Self> {
        if !base.is_finite() || base <= 1.0 {
            anyhow::bail!("invalid tick base: must be finite and greater than 1, was {base}");
        }
        tickvol_core::correctness::check_positive_i32(
            default_tick_spacing,
            "default_tick_spacing",
        )?;
        for (fee_tier, spacing) in &tick_spacings {
            tickvol_core::correctness::check_positive_i32(
                *spacing,
                &format!("tick_spacing[{fee_tier}]"),
            )?;
        }

        Ok(Self {
            base,
            tick_spacings,
            default_tick_spacing,
        })
    }

    /// Returns `base^exponent`, accepting fractional exponents.
    #[inline]
    #[must_use]
    pub fn price_at(&self, exponent: f64) -> f64 {
        self.base.powf(exponent)
    }

    /// Returns the price at `tick`.
    #[inline]
    #[must_use]
    pub fn tick_to_price(&self, tick: i32) -> f64 {
        self.price_at(f64::from(tick))
    }

    /// Returns the square-root price at `tick`, computed as `base^(tick / 2)`.
    ///
    /// Odd ticks yield a fractional exponent.
    #[inline]
    #[must_use]
    pub fn tick_to_sqrt_price(&self, tick: i32) -> f64 {
        self.price_at(f64::from(tick) / 2.0)
    }

    /// Returns the tick spacing for `fee_tier`.
    ///
    /// Unknown fee tiers fall back to the default spacing rather than failing the analysis.
    #[must_use]
    pub fn tick_spacing(&self, fee_tier: u32) -> i32 {
        match self.tick_spacings.get(&fee_tier) {
            Some(spacing) => *spacing,
            None => {
                log::warn!(
                    "Unknown fee tier {fee_tier}, defaulting tick spacing to {}",
                    self.default_tick_spacing
                );
                self.default_tick_spacing
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
