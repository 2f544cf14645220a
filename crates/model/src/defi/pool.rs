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

//! Pool metadata as supplied by the data source, and the validated snapshot derived from it.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::defi::{
    error::PoolAnalysisError,
    tick_math::{MAX_TICK, MIN_TICK, TickMath},
    token::Token,
};

/// Raw pool metadata as returned by the external data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolMetadata {
    /// The pool identifier (contract address).
    pub pool_id: String,
    /// The tick containing the current pool price.
    pub current_tick: i32,
    /// The trading fee tier, in hundredths of a basis point.
    pub fee_tier: u32,
    /// The first token in the trading pair.
    pub token0: Token,
    /// The second token in the trading pair.
    pub token1: Token,
}

/// Immutable state of a pool for a single analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// The pool identifier (contract address).
    pub pool_id: String,
    /// The tick containing the current pool price.
    pub current_tick: i32,
    /// The trading fee tier, in hundredths of a basis point.
    pub fee_tier: u32,
    /// The spacing between initializable ticks, always positive.
    pub tick_spacing: i32,
    /// The first token in the trading pair.
    pub token0: Token,
    /// The second token in the trading pair.
    pub token1: Token,
}

impl PoolSnapshot {
    /// Creates a new [`PoolSnapshot`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `current_tick` is outside the protocol bounds ([`PoolAnalysisError::TickOutOfBounds`]).
    /// - `tick_spacing` is not positive ([`PoolAnalysisError::InvalidTickSpacing`]).
    pub fn new(
        pool_id: impl Into<String>,
        current_tick: i32,
        fee_tier: u32,
        tick_spacing: i32,
        token0: Token,
        token1: Token,
    ) -> Result<Self, PoolAnalysisError> {
        if !(MIN_TICK..=MAX_TICK).contains(&current_tick) {
            return Err(PoolAnalysisError::TickOutOfBounds(current_tick));
        }
        if tick_spacing <= 0 {
            return Err(PoolAnalysisError::InvalidTickSpacing(tick_spacing));
        }

        Ok(Self {
            pool_id: pool_id.into(),
            current_tick,
            fee_tier,
            tick_spacing,
            token0,
            token1,
        })
    }

    /// Creates a snapshot from data-source metadata, deriving the tick spacing from the fee tier.
    ///
    /// # Errors
    ///
    /// Returns an error if the tick is out of bounds or the derived spacing is not positive.
    pub fn from_metadata(
        metadata: PoolMetadata,
        tick_math: &TickMath,
    ) -> Result<Self, PoolAnalysisError> {
        let tick_spacing = tick_math.tick_spacing(metadata.fee_tier);
        Self::new(
            metadata.pool_id,
            metadata.current_tick,
            metadata.fee_tier,
            tick_spacing,
            metadata.token0,
            metadata.token1,
        )
    }

    /// Returns the ticker symbol for this pool as a formatted string.
    #[must_use]
    pub fn ticker(&self) -> String {
        format!("{}/{}", self.token0.symbol, self.token1.symbol)
    }

    /// Returns `decimals1 - decimals0`, the exponent used to adjust raw prices.
    #[must_use]
    pub fn decimals_difference(&self) -> i32 {
        i32::from(self.token1.decimals) - i32::from(self.token0.decimals)
    }
}

impl Display for PoolSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PoolSnapshot(pool_id={}, ticker={}, fee_tier={}, tick_spacing={}, current_tick={})",
            self.pool_id,
            self.ticker(),
            self.fee_tier,
            self.tick_spacing,
            self.current_tick,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::stubs::usdc_weth_metadata;

    #[rstest]
    fn test_from_metadata_derives_spacing(usdc_weth_metadata: PoolMetadata) {
        let snapshot =
            PoolSnapshot::from_metadata(usdc_weth_metadata, &TickMath::default()).unwrap();
        assert_eq!(snapshot.tick_spacing, 60);
        assert_eq!(snapshot.ticker(), "USDC/WETH");
        assert_eq!(snapshot.decimals_difference(), 12);
    }

    #[rstest]
    fn test_from_metadata_unknown_fee_tier(mut usdc_weth_metadata: PoolMetadata) {
        usdc_weth_metadata.fee_tier = 777;
        let snapshot =
            PoolSnapshot::from_metadata(usdc_weth_metadata, &TickMath::default()).unwrap();
        assert_eq!(snapshot.tick_spacing, 60);
    }

    #[rstest]
    #[case(0)]
    #[case(-60)]
    fn test_new_rejects_non_positive_spacing(#[case] tick_spacing: i32) {
        let result = PoolSnapshot::new(
            "0xpool",
            0,
            3000,
            tick_spacing,
            Token::new("A", 18),
            Token::new("B", 18),
        );
        assert_eq!(result, Err(PoolAnalysisError::InvalidTickSpacing(tick_spacing)));
    }

    #[rstest]
    #[case(i32::MIN + 1)]
    #[case(MIN_TICK - 1)]
    #[case(MAX_TICK + 1)]
    #[case(i32::MAX)]
    fn test_new_rejects_out_of_bounds_tick(#[case] current_tick: i32) {
        let result = PoolSnapshot::new(
            "0xpool",
            current_tick,
            3000,
            60,
            Token::new("A", 18),
            Token::new("B", 18),
        );
        assert_eq!(result, Err(PoolAnalysisError::TickOutOfBounds(current_tick)));
    }

    #[rstest]
    #[case(MIN_TICK)]
    #[case(MAX_TICK)]
    fn test_new_accepts_tick_bounds(#[case] current_tick: i32) {
        let result = PoolSnapshot::new(
            "0xpool",
            current_tick,
            3000,
            60,
            Token::new("A", 18),
            Token::new("B", 18),
        );
        assert!(result.is_ok());
    }

    #[rstest]
    fn test_display(usdc_weth_metadata: PoolMetadata) {
        let snapshot =
            PoolSnapshot::from_metadata(usdc_weth_metadata, &TickMath::default()).unwrap();
        assert_eq!(
            snapshot.to_string(),
            "PoolSnapshot(pool_id=0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8, ticker=USDC/WETH, fee_tier=3000, tick_spacing=60, current_tick=201234)"
        );
    }
}
