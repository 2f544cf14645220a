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

//! Quote orientation and single-unit valuation of the active range reserves.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::defi::{pool::PoolSnapshot, tick_map::reserves::ReservePair, tick_math::TickMath};

/// Stablecoin symbols preferred as the quote currency.
pub const DEFAULT_STABLECOINS: [&str; 8] =
    ["USDC", "DAI", "USDT", "TUSD", "LUSD", "BUSD", "GUSD", "UST"];

/// The set of token symbols treated as USD stablecoins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StablecoinSet {
    symbols: BTreeSet<String>,
}

impl Default for StablecoinSet {
    fn default() -> Self {
        Self::new(DEFAULT_STABLECOINS)
    }
}

impl StablecoinSet {
    /// Creates a new [`StablecoinSet`] from the given symbols.
    #[must_use]
    pub fn new<S: Into<String>>(symbols: impl IntoIterator<Item = S>) -> Self {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns whether `symbol` is a stablecoin. Matching is case-sensitive.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Returns the number of symbols in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Returns the current price of token0 in token1, adjusted for the tokens' decimal difference.
#[must_use]
pub fn adjusted_price(snapshot: &PoolSnapshot, tick_math: &TickMath) -> f64 {
    let raw_price = tick_math.tick_to_price(snapshot.current_tick);
    raw_price / tickvol_core::math::pow10(snapshot.decimals_difference())
}

/// Returns whether the price should be inverted to quote token1 in token0.
///
/// Quoting in a stablecoin is preferred: a stablecoin token0 paired with a non-stablecoin
/// token1 always inverts. Otherwise the price inverts when it is below one.
#[must_use]
pub fn should_invert_price(
    snapshot: &PoolSnapshot,
    adjusted_price: f64,
    stablecoins: &StablecoinSet,
) -> bool {
    if stablecoins.contains(&snapshot.token0.symbol)
        && !stablecoins.contains(&snapshot.token1.symbol)
    {
        return true;
    }
    adjusted_price < 1.0
}

/// The active range reserves valued in a single quote unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolValuation {
    /// Whether the price is quoted as token0 per token1.
    pub invert_price: bool,
    /// The display price in the quote unit.
    pub price: f64,
    /// The reserves of both tokens summed in the quote unit.
    pub total_liquidity: f64,
}

impl PoolValuation {
    /// Values `reserves` at the snapshot's current price.
    #[must_use]
    pub fn compute(
        snapshot: &PoolSnapshot,
        reserves: &ReservePair,
        tick_math: &TickMath,
        stablecoins: &StablecoinSet,
    ) -> Self {
        Self::from_adjusted_price(
            snapshot,
            adjusted_price(snapshot, tick_math),
            reserves,
            stablecoins,
        )
    }

    /// Values `reserves` at an already decimal-adjusted price of token0 in token1.
    #[must_use]
    pub fn from_adjusted_price(
        snapshot: &PoolSnapshot,
        adjusted_price: f64,
        reserves: &ReservePair,
        stablecoins: &StablecoinSet,
    ) -> Self {
        let invert_price = should_invert_price(snapshot, adjusted_price, stablecoins);

        let (price, total_liquidity) = if invert_price {
            let price = 1.0 / adjusted_price;
            (price, reserves.amount0 + price * reserves.amount1)
        } else {
            (
                adjusted_price,
                reserves.amount0 * adjusted_price + reserves.amount1,
            )
        };

        Self {
            invert_price,
            price,
            total_liquidity,
        }
    }

    /// Returns the `"<quote> for <base>"` label describing the display price.
    #[must_use]
    pub fn pair_label(&self, snapshot: &PoolSnapshot) -> String {
        if self.invert_price {
            format!("{} for {}", snapshot.token0.symbol, snapshot.token1.symbol)
        } else {
            format!("{} for {}", snapshot.token1.symbol, snapshot.token0.symbol)
        }
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
    use crate::{
        defi::token::Token,
        stubs::{usdc_weth_snapshot, weth_usdt_snapshot},
    };

    #[fixture]
    fn stablecoins() -> StablecoinSet {
        StablecoinSet::default()
    }

    fn snapshot(
        symbol0: &str,
        symbol1: &str,
        decimals0: u8,
        decimals1: u8,
        tick: i32,
    ) -> PoolSnapshot {
        PoolSnapshot::new(
            "0xpool",
            tick,
            3000,
            60,
            Token::new(symbol0, decimals0),
            Token::new(symbol1, decimals1),
        )
        .unwrap()
    }

    #[rstest]
    fn test_default_stablecoins(stablecoins: StablecoinSet) {
        assert_eq!(stablecoins.len(), 8);
        for symbol in DEFAULT_STABLECOINS {
            assert!(stablecoins.contains(symbol));
        }
        assert!(!stablecoins.contains("WETH"));
        assert!(!stablecoins.contains("usdc"));
    }

    #[rstest]
    fn test_adjusted_price_applies_decimal_difference(usdc_weth_snapshot: PoolSnapshot) {
        let tick_math = TickMath::default();
        let price = adjusted_price(&usdc_weth_snapshot, &tick_math);
        let expected = tick_math.tick_to_price(usdc_weth_snapshot.current_tick) / 1e12;
        assert!(approx_eq!(f64, price, expected, epsilon = 1e-18));
        assert!(price < 1.0);
    }

    #[rstest]
    fn test_stablecoin_token0_inverts(
        usdc_weth_snapshot: PoolSnapshot,
        stablecoins: StablecoinSet,
    ) {
        assert!(should_invert_price(&usdc_weth_snapshot, 0.0004, &stablecoins));
        // Stablecoin preference applies regardless of the price level
        assert!(should_invert_price(&usdc_weth_snapshot, 2500.0, &stablecoins));
    }

    #[rstest]
    fn test_stablecoin_token1_keeps_orientation(
        weth_usdt_snapshot: PoolSnapshot,
        stablecoins: StablecoinSet,
    ) {
        assert!(!should_invert_price(&weth_usdt_snapshot, 2500.0, &stablecoins));
        // Falls through to the price rule when token1 is the stablecoin
        assert!(should_invert_price(&weth_usdt_snapshot, 0.5, &stablecoins));
    }

    #[rstest]
    #[case("USDC", "DAI", 0.9999, true)]
    #[case("USDC", "DAI", 1.0001, false)]
    #[case("WBTC", "WETH", 15.0, false)]
    #[case("WETH", "WBTC", 0.066, true)]
    #[case("WETH", "WBTC", 1.0, false)]
    fn test_price_rule_without_stablecoin_preference(
        stablecoins: StablecoinSet,
        #[case] symbol0: &str,
        #[case] symbol1: &str,
        #[case] price: f64,
        #[case] expected: bool,
    ) {
        let snapshot = snapshot(symbol0, symbol1, 18, 18, 0);
        assert_eq!(should_invert_price(&snapshot, price, &stablecoins), expected);
    }

    #[rstest]
    fn test_valuation_inverted(stablecoins: StablecoinSet) {
        let snapshot = snapshot("USDC", "WETH", 6, 18, 0);
        let reserves = ReservePair::new(1_000.0, 2.0);
        let valuation =
            PoolValuation::from_adjusted_price(&snapshot, 0.0005, &reserves, &stablecoins);

        assert!(valuation.invert_price);
        assert!(approx_eq!(f64, valuation.price, 2000.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, valuation.total_liquidity, 5_000.0, epsilon = 1e-9));
        assert_eq!(valuation.pair_label(&snapshot), "USDC for WETH");
    }

    #[rstest]
    fn test_valuation_not_inverted(stablecoins: StablecoinSet) {
        let snapshot = snapshot("WETH", "USDT", 18, 6, 0);
        let reserves = ReservePair::new(2.0, 1_000.0);
        let valuation =
            PoolValuation::from_adjusted_price(&snapshot, 2000.0, &reserves, &stablecoins);

        assert!(!valuation.invert_price);
        assert_eq!(valuation.price, 2000.0);
        assert_eq!(valuation.total_liquidity, 5_000.0);
        assert_eq!(valuation.pair_label(&snapshot), "USDT for WETH");
    }

    #[rstest]
    fn test_compute_matches_tick_price(
        usdc_weth_snapshot: PoolSnapshot,
        stablecoins: StablecoinSet,
    ) {
        let tick_math = TickMath::default();
        let reserves = ReservePair::new(500_000.0, 100.0);
        let valuation =
            PoolValuation::compute(&usdc_weth_snapshot, &reserves, &tick_math, &stablecoins);

        let expected_price = 1.0 / adjusted_price(&usdc_weth_snapshot, &tick_math);
        assert!(valuation.invert_price);
        assert_eq!(valuation.price, expected_price);
        assert_eq!(valuation.total_liquidity, 500_000.0 + expected_price * 100.0);
    }

    #[rstest]
    fn test_custom_stablecoins() {
        let stablecoins = StablecoinSet::new(["FRAX"]);
        let snapshot = snapshot("FRAX", "WETH", 18, 18, 0);
        assert!(should_invert_price(&snapshot, 3.0, &stablecoins));
        assert!(!should_invert_price(&snapshot, 3.0, &StablecoinSet::default()));
    }
}
