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

//! ERC-20 style token identity and decimal scaling.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Represents one of the two constituent tokens of a liquidity pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The token's ticker symbol.
    pub symbol: String,
    /// The number of decimal places used to represent fractional token amounts.
    pub decimals: u8,
}

impl Token {
    /// Creates a new [`Token`] instance with the specified properties.
    #[must_use]
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Scales a raw on-chain amount of this token into whole token units.
    #[must_use]
    pub fn scale_amount(&self, raw_amount: f64) -> f64 {
        tickvol_core::math::scale_by_decimals(raw_amount, self.decimals)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token(symbol={}, decimals={})", self.symbol, self.decimals)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_display() {
        let token = Token::new("USDC", 6);
        assert_eq!(token.to_string(), "Token(symbol=USDC, decimals=6)");
    }

    #[rstest]
    fn test_scale_amount() {
        assert_eq!(Token::new("USDC", 6).scale_amount(1_500_000.0), 1.5);
        assert_eq!(Token::new("WETH", 18).scale_amount(2e18), 2.0);
    }
}
