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

//! Closed-form implied volatility from fee income, volume and liquidity depth.
//!
//! A liquidity provider in the active range earns `gamma * volume` per day on capital
//! `tick_liquidity`. Equating that fee income with the expected loss of a short straddle
//! gives the annualized implied volatility:
//!
//! ```text
//! iv = 2 * gamma * sqrt(daily_volume / tick_liquidity) * sqrt(365)
//! ```

use crate::defi::error::PoolAnalysisError;

/// Days used to annualize a daily figure.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Converts a fee tier (hundredths of a basis point) into the fee in percent (`3000` to `0.3`).
#[must_use]
pub fn fee_tier_to_gamma(fee_tier: u32) -> f64 {
    f64::from(fee_tier) * 1e-4
}

/// Returns the annualized implied volatility.
///
/// The result is non-finite when `tick_liquidity_usd` is zero or negative; use
/// [`checked_implied_volatility`] to get an error instead.
#[must_use]
pub fn implied_volatility(gamma: f64, daily_volume_usd: f64, tick_liquidity_usd: f64) -> f64 {
    2.0 * gamma * (daily_volume_usd / tick_liquidity_usd).sqrt() * DAYS_PER_YEAR.sqrt()
}

/// Returns the annualized implied volatility, rejecting undefined results.
///
/// # Errors
///
/// Returns an error if:
/// - `tick_liquidity_usd` is zero, negative or NaN ([`PoolAnalysisError::DivisionByZero`]).
/// - The result is not finite ([`PoolAnalysisError::NonFiniteVolatility`]).
pub fn checked_implied_volatility(
    gamma: f64,
    daily_volume_usd: f64,
    tick_liquidity_usd: f64,
) -> Result<f64, PoolAnalysisError> {
    if tick_liquidity_usd.is_nan() || tick_liquidity_usd <= 0.0 {
        return Err(PoolAnalysisError::DivisionByZero { tick_liquidity_usd });
    }

    let volatility = implied_volatility(gamma, daily_volume_usd, tick_liquidity_usd);
    if !volatility.is_finite() {
        return Err(PoolAnalysisError::NonFiniteVolatility(volatility));
    }

    Ok(volatility)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
