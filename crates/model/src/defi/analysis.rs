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

//! End-to-end implied volatility analysis of a single pool on a single date.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::defi::{
    data_source::{DEFAULT_PAGE_SIZE, PoolDataSource, collect_liquidity_deltas},
    error::PoolAnalysisError,
    pool::PoolSnapshot,
    tick_map::{
        LiquidityDeltaMap,
        reserves::{RangeLiquidity, TickRangeReconstructor},
    },
    tick_math::TickMath,
    valuation::{PoolValuation, StablecoinSet},
    volatility::{checked_implied_volatility, fee_tier_to_gamma},
};

/// Outputs of one pool volatility analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolVolatilityReport {
    /// The pool state the analysis ran against.
    pub snapshot: PoolSnapshot,
    /// The calendar date of the daily volume.
    pub date: NaiveDate,
    /// The USD volume traded on `date`.
    pub daily_volume_usd: f64,
    /// The reconstructed active range liquidity and reserves.
    pub range_liquidity: RangeLiquidity,
    /// The reserves valued in the quote unit.
    pub valuation: PoolValuation,
    /// The annualized implied volatility, in percent.
    pub implied_volatility: f64,
}

impl Display for PoolVolatilityReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let reserves = &self.range_liquidity.reserves;
        writeln!(f, "Pool={}, details: {}", self.snapshot.pool_id, self.snapshot)?;
        writeln!(
            f,
            "Daily volume of pool for {}: {:.0}$",
            self.date.format("%Y-%m-%d"),
            self.daily_volume_usd,
        )?;
        writeln!(
            f,
            "Current tick liquidity: {}={:.2}, {}={:.2}",
            self.snapshot.token0.symbol,
            reserves.amount0,
            self.snapshot.token1.symbol,
            reserves.amount1,
        )?;
        writeln!(
            f,
            "Price={:.2} ({}), total current tick liquidity={:.2}",
            self.valuation.price,
            self.valuation.pair_label(&self.snapshot),
            self.valuation.total_liquidity,
        )?;
        write!(
            f,
            "Implied volatility (annualized)={:.2}%",
            self.implied_volatility
        )
    }
}

/// Estimates the implied volatility of pools from their active range liquidity.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpliedVolatilityAnalyzer {
    tick_math: TickMath,
    stablecoins: StablecoinSet,
    page_size: usize,
}

impl Default for ImpliedVolatilityAnalyzer {
    fn default() -> Self {
        Self::new(TickMath::default(), StablecoinSet::default(), None)
    }
}

impl ImpliedVolatilityAnalyzer {
    /// Creates a new [`ImpliedVolatilityAnalyzer`] instance.
    ///
    /// `page_size` is the number of tick records requested per page, defaulting to
    /// [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn new(tick_math: TickMath, stablecoins: StablecoinSet, page_size: Option<usize>) -> Self {
        Self {
            tick_math,
            stablecoins,
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Fetches the pool's data from `source` and runs the analysis for `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pool does not exist ([`PoolAnalysisError::PoolNotFound`]).
    /// - The data source fails ([`PoolAnalysisError::DataSource`]).
    /// - Any step of [`Self::evaluate`] fails.
    pub fn analyze<S: PoolDataSource + ?Sized>(
        &self,
        source: &S,
        pool_id: &str,
        date: NaiveDate,
    ) -> Result<PoolVolatilityReport, PoolAnalysisError> {
        let metadata = source
            .pool_metadata(pool_id)
            .map_err(|e| PoolAnalysisError::data_source(&e))?
            .ok_or_else(|| PoolAnalysisError::PoolNotFound(pool_id.to_string()))?;
        let snapshot = PoolSnapshot::from_metadata(metadata, &self.tick_math)?;
        log::info!("Pool={pool_id}, details: {snapshot}");

        let daily_volume_usd = source
            .daily_volume_usd(pool_id, date)
            .map_err(|e| PoolAnalysisError::data_source(&e))?;
        log::info!("Daily volume of pool for {date}: {daily_volume_usd:.0}$");

        let deltas = collect_liquidity_deltas(source, pool_id, self.page_size)
            .map_err(|e| PoolAnalysisError::data_source(&e))?;

        self.evaluate(snapshot, &deltas, date, daily_volume_usd)
    }

    /// Runs the analysis on already retrieved pool data, without any I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The delta map is empty ([`PoolAnalysisError::InsufficientData`]).
    /// - The active range is never reached ([`PoolAnalysisError::RangeNotFound`]).
    /// - The valued liquidity is not positive ([`PoolAnalysisError::DivisionByZero`]).
    /// - The volatility is not finite ([`PoolAnalysisError::NonFiniteVolatility`]).
    pub fn evaluate(
        &self,
        snapshot: PoolSnapshot,
        deltas: &LiquidityDeltaMap,
        date: NaiveDate,
        daily_volume_usd: f64,
    ) -> Result<PoolVolatilityReport, PoolAnalysisError> {
        let range_liquidity =
            TickRangeReconstructor::new(&self.tick_math).reconstruct(&snapshot, deltas)?;
        let valuation = PoolValuation::compute(
            &snapshot,
            &range_liquidity.reserves,
            &self.tick_math,
            &self.stablecoins,
        );
        log::info!(
            "Price={:.2}, total current tick liquidity={:.2}",
            valuation.price,
            valuation.total_liquidity
        );

        if daily_volume_usd == 0.0 {
            log::warn!("Daily volume for {date} is zero, implied volatility will be zero");
        }

        let gamma = fee_tier_to_gamma(snapshot.fee_tier);
        let implied_volatility =
            checked_implied_volatility(gamma, daily_volume_usd, valuation.total_liquidity)?;
        log::info!("Implied volatility (annualized)={implied_volatility:.2}%");

        Ok(PoolVolatilityReport {
            snapshot,
            date,
            daily_volume_usd,
            range_liquidity,
            valuation,
            implied_volatility,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
