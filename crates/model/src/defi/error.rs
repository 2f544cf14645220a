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

//! Errors raised while reconstructing and valuing pool liquidity.

use thiserror::Error;

/// Represents failures of the pool volatility analysis.
///
/// These are local computation failures and are always returned to the caller,
/// the analysis never retries on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoolAnalysisError {
    /// The liquidity delta map is empty, so no reserves can be computed.
    #[error("Insufficient data: liquidity delta map is empty")]
    InsufficientData,
    /// The walk over the delta map never visited the active range bottom tick.
    #[error(
        "Range not found: active range bottom {bottom} not reached walking ticks [{min_tick}, {max_tick}] with spacing {tick_spacing}"
    )]
    RangeNotFound {
        bottom: i32,
        min_tick: i32,
        max_tick: i32,
        tick_spacing: i32,
    },
    /// The USD liquidity at the current tick is zero or negative.
    #[error("Division by zero: tick liquidity must be positive, was {tick_liquidity_usd}")]
    DivisionByZero { tick_liquidity_usd: f64 },
    /// The volatility formula produced NaN or infinity.
    #[error("Non-finite implied volatility: {0}")]
    NonFiniteVolatility(f64),
    /// The data source has no pool with the requested identifier.
    #[error("Pool not found: {0}")]
    PoolNotFound(String),
    /// The current tick lies outside the protocol tick bounds.
    #[error("Tick out of bounds: {0} not within [-887272, 887272]")]
    TickOutOfBounds(i32),
    /// A pool snapshot was built with a zero or negative tick spacing.
    #[error("Invalid tick spacing: must be positive, was {0}")]
    InvalidTickSpacing(i32),
    /// Accumulating liquidity deltas overflowed the `i128` range.
    #[error("Liquidity overflow while crossing tick {tick}")]
    LiquidityOverflow { tick: i32 },
    /// The external data source failed to supply pool data.
    #[error("Data source error: {0}")]
    DataSource(String),
}

impl PoolAnalysisError {
    /// Wraps an external collaborator failure, keeping its full context chain.
    #[must_use]
    pub fn data_source(error: &anyhow::Error) -> Self {
        Self::DataSource(format!("{error:#}"))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
