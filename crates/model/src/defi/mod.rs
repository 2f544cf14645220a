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

//! Concentrated liquidity pool model and volatility analysis.

pub mod analysis;
pub mod data_source;
pub mod error;
pub mod pool;
pub mod tick_map;
pub mod tick_math;
pub mod token;
pub mod valuation;
pub mod volatility;

// Re-exports
pub use crate::defi::{
    analysis::{ImpliedVolatilityAnalyzer, PoolVolatilityReport},
    data_source::{PoolDataSource, collect_liquidity_deltas, pool_day_id},
    error::PoolAnalysisError,
    pool::{PoolMetadata, PoolSnapshot},
    tick_map::{
        LiquidityDeltaMap,
        reserves::{ActiveRange, RangeLiquidity, ReservePair, TickRangeReconstructor},
        tick::TickDelta,
    },
    tick_math::{TickMath, fee_tier_to_tick_spacing, tick_to_price},
    token::Token,
    valuation::{PoolValuation, StablecoinSet},
    volatility::{checked_implied_volatility, fee_tier_to_gamma, implied_volatility},
};
