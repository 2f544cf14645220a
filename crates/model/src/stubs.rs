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

//! Type stubs to facilitate testing.

use std::{cell::RefCell, collections::BTreeMap};

use chrono::NaiveDate;
use rstest::fixture;

use crate::defi::{
    data_source::{PoolDataSource, pool_day_id},
    pool::{PoolMetadata, PoolSnapshot},
    tick_map::{LiquidityDeltaMap, tick::TickDelta},
    tick_math::TickMath,
    token::Token,
};

#[fixture]
pub fn analysis_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 5, 5).unwrap()
}

#[fixture]
pub fn usdc_weth_metadata() -> PoolMetadata {
    PoolMetadata {
        pool_id: StaticPoolDataSource::POOL_ID.to_string(),
        current_tick: 201_234,
        fee_tier: 3000,
        token0: Token::new("USDC", 6),
        token1: Token::new("WETH", 18),
    }
}

#[fixture]
pub fn usdc_weth_snapshot() -> PoolSnapshot {
    PoolSnapshot::from_metadata(usdc_weth_metadata(), &TickMath::default()).unwrap()
}

#[fixture]
pub fn weth_usdt_snapshot() -> PoolSnapshot {
    PoolSnapshot::new(
        "0x4e68ccd3e89f51c3074ca5072bbac773960dfa36",
        -200_311,
        3000,
        60,
        Token::new("WETH", 18),
        Token::new("USDT", 6),
    )
    .unwrap()
}

/// Two open positions spanning the USDC/WETH active range and one closed position below it.
#[fixture]
pub fn usdc_weth_deltas() -> LiquidityDeltaMap {
    LiquidityDeltaMap::from_deltas(usdc_weth_ticks())
}

fn usdc_weth_ticks() -> Vec<TickDelta> {
    vec![
        TickDelta::new(198_000, 2_000_000_000_000_000_000),
        TickDelta::new(199_800, 700_000_000_000_000_000),
        TickDelta::new(200_100, -700_000_000_000_000_000),
        TickDelta::new(200_400, 500_000_000_000_000_000),
        TickDelta::new(202_200, -500_000_000_000_000_000),
        TickDelta::new(204_000, -2_000_000_000_000_000_000),
    ]
}

/// An in-memory [`PoolDataSource`] holding a single pool.
///
/// Records the offset of every requested tick page.
#[derive(Debug)]
pub struct StaticPoolDataSource {
    metadata: PoolMetadata,
    volumes: BTreeMap<String, f64>,
    ticks: Vec<TickDelta>,
    requested_offsets: RefCell<Vec<usize>>,
}

impl StaticPoolDataSource {
    pub const POOL_ID: &'static str = "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8";
    pub const DAILY_VOLUME_USD: f64 = 150_000_000.0;

    #[must_use]
    pub fn with_ticks(mut self, ticks: Vec<TickDelta>) -> Self {
        self.ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_volume(mut self, date: NaiveDate, volume_usd: f64) -> Self {
        self.volumes
            .insert(pool_day_id(&self.metadata.pool_id, date), volume_usd);
        self
    }

    pub fn requested_offsets(&self) -> Vec<usize> {
        self.requested_offsets.borrow().clone()
    }
}

impl Default for StaticPoolDataSource {
    fn default() -> Self {
        let source = Self {
            metadata: usdc_weth_metadata(),
            volumes: BTreeMap::new(),
            ticks: usdc_weth_ticks(),
            requested_offsets: RefCell::new(Vec::new()),
        };
        source.with_volume(analysis_date(), Self::DAILY_VOLUME_USD)
    }
}

impl PoolDataSource for StaticPoolDataSource {
    fn pool_metadata(&self, pool_id: &str) -> anyhow::Result<Option<PoolMetadata>> {
        if pool_id == self.metadata.pool_id {
            Ok(Some(self.metadata.clone()))
        } else {
            Ok(None)
        }
    }

    fn daily_volume_usd(&self, pool_id: &str, date: NaiveDate) -> anyhow::Result<f64> {
        let id = pool_day_id(pool_id, date);
        self.volumes
            .get(&id)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No pool day data for '{id}'"))
    }

    fn tick_page(
        &self,
        _pool_id: &str,
        skip: usize,
        first: usize,
    ) -> anyhow::Result<Vec<TickDelta>> {
        self.requested_offsets.borrow_mut().push(skip);
        let start = skip.min(self.ticks.len());
        let end = skip.saturating_add(first).min(self.ticks.len());
        Ok(self.ticks[start..end].to_vec())
    }
}
