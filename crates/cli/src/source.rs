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

//! A [`PoolDataSource`] backed by a JSON dump in subgraph response shape.
//!
//! The dump holds the `pools`, `poolDayDatas` and `ticks` collections as returned by the
//! Uniswap v3 subgraph, with numeric fields encoded as strings:
//!
//! ```json
//! {
//!   "pools": [{
//!     "id": "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8",
//!     "tick": "201234",
//!     "feeTier": "3000",
//!     "token0": { "symbol": "USDC", "decimals": "6" },
//!     "token1": { "symbol": "WETH", "decimals": "18" }
//!   }],
//!   "poolDayDatas": [{ "id": "0x8ad5...e6d8-18752", "volumeUSD": "150000000" }],
//!   "ticks": [
//!     { "pool": "0x8ad5...e6d8", "tickIdx": "198000", "liquidityNet": "2000000000000000000" }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use tickvol_core::correctness::check_non_negative_f64;
use tickvol_model::defi::{PoolDataSource, PoolMetadata, TickDelta, Token, pool_day_id};

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
struct SubgraphToken {
    symbol: String,
    #[serde_as(as = "DisplayFromStr")]
    decimals: u8,
}

impl From<SubgraphToken> for Token {
    fn from(token: SubgraphToken) -> Self {
        Self::new(token.symbol, token.decimals)
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubgraphPool {
    id: String,
    #[serde_as(as = "DisplayFromStr")]
    tick: i32,
    #[serde_as(as = "DisplayFromStr")]
    fee_tier: u32,
    token0: SubgraphToken,
    token1: SubgraphToken,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubgraphPoolDayData {
    id: String,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "volumeUSD")]
    volume_usd: f64,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubgraphTick {
    pool: String,
    #[serde_as(as = "DisplayFromStr")]
    tick_idx: i32,
    #[serde_as(as = "DisplayFromStr")]
    liquidity_net: i128,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SubgraphDump {
    pools: Vec<SubgraphPool>,
    pool_day_datas: Vec<SubgraphPoolDayData>,
    ticks: Vec<SubgraphTick>,
}

/// Pool data loaded from a subgraph-shaped JSON dump.
#[derive(Debug, Clone)]
pub struct JsonPoolDataSource {
    dump: SubgraphDump,
}

impl JsonPoolDataSource {
    /// Parses a data source from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the subgraph response shape.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let dump: SubgraphDump =
            serde_json::from_str(json).context("Failed to parse pool data JSON")?;
        log::debug!(
            "Loaded {} pools, {} pool day records and {} ticks",
            dump.pools.len(),
            dump.pool_day_datas.len(),
            dump.ticks.len()
        );
        Ok(Self { dump })
    }

    /// Loads a data source from the JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pool data file '{}'", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid pool data file '{}'", path.display()))
    }

    fn pool_ticks<'a>(&'a self, pool_id: &'a str) -> impl Iterator<Item = &'a SubgraphTick> + 'a {
        self.dump
            .ticks
            .iter()
            .filter(move |tick| tick.pool.eq_ignore_ascii_case(pool_id))
    }
}

impl PoolDataSource for JsonPoolDataSource {
    fn pool_metadata(&self, pool_id: &str) -> anyhow::Result<Option<PoolMetadata>> {
        let metadata = self
            .dump
            .pools
            .iter()
            .find(|pool| pool.id.eq_ignore_ascii_case(pool_id))
            .map(|pool| PoolMetadata {
                pool_id: pool.id.clone(),
                current_tick: pool.tick,
                fee_tier: pool.fee_tier,
                token0: pool.token0.clone().into(),
                token1: pool.token1.clone().into(),
            });
        Ok(metadata)
    }

    fn daily_volume_usd(&self, pool_id: &str, date: NaiveDate) -> anyhow::Result<f64> {
        let id = pool_day_id(pool_id, date);
        let volume_usd = self
            .dump
            .pool_day_datas
            .iter()
            .find(|day| day.id.eq_ignore_ascii_case(&id))
            .map(|day| day.volume_usd)
            .ok_or_else(|| anyhow::anyhow!("No pool day data '{id}' for {date}"))?;
        check_non_negative_f64(volume_usd, "volumeUSD")?;
        Ok(volume_usd)
    }

    fn tick_page(
        &self,
        pool_id: &str,
        skip: usize,
        first: usize,
    ) -> anyhow::Result<Vec<TickDelta>> {
        Ok(self
            .pool_ticks(pool_id)
            .skip(skip)
            .take(first)
            .map(|tick| TickDelta::new(tick.tick_idx, tick.liquidity_net))
            .collect())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
