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

//! Boundary to the external collaborator supplying pool data.
//!
//! The analysis core never performs I/O itself. A [`PoolDataSource`] implementation
//! (subgraph client, on-disk dump, in-memory fixture) supplies pool metadata, daily volume
//! and pages of tick deltas, and [`collect_liquidity_deltas`] assembles the complete map.

use anyhow::Context;
use chrono::NaiveDate;

use crate::defi::{
    pool::PoolMetadata,
    tick_map::{LiquidityDeltaMap, tick::TickDelta},
};

/// Default number of tick records requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// A supplier of pool data for a single analysis run.
pub trait PoolDataSource {
    /// Returns the metadata of the pool, or `None` when no such pool exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be retrieved.
    fn pool_metadata(&self, pool_id: &str) -> anyhow::Result<Option<PoolMetadata>>;

    /// Returns the USD volume traded in the pool on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume cannot be retrieved.
    fn daily_volume_usd(&self, pool_id: &str, date: NaiveDate) -> anyhow::Result<f64>;

    /// Returns up to `first` tick records after skipping `skip` records.
    ///
    /// An empty page signals the end of the data.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be retrieved.
    fn tick_page(&self, pool_id: &str, skip: usize, first: usize) -> anyhow::Result<Vec<TickDelta>>;
}

/// Returns the day-bucketed identifier `"{pool_id}-{day}"` used by pool day data,
/// where `day` counts whole UTC days since the Unix epoch.
#[must_use]
pub fn pool_day_id(pool_id: &str, date: NaiveDate) -> String {
    format!("{pool_id}-{}", tickvol_core::datetime::unix_day(date))
}

/// Retrieves every tick page for `pool_id` until an empty page is returned.
///
/// # Errors
///
/// Returns an error if `page_size` is zero or any page retrieval fails.
pub fn collect_liquidity_deltas<S: PoolDataSource + ?Sized>(
    source: &S,
    pool_id: &str,
    page_size: usize,
) -> anyhow::Result<LiquidityDeltaMap> {
    if page_size == 0 {
        anyhow::bail!("invalid page size for tick retrieval, was 0");
    }

    let mut deltas = LiquidityDeltaMap::new();
    let mut skip = 0;
    let mut pages = 0;

    loop {
        let page = source
            .tick_page(pool_id, skip, page_size)
            .with_context(|| format!("Failed to fetch tick page at offset {skip}"))?;
        if page.is_empty() {
            break;
        }

        pages += 1;
        skip += page.len();
        log::debug!("Fetched tick page {pages} with {} records", page.len());
        deltas.extend(page);
    }

    log::info!(
        "Collected {} initialized ticks for pool {pool_id} in {pages} pages",
        deltas.len()
    );

    Ok(deltas)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
