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

//! Sparse per-tick liquidity deltas and reconstruction of the active range reserves.

use std::collections::BTreeMap;

use crate::defi::tick_map::tick::TickDelta;

pub mod reserves;
pub mod tick;

/// A sparse, ordered map of tick index to net liquidity delta.
///
/// Only ticks where positions start or end are present. Summing every delta from the
/// lowest tick up to and including a tick `T` yields the active liquidity at `T`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiquidityDeltaMap {
    deltas: BTreeMap<i32, i128>,
}

impl LiquidityDeltaMap {
    /// Creates a new empty [`LiquidityDeltaMap`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map from delta records.
    ///
    /// A later record for an already present tick replaces the earlier one.
    #[must_use]
    pub fn from_deltas(deltas: impl IntoIterator<Item = TickDelta>) -> Self {
        deltas.into_iter().collect()
    }

    /// Inserts a delta record, returning the previous delta at that tick if any.
    pub fn insert(&mut self, delta: TickDelta) -> Option<i128> {
        self.deltas.insert(delta.tick, delta.liquidity_net)
    }

    /// Returns the delta at `tick`, or zero when the tick is not initialized.
    #[must_use]
    pub fn get(&self, tick: i32) -> i128 {
        self.deltas.get(&tick).copied().unwrap_or_default()
    }

    /// Returns whether `tick` has a recorded delta.
    #[must_use]
    pub fn contains(&self, tick: i32) -> bool {
        self.deltas.contains_key(&tick)
    }

    /// Returns the number of initialized ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Returns whether the map holds no ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Returns the lowest initialized tick.
    #[must_use]
    pub fn min_tick(&self) -> Option<i32> {
        self.deltas.keys().next().copied()
    }

    /// Returns the highest initialized tick.
    #[must_use]
    pub fn max_tick(&self) -> Option<i32> {
        self.deltas.keys().next_back().copied()
    }

    /// Returns an iterator over the delta records in ascending tick order.
    pub fn iter(&self) -> impl Iterator<Item = TickDelta> + '_ {
        self.deltas
            .iter()
            .map(|(tick, liquidity_net)| TickDelta::new(*tick, *liquidity_net))
    }

    /// Returns the ticks which are not multiples of `tick_spacing`.
    #[must_use]
    pub fn misaligned_ticks(&self, tick_spacing: i32) -> Vec<i32> {
        self.iter()
            .filter(|delta| !delta.is_aligned(tick_spacing))
            .map(|delta| delta.tick)
            .collect()
    }

    /// Returns the summed deltas of every tick up to and including `tick`.
    ///
    /// This is the closed-form prefix sum of the liquidity active at `tick`, equal to the
    /// result of walking the spacing grid from [`Self::min_tick`] when every key is aligned.
    /// Returns `None` if the sum overflows.
    #[must_use]
    pub fn cumulative_liquidity(&self, tick: i32) -> Option<i128> {
        self.deltas
            .range(..=tick)
            .try_fold(0i128, |acc, (_, delta)| acc.checked_add(*delta))
    }
}

impl FromIterator<TickDelta> for LiquidityDeltaMap {
    fn from_iter<I: IntoIterator<Item = TickDelta>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl Extend<TickDelta> for LiquidityDeltaMap {
    fn extend<I: IntoIterator<Item = TickDelta>>(&mut self, iter: I) {
        for delta in iter {
            self.insert(delta);
        }
    }
}

impl From<BTreeMap<i32, i128>> for LiquidityDeltaMap {
    fn from(deltas: BTreeMap<i32, i128>) -> Self {
        Self { deltas }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
