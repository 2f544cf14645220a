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

//! Net liquidity change recorded at a single initialized tick.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Net liquidity change recorded at an initialized tick.
///
/// Crossing `tick` upwards adds `liquidity_net` to the in-range liquidity; crossing it
/// downwards subtracts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickDelta {
    /// The referenced tick.
    pub tick: i32,
    /// Net liquidity change when crossing this tick upwards.
    pub liquidity_net: i128,
}

impl TickDelta {
    /// Creates a new [`TickDelta`] instance.
    #[must_use]
    pub const fn new(tick: i32, liquidity_net: i128) -> Self {
        Self {
            tick,
            liquidity_net,
        }
    }

    /// Returns whether this tick lies on the grid defined by `tick_spacing`.
    #[must_use]
    pub fn is_aligned(&self, tick_spacing: i32) -> bool {
        tick_spacing > 0 && self.tick.rem_euclid(tick_spacing) == 0
    }
}

impl Display for TickDelta {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TickDelta(tick={}, liquidity_net={})",
            self.tick, self.liquidity_net
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
