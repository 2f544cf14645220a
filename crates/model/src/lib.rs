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

//! Domain model for estimating the implied volatility of concentrated liquidity pools.
//!
//! The `tickvol-model` crate reconstructs the token reserves held within the tick range
//! straddling a pool's current price from a sparse map of per-tick liquidity deltas, values
//! those reserves in a single quote unit, and turns the result into an annualized implied
//! volatility together with the pool's fee tier and trailing daily volume:
//!
//! - Tick/price conversions and fee-tier to tick-spacing lookup.
//! - Sparse liquidity delta maps and the active-range reserve reconstructor.
//! - Quote orientation and USD-equivalent valuation of the active range.
//! - The closed-form implied volatility estimator.
//! - A data-source boundary for the external collaborator supplying pool data.
//!
//! All computations are synchronous and deterministic given their inputs.
//!
//! # Feature flags
//!
//! - `stubs`: Enables type stubs and fixtures for use in testing scenarios.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod defi;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;
