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

//! Command-line interface for estimating the implied volatility of concentrated liquidity pools.
//!
//! The `tickvol` binary loads pool data from a JSON dump in subgraph response shape, runs the
//! analysis from `tickvol-model` for a single pool and date, and logs the resulting report.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]

pub mod analyze;
pub mod config;
pub mod opt;
pub mod source;

use crate::{
    analyze::run_analyze,
    opt::{Commands, TickVolCli},
};

/// Runs the command selected on the command line.
///
/// # Errors
///
/// Returns an error if the selected command fails.
pub fn run(opt: TickVolCli) -> anyhow::Result<()> {
    match opt.command {
        Commands::Analyze(analyze_opt) => {
            run_analyze(&analyze_opt)?;
        }
    }
    Ok(())
}
