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

use std::path::PathBuf;

use clap::Parser;

/// Main CLI structure for parsing command-line arguments and options.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct TickVolCli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available top-level commands for the tickvol CLI.
#[derive(Parser, Debug)]
pub enum Commands {
    Analyze(AnalyzeOpt),
}

/// Options for estimating the implied volatility of a single pool.
#[derive(Parser, Debug, Clone, Default)]
#[command(about = "Estimate the annualized implied volatility of a pool", long_about = None)]
pub struct AnalyzeOpt {
    /// The pool contract address (optional, defaults to the configured pool)
    #[arg(long)]
    pub pool: Option<String>,
    /// Path to the JSON pool data dump (optional, falls back to `TICKVOL_DATA_PATH` env var)
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// The date of the daily volume as YYYY-MM-DD (optional, defaults to yesterday UTC)
    #[arg(long)]
    pub date: Option<String>,
    /// Path to a TOML configuration file (optional)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of tick records requested per page (optional, defaults to 1000)
    #[arg(long)]
    pub page_size: Option<usize>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
