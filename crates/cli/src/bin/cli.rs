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

use clap::Parser;
use log::LevelFilter;
use tickvol_cli::opt::TickVolCli;

fn main() {
    dotenvy::dotenv().ok();
    // The configured level is applied through `log::set_max_level` once the config is loaded
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Trace)
        .init()
    {
        eprintln!("Failed to initialize logger: {e}");
    }
    log::set_max_level(LevelFilter::Info);

    if let Err(e) = tickvol_cli::run(TickVolCli::parse()) {
        log::error!("Error executing tickvol CLI: {e:#}");
        std::process::exit(1);
    }
}
