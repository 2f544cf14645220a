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

use chrono::NaiveDate;
use tickvol_model::defi::{ImpliedVolatilityAnalyzer, PoolVolatilityReport, TickMath};

use crate::{config::TickVolConfig, opt::AnalyzeOpt, source::JsonPoolDataSource};

/// Runs the implied volatility analysis for the pool and date selected by `opt`.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration or pool data cannot be loaded.
/// - The date is not a valid `YYYY-MM-DD` date.
/// - The analysis fails.
pub fn run_analyze(opt: &AnalyzeOpt) -> anyhow::Result<PoolVolatilityReport> {
    let config = TickVolConfig::load(opt)?;
    log::set_max_level(config.level_filter()?);

    let date = resolve_date(opt.date.as_deref())?;
    let data_path = config.resolve_data_path()?;
    log::info!("Loading pool data from '{}'", data_path.display());
    let source = JsonPoolDataSource::from_path(&data_path)?;

    let analyzer = ImpliedVolatilityAnalyzer::new(
        TickMath::default(),
        config.stablecoins.clone(),
        Some(config.page_size),
    );
    let report = analyzer.analyze(&source, &config.pool_id, date)?;

    for line in report.to_string().lines() {
        log::info!("{line}");
    }

    Ok(report)
}

/// Parses `date` as `YYYY-MM-DD`, defaulting to yesterday in UTC.
///
/// # Errors
///
/// Returns an error if `date` cannot be parsed.
pub fn resolve_date(date: Option<&str>) -> anyhow::Result<NaiveDate> {
    match date {
        Some(value) => tickvol_core::datetime::parse_date(value),
        None => tickvol_core::datetime::days_ago_utc(1),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::Utc;
    use rstest::rstest;
    use tickvol_model::defi::PoolAnalysisError;

    use super::*;

    const POOL_JSON: &str = r#"{
        "pools": [{
            "id": "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8",
            "tick": "201234",
            "feeTier": "3000",
            "token0": { "symbol": "USDC", "decimals": "6" },
            "token1": { "symbol": "WETH", "decimals": "18" }
        }],
        "poolDayDatas": [
            { "id": "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8-18752", "volumeUSD": "150000000" }
        ],
        "ticks": [
            { "pool": "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8", "tickIdx": "198000", "liquidityNet": "2000000000000000000" },
            { "pool": "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8", "tickIdx": "200400", "liquidityNet": "500000000000000000" },
            { "pool": "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8", "tickIdx": "202200", "liquidityNet": "-500000000000000000" },
            { "pool": "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8", "tickIdx": "204000", "liquidityNet": "-2000000000000000000" }
        ]
    }"#;

    fn data_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(POOL_JSON.as_bytes()).unwrap();
        file
    }

    #[rstest]
    fn test_resolve_date_explicit() {
        assert_eq!(
            resolve_date(Some("2021-05-05")).unwrap(),
            NaiveDate::from_ymd_opt(2021, 5, 5).unwrap()
        );
    }

    #[rstest]
    fn test_resolve_date_defaults_to_yesterday() {
        let yesterday = resolve_date(None).unwrap();
        let today = Utc::now().date_naive();
        assert_eq!((today - yesterday).num_days(), 1);
    }

    #[rstest]
    fn test_resolve_date_invalid() {
        assert!(resolve_date(Some("05/05/2021")).is_err());
    }

    #[rstest]
    fn test_run_analyze_from_file() {
        let file = data_file();
        let opt = AnalyzeOpt {
            data: Some(file.path().to_path_buf()),
            date: Some("2021-05-05".to_string()),
            page_size: Some(2),
            ..Default::default()
        };

        let report = run_analyze(&opt).unwrap();

        assert_eq!(report.range_liquidity.liquidity, 2_500_000_000_000_000_000);
        assert!(report.valuation.invert_price);
        assert!((report.implied_volatility - 248.2285).abs() < 1e-3);
    }

    #[rstest]
    fn test_run_analyze_unknown_pool() {
        let file = data_file();
        let opt = AnalyzeOpt {
            pool: Some("0xmissing".to_string()),
            data: Some(file.path().to_path_buf()),
            date: Some("2021-05-05".to_string()),
            ..Default::default()
        };

        let error = run_analyze(&opt).unwrap_err();
        assert_eq!(
            error.downcast_ref::<PoolAnalysisError>(),
            Some(&PoolAnalysisError::PoolNotFound("0xmissing".to_string()))
        );
    }
}
