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

//! Calendar-day helpers for day-bucketed pool data.

use chrono::{NaiveDate, TimeDelta, Utc};

/// Number of seconds in one calendar day.
pub const SECONDS_IN_DAY: i64 = 86_400;

/// Returns the number of whole days between the Unix epoch and `date`'s UTC midnight.
///
/// Dates before the epoch return negative values.
#[must_use]
pub fn unix_day(date: NaiveDate) -> i64 {
    let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
    midnight.timestamp().div_euclid(SECONDS_IN_DAY)
}

/// Returns the UTC calendar date `days` before today.
///
/// # Errors
///
/// Returns an error if the resulting date is out of range.
pub fn days_ago_utc(days: i64) -> anyhow::Result<NaiveDate> {
    let delta = TimeDelta::try_days(days)
        .ok_or_else(|| anyhow::anyhow!("invalid day offset {days}"))?;
    Utc::now()
        .date_naive()
        .checked_sub_signed(delta)
        .ok_or_else(|| anyhow::anyhow!("date {days} days ago is out of range"))
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns an error if `value` is not a valid calendar date.
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid date '{value}': {e}"))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
