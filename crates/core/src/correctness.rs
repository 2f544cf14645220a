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

//! Functions for correctness checks similar to the *design by contract* philosophy.
//!
//! An [`anyhow::Result`] is returned with a descriptive message when the
//! condition check fails.

/// Checks the `string` is not empty and not all whitespace.
///
/// # Errors
///
/// Returns an error if `string` is empty or consists only of whitespace.
pub fn check_valid_string(string: &str, param: &str) -> anyhow::Result<()> {
    if string.is_empty() {
        anyhow::bail!("invalid string for '{param}', was empty");
    }
    if string.chars().all(char::is_whitespace) {
        anyhow::bail!("invalid string for '{param}', was all whitespace");
    }
    Ok(())
}

/// Checks the `i32` value is positive (> 0).
///
/// # Errors
///
/// Returns an error if `value` is zero or negative.
pub fn check_positive_i32(value: i32, param: &str) -> anyhow::Result<()> {
    if value <= 0 {
        anyhow::bail!("invalid i32 for '{param}' not positive, was {value}");
    }
    Ok(())
}

/// Checks the `f64` value is finite (neither NaN nor infinite).
///
/// # Errors
///
/// Returns an error if `value` is NaN or infinite.
pub fn check_finite_f64(value: f64, param: &str) -> anyhow::Result<()> {
    if !value.is_finite() {
        anyhow::bail!("invalid f64 for '{param}' not finite, was {value}");
    }
    Ok(())
}

/// Checks the `f64` value is finite and non-negative (>= 0).
///
/// # Errors
///
/// Returns an error if `value` is not finite or is negative.
pub fn check_non_negative_f64(value: f64, param: &str) -> anyhow::Result<()> {
    check_finite_f64(value, param)?;
    if value < 0.0 {
        anyhow::bail!("invalid f64 for '{param}' negative, was {value}");
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
