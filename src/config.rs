/*
config.rs

Copyright 2025 Hervé Quatremain

This file is part of Catangen.

Catangen is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Catangen is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Catangen. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Board configuration and share strings.
//!
//! A [`BoardConfig`] object holds the generation options and the two seeds.
//! With the same object, the generators always produce the same board.
//!
//! The configuration can be exchanged as a share string in URL query format, such as:
//!
//! ```text
//! rs=8731&ns=1209&psr=1&kdc=0&nsn=1&pmin=2&pmax=13
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Range for the lowest pip sum of interior corners.
pub const PIP_MIN_RANGE: (u32, u32) = (2, 6);

/// Range for the highest pip sum of interior corners.
pub const PIP_MAX_RANGE: (u32, u32) = (6, 13);

/// Generation options and seeds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Avoid adjacent cells with the same resource.
    pub prevent_same_resources: bool,

    /// Put the desert on the center cell.
    pub keep_desert_center: bool,

    /// Avoid adjacent cells with the same number.
    pub no_same_neighbors: bool,

    /// Lowest pip sum allowed on an interior corner.
    pub pip_min: u32,

    /// Highest pip sum allowed on an interior corner.
    pub pip_max: u32,

    pub resource_seed: u64,
    pub number_seed: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            prevent_same_resources: false,
            keep_desert_center: false,
            no_same_neighbors: true,
            pip_min: 2,
            pip_max: 13,
            resource_seed: 0,
            number_seed: 0,
        }
    }
}

impl BoardConfig {
    /// Return a copy with the pip bounds moved into their ranges.
    ///
    /// Because the two ranges only share the value 6, the returned bounds always verify
    /// `pip_min <= pip_max`.
    pub fn clamped(&self) -> Self {
        Self {
            pip_min: self.pip_min.clamp(PIP_MIN_RANGE.0, PIP_MIN_RANGE.1),
            pip_max: self.pip_max.clamp(PIP_MAX_RANGE.0, PIP_MAX_RANGE.1),
            ..*self
        }
    }

    /// Draw two new seeds.
    pub fn regenerate(&mut self) {
        let mut rng = rand::rng();
        self.resource_seed = rng.random();
        self.number_seed = rng.random();
    }

    /// Return the share string.
    pub fn to_query(&self) -> String {
        format!(
            "rs={}&ns={}&psr={}&kdc={}&nsn={}&pmin={}&pmax={}",
            self.resource_seed,
            self.number_seed,
            u8::from(self.prevent_same_resources),
            u8::from(self.keep_desert_center),
            u8::from(self.no_same_neighbors),
            self.pip_min,
            self.pip_max
        )
    }

    /// Parse a share string.
    ///
    /// Missing keys keep their default value and unknown keys are ignored.
    /// The pip bounds are clamped.
    ///
    /// # Errors
    ///
    /// The method returns an error when a segment is not in the `key=value` format, or when a
    /// value cannot be parsed.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut config: BoardConfig = BoardConfig::default();
        let query: &str = query.trim().trim_start_matches('?');

        for segment in query.split('&').filter(|s| !s.is_empty()) {
            let Some((key, value)) = segment.split_once('=') else {
                return Err(Error::InvalidSegment(segment.to_string()));
            };
            match key {
                "rs" => config.resource_seed = parse_value(key, value)?,
                "ns" => config.number_seed = parse_value(key, value)?,
                "psr" => config.prevent_same_resources = parse_flag(key, value)?,
                "kdc" => config.keep_desert_center = parse_flag(key, value)?,
                "nsn" => config.no_same_neighbors = parse_flag(key, value)?,
                "pmin" => config.pip_min = parse_value(key, value)?,
                "pmax" => config.pip_max = parse_value(key, value)?,
                _ => (),
            }
        }
        Ok(config.clamped())
    }
}

impl fmt::Display for BoardConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_query())
    }
}

impl FromStr for BoardConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_query(s)
    }
}

fn invalid(key: &str, value: &str) -> Error {
    Error::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| invalid(key, value))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = BoardConfig::default();
        assert!(!c.prevent_same_resources);
        assert!(!c.keep_desert_center);
        assert!(c.no_same_neighbors);
        assert_eq!((c.pip_min, c.pip_max), (2, 13));
    }

    #[test]
    fn clamping_keeps_bounds_ordered() {
        for pip_min in 0..20 {
            for pip_max in 0..20 {
                let c = BoardConfig {
                    pip_min,
                    pip_max,
                    ..BoardConfig::default()
                }
                .clamped();
                assert!(2 <= c.pip_min && c.pip_min <= c.pip_max && c.pip_max <= 13);
            }
        }
        let c = BoardConfig {
            pip_min: 4,
            pip_max: 10,
            ..BoardConfig::default()
        };
        assert_eq!(c.clamped(), c);
    }

    #[test]
    fn share_string_round_trip() {
        let c = BoardConfig {
            prevent_same_resources: true,
            keep_desert_center: false,
            no_same_neighbors: false,
            pip_min: 3,
            pip_max: 11,
            resource_seed: u64::MAX,
            number_seed: 42,
        };
        let q = c.to_query();
        assert_eq!(
            q,
            "rs=18446744073709551615&ns=42&psr=1&kdc=0&nsn=0&pmin=3&pmax=11"
        );
        assert_eq!(q.parse::<BoardConfig>().unwrap(), c);
    }

    #[test]
    fn partial_share_string() {
        let c = BoardConfig::from_query("?ns=9&kdc=true&extra=foo&").unwrap();
        assert_eq!(c.number_seed, 9);
        assert!(c.keep_desert_center);
        assert_eq!(c.resource_seed, 0);
        assert!(c.no_same_neighbors);
    }

    #[test]
    fn share_string_bounds_are_clamped() {
        let c = BoardConfig::from_query("pmin=1&pmax=99").unwrap();
        assert_eq!((c.pip_min, c.pip_max), (2, 13));
    }

    #[test]
    fn malformed_share_strings() {
        assert!(matches!(
            BoardConfig::from_query("rs=12&psr"),
            Err(Error::InvalidSegment(s)) if s == "psr"
        ));
        assert!(matches!(
            BoardConfig::from_query("rs=abc"),
            Err(Error::InvalidValue { key, .. }) if key == "rs"
        ));
        assert!(matches!(
            BoardConfig::from_query("nsn=yes"),
            Err(Error::InvalidValue { key, value }) if key == "nsn" && value == "yes"
        ));
        assert!(BoardConfig::from_query("pmin=-3").is_err());
    }

    #[test]
    fn regenerate_changes_seeds() {
        let mut c = BoardConfig::default();
        c.regenerate();
        let first = (c.resource_seed, c.number_seed);
        c.regenerate();
        assert_ne!(first, (c.resource_seed, c.number_seed));
    }
}
