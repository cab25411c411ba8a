// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{JdkWatchError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::LazyLock;

mod jvmci;

pub use jvmci::JvmciBuild;

/// Java version tokens as printed by launchers and the catalog:
/// `17.0.2+8-LTS`, `21-ea+35`, `1.8.0_312-b07`, `11.0.14.1`.
static JAVA_VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d+(?:\.\d+)*)(?:_(\d+))?(?:-b(\d+))?(?:-([A-Za-z][A-Za-z0-9.]*))?(?:\+(\d+(?:\.\d+)*))?(?:-([A-Za-z][A-Za-z0-9.]*))?",
    )
    .expect("valid version pattern")
});

static NUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)*").expect("valid numeric pattern"));

/// Labels that mark a pre-release. Anything else after a dash (`LTS`,
/// vendor tags such as `zing_22.02`) is not part of the version.
const PRE_RELEASE_LABELS: &[&str] = &["ea", "alpha", "beta", "rc", "internal", "snapshot"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub components: Vec<u32>,        // Numeric components, trailing zeros removed
    pub build: Option<Vec<u32>>,     // Build numbers as numeric array
    pub pre_release: Option<String>, // Pre-release label such as "ea"
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self::from_parts(vec![major, minor, patch], None, None)
    }

    pub fn from_parts(
        components: Vec<u32>,
        build: Option<Vec<u32>>,
        pre_release: Option<String>,
    ) -> Self {
        let mut components = components;
        while components.len() > 1 && components.last() == Some(&0) {
            components.pop();
        }
        if components.is_empty() {
            components.push(0);
        }
        Self {
            components,
            build,
            pre_release,
        }
    }

    pub fn major(&self) -> u32 {
        self.components.first().copied().unwrap_or(0)
    }

    pub fn minor(&self) -> u32 {
        self.components.get(1).copied().unwrap_or(0)
    }

    pub fn patch(&self) -> u32 {
        self.components.get(2).copied().unwrap_or(0)
    }

    /// True when `self` is a later release than `other`.
    ///
    /// Build numbers only break ties when both sides carry one: launcher
    /// banners usually print `17.0.2` where the catalog lists `17.0.2+8`.
    pub fn is_newer_than(&self, other: &Version) -> bool {
        match (&self.build, &other.build) {
            (Some(_), Some(_)) => self > other,
            _ => self.cmp_release(other) == Ordering::Greater,
        }
    }

    /// Ordering by numeric components and pre-release label only.
    pub fn cmp_release(&self, other: &Version) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }

        // A release sorts after any pre-release of the same components
        match (&self.pre_release, &other.pre_release) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Parse a version token the way JDK launchers and the catalog print it.
    ///
    /// Legacy `1.x` numbering is mapped onto the modern scheme (`1.8.0_312`
    /// becomes `8.0.312`), `-bNN` is treated as the build number and an
    /// only known pre-release labels are kept. Anything after the recognised
    /// prefix is ignored.
    pub fn parse_java(token: &str) -> Result<Self> {
        let token = token.trim().trim_matches('"');
        let captures = JAVA_VERSION_PATTERN
            .captures(token)
            .ok_or_else(|| JdkWatchError::InvalidVersionFormat(token.to_string()))?;

        let mut components = parse_numeric_list(&captures[1])?;
        if components.len() > 1 && components[0] == 1 {
            components.remove(0);
        }

        if let Some(update) = captures.get(2) {
            let update = parse_number(update.as_str())?;
            if components.len() < 2 {
                components.resize(2, 0);
            }
            components.truncate(2);
            components.push(update);
        }

        let build = match (captures.get(5), captures.get(3)) {
            (Some(plus_build), _) => Some(parse_numeric_list(plus_build.as_str())?),
            (None, Some(legacy_build)) => Some(vec![parse_number(legacy_build.as_str())?]),
            (None, None) => None,
        };

        let pre_release = captures
            .get(4)
            .or_else(|| captures.get(6))
            .map(|m| m.as_str().to_string())
            .filter(|label| is_pre_release_label(label));

        Ok(Self::from_parts(components, build, pre_release))
    }

    /// Never fails: salvages the first numeric run of `token`, or `0`.
    pub fn best_effort(token: &str) -> Self {
        if let Ok(version) = Self::parse_java(token) {
            return version;
        }

        NUMERIC_RUN
            .find(token)
            .and_then(|m| Self::parse_java(m.as_str()).ok())
            .unwrap_or_else(|| Self::from_parts(vec![0], None, None))
    }
}

fn is_pre_release_label(label: &str) -> bool {
    let base = label.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    PRE_RELEASE_LABELS
        .iter()
        .any(|known| base.eq_ignore_ascii_case(known))
}

fn parse_number(s: &str) -> Result<u32> {
    s.parse::<u32>()
        .map_err(|_| JdkWatchError::InvalidVersionFormat(s.to_string()))
}

fn parse_numeric_list(s: &str) -> Result<Vec<u32>> {
    s.split('.').map(parse_number).collect()
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_release(other).then_with(|| self.build.cmp(&other.build))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = JdkWatchError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(JdkWatchError::InvalidVersionFormat(s.to_string()));
        }
        Self::parse_java(s)
    }
}

impl TryFrom<String> for Version {
    type Error = JdkWatchError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_str(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Write components separated by dots
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{component}")?;
        }

        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{pre_release}")?;
        }

        if let Some(build) = &self.build {
            write!(f, "+")?;
            for (i, component) in build.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                write!(f, "{component}")?;
            }
        }

        Ok(())
    }
}
