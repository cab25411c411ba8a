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

//! Vendor tables. Rows are evaluated top to bottom and the first match wins;
//! supporting a new vendor means adding a row here.

use crate::models::distribution::BuildScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vendor {
    pub name: &'static str,
    pub api: &'static str,
    pub scope: BuildScope,
}

impl Vendor {
    const fn openjdk(name: &'static str, api: &'static str) -> Self {
        Self {
            name,
            api,
            scope: BuildScope::BuildOfOpenJdk,
        }
    }

    const fn graalvm(name: &'static str, api: &'static str) -> Self {
        Self {
            name,
            api,
            scope: BuildScope::BuildOfGraalVm,
        }
    }
}

pub const ORACLE: Vendor = Vendor::openjdk("Oracle", "oracle");
pub const GRAALVM: Vendor = Vendor::graalvm("GraalVM", "graalvm");
pub const GRAALVM_COMMUNITY: Vendor = Vendor::graalvm("GraalVM Community", "graalvm_community");
pub const ZULU: Vendor = Vendor::openjdk("Zulu", "zulu");
pub const ZULU_PRIME: Vendor = Vendor::openjdk("ZuluPrime", "zulu_prime");
pub const ADOPT: Vendor = Vendor::openjdk("Adopt OpenJDK", "aoj");
pub const LIBERICA: Vendor = Vendor::openjdk("Liberica", "liberica");
pub const LIBERICA_NATIVE: Vendor = Vendor::graalvm("Liberica Native", "liberica_native");
pub const GLUON_GRAALVM: Vendor = Vendor::graalvm("Gluon GraalVM CE", "gluon_graalvm");

/// How a brand row recognises its detail line.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Contains(&'static str),
    ContainsAll(&'static [&'static str]),
    StartsWith(&'static str),
}

impl Matcher {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Matcher::Contains(marker) => line.contains(marker),
            Matcher::ContainsAll(markers) => markers.iter().all(|marker| line.contains(marker)),
            Matcher::StartsWith(prefix) => line.starts_with(prefix),
        }
    }
}

/// Where the version of a brand-matched build comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// The quoted token of the first banner line.
    Banner,
    /// The `(build ...)` group of the detail line.
    DetailBuild,
}

#[derive(Debug, Clone, Copy)]
pub struct BrandRule {
    pub matcher: Matcher,
    /// Only consulted when the banner starts with `java version`.
    pub java_banner_only: bool,
    pub vendor: Vendor,
    pub version: VersionSource,
}

const fn brand(matcher: Matcher, vendor: Vendor) -> BrandRule {
    BrandRule {
        matcher,
        java_banner_only: false,
        vendor,
        version: VersionSource::Banner,
    }
}

/// Case-sensitive markers on the detail (second) banner line.
pub const BRAND_RULES: &[BrandRule] = &[
    BrandRule {
        matcher: Matcher::Contains("GraalVM"),
        java_banner_only: true,
        vendor: GRAALVM,
        version: VersionSource::Banner,
    },
    BrandRule {
        matcher: Matcher::Contains("Zulu"),
        java_banner_only: false,
        vendor: ZULU,
        version: VersionSource::DetailBuild,
    },
    BrandRule {
        matcher: Matcher::Contains("Zing"),
        java_banner_only: false,
        vendor: ZULU_PRIME,
        version: VersionSource::DetailBuild,
    },
    BrandRule {
        matcher: Matcher::Contains("Prime"),
        java_banner_only: false,
        vendor: ZULU_PRIME,
        version: VersionSource::DetailBuild,
    },
    brand(
        Matcher::ContainsAll(&["Semeru", "Certified"]),
        Vendor::openjdk("Semeru certified", "semeru_certified"),
    ),
    brand(Matcher::Contains("Semeru"), Vendor::openjdk("Semeru", "semeru")),
    brand(Matcher::Contains("Tencent"), Vendor::openjdk("Kona", "kona")),
    brand(Matcher::Contains("Bisheng"), Vendor::openjdk("Bisheng", "bisheng")),
    brand(Matcher::Contains("Homebrew"), Vendor::openjdk("Homebrew", "homebrew")),
    brand(Matcher::StartsWith("Java(TM) SE"), ORACLE),
    brand(Matcher::Contains("SapMachine"), Vendor::openjdk("SAP Machine", "sap_machine")),
    brand(Matcher::Contains("Dragonwell"), Vendor::openjdk("Dragonwell", "dragonwell")),
    brand(Matcher::Contains("JBR"), Vendor::openjdk("JetBrains", "jetbrains")),
    brand(Matcher::Contains("Red_Hat"), Vendor::openjdk("Red Hat", "redhat")),
    brand(Matcher::Contains("Debian"), Vendor::openjdk("Debian", "debian")),
    brand(Matcher::Contains("Ubuntu"), Vendor::openjdk("Ubuntu", "ubuntu")),
];

/// Vendor chosen for a `release` file `IMPLEMENTOR` value.
#[derive(Debug, Clone, Copy)]
pub enum ImplementorVendor {
    Fixed(Vendor),
    /// Decided by the prefix of `IMPLEMENTOR_VERSION`.
    ByImplementorVersion(&'static [(&'static str, Vendor)]),
    /// Recognised value that names no vendor.
    Unknown,
}

pub const IMPLEMENTOR_RULES: &[(&str, ImplementorVendor)] = &[
    ("AdoptOpenJDK", ImplementorVendor::Fixed(ADOPT)),
    (
        "Alibaba",
        ImplementorVendor::Fixed(Vendor::openjdk("Dragonwell", "dragonwell")),
    ),
    (
        "Amazon.com Inc.",
        ImplementorVendor::Fixed(Vendor::openjdk("Corretto", "corretto")),
    ),
    (
        "Azul Systems, Inc.",
        ImplementorVendor::ByImplementorVersion(&[
            ("Zulu", ZULU),
            ("Zing", ZULU_PRIME),
            ("Prime", ZULU_PRIME),
        ]),
    ),
    ("BellSoft", ImplementorVendor::Fixed(LIBERICA)),
    (
        "mandrel",
        ImplementorVendor::Fixed(Vendor::graalvm("Mandrel", "mandrel")),
    ),
    (
        "Microsoft",
        ImplementorVendor::Fixed(Vendor::openjdk("Microsoft", "microsoft")),
    ),
    (
        "ojdkbuild",
        ImplementorVendor::Fixed(Vendor::openjdk("OJDK Build", "ojdk_build")),
    ),
    (
        "Oracle Corporation",
        ImplementorVendor::Fixed(Vendor::openjdk("Oracle OpenJDK", "oracle_openjdk")),
    ),
    (
        "Red Hat, Inc.",
        ImplementorVendor::Fixed(Vendor::openjdk("Red Hat", "redhat")),
    ),
    (
        "SAP SE",
        ImplementorVendor::Fixed(Vendor::openjdk("SAP Machine", "sap_machine")),
    ),
    (
        "OpenLogic",
        ImplementorVendor::Fixed(Vendor::openjdk("OpenLogic", "openlogic")),
    ),
    (
        "JetBrains s.r.o.",
        ImplementorVendor::Fixed(Vendor::openjdk("JetBrains", "jetbrains")),
    ),
    (
        "Eclipse Foundation",
        ImplementorVendor::Fixed(Vendor::openjdk("Temurin", "temurin")),
    ),
    (
        "Eclipse Adoptium",
        ImplementorVendor::Fixed(Vendor::openjdk("Temurin", "temurin")),
    ),
    (
        "Tencent",
        ImplementorVendor::Fixed(Vendor::openjdk("Kona", "kona")),
    ),
    (
        "Bisheng",
        ImplementorVendor::Fixed(Vendor::openjdk("Bisheng", "bisheng")),
    ),
    (
        "Debian",
        ImplementorVendor::Fixed(Vendor::openjdk("Debian", "debian")),
    ),
    (
        "Ubuntu",
        ImplementorVendor::Fixed(Vendor::openjdk("Ubuntu", "ubuntu")),
    ),
    (
        "Homebrew",
        ImplementorVendor::Fixed(Vendor::openjdk("Homebrew", "homebrew")),
    ),
    ("N/A", ImplementorVendor::Unknown),
];

/// `JVM_VARIANT` overrides: (api of the vendor found so far, variant, replacement).
pub const JVM_VARIANT_RULES: &[(&str, &str, Vendor)] = &[
    ("aoj", "dcevm", Vendor::openjdk("Trava OpenJDK", "trava")),
    ("aoj", "openj9", Vendor::openjdk("Adopt OpenJDK J9", "aoj_openj9")),
];

/// `OS_NAME` values mapped onto operating system tokens.
pub const OS_NAME_RULES: &[(&str, &str)] = &[
    ("darwin", "macos"),
    ("linux", "linux"),
    ("windows", "windows"),
];

/// Readme phrases (lowercase) for builds that say little about themselves.
pub const README_RULES: &[(&str, Vendor)] = &[
    ("liberica native image kit", LIBERICA_NATIVE),
    ("liberica", LIBERICA),
];

/// `IMPLEMENTOR` values of GraalVM CE-family builds: (implementor, name, api prefix).
pub const GRAALVM_FAMILY_RULES: &[(&str, &str, &str)] = &[
    ("GraalVM Community", "GraalVM CE", "graalvm_ce"),
    ("GraalVM Enterprise", "GraalVM", "graalvm"),
];

pub const GRAALVM_FAMILY_DEFAULT: (&str, &str) = ("GraalVM CE", "graalvm_ce");

/// Lowercase substrings on the detail or VM line of otherwise unknown builds.
pub const FALLBACK_RULES: &[(&str, Vendor)] = &[
    ("microsoft", Vendor::openjdk("Microsoft", "microsoft")),
    ("corretto", Vendor::openjdk("Corretto", "corretto")),
    ("temurin", Vendor::openjdk("Temurin", "temurin")),
];

/// Value of `BUILD_TYPE` that relabels any build as Oracle.
pub const COMMERCIAL_BUILD_TYPE: &str = "commercial";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_matchers() {
        assert!(Matcher::Contains("Zulu").matches("OpenJDK Runtime Environment Zulu17.32+13-CA"));
        assert!(!Matcher::Contains("Zulu").matches("OpenJDK Runtime Environment zulu"));
        assert!(
            Matcher::ContainsAll(&["Semeru", "Certified"])
                .matches("IBM Semeru Runtime Certified Edition 17.0.2.0")
        );
        assert!(
            !Matcher::ContainsAll(&["Semeru", "Certified"])
                .matches("IBM Semeru Runtime Open Edition")
        );
        assert!(Matcher::StartsWith("Java(TM) SE").matches("Java(TM) SE Runtime Environment"));
        assert!(!Matcher::StartsWith("Java(TM) SE").matches("OpenJDK Java(TM) SE"));
    }

    #[test]
    fn test_implementor_rules_are_unique() {
        let mut seen = HashSet::new();
        for (implementor, _) in IMPLEMENTOR_RULES {
            assert!(seen.insert(*implementor), "duplicate row {implementor}");
        }
    }

    #[test]
    fn test_api_strings_are_lowercase() {
        for rule in BRAND_RULES {
            assert_eq!(rule.vendor.api, rule.vendor.api.to_lowercase());
            assert!(!rule.vendor.name.is_empty());
        }
    }
}
