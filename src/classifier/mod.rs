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

//! Turns a `java -version` banner plus install metadata into a [`Distribution`].
//!
//! [`classify`] is a pure function: every rule reads from the immutable tables
//! in [`rules`] and precompiled patterns, so candidates can be classified
//! concurrently.

pub mod rules;

use crate::models::distribution::{
    BuildScope, Distribution, Feature, GENERIC_OPENJDK_API, UNKNOWN_BUILD_NAME, parent_folder_name,
};
use crate::models::platform::{Architecture, OperatingSystem, SysInfo};
use crate::scan::introspect::BannerLines;
use crate::scan::metadata::{InstallMetadata, ReleaseProperties};
use crate::version::{JvmciBuild, Version};
use regex::Regex;
use rules::{
    BRAND_RULES, COMMERCIAL_BUILD_TYPE, FALLBACK_RULES, GLUON_GRAALVM, GRAALVM_COMMUNITY,
    GRAALVM_FAMILY_DEFAULT, GRAALVM_FAMILY_RULES, IMPLEMENTOR_RULES, ImplementorVendor,
    JVM_VARIANT_RULES, ORACLE, OS_NAME_RULES, README_RULES, Vendor, VersionSource,
};
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

const OPENJDK_PREFIX: &str = "openjdk version";
const JAVA_PREFIX: &str = "java version";
const JAVAFX_MODULE_MARKER: &str = "javafx";
const GRAALVM_MARKER: &str = "graalvm";
const GLUON_VENDOR: &str = "gluon";
/// GraalVM CE api ids carry the JDK major, which only exists from 8 on.
const MIN_GRAALVM_FAMILY_MAJOR: u32 = 8;

static DETAIL_BUILD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(build\s([^)]*)\)").expect("valid build pattern"));

static GRAALVM_VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"graalvm\s(?:[a-z]+\s)*?(\d+(?:\.\d+)*(?:[-+][0-9a-z.]+)?)\s\(")
        .expect("valid graalvm pattern")
});

/// Caller-provided inputs that shape classification.
#[derive(Debug, Clone)]
pub struct ClassifierContext {
    pub host: SysInfo,
    /// Lowercase preview feature keywords in priority order.
    pub feature_keywords: Vec<String>,
    pub show_unknown_builds: bool,
}

/// Vendor identity resolved so far.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Identity {
    name: String,
    api: String,
    scope: BuildScope,
}

impl From<Vendor> for Identity {
    fn from(vendor: Vendor) -> Self {
        Self {
            name: vendor.name.to_string(),
            api: vendor.api.to_string(),
            scope: vendor.scope,
        }
    }
}

/// Working state threaded through the rule stages.
#[derive(Debug, Default)]
struct Findings {
    identity: Option<Identity>,
    version: Option<Version>,
    jdk_version: Option<Version>,
    operating_system: Option<OperatingSystem>,
    architecture: Option<Architecture>,
    modules: Vec<String>,
}

impl Findings {
    fn resolve(&mut self, vendor: Vendor) {
        self.identity = Some(vendor.into());
    }

    fn is_resolved(&self) -> bool {
        self.identity.is_some()
    }

    fn api(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.api.as_str())
    }
}

/// Classify one runtime.
///
/// `in_use` and `managed_by_version_manager` are left `false` for the caller
/// to fill in.
pub fn classify(
    banner: &BannerLines,
    metadata: &InstallMetadata,
    install_root: &Path,
    context: &ClassifierContext,
) -> Distribution {
    let mut findings = Findings::default();
    let (java_banner, version_token) = split_banner(banner.banner());
    if java_banner {
        findings.resolve(ORACLE);
    }

    if !apply_brand_rules(banner, java_banner, &mut findings) {
        apply_jvmci_rule(banner, &mut findings);
    }

    let banner_version = version_token
        .map(Version::best_effort)
        .unwrap_or_else(|| Version::best_effort(banner.banner()));

    if let Some(release) = &metadata.release {
        apply_release_rules(release, &mut findings);
    }

    apply_readme_rules(banner, metadata, &banner_version, &mut findings);
    apply_fallback_rules(banner, metadata, &banner_version, &mut findings);

    let javafx_bundled = javafx_bundled(metadata, &findings.modules);
    let feature = detect_feature(banner.vm(), &context.feature_keywords);

    let version = findings.version.take().unwrap_or(banner_version);
    let major_version = findings
        .jdk_version
        .as_ref()
        .map(Version::major)
        .unwrap_or_else(|| version.major());

    let identified = findings.is_resolved();
    let (name, api_string, build_scope) = match findings.identity {
        Some(identity) => (identity.name, identity.api, identity.scope),
        None => {
            let api = if context.show_unknown_builds {
                GENERIC_OPENJDK_API.to_string()
            } else {
                String::new()
            };
            (UNKNOWN_BUILD_NAME.to_string(), api, BuildScope::BuildOfOpenJdk)
        }
    };

    Distribution {
        name,
        api_string,
        version,
        major_version,
        operating_system: findings
            .operating_system
            .or(context.host.operating_system),
        architecture: findings.architecture.or(context.host.architecture),
        javafx_bundled,
        install_path: install_root.to_path_buf(),
        feature,
        build_scope,
        managed_by_version_manager: false,
        modules: findings.modules,
        in_use: false,
        parent_folder_name: parent_folder_name(install_root),
        identified,
    }
}

/// Returns whether the banner is a `java version` banner and the quoted
/// version token, if any.
fn split_banner(line: &str) -> (bool, Option<&str>) {
    let (java_banner, rest) = if let Some(rest) = line.strip_prefix(OPENJDK_PREFIX) {
        (false, rest)
    } else if let Some(rest) = line.strip_prefix(JAVA_PREFIX) {
        (true, rest)
    } else {
        (false, line)
    };

    let token = match (rest.find('"'), rest.rfind('"')) {
        (Some(first), Some(last)) if last > first => Some(&rest[first + 1..last]),
        _ => None,
    };
    (java_banner, token)
}

/// Returns whether a brand row matched.
fn apply_brand_rules(banner: &BannerLines, java_banner: bool, findings: &mut Findings) -> bool {
    let detail = banner.detail();
    let Some(rule) = BRAND_RULES
        .iter()
        .filter(|rule| java_banner || !rule.java_banner_only)
        .find(|rule| rule.matcher.matches(detail))
    else {
        return false;
    };

    log::trace!("Brand marker matched {}", rule.vendor.name);
    findings.resolve(rule.vendor);
    if rule.version == VersionSource::DetailBuild
        && let Some(captures) = DETAIL_BUILD_PATTERN.captures(detail)
    {
        findings.version = Some(Version::best_effort(&captures[1]));
    }
    true
}

fn apply_jvmci_rule(banner: &BannerLines, findings: &mut Findings) {
    if let Some(tag) = JvmciBuild::find(banner.detail())
        && tag.is_graalvm_community()
    {
        log::trace!("Found {tag}, treating as GraalVM Community");
        findings.resolve(GRAALVM_COMMUNITY);
    }
}

fn apply_release_rules(release: &ReleaseProperties, findings: &mut Findings) {
    if !findings.is_resolved()
        && let Some(implementor) = release.implementor()
        && let Some(vendor) = implementor_vendor(implementor, release.implementor_version())
    {
        findings.resolve(vendor);
    }

    if let Some(variant) = release.jvm_variant() {
        let variant = variant.to_lowercase();
        if let Some((_, _, vendor)) = JVM_VARIANT_RULES
            .iter()
            .find(|(api, v, _)| findings.api() == Some(*api) && *v == variant)
        {
            findings.resolve(*vendor);
        }
    }

    if let Some(arch) = release.os_arch() {
        match Architecture::from_str(arch) {
            Ok(arch) => findings.architecture = Some(arch),
            Err(_) => log::debug!("Ignoring unknown OS_ARCH {arch}"),
        }
    }

    if let Some(os_name) = release.os_name() {
        let os_name = os_name.to_lowercase();
        findings.operating_system = OS_NAME_RULES
            .iter()
            .find(|(value, _)| *value == os_name)
            .and_then(|(_, os)| OperatingSystem::from_str(os).ok())
            .or(findings.operating_system);
    }

    findings.modules = release.modules();

    if findings
        .identity
        .as_ref()
        .is_some_and(|identity| identity.scope == BuildScope::BuildOfGraalVm)
        && let Some(java_version) = release.java_version()
    {
        findings.jdk_version = Some(Version::best_effort(java_version));
    }

    if release.build_type() == Some(COMMERCIAL_BUILD_TYPE) {
        findings.resolve(ORACLE);
    }
}

fn implementor_vendor(implementor: &str, implementor_version: Option<&str>) -> Option<Vendor> {
    let (_, rule) = IMPLEMENTOR_RULES
        .iter()
        .find(|(value, _)| *value == implementor)?;

    match rule {
        ImplementorVendor::Fixed(vendor) => Some(*vendor),
        ImplementorVendor::ByImplementorVersion(prefixes) => {
            let implementor_version = implementor_version?;
            prefixes
                .iter()
                .find(|(prefix, _)| implementor_version.starts_with(prefix))
                .map(|(_, vendor)| *vendor)
        }
        ImplementorVendor::Unknown => None,
    }
}

fn apply_readme_rules(
    banner: &BannerLines,
    metadata: &InstallMetadata,
    banner_version: &Version,
    findings: &mut Findings,
) {
    if findings.is_resolved() {
        return;
    }
    let Some(readme) = metadata.readme_lowercase() else {
        return;
    };
    let Some((_, vendor)) = README_RULES
        .iter()
        .find(|(phrase, _)| readme.contains(phrase))
    else {
        return;
    };

    findings.resolve(*vendor);
    if vendor.scope == BuildScope::BuildOfGraalVm {
        findings.version = graalvm_version(banner.vm());
        findings.jdk_version =
            release_java_version(metadata).or_else(|| Some(banner_version.clone()));
    }
}

fn apply_fallback_rules(
    banner: &BannerLines,
    metadata: &InstallMetadata,
    banner_version: &Version,
    findings: &mut Findings,
) {
    if findings.is_resolved() {
        return;
    }

    let vm = banner.vm().to_lowercase();
    if vm.contains(GRAALVM_MARKER) {
        let release = metadata.release.as_ref();
        let (name, prefix) = release
            .and_then(ReleaseProperties::implementor)
            .and_then(|implementor| {
                GRAALVM_FAMILY_RULES
                    .iter()
                    .find(|(value, _, _)| *value == implementor)
                    .map(|(_, name, prefix)| (*name, *prefix))
            })
            .unwrap_or(GRAALVM_FAMILY_DEFAULT);

        let major = banner_version.major();
        let api = if major >= MIN_GRAALVM_FAMILY_MAJOR {
            format!("{prefix}{major}")
        } else {
            String::new()
        };
        findings.identity = Some(Identity {
            name: name.to_string(),
            api,
            scope: BuildScope::BuildOfGraalVm,
        });

        if release
            .and_then(ReleaseProperties::vendor)
            .is_some_and(|vendor| vendor.eq_ignore_ascii_case(GLUON_VENDOR))
        {
            findings.resolve(GLUON_GRAALVM);
        }

        findings.version = graalvm_version(banner.vm());
        findings.jdk_version =
            release_java_version(metadata).or_else(|| Some(banner_version.clone()));
        return;
    }

    let detail = banner.detail().to_lowercase();
    if let Some((_, vendor)) = FALLBACK_RULES
        .iter()
        .find(|(marker, _)| detail.contains(marker) || vm.contains(marker))
    {
        findings.resolve(*vendor);
    }
}

fn graalvm_version(vm_line: &str) -> Option<Version> {
    let vm_line = vm_line.to_lowercase();
    GRAALVM_VERSION_PATTERN
        .captures(&vm_line)
        .map(|captures| Version::best_effort(&captures[1]))
}

fn release_java_version(metadata: &InstallMetadata) -> Option<Version> {
    metadata
        .release
        .as_ref()
        .and_then(ReleaseProperties::java_version)
        .map(Version::best_effort)
}

/// Legacy jar first, then `jmods/` overrides it, then a declared `javafx`
/// module forces `true`.
fn javafx_bundled(metadata: &InstallMetadata, modules: &[String]) -> bool {
    let mut bundled = metadata.legacy_javafx_jar;
    if let Some(jmods) = metadata.jmods_javafx {
        bundled = jmods;
    }
    if modules
        .iter()
        .any(|module| module.contains(JAVAFX_MODULE_MARKER))
    {
        bundled = true;
    }
    bundled
}

/// First configured keyword that names a feature and occurs in the VM line.
fn detect_feature(vm_line: &str, keywords: &[String]) -> Feature {
    let vm_line = vm_line.to_lowercase();
    keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty() && vm_line.contains(keyword.as_str()))
        .map(|keyword| Feature::from_text(&keyword))
        .find(|feature| *feature != Feature::None)
        .unwrap_or(Feature::None)
}
