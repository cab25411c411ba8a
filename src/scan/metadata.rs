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

//! Auxiliary files found next to a runtime: `release`, the legacy JavaFX
//! extension jar, `jmods/` and `readme.txt`.

use crate::error::Result;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

const RELEASE_FILE: &str = "release";
const README_FILE: &str = "readme.txt";
const JMODS_FOLDER: &str = "jmods";
const JAVAFX_MODULE_PREFIX: &str = "javafx";
const LEGACY_JAVAFX_JAR: &str = "jfxrt.jar";
const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Parsed `release` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseProperties {
    entries: HashMap<String, String>,
}

impl ReleaseProperties {
    /// Parse `KEY=value` lines; `#` and `!` start comments and one pair of
    /// surrounding double quotes is removed from values.
    pub fn parse(contents: &str) -> Self {
        let entries = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
            .collect();
        Self { entries }
    }

    pub fn load(path: &Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Some(Self::parse(&contents)),
            Err(e) => {
                log::trace!("No release file at {}: {e}", path.display());
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn implementor(&self) -> Option<&str> {
        self.get("IMPLEMENTOR")
    }

    pub fn implementor_version(&self) -> Option<&str> {
        self.get("IMPLEMENTOR_VERSION")
    }

    pub fn os_arch(&self) -> Option<&str> {
        self.get("OS_ARCH")
    }

    pub fn os_name(&self) -> Option<&str> {
        self.get("OS_NAME")
    }

    pub fn build_type(&self) -> Option<&str> {
        self.get("BUILD_TYPE")
    }

    pub fn jvm_variant(&self) -> Option<&str> {
        self.get("JVM_VARIANT")
    }

    pub fn java_version(&self) -> Option<&str> {
        self.get("JAVA_VERSION")
    }

    pub fn vendor(&self) -> Option<&str> {
        self.get("VENDOR")
    }

    /// Module names from `MODULES`, in declared order.
    pub fn modules(&self) -> Vec<String> {
        self.get("MODULES")
            .map(|modules| modules.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// `Created-By` / `Build-Jdk` entries of a jar manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JarManifest {
    pub created_by: Option<String>,
    pub build_jdk: Option<String>,
}

impl JarManifest {
    /// Parse `Key: value` lines, folding continuation lines that start with a space.
    pub fn parse(contents: &str) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for line in contents.lines() {
            if let Some(continuation) = line.strip_prefix(' ') {
                if let Some((_, value)) = entries.last_mut() {
                    value.push_str(continuation);
                }
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                entries.push((key.trim().to_string(), value.trim().to_string()));
            }
        }

        let find = |name: &str| {
            entries
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.clone())
        };

        Self {
            created_by: find("Created-By"),
            build_jdk: find("Build-Jdk"),
        }
    }

    pub fn read_from_jar(jar: &Path) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(File::open(jar)?)?;
        let mut entry = archive.by_name(MANIFEST_ENTRY)?;
        let mut contents = String::new();
        entry.read_to_string(&mut contents)?;
        Ok(Self::parse(&contents))
    }
}

/// Everything the classifier may consult besides the banner.
#[derive(Debug, Clone, Default)]
pub struct InstallMetadata {
    pub release: Option<ReleaseProperties>,
    /// A legacy `jfxrt.jar` extension exists.
    pub legacy_javafx_jar: bool,
    /// Manifest of that jar. Informational only: it is reported in debug
    /// logs, and bundling is decided by `legacy_javafx_jar` alone.
    pub javafx_manifest: Option<JarManifest>,
    /// `Some(true)` when `jmods/` holds a `javafx*` module, `Some(false)`
    /// when it exists without one, `None` when there is no `jmods/`.
    pub jmods_javafx: Option<bool>,
    pub readme: Option<String>,
}

impl InstallMetadata {
    /// Gather metadata from an install root. Missing files leave fields unset.
    pub fn collect(install_root: &Path) -> Self {
        let legacy_jar = legacy_javafx_jar(install_root);
        let javafx_manifest = legacy_jar.as_deref().and_then(|jar| {
            JarManifest::read_from_jar(jar)
                .inspect_err(|e| log::debug!("Cannot read manifest of {}: {e}", jar.display()))
                .ok()
        });
        if let Some(manifest) = &javafx_manifest {
            log::debug!(
                "JavaFX extension in {} created by {:?}",
                install_root.display(),
                manifest.created_by
            );
        }

        Self {
            release: ReleaseProperties::load(&install_root.join(RELEASE_FILE)),
            legacy_javafx_jar: legacy_jar.is_some(),
            javafx_manifest,
            jmods_javafx: jmods_javafx(install_root),
            readme: read_readme(install_root),
        }
    }

    /// Lowercased readme contents for phrase matching.
    pub fn readme_lowercase(&self) -> Option<String> {
        self.readme.as_ref().map(|readme| readme.to_lowercase())
    }
}

fn legacy_javafx_jar(install_root: &Path) -> Option<PathBuf> {
    [
        install_root.join("jre").join("lib").join("ext"),
        install_root.join("lib").join("ext"),
    ]
    .into_iter()
    .find_map(|folder| find_file(&folder, |name| name.eq_ignore_ascii_case(LEGACY_JAVAFX_JAR)))
}

fn jmods_javafx(install_root: &Path) -> Option<bool> {
    let jmods = install_root.join(JMODS_FOLDER);
    if !jmods.is_dir() {
        return None;
    }
    Some(find_file(&jmods, |name| name.starts_with(JAVAFX_MODULE_PREFIX)).is_some())
}

fn read_readme(install_root: &Path) -> Option<String> {
    let readme = find_file(install_root, |name| name.eq_ignore_ascii_case(README_FILE))?;
    fs::read_to_string(&readme)
        .inspect_err(|e| log::debug!("Cannot read {}: {e}", readme.display()))
        .ok()
}

/// First regular file in `folder` whose name satisfies `matches`.
fn find_file(folder: &Path, matches: impl Fn(&str) -> bool) -> Option<PathBuf> {
    fs::read_dir(folder)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .find(|entry| matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
}
