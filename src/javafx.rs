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

//! Update checks for standalone OpenJFX SDKs unpacked next to the JDKs.

use crate::api::new_session;
use crate::config::WatchConfig;
use crate::error::{JdkWatchError, Result};
use crate::models::platform::{Architecture, OperatingSystem, SysInfo};
use crate::scan::metadata::ReleaseProperties;
use crate::version::Version;
use attohttpc::Session;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SDK_FOLDER_PREFIX: &str = "javafx";
const LIB_FOLDER: &str = "lib";
const PROPERTIES_FILE: &str = "javafx.properties";
const RUNTIME_VERSION_KEY: &str = "javafx.runtime.version";
const VERSION_ELEMENT: &str = "version";
pub const GLUON_DOWNLOAD_BASE: &str = "https://download2.gluonhq.com/openjfx";

/// An unpacked OpenJFX SDK.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JavaFxSdk {
    pub path: PathBuf,
    pub version: Version,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdkUpdate {
    pub installed: Version,
    /// Newest release of the installed feature line, or the installed
    /// version when the feed has none.
    pub latest: Version,
    /// Empty unless `latest` is newer and the download exists.
    pub uri: String,
}

impl SdkUpdate {
    pub fn is_available(&self) -> bool {
        !self.uri.is_empty()
    }
}

/// SDK folders directly beneath each search path whose name starts with
/// `javafx`, ignoring case. Folders without a readable runtime version are
/// skipped.
pub fn find_sdks(search_paths: &[PathBuf]) -> Vec<JavaFxSdk> {
    let mut sdks = Vec::new();

    for search_path in search_paths {
        let entries = match fs::read_dir(search_path) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Cannot list {}: {e}", search_path.display());
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let is_sdk_folder = path.is_dir()
                && entry
                    .file_name()
                    .to_string_lossy()
                    .to_lowercase()
                    .starts_with(SDK_FOLDER_PREFIX);
            if !is_sdk_folder {
                continue;
            }

            if let Some(version) = runtime_version(&path) {
                sdks.push(JavaFxSdk { path, version });
            }
        }
    }

    sdks.sort_by(|a, b| a.path.cmp(&b.path));
    sdks.dedup_by(|a, b| a.path == b.path);
    sdks
}

fn runtime_version(sdk: &Path) -> Option<Version> {
    let properties = ReleaseProperties::load(&sdk.join(LIB_FOLDER).join(PROPERTIES_FILE))?;
    let raw = properties.get(RUNTIME_VERSION_KEY)?;
    match Version::parse_java(raw) {
        Ok(version) => Some(version),
        Err(e) => {
            log::debug!("Ignoring {}: {e}", sdk.display());
            None
        }
    }
}

/// All `<version>` entries of a Maven metadata document that parse.
pub fn parse_maven_versions(xml: &str) -> Result<Vec<Version>> {
    let document = roxmltree::Document::parse(xml)?;
    Ok(document
        .descendants()
        .filter(|node| node.has_tag_name(VERSION_ELEMENT))
        .filter_map(|node| node.text())
        .filter_map(|text| Version::parse_java(text.trim()).ok())
        .collect())
}

/// Newest entry of `available` on the same feature release as `installed`.
pub fn latest_for_feature(installed: &Version, available: &[Version]) -> Option<Version> {
    available
        .iter()
        .filter(|version| version.major() == installed.major())
        .max()
        .cloned()
}

/// Gluon SDK archive for `version` on `host`, if Gluon builds one for it.
///
/// The folder carries the full number only when there is an update
/// component; the archive name keeps pre-release labels.
pub fn download_uri(base: &str, version: &Version, host: &SysInfo) -> Option<String> {
    let os = match host.operating_system? {
        OperatingSystem::Windows => "windows",
        OperatingSystem::Linux => "linux",
        OperatingSystem::MacOS => "osx",
        _ => return None,
    };
    let arch = match host.architecture? {
        Architecture::X86 => "x86",
        Architecture::X64 => "x64",
        Architecture::Aarch64 => "aarch64",
        Architecture::Arm32 => "arm32",
        _ => return None,
    };

    let number = if version.components.len() > 2 {
        version
            .components
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    } else {
        version.major().to_string()
    };
    let archive_version = if version.is_pre_release() {
        version.to_string()
    } else {
        number.clone()
    };

    Some(format!(
        "{}/{number}/openjfx-{archive_version}_{os}-{arch}_bin-sdk.zip",
        base.trim_end_matches('/')
    ))
}

/// Reads the OpenJFX release feed and checks Gluon download links.
pub struct OpenJfxClient {
    session: Session,
    metadata_url: String,
    download_base: String,
}

impl OpenJfxClient {
    pub fn new(metadata_url: String, timeout: Duration) -> Self {
        Self {
            session: new_session(timeout),
            metadata_url,
            download_base: GLUON_DOWNLOAD_BASE.to_string(),
        }
    }

    pub fn from_config(config: &WatchConfig) -> Self {
        Self::new(config.api.openjfx_metadata_url.clone(), config.api_timeout())
    }

    pub fn with_download_base(mut self, download_base: String) -> Self {
        self.download_base = download_base;
        self
    }

    /// Published OpenJFX versions; empty when the feed is unreachable or malformed.
    pub fn available_versions(&self) -> Vec<Version> {
        match self.fetch_versions() {
            Ok(versions) => versions,
            Err(e) => {
                log::warn!("Could not read OpenJFX releases: {e}");
                Vec::new()
            }
        }
    }

    fn fetch_versions(&self) -> Result<Vec<Version>> {
        let response = self.session.get(&self.metadata_url).send()?;
        if !response.is_success() {
            return Err(JdkWatchError::MetadataFetch(format!(
                "HTTP {} from {}",
                response.status().as_u16(),
                self.metadata_url
            )));
        }
        parse_maven_versions(&response.text()?)
    }

    pub fn check_update(
        &self,
        installed: &Version,
        available: &[Version],
        host: &SysInfo,
    ) -> SdkUpdate {
        let Some(latest) = latest_for_feature(installed, available) else {
            return SdkUpdate {
                installed: installed.clone(),
                latest: installed.clone(),
                uri: String::new(),
            };
        };

        let uri = if latest.is_newer_than(installed) {
            download_uri(&self.download_base, &latest, host)
                .filter(|uri| self.exists(uri))
                .unwrap_or_default()
        } else {
            String::new()
        };

        SdkUpdate {
            installed: installed.clone(),
            latest,
            uri,
        }
    }

    /// Check every SDK against one download of the release feed.
    pub fn check_sdks(&self, sdks: &[JavaFxSdk], host: &SysInfo) -> Vec<(JavaFxSdk, SdkUpdate)> {
        if sdks.is_empty() {
            return Vec::new();
        }
        let available = self.available_versions();
        sdks.iter()
            .map(|sdk| (sdk.clone(), self.check_update(&sdk.version, &available, host)))
            .collect()
    }

    fn exists(&self, uri: &str) -> bool {
        match self.session.head(uri).send() {
            Ok(response) => response.is_success(),
            Err(e) => {
                log::debug!("HEAD {uri} failed: {e}");
                false
            }
        }
    }
}
