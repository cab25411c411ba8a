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

/// Filters for the `packages` endpoint. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageQuery {
    pub distribution: Option<String>,
    pub jdk_version: Option<u32>,
    pub operating_system: Option<String>,
    pub architecture: Option<String>,
    pub archive_types: Option<Vec<String>>,
    pub javafx_bundled: Option<bool>,
    pub feature: Option<String>,
    pub latest: Option<String>,
}

impl PackageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distribution(mut self, distribution: impl Into<String>) -> Self {
        self.distribution = Some(distribution.into());
        self
    }

    pub fn jdk_version(mut self, jdk_version: u32) -> Self {
        self.jdk_version = Some(jdk_version);
        self
    }

    pub fn operating_system(mut self, operating_system: impl Into<String>) -> Self {
        self.operating_system = Some(operating_system.into());
        self
    }

    pub fn architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = Some(architecture.into());
        self
    }

    pub fn archive_types(mut self, archive_types: Vec<String>) -> Self {
        self.archive_types = Some(archive_types);
        self
    }

    pub fn javafx_bundled(mut self, javafx_bundled: bool) -> Self {
        self.javafx_bundled = Some(javafx_bundled);
        self
    }

    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    pub fn latest(mut self, latest: impl Into<String>) -> Self {
        self.latest = Some(latest.into());
        self
    }

    /// Query parameters in the order they are sent.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref distribution) = self.distribution {
            params.push(("distribution", distribution.clone()));
        }
        if let Some(jdk_version) = self.jdk_version {
            params.push(("jdk_version", jdk_version.to_string()));
        }
        if let Some(ref operating_system) = self.operating_system {
            params.push(("operating_system", operating_system.clone()));
        }
        if let Some(ref architecture) = self.architecture {
            params.push(("architecture", architecture.clone()));
        }
        if let Some(ref archive_types) = self.archive_types {
            for archive_type in archive_types {
                params.push(("archive_type", archive_type.clone()));
            }
        }
        if let Some(javafx_bundled) = self.javafx_bundled {
            params.push(("javafx_bundled", javafx_bundled.to_string()));
        }
        if let Some(ref feature) = self.feature {
            params.push(("feature", feature.clone()));
        }
        if let Some(ref latest) = self.latest {
            params.push(("latest", latest.clone()));
        }
        params
    }
}
