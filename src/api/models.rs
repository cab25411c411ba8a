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

use serde::{Deserialize, Serialize};

/// One downloadable package as listed by the Disco API `packages` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub archive_type: String,
    pub distribution: String,
    pub major_version: u32,
    pub java_version: String,
    #[serde(default)]
    pub distribution_version: String,
    pub operating_system: String,
    pub architecture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib_c_type: Option<String>,
    #[serde(default)]
    pub javafx_bundled: bool,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default)]
    pub feature: Vec<String>,
    #[serde(default)]
    pub size: u64,
}

impl Package {
    pub fn is_musl(&self) -> bool {
        self.lib_c_type
            .as_deref()
            .is_some_and(|libc| libc.eq_ignore_ascii_case("musl"))
    }

    pub fn download_uri(&self) -> Option<&str> {
        self.links
            .as_ref()
            .map(|links| links.pkg_download_redirect.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Links {
    pub pkg_download_redirect: String,
    #[serde(default)]
    pub pkg_info_uri: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
}
