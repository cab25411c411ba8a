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

use crate::api::{ApiClient, Package, PackageQuery};
use crate::config::WatchConfig;
use crate::error::Result;
use crate::models::distribution::{Distribution, Feature};
use crate::models::platform::{Architecture, OperatingSystem};
use crate::version::Version;

const LATEST_AVAILABLE: &str = "available";

/// What the resolver asks the catalog for one installed distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    /// Catalog vendor id; `None` asks every vendor.
    pub distribution: Option<String>,
    pub version: Version,
    pub operating_system: Option<OperatingSystem>,
    pub architecture: Option<Architecture>,
    pub javafx_bundled: bool,
    pub feature: Feature,
}

impl UpdateQuery {
    pub fn for_distribution(
        distribution: &Distribution,
        host_os: Option<OperatingSystem>,
        host_arch: Option<Architecture>,
    ) -> Self {
        Self {
            distribution: Some(distribution.api_string.clone()).filter(|api| !api.is_empty()),
            version: distribution.version.clone(),
            operating_system: host_os,
            architecture: distribution.architecture.or(host_arch),
            javafx_bundled: distribution.javafx_bundled,
            feature: distribution.feature,
        }
    }

    /// Same version line, any vendor, no feature restriction.
    pub fn vendor_agnostic(&self) -> Self {
        Self {
            distribution: None,
            feature: Feature::None,
            ..self.clone()
        }
    }
}

/// Source of packages newer than an installed distribution.
pub trait PackageCatalog: Send + Sync {
    /// Packages matching `query` whose version is newer than `query.version`.
    fn find_updates(&self, query: &UpdateQuery) -> Result<Vec<Package>>;
}

/// `PackageCatalog` backed by the foojay Disco API.
pub struct FoojayCatalog {
    client: ApiClient,
}

impl FoojayCatalog {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &WatchConfig) -> Self {
        Self::new(
            ApiClient::new()
                .with_base_url(config.api.base_url.clone())
                .with_timeout(config.api_timeout())
                .with_max_attempts(config.api.max_attempts),
        )
    }

    fn package_query(query: &UpdateQuery) -> PackageQuery {
        let mut package_query = PackageQuery::new()
            .jdk_version(query.version.major())
            .javafx_bundled(query.javafx_bundled)
            .latest(LATEST_AVAILABLE);

        if let Some(ref distribution) = query.distribution {
            package_query = package_query.distribution(distribution.as_str());
        }
        if let Some(os) = query.operating_system {
            package_query = package_query.operating_system(os.catalog_token());
        }
        if let Some(arch) = query.architecture {
            package_query = package_query.architecture(arch.to_string());
        }
        if query.feature != Feature::None {
            package_query = package_query.feature(query.feature.api_string());
        }
        package_query
    }
}

impl PackageCatalog for FoojayCatalog {
    fn find_updates(&self, query: &UpdateQuery) -> Result<Vec<Package>> {
        let packages = self.client.get_packages(&Self::package_query(query))?;
        Ok(newer_than(packages, &query.version))
    }
}

/// Keep packages whose `java_version` parses and is newer than `installed`.
pub fn newer_than(packages: Vec<Package>, installed: &Version) -> Vec<Package> {
    packages
        .into_iter()
        .filter(|package| match Version::parse_java(&package.java_version) {
            Ok(version) => version.is_newer_than(installed),
            Err(e) => {
                log::debug!("Skipping package {}: {e}", package.filename);
                false
            }
        })
        .collect()
}
