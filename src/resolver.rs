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

//! Matches registered distributions against the package catalog.

use crate::api::Package;
use crate::catalog::{PackageCatalog, UpdateQuery};
use crate::models::distribution::Distribution;
use crate::models::platform::{OperatingSystem, SysInfo};
use serde::Serialize;
use std::thread;

/// Vendor families published only under their own name; an empty answer
/// for them is final.
const STANDALONE_PREFIX: &str = "graal";
const STANDALONE_APIS: &[&str] = &["mandrel", "liberica_native"];

const DEFAULT_PARALLEL_REQUESTS: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct DistributionUpdates {
    pub distribution: Distribution,
    pub packages: Vec<Package>,
}

/// Result of one resolution pass, ordered by distribution name.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AvailableUpdates {
    entries: Vec<DistributionUpdates>,
}

impl AvailableUpdates {
    pub fn iter(&self) -> impl Iterator<Item = &DistributionUpdates> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, distribution: &Distribution) -> Option<&[Package]> {
        self.entries
            .iter()
            .find(|entry| &entry.distribution == distribution)
            .map(|entry| entry.packages.as_slice())
    }

    /// Entries with at least one newer package.
    pub fn with_updates(&self) -> impl Iterator<Item = &DistributionUpdates> {
        self.entries.iter().filter(|entry| !entry.packages.is_empty())
    }

    pub fn into_entries(self) -> Vec<DistributionUpdates> {
        self.entries
    }
}

pub struct UpdateResolver {
    catalog: Box<dyn PackageCatalog>,
    host: SysInfo,
    show_unknown_builds: bool,
    parallel_requests: usize,
}

impl UpdateResolver {
    pub fn new(catalog: Box<dyn PackageCatalog>, host: SysInfo) -> Self {
        Self {
            catalog,
            host,
            show_unknown_builds: false,
            parallel_requests: DEFAULT_PARALLEL_REQUESTS,
        }
    }

    pub fn with_show_unknown_builds(mut self, show_unknown_builds: bool) -> Self {
        self.show_unknown_builds = show_unknown_builds;
        self
    }

    pub fn with_parallel_requests(mut self, parallel_requests: usize) -> Self {
        self.parallel_requests = parallel_requests.max(1);
        self
    }

    /// Look up newer packages for every eligible distribution.
    ///
    /// A failed or empty lookup yields an empty package list for that
    /// distribution only. Unidentified builds are skipped unless unknown
    /// builds are shown.
    pub fn resolve(&self, distributions: &[Distribution]) -> AvailableUpdates {
        let eligible: Vec<&Distribution> = distributions
            .iter()
            .filter(|d| self.show_unknown_builds || d.identified)
            .collect();

        let mut entries = Vec::with_capacity(eligible.len());
        for chunk in eligible.chunks(self.parallel_requests) {
            thread::scope(|scope| {
                let handles: Vec<_> = chunk
                    .iter()
                    .map(|distribution| scope.spawn(move || self.resolve_one(distribution)))
                    .collect();

                for (handle, distribution) in handles.into_iter().zip(chunk) {
                    let packages = handle.join().unwrap_or_else(|_| {
                        log::warn!("Update lookup for {} panicked", distribution.name);
                        Vec::new()
                    });
                    entries.push(DistributionUpdates {
                        distribution: (*distribution).clone(),
                        packages,
                    });
                }
            });
        }

        entries.sort_by(|a, b| a.distribution.name.cmp(&b.distribution.name));
        AvailableUpdates { entries }
    }

    fn resolve_one(&self, distribution: &Distribution) -> Vec<Package> {
        let query = UpdateQuery::for_distribution(
            distribution,
            self.host.operating_system,
            self.host.architecture,
        );

        let packages = self.filter_for_host(self.query(&query));
        if !packages.is_empty()
            || query.distribution.is_none()
            || is_standalone(&distribution.api_string)
        {
            return packages;
        }

        log::debug!(
            "No {} update for {}, asking all vendors",
            distribution.api_string,
            distribution.version
        );
        self.filter_for_host(self.query(&query.vendor_agnostic()))
    }

    fn query(&self, query: &UpdateQuery) -> Vec<Package> {
        match self.catalog.find_updates(query) {
            Ok(packages) => packages,
            Err(e) => {
                log::warn!(
                    "Update lookup failed for {}: {e}",
                    query.distribution.as_deref().unwrap_or("any vendor")
                );
                Vec::new()
            }
        }
    }

    fn filter_for_host(&self, packages: Vec<Package>) -> Vec<Package> {
        let os = self.host.operating_system;
        let arch = self
            .host
            .architecture
            .filter(|arch| !arch.synonyms().is_empty());

        packages
            .into_iter()
            .filter(|package| match os {
                Some(OperatingSystem::AlpineLinux) => package.is_musl(),
                Some(OperatingSystem::Linux) => !package.is_musl(),
                _ => true,
            })
            .filter(|package| arch.is_none_or(|arch| arch.matches_token(&package.architecture)))
            .collect()
    }
}

fn is_standalone(api_string: &str) -> bool {
    api_string.starts_with(STANDALONE_PREFIX) || STANDALONE_APIS.contains(&api_string)
}
