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

use crate::models::distribution::Distribution;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// De-duplicating set of distributions found during one scan.
#[derive(Debug, Default)]
pub struct DistributionRegistry {
    distributions: Mutex<HashSet<Distribution>>,
}

impl DistributionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `distribution`; returns `false` if an equal entry already exists.
    pub fn add(&self, distribution: Distribution) -> bool {
        self.lock().insert(distribution)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Distribution> {
        self.lock().iter().cloned().collect()
    }

    /// Entries sorted by name, then install path.
    pub fn sorted(&self) -> Vec<Distribution> {
        let mut distributions = self.snapshot();
        distributions.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.install_path.cmp(&b.install_path))
        });
        distributions
    }

    // Inserts are whole values, so a poisoned set is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashSet<Distribution>> {
        self.distributions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::distribution::{BuildScope, Feature};
    use crate::models::platform::Architecture;
    use crate::version::Version;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;

    fn distribution(name: &str, path: &str) -> Distribution {
        Distribution {
            name: name.to_string(),
            api_string: name.to_lowercase(),
            version: Version::parse_java("21.0.1").unwrap(),
            major_version: 21,
            operating_system: None,
            architecture: Some(Architecture::X64),
            javafx_bundled: false,
            install_path: PathBuf::from(path),
            feature: Feature::None,
            build_scope: BuildScope::BuildOfOpenJdk,
            managed_by_version_manager: false,
            modules: Vec::new(),
            in_use: false,
            parent_folder_name: String::new(),
            identified: true,
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let registry = DistributionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.add(distribution("Zulu", "/opt/zulu")));
        assert!(!registry.add(distribution("Zulu", "/opt/zulu")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sorted() {
        let registry = DistributionRegistry::new();
        registry.add(distribution("Zulu", "/opt/zulu"));
        registry.add(distribution("Corretto", "/opt/corretto"));
        registry.add(distribution("Adopt OpenJDK", "/opt/aoj"));

        let names: Vec<_> = registry
            .sorted()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Adopt OpenJDK", "Corretto", "Zulu"]);
    }

    #[test]
    fn test_concurrent_inserts() {
        let registry = Arc::new(DistributionRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.add(distribution("Temurin", &format!("/opt/jdk-{}", i % 4)));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.snapshot().len(), 4);
    }
}
