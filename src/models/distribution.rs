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

use crate::models::platform::{Architecture, OperatingSystem};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Display name used when no classification rule matched.
pub const UNKNOWN_BUILD_NAME: &str = "Unknown build of OpenJDK";

/// Catalog identifier substituted for unidentified builds when they are shown.
pub const GENERIC_OPENJDK_API: &str = "oracle_open_jdk";

/// Preview feature a build advertises on its VM banner line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    #[default]
    None,
    Loom,
    Panama,
    Metropolis,
    Valhalla,
    Lanai,
    KonaFiber,
    Crac,
}

impl Feature {
    const ALL: [Feature; 7] = [
        Feature::Loom,
        Feature::Panama,
        Feature::Metropolis,
        Feature::Valhalla,
        Feature::Lanai,
        Feature::KonaFiber,
        Feature::Crac,
    ];

    /// Map a configured keyword to a feature. Unknown keywords are `None`.
    pub fn from_text(text: &str) -> Feature {
        let text = text.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|feature| feature.api_string() == text)
            .unwrap_or(Feature::None)
    }

    /// Catalog token; empty for [`Feature::None`].
    pub fn api_string(&self) -> &'static str {
        match self {
            Feature::None => "",
            Feature::Loom => "loom",
            Feature::Panama => "panama",
            Feature::Metropolis => "metropolis",
            Feature::Valhalla => "valhalla",
            Feature::Lanai => "lanai",
            Feature::KonaFiber => "kona_fiber",
            Feature::Crac => "crac",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::None => write!(f, "none"),
            other => write!(f, "{}", other.api_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildScope {
    #[default]
    BuildOfOpenJdk,
    BuildOfGraalVm,
}

impl BuildScope {
    pub fn api_string(&self) -> &'static str {
        match self {
            BuildScope::BuildOfOpenJdk => "build_of_openjdk",
            BuildScope::BuildOfGraalVm => "build_of_graalvm",
        }
    }
}

/// One detected runtime installation.
///
/// Equality and hashing only consider `api_string`, `version`,
/// `architecture`, `javafx_bundled` and `install_path`; the remaining fields
/// are descriptive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Distribution {
    pub name: String,
    pub api_string: String,
    pub version: Version,
    pub major_version: u32,
    pub operating_system: Option<OperatingSystem>,
    pub architecture: Option<Architecture>,
    pub javafx_bundled: bool,
    pub install_path: PathBuf,
    pub feature: Feature,
    pub build_scope: BuildScope,
    pub managed_by_version_manager: bool,
    pub modules: Vec<String>,
    pub in_use: bool,
    pub parent_folder_name: String,
    /// False when no vendor rule matched.
    pub identified: bool,
}

impl Distribution {
    fn identity(&self) -> (&str, &Version, Option<Architecture>, bool, &Path) {
        (
            &self.api_string,
            &self.version,
            self.architecture,
            self.javafx_bundled,
            &self.install_path,
        )
    }

    pub fn is_graalvm(&self) -> bool {
        self.build_scope == BuildScope::BuildOfGraalVm
    }
}

impl PartialEq for Distribution {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Distribution {}

impl Hash for Distribution {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// Folder name shown next to a distribution.
///
/// macOS bundles keep the JDK under `<name>.jdk/Contents/Home`; those two
/// trailing segments are skipped so the bundle name is shown instead.
pub fn parent_folder_name(install_path: &Path) -> String {
    install_path
        .ancestors()
        .filter_map(|p| p.file_name())
        .map(|name| name.to_string_lossy())
        .find(|name| name != "Home" && name != "Contents")
        .map(|name| name.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample(install_path: &str) -> Distribution {
        Distribution {
            name: "Zulu".to_string(),
            api_string: "zulu".to_string(),
            version: Version::parse_java("17.0.2").unwrap(),
            major_version: 17,
            operating_system: Some(OperatingSystem::Linux),
            architecture: Some(Architecture::X64),
            javafx_bundled: false,
            install_path: PathBuf::from(install_path),
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
    fn test_identity_ignores_descriptive_fields() {
        let a = sample("/usr/lib/jvm/zulu-17");
        let mut b = a.clone();
        b.name = "Other".to_string();
        b.in_use = true;
        b.modules = vec!["java.base".to_string()];
        b.feature = Feature::Loom;
        assert_eq!(a, b);

        let mut set = HashSet::new();
        assert!(set.insert(a));
        assert!(!set.insert(b));
    }

    #[test]
    fn test_identity_distinguishes_key_fields() {
        let a = sample("/usr/lib/jvm/zulu-17");
        assert_ne!(a, sample("/opt/zulu-17"));

        let mut fx = a.clone();
        fx.javafx_bundled = true;
        assert_ne!(a, fx);

        let mut arm = a.clone();
        arm.architecture = Some(Architecture::Aarch64);
        assert_ne!(a, arm);
    }

    #[test]
    fn test_feature_from_text() {
        assert_eq!(Feature::from_text("loom"), Feature::Loom);
        assert_eq!(Feature::from_text(" KONA_FIBER "), Feature::KonaFiber);
        assert_eq!(Feature::from_text("unknown"), Feature::None);
        assert_eq!(Feature::None.to_string(), "none");
        assert_eq!(Feature::Crac.api_string(), "crac");
    }

    #[test]
    fn test_parent_folder_name() {
        assert_eq!(
            parent_folder_name(Path::new("/usr/lib/jvm/java-17-openjdk-amd64")),
            "java-17-openjdk-amd64"
        );
        assert_eq!(
            parent_folder_name(Path::new(
                "/Library/Java/JavaVirtualMachines/zulu-17.jdk/Contents/Home"
            )),
            "zulu-17.jdk"
        );
        assert_eq!(parent_folder_name(Path::new("/")), "");
    }
}
