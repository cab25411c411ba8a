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

use jdkwatch::classifier::ClassifierContext;
use jdkwatch::models::platform::{Architecture, OperatingMode, OperatingSystem, SysInfo};
use jdkwatch::scan::ScanOptions;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ZULU_17_BANNER: &[&str] = &[
    "openjdk version \"17.0.8\" 2023-07-18 LTS",
    "OpenJDK Runtime Environment Zulu17.44+15-CA (build 17.0.8+7-LTS)",
    "OpenJDK 64-Bit Server VM Zulu17.44+15-CA (build 17.0.8+7-LTS, mixed mode, sharing)",
];

pub const PLAIN_21_BANNER: &[&str] = &[
    "openjdk version \"21.0.4\" 2024-07-16 LTS",
    "OpenJDK Runtime Environment (build 21.0.4+7-LTS)",
    "OpenJDK 64-Bit Server VM (build 21.0.4+7-LTS, mixed mode, sharing)",
];

pub const CORRETTO_11_BANNER: &[&str] = &[
    "openjdk version \"11.0.22\" 2024-01-16 LTS",
    "OpenJDK Runtime Environment Corretto-11.0.22.7.1 (build 11.0.22+7-LTS)",
    "OpenJDK 64-Bit Server VM Corretto-11.0.22.7.1 (build 11.0.22+7-LTS, mixed mode)",
];

pub fn linux_x64() -> SysInfo {
    SysInfo {
        operating_system: Some(OperatingSystem::Linux),
        architecture: Some(Architecture::X64),
        operating_mode: OperatingMode::Native,
    }
}

pub fn scan_options(timeout: Duration) -> ScanOptions {
    ScanOptions {
        workers: 4,
        timeout,
        launcher_name: "java".to_string(),
        classifier: ClassifierContext {
            host: linux_x64(),
            feature_keywords: vec!["loom".to_string(), "crac".to_string()],
            show_unknown_builds: false,
        },
        java_home: None,
        version_manager_roots: Vec::new(),
    }
}

/// Create `<parent>/<folder>/bin/java` printing `banner` on stderr like a real launcher.
#[cfg(unix)]
pub fn write_fake_jdk(parent: &Path, folder: &str, banner: &[&str]) -> PathBuf {
    let script = format!(
        "#!/bin/sh\ncat >&2 <<'BANNER'\n{}\nBANNER\n",
        banner.join("\n")
    );
    write_launcher(&parent.join(folder), &script)
}

/// A launcher that never answers.
#[cfg(unix)]
pub fn write_hanging_jdk(parent: &Path, folder: &str) -> PathBuf {
    write_launcher(&parent.join(folder), "#!/bin/sh\nexec sleep 30\n")
}

#[cfg(unix)]
fn write_launcher(root: &Path, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = root.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let launcher = bin.join("java");
    fs::write(&launcher, script).unwrap();
    fs::set_permissions(&launcher, fs::Permissions::from_mode(0o755)).unwrap();
    root.to_path_buf()
}

pub fn write_release(root: &Path, contents: &str) {
    fs::write(root.join("release"), contents).unwrap();
}
