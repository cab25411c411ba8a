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

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Folder name installers use for a private JRE nested inside a JDK.
pub const SECONDARY_RUNTIME_MARKER: &str = "jre";

const BIN_FOLDER: &str = "bin";

/// Find launcher executables beneath `roots`.
///
/// Unreadable entries and missing roots are skipped. Launchers with a
/// [`SECONDARY_RUNTIME_MARKER`] segment below their search root are dropped;
/// a root that is itself a `jre` folder is still walked.
pub fn locate(roots: &[PathBuf], launcher_name: &str) -> Vec<PathBuf> {
    let mut found = BTreeSet::new();

    for root in roots {
        if !root.exists() {
            log::debug!("Search path {} does not exist", root.display());
            continue;
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                !is_secondary_runtime(relative)
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::trace!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            if is_launcher(&entry, launcher_name) && is_readable(entry.path()) {
                found.insert(entry.into_path());
            }
        }
    }

    log::debug!("Located {} launcher candidates", found.len());
    found.into_iter().collect()
}

fn is_launcher(entry: &DirEntry, launcher_name: &str) -> bool {
    entry.file_type().is_file()
        && entry
            .file_name()
            .to_string_lossy()
            .eq_ignore_ascii_case(launcher_name)
}

fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

/// True when any segment of `path` is the secondary JRE marker.
pub fn is_secondary_runtime(path: &Path) -> bool {
    path.components().any(|component| match component {
        Component::Normal(name) => name
            .to_string_lossy()
            .eq_ignore_ascii_case(SECONDARY_RUNTIME_MARKER),
        _ => false,
    })
}

/// Install root of a launcher: the parent of its `bin` folder.
pub fn install_root(launcher: &Path) -> PathBuf {
    match launcher.parent() {
        Some(bin) if bin.file_name().is_some_and(|name| name == BIN_FOLDER) => bin
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| bin.to_path_buf()),
        Some(parent) => parent.to_path_buf(),
        None => launcher.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_locate_finds_launchers() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("jdk-17/bin/java"));
        touch(&root.join("jdk-21/bin/java"));
        touch(&root.join("jdk-21/bin/javac"));

        let found = locate(&[root.to_path_buf()], "java");
        assert_eq!(found.len(), 2);
        assert!(found.contains(&root.join("jdk-17/bin/java")));
        assert!(found.contains(&root.join("jdk-21/bin/java")));
    }

    #[test]
    fn test_locate_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("jdk/bin/JAVA"));

        let found = locate(&[temp_dir.path().to_path_buf()], "java");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_locate_excludes_secondary_jre() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("jdk8/bin/java"));
        touch(&root.join("jdk8/jre/bin/java"));
        touch(&root.join("jdk8/JRE/bin/java"));

        let found = locate(&[root.to_path_buf()], "java");
        assert_eq!(found, vec![root.join("jdk8/bin/java")]);
    }

    #[test]
    fn test_locate_walks_root_named_jre() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("jre");
        touch(&root.join("bin/java"));
        touch(&root.join("lib/jre/bin/java"));

        let found = locate(std::slice::from_ref(&root), "java");
        assert_eq!(found, vec![root.join("bin/java")]);
    }

    #[test]
    fn test_locate_deduplicates_overlapping_roots() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("jdk/bin/java"));

        let found = locate(&[root.to_path_buf(), root.to_path_buf()], "java");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_locate_missing_and_empty_roots() {
        assert!(locate(&[], "java").is_empty());
        assert!(locate(&[PathBuf::from("/nonexistent/jdkwatch/root")], "java").is_empty());

        let temp_dir = TempDir::new().unwrap();
        assert!(locate(&[temp_dir.path().to_path_buf()], "java").is_empty());
    }

    #[test]
    fn test_directories_named_java_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("share/java")).unwrap();

        assert!(locate(&[temp_dir.path().to_path_buf()], "java").is_empty());
    }

    #[test]
    fn test_install_root() {
        assert_eq!(
            install_root(Path::new("/usr/lib/jvm/jdk-17/bin/java")),
            PathBuf::from("/usr/lib/jvm/jdk-17")
        );
        assert_eq!(install_root(Path::new("/opt/java")), PathBuf::from("/opt"));
    }

    #[test]
    fn test_is_secondary_runtime() {
        assert!(is_secondary_runtime(Path::new("/opt/jdk8/jre/bin/java")));
        assert!(!is_secondary_runtime(Path::new("/opt/jre-like/bin/java")));
        assert!(!is_secondary_runtime(Path::new("/opt/openjdk/bin/java")));
    }
}
