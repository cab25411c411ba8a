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

//! One scan cycle: locate launchers, query them on a bounded worker pool,
//! classify the answers and collect them in a fresh registry.

pub mod introspect;
pub mod locator;
pub mod metadata;

use crate::classifier::{ClassifierContext, classify};
use crate::config::WatchConfig;
use crate::models::distribution::Distribution;
use crate::platform;
use crate::registry::DistributionRegistry;
use introspect::{BannerLines, spawn_version_query};
use metadata::InstallMetadata;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub workers: usize,
    /// Budget for the whole cycle; introspections still running afterwards are abandoned.
    pub timeout: Duration,
    pub launcher_name: String,
    pub classifier: ClassifierContext,
    pub java_home: Option<String>,
    pub version_manager_roots: Vec<PathBuf>,
}

impl ScanOptions {
    pub fn from_config(config: &WatchConfig) -> Self {
        Self {
            workers: config.scan.workers,
            timeout: config.scan_timeout(),
            launcher_name: platform::launcher_name(),
            classifier: ClassifierContext {
                host: platform::sys_info(),
                feature_keywords: config.feature_keywords(),
                show_unknown_builds: config.show_unknown_builds,
            },
            java_home: platform::current_java_home(),
            version_manager_roots: platform::version_manager_roots(),
        }
    }
}

pub struct Scanner {
    options: Arc<ScanOptions>,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    /// Run a scan cycle over `roots` and return what was found, sorted by name.
    ///
    /// Never fails: unreadable paths, launchers that cannot be started and
    /// launchers that do not answer before the deadline are left out.
    pub fn scan(&self, roots: &[PathBuf]) -> Vec<Distribution> {
        let candidates = locator::locate(roots, &self.options.launcher_name);
        self.scan_candidates(candidates)
    }

    pub fn scan_candidates(&self, candidates: Vec<PathBuf>) -> Vec<Distribution> {
        let registry = Arc::new(DistributionRegistry::new());
        if candidates.is_empty() {
            return Vec::new();
        }

        let deadline = Instant::now() + self.options.timeout;
        let total = candidates.len();
        let worker_count = self.options.workers.clamp(1, total);
        let queue = Arc::new(Mutex::new(VecDeque::from(candidates)));
        let (done_tx, done_rx) = mpsc::channel();

        log::debug!("Scanning {total} candidates with {worker_count} workers");

        for _ in 0..worker_count {
            let queue = Arc::clone(&queue);
            let registry = Arc::clone(&registry);
            let options = Arc::clone(&self.options);
            let done = WorkerDone(done_tx.clone());

            thread::spawn(move || {
                let _done = done;
                while let Some(candidate) = next_candidate(&queue) {
                    if Instant::now() >= deadline {
                        log::debug!("Scan deadline reached, skipping {}", candidate.display());
                        continue;
                    }
                    if let Some(distribution) = inspect(&candidate, &options, deadline) {
                        registry.add(distribution);
                    }
                }
            });
        }
        drop(done_tx);

        let mut finished = 0;
        while finished < worker_count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match done_rx.recv_timeout(remaining) {
                Ok(()) => finished += 1,
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!(
                        "Scan timed out after {:?}; {} of {worker_count} workers still busy",
                        self.options.timeout,
                        worker_count - finished
                    );
                    break;
                }
            }
        }

        let distributions = registry.sorted();
        log::info!(
            "Found {} distributions among {total} candidates",
            distributions.len()
        );
        distributions
    }
}

/// Signals the scan thread when a worker exits, including by panic.
struct WorkerDone(Sender<()>);

impl Drop for WorkerDone {
    fn drop(&mut self) {
        let _ = self.0.send(());
    }
}

fn next_candidate(queue: &Mutex<VecDeque<PathBuf>>) -> Option<PathBuf> {
    queue
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .pop_front()
}

fn inspect(launcher: &Path, options: &ScanOptions, deadline: Instant) -> Option<Distribution> {
    let task = match spawn_version_query(launcher) {
        Ok(task) => task,
        Err(e) => {
            log::debug!("Dropping candidate: {e}");
            return None;
        }
    };

    let banner = task.wait_until(deadline)?;
    log::trace!("{}: {banner}", launcher.display());

    let install_root = locator::install_root(launcher);
    let metadata = InstallMetadata::collect(&install_root);
    let mut distribution = classify(
        &BannerLines::parse(&banner),
        &metadata,
        &install_root,
        &options.classifier,
    );

    distribution.in_use = options
        .java_home
        .as_deref()
        .is_some_and(|java_home| same_path(&install_root, Path::new(java_home)));
    distribution.managed_by_version_manager =
        is_version_managed(&install_root, &options.version_manager_roots);

    Some(distribution)
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.components().eq(b.components()),
    }
}

fn is_version_managed(install_root: &Path, roots: &[PathBuf]) -> bool {
    let canonical = fs::canonicalize(install_root).ok();
    roots.iter().any(|root| {
        install_root.starts_with(root)
            || canonical.as_deref().is_some_and(|path| {
                fs::canonicalize(root).is_ok_and(|root| path.starts_with(root))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::platform::{Architecture, OperatingMode, OperatingSystem, SysInfo};

    pub(crate) fn options(timeout: Duration) -> ScanOptions {
        ScanOptions {
            workers: 2,
            timeout,
            launcher_name: "java".to_string(),
            classifier: ClassifierContext {
                host: SysInfo {
                    operating_system: Some(OperatingSystem::Linux),
                    architecture: Some(Architecture::X64),
                    operating_mode: OperatingMode::Native,
                },
                feature_keywords: Vec::new(),
                show_unknown_builds: false,
            },
            java_home: None,
            version_manager_roots: Vec::new(),
        }
    }

    #[test]
    fn test_scan_without_candidates() {
        let scanner = Scanner::new(options(Duration::from_secs(1)));
        assert!(scanner.scan(&[]).is_empty());
        assert!(scanner.scan(&[PathBuf::from("/nonexistent/jdkwatch")]).is_empty());
    }

    #[test]
    fn test_spawn_failures_are_dropped() {
        let scanner = Scanner::new(options(Duration::from_secs(1)));
        let found = scanner.scan_candidates(vec![
            PathBuf::from("/nonexistent/a/bin/java"),
            PathBuf::from("/nonexistent/b/bin/java"),
        ]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_same_path() {
        assert!(same_path(Path::new("/opt/jdk/"), Path::new("/opt/jdk")));
        assert!(!same_path(Path::new("/opt/jdk"), Path::new("/opt/jdk-17")));
    }

    #[test]
    fn test_is_version_managed() {
        let roots = vec![PathBuf::from("/home/dev/.sdkman/candidates/java")];
        assert!(is_version_managed(
            Path::new("/home/dev/.sdkman/candidates/java/17.0.2-tem"),
            &roots
        ));
        assert!(!is_version_managed(Path::new("/usr/lib/jvm/jdk-17"), &roots));
    }
}
