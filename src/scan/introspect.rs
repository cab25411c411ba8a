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

use crate::error::{JdkWatchError, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Joins banner lines into the single string handed to the classifier.
pub const BANNER_DELIMITER: char = '|';

const VERSION_FLAG: &str = "-version";
/// Prefix of the notice launchers print when `JAVA_TOOL_OPTIONS` and friends are set.
const PICKED_UP_NOTICE: &str = "Picked up ";
const REAP_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A running `java -version` query.
///
/// Output is captured by one reader thread per stream; lines from stdout and
/// stderr are merged in arrival order.
pub struct IntrospectionTask {
    path: PathBuf,
    child: Child,
    lines: Receiver<String>,
}

/// Spawn `<launcher> -version` and return as soon as the process started.
pub fn spawn_version_query(launcher: &Path) -> Result<IntrospectionTask> {
    let mut child = Command::new(launcher)
        .arg(VERSION_FLAG)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| JdkWatchError::ProcessSpawn {
            path: launcher.display().to_string(),
            reason: e.to_string(),
        })?;

    let (tx, rx) = mpsc::channel();
    if let Some(stdout) = child.stdout.take() {
        forward_lines(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        forward_lines(stderr, tx);
    }

    Ok(IntrospectionTask {
        path: launcher.to_path_buf(),
        child,
        lines: rx,
    })
}

fn forward_lines<R: Read + Send + 'static>(stream: R, tx: Sender<String>) {
    thread::spawn(move || {
        for line in BufReader::new(stream).lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
}

impl IntrospectionTask {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for the banner until `deadline`.
    ///
    /// Returns the non-empty output lines joined with [`BANNER_DELIMITER`],
    /// or `None` when the deadline passed (the process is killed) or nothing
    /// was printed.
    pub fn wait_until(mut self, deadline: Instant) -> Option<String> {
        let mut lines = Vec::new();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => lines.push(line),
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    log::debug!("Version query timed out for {}", self.path.display());
                    self.kill();
                    return None;
                }
            }
        }

        if !self.reap(deadline) {
            log::debug!(
                "{} closed its output but did not exit in time",
                self.path.display()
            );
            self.kill();
        }

        let lines: Vec<&str> = lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            log::debug!("No version output from {}", self.path.display());
            return None;
        }

        let mut banner = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                banner.push(BANNER_DELIMITER);
            }
            banner.push_str(line);
        }
        Some(banner)
    }

    fn reap(&mut self, deadline: Instant) -> bool {
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    log::trace!("{} exited with {status}", self.path.display());
                    return true;
                }
                Ok(None) if Instant::now() < deadline => thread::sleep(REAP_POLL_INTERVAL),
                Ok(None) => return false,
                Err(e) => {
                    log::debug!("Failed to wait for {}: {e}", self.path.display());
                    return false;
                }
            }
        }
    }

    fn kill(&mut self) {
        if let Err(e) = self.child.kill() {
            log::trace!("Kill failed for {}: {e}", self.path.display());
        }
        let _ = self.child.wait();
    }
}

impl Drop for IntrospectionTask {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            self.kill();
        }
    }
}

/// Banner split back into its lines, without `Picked up ...` notices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerLines {
    lines: Vec<String>,
}

impl BannerLines {
    pub fn parse(banner: &str) -> Self {
        Self {
            lines: banner
                .split(BANNER_DELIMITER)
                .map(str::trim)
                .filter(|line| !line.starts_with(PICKED_UP_NOTICE))
                .map(str::to_string)
                .collect(),
        }
    }

    /// First line: `openjdk version "17.0.2" 2022-01-18`.
    pub fn banner(&self) -> &str {
        self.line(0)
    }

    /// Second line: runtime environment and build details.
    pub fn detail(&self) -> &str {
        self.line(1)
    }

    /// Third line: VM name, where preview features are advertised.
    pub fn vm(&self) -> &str {
        self.line(2)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line(&self, index: usize) -> &str {
        self.lines.get(index).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_lines() {
        let lines = BannerLines::parse(
            "openjdk version \"17.0.2\" 2022-01-18|OpenJDK Runtime Environment (build 17.0.2+8)|OpenJDK 64-Bit Server VM (build 17.0.2+8, mixed mode)",
        );
        assert_eq!(lines.len(), 3);
        assert!(lines.banner().starts_with("openjdk version"));
        assert!(lines.detail().contains("Runtime Environment"));
        assert!(lines.vm().contains("Server VM"));
    }

    #[test]
    fn test_banner_lines_missing_entries() {
        let lines = BannerLines::parse("java version \"1.8.0_312\"");
        assert_eq!(lines.detail(), "");
        assert_eq!(lines.vm(), "");
    }

    #[test]
    fn test_banner_lines_skip_tool_options_notice() {
        let lines = BannerLines::parse(
            "Picked up JAVA_TOOL_OPTIONS: -Xmx1g|openjdk version \"11.0.14\" 2022-01-18|OpenJDK Runtime Environment (build 11.0.14+9)",
        );
        assert_eq!(lines.len(), 2);
        assert!(lines.banner().starts_with("openjdk version"));
    }

    #[test]
    fn test_spawn_failure() {
        let result = spawn_version_query(Path::new("/nonexistent/jdkwatch/bin/java"));
        assert!(matches!(result, Err(JdkWatchError::ProcessSpawn { .. })));
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;
        use std::fs;
        use serial_test::serial;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("java");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        #[serial]
        fn test_captures_stderr_banner() {
            let temp_dir = TempDir::new().unwrap();
            let java = script(
                temp_dir.path(),
                "echo 'openjdk version \"21.0.1\" 2023-10-17' >&2\necho 'OpenJDK Runtime Environment Temurin-21.0.1+12 (build 21.0.1+12-LTS)' >&2",
            );

            let task = spawn_version_query(&java).unwrap();
            let banner = task
                .wait_until(Instant::now() + Duration::from_secs(5))
                .unwrap();
            assert_eq!(
                banner,
                "openjdk version \"21.0.1\" 2023-10-17|OpenJDK Runtime Environment Temurin-21.0.1+12 (build 21.0.1+12-LTS)"
            );
        }

        #[test]
        #[serial]
        fn test_timeout_returns_none() {
            let temp_dir = TempDir::new().unwrap();
            let java = script(temp_dir.path(), "exec sleep 30");

            let started = Instant::now();
            let task = spawn_version_query(&java).unwrap();
            assert!(task.wait_until(Instant::now() + Duration::from_millis(300)).is_none());
            assert!(started.elapsed() < Duration::from_secs(10));
        }

        #[test]
        #[serial]
        fn test_no_output_returns_none() {
            let temp_dir = TempDir::new().unwrap();
            let java = script(temp_dir.path(), "exit 0");

            let task = spawn_version_query(&java).unwrap();
            assert!(task.wait_until(Instant::now() + Duration::from_secs(5)).is_none());
        }
    }
}
