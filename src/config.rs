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
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.toml";
const HOME_ENV_VAR: &str = "JDKWATCH_HOME";
const ENV_PREFIX: &str = "JDKWATCH";

pub const DEFAULT_FEATURES: &str = "loom,panama,metropolis,valhalla,lanai,kona_fiber,crac";
pub const DEFAULT_API_BASE_URL: &str = "https://api.foojay.io/disco";
pub const DEFAULT_OPENJFX_METADATA_URL: &str =
    "https://repo1.maven.org/maven2/org/openjfx/javafx/maven-metadata.xml";
const DEFAULT_SCAN_TIMEOUT_MS: u64 = 5000;
const DEFAULT_SCAN_WORKERS: usize = 4;
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PARALLEL_REQUESTS: usize = 4;
const DEFAULT_MAX_ATTEMPTS: usize = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(skip)]
    jdkwatch_home: PathBuf,

    /// Roots walked for java launchers. Empty means the platform defaults.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,

    /// Folders containing unpacked OpenJFX SDKs.
    #[serde(default)]
    pub javafx_search_paths: Vec<PathBuf>,

    #[serde(default)]
    pub show_unknown_builds: bool,

    /// Comma separated preview feature keywords matched against the VM banner line.
    #[serde(default = "default_features")]
    pub features: String,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_scan_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_scan_workers")]
    pub workers: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_SCAN_TIMEOUT_MS,
            workers: DEFAULT_SCAN_WORKERS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    #[serde(default = "default_openjfx_metadata_url")]
    pub openjfx_metadata_url: String,

    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_parallel_requests")]
    pub parallel_requests: usize,

    /// Attempts per catalog request; 1 disables retrying.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            openjfx_metadata_url: DEFAULT_OPENJFX_METADATA_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            parallel_requests: DEFAULT_PARALLEL_REQUESTS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

fn default_features() -> String {
    DEFAULT_FEATURES.to_string()
}

fn default_scan_timeout_ms() -> u64 {
    DEFAULT_SCAN_TIMEOUT_MS
}

fn default_scan_workers() -> usize {
    DEFAULT_SCAN_WORKERS
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_openjfx_metadata_url() -> String {
    DEFAULT_OPENJFX_METADATA_URL.to_string()
}

fn default_api_timeout_secs() -> u64 {
    DEFAULT_API_TIMEOUT_SECS
}

fn default_parallel_requests() -> usize {
    DEFAULT_PARALLEL_REQUESTS
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            jdkwatch_home: PathBuf::new(),
            search_paths: Vec::new(),
            javafx_search_paths: Vec::new(),
            show_unknown_builds: false,
            features: default_features(),
            scan: ScanConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

/// Load the configuration from the resolved jdkwatch home.
pub fn new_watch_config() -> Result<WatchConfig> {
    WatchConfig::new(resolve_home()?)
}

fn resolve_home() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV_VAR)
        && !home.trim().is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir()
        .map(|home| home.join(".jdkwatch"))
        .ok_or_else(|| {
            JdkWatchError::ConfigError(format!(
                "Unable to determine home directory; set {HOME_ENV_VAR}"
            ))
        })
}

impl WatchConfig {
    /// Load `config.toml` from `jdkwatch_home` (optional) layered with
    /// `JDKWATCH_*` environment overrides.
    pub fn new(jdkwatch_home: PathBuf) -> Result<Self> {
        let config_path = jdkwatch_home.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            log::debug!("Loading config from {config_path:?}");
        } else {
            log::debug!("Config file not found at {config_path:?}, using defaults");
        }

        let settings = Config::builder()
            .add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("search_paths")
                    .with_list_parse_key("javafx_search_paths"),
            )
            .build()?;

        let mut config: WatchConfig = settings.try_deserialize()?;
        config.jdkwatch_home = jdkwatch_home;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.scan.workers == 0 {
            return Err(JdkWatchError::InvalidConfig(
                "scan.workers must be at least 1".to_string(),
            ));
        }
        if self.api.parallel_requests == 0 {
            return Err(JdkWatchError::InvalidConfig(
                "api.parallel_requests must be at least 1".to_string(),
            ));
        }
        if self.api.max_attempts == 0 {
            return Err(JdkWatchError::InvalidConfig(
                "api.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn jdkwatch_home(&self) -> &Path {
        &self.jdkwatch_home
    }

    pub fn config_path(&self) -> PathBuf {
        self.jdkwatch_home.join(CONFIG_FILE_NAME)
    }

    /// Configured search roots, or the platform's conventional JDK folders.
    pub fn effective_search_paths(&self) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            crate::platform::default_search_paths()
        } else {
            self.search_paths.clone()
        }
    }

    /// Normalized feature keywords in configured order.
    pub fn feature_keywords(&self) -> Vec<String> {
        parse_feature_list(&self.features)
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_millis(self.scan.timeout_ms)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            JdkWatchError::ConfigError(format!("Failed to serialize config: {e}"))
        })?;

        fs::write(&config_path, contents)?;
        log::debug!("Saved config to {config_path:?}");
        Ok(())
    }
}

pub fn parse_feature_list(features: &str) -> Vec<String> {
    features
        .split(',')
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = WatchConfig::new(temp_dir.path().to_path_buf()).unwrap();

        assert!(config.search_paths.is_empty());
        assert!(!config.show_unknown_builds);
        assert_eq!(config.features, DEFAULT_FEATURES);
        assert_eq!(config.scan.timeout_ms, 5000);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.jdkwatch_home(), temp_dir.path());
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"
search_paths = ["/opt/java", "/usr/lib/jvm"]
show_unknown_builds = true
features = "loom, crac"

[scan]
timeout_ms = 1500

[api]
parallel_requests = 2
"#,
        )
        .unwrap();

        let config = WatchConfig::new(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(
            config.search_paths,
            vec![PathBuf::from("/opt/java"), PathBuf::from("/usr/lib/jvm")]
        );
        assert!(config.show_unknown_builds);
        assert_eq!(config.feature_keywords(), vec!["loom", "crac"]);
        assert_eq!(config.scan_timeout(), Duration::from_millis(1500));
        assert_eq!(config.scan.workers, DEFAULT_SCAN_WORKERS);
        assert_eq!(config.api.parallel_requests, 2);
        assert_eq!(config.api.timeout_secs, DEFAULT_API_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        let temp_dir = TempDir::new().unwrap();
        unsafe {
            env::set_var("JDKWATCH_SHOW_UNKNOWN_BUILDS", "true");
            env::set_var("JDKWATCH_API__BASE_URL", "http://localhost:1234");
        }

        let config = WatchConfig::new(temp_dir.path().to_path_buf());

        unsafe {
            env::remove_var("JDKWATCH_SHOW_UNKNOWN_BUILDS");
            env::remove_var("JDKWATCH_API__BASE_URL");
        }

        let config = config.unwrap();
        assert!(config.show_unknown_builds);
        assert_eq!(config.api.base_url, "http://localhost:1234");
    }

    #[test]
    #[serial]
    fn test_invalid_worker_count() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[scan]\nworkers = 0\n",
        )
        .unwrap();

        let result = WatchConfig::new(temp_dir.path().to_path_buf());
        assert!(matches!(result, Err(JdkWatchError::InvalidConfig(_))));
    }

    #[test]
    #[serial]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = WatchConfig::new(temp_dir.path().to_path_buf()).unwrap();
        config.search_paths = vec![PathBuf::from("/opt/jdks")];
        config.features = "valhalla".to_string();
        config.save().unwrap();

        let reloaded = WatchConfig::new(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(reloaded.search_paths, vec![PathBuf::from("/opt/jdks")]);
        assert_eq!(reloaded.feature_keywords(), vec!["valhalla"]);
    }

    #[test]
    fn test_parse_feature_list() {
        assert_eq!(
            parse_feature_list(" Loom ,,PANAMA, kona_fiber "),
            vec!["loom", "panama", "kona_fiber"]
        );
        assert!(parse_feature_list("").is_empty());
    }

    #[test]
    #[serial]
    fn test_effective_search_paths_prefers_configured() {
        let mut config = WatchConfig::default();
        config.search_paths = vec![PathBuf::from("/custom")];
        assert_eq!(
            config.effective_search_paths(),
            vec![PathBuf::from("/custom")]
        );
    }
}
