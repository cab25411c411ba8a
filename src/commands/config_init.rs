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
use crate::config::WatchConfig;
use crate::error::Result;
use colored::Colorize;

pub struct ConfigInitCommand<'a> {
    config: &'a WatchConfig,
}

impl<'a> ConfigInitCommand<'a> {
    pub fn new(config: &'a WatchConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// Write the active configuration, with the search paths it resolves to,
    /// to the config file. An existing file is kept unless `force` is set.
    pub fn execute(&self, force: bool) -> Result<()> {
        let path = self.config.config_path();
        if path.exists() && !force {
            println!("Config file already exists: {}", path.display());
            println!("Use --force to overwrite it");
            return Ok(());
        }

        let mut config = self.config.clone();
        config.search_paths = config.effective_search_paths();
        config.save()?;

        println!("{} Wrote {}", "✓".green().bold(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_config_init_writes_and_keeps_existing() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = WatchConfig::new(temp_dir.path().to_path_buf()).unwrap();
        config.search_paths = vec![temp_dir.path().join("jdks")];

        let command = ConfigInitCommand::new(&config).unwrap();
        command.execute(false).unwrap();

        let written = fs::read_to_string(config.config_path()).unwrap();
        assert!(written.contains("search_paths"));
        assert!(written.contains("jdks"));

        fs::write(config.config_path(), "show_unknown_builds = true\n").unwrap();
        command.execute(false).unwrap();
        assert_eq!(
            fs::read_to_string(config.config_path()).unwrap(),
            "show_unknown_builds = true\n"
        );

        command.execute(true).unwrap();
        assert!(
            fs::read_to_string(config.config_path())
                .unwrap()
                .contains("search_paths")
        );
    }
}
