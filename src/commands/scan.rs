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
use crate::commands::scan_distributions;
use crate::config::WatchConfig;
use crate::error::Result;
use crate::models::distribution::{BuildScope, Distribution, Feature};
use colored::Colorize;
use comfy_table::{Cell, Color, Table};

pub struct ScanCommand<'a> {
    config: &'a WatchConfig,
}

impl<'a> ScanCommand<'a> {
    pub fn new(config: &'a WatchConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let distributions = scan_distributions(self.config, !json);

        if json {
            println!("{}", serde_json::to_string_pretty(&distributions)?);
            return Ok(());
        }

        if distributions.is_empty() {
            println!("No JDK distributions found");
            println!(
                "Add folders to 'search_paths' in {}",
                self.config.config_path().display()
            );
            return Ok(());
        }

        println!("{}", distributions_table(&distributions));
        println!(
            "\n{} distribution{} found",
            distributions.len().to_string().cyan(),
            if distributions.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }
}

pub(crate) fn distributions_table(distributions: &[Distribution]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new(""),
        Cell::new("Distribution"),
        Cell::new("Version"),
        Cell::new("OS/Arch"),
        Cell::new("JavaFX"),
        Cell::new("Feature"),
        Cell::new("Folder"),
    ]);

    for distribution in distributions {
        let marker = if distribution.in_use { "*" } else { "" };
        let name = if distribution.build_scope == BuildScope::BuildOfGraalVm {
            Cell::new(&distribution.name).fg(Color::Magenta)
        } else if distribution.identified {
            Cell::new(&distribution.name)
        } else {
            Cell::new(&distribution.name).fg(Color::DarkGrey)
        };
        let platform = format!(
            "{}/{}",
            distribution
                .operating_system
                .map(|os| os.to_string())
                .unwrap_or_else(|| "?".to_string()),
            distribution
                .architecture
                .map(|arch| arch.to_string())
                .unwrap_or_else(|| "?".to_string()),
        );
        let feature = match distribution.feature {
            Feature::None => String::new(),
            feature => feature.to_string(),
        };
        let folder = if distribution.managed_by_version_manager {
            format!("{} (managed)", distribution.parent_folder_name)
        } else {
            distribution.parent_folder_name.clone()
        };

        table.add_row(vec![
            Cell::new(marker).fg(Color::Green),
            name,
            Cell::new(distribution.version.to_string()),
            Cell::new(platform),
            Cell::new(if distribution.javafx_bundled { "✓" } else { "" }),
            Cell::new(feature),
            Cell::new(folder),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::platform::{Architecture, OperatingSystem};
    use crate::version::Version;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_scan_empty_search_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = WatchConfig::default();
        config.search_paths = vec![temp_dir.path().to_path_buf()];

        let command = ScanCommand::new(&config).unwrap();
        assert!(command.execute(false).is_ok());
        assert!(command.execute(true).is_ok());
    }

    #[test]
    fn test_distributions_table_rows() {
        let distribution = Distribution {
            name: "Temurin".to_string(),
            api_string: "temurin".to_string(),
            version: Version::parse_java("21.0.4+7").unwrap(),
            major_version: 21,
            operating_system: Some(OperatingSystem::Linux),
            architecture: Some(Architecture::X64),
            javafx_bundled: false,
            install_path: PathBuf::from("/usr/lib/jvm/temurin-21"),
            feature: Feature::None,
            build_scope: BuildScope::BuildOfOpenJdk,
            managed_by_version_manager: true,
            modules: Vec::new(),
            in_use: true,
            parent_folder_name: "temurin-21".to_string(),
            identified: true,
        };

        let rendered = distributions_table(&[distribution]).to_string();
        assert!(rendered.contains("Temurin"));
        assert!(rendered.contains("21.0.4+7"));
        assert!(rendered.contains("linux/x64"));
        assert!(rendered.contains("temurin-21 (managed)"));
    }
}
