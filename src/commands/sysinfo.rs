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
use crate::platform;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

pub struct SysInfoCommand<'a> {
    config: &'a WatchConfig,
}

#[derive(Serialize)]
struct HostReport {
    operating_system: Option<String>,
    architecture: Option<String>,
    operating_mode: String,
    libc: &'static str,
    java_home: Option<String>,
    search_paths: Vec<PathBuf>,
    config_path: PathBuf,
}

impl<'a> SysInfoCommand<'a> {
    pub fn new(config: &'a WatchConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let report = self.report();

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        let unknown = || "unknown".to_string();
        println!("{}", "Host".bold());
        println!(
            "  Operating system: {}",
            report.operating_system.clone().unwrap_or_else(unknown)
        );
        println!(
            "  Architecture:     {}",
            report.architecture.clone().unwrap_or_else(unknown)
        );
        println!("  Mode:             {}", report.operating_mode);
        println!("  C library:        {}", report.libc);
        println!(
            "  JAVA_HOME:        {}",
            report.java_home.clone().unwrap_or_else(|| "-".to_string())
        );
        println!("{}", "Search paths".bold());
        for path in &report.search_paths {
            let status = if path.is_dir() {
                "✓".green()
            } else {
                "✗".red()
            };
            println!("  {status} {}", path.display());
        }
        println!("{} {}", "Config:".bold(), report.config_path.display());
        Ok(())
    }

    fn report(&self) -> HostReport {
        let host = platform::sys_info();
        HostReport {
            operating_system: host.operating_system.map(|os| os.to_string()),
            architecture: host.architecture.map(|arch| arch.to_string()),
            operating_mode: host.operating_mode.to_string(),
            libc: platform::get_platform_libc(),
            java_home: platform::current_java_home(),
            search_paths: self.config.effective_search_paths(),
            config_path: self.config.config_path(),
        }
    }
}
