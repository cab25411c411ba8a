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
use crate::commands::spinner;
use crate::config::WatchConfig;
use crate::error::Result;
use crate::javafx::{OpenJfxClient, find_sdks};
use crate::platform;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

pub struct JavaFxCommand<'a> {
    config: &'a WatchConfig,
}

#[derive(Serialize)]
struct SdkReport {
    path: PathBuf,
    installed: String,
    latest: String,
    download_uri: Option<String>,
}

impl<'a> JavaFxCommand<'a> {
    pub fn new(config: &'a WatchConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let sdks = find_sdks(&self.config.javafx_search_paths);
        if sdks.is_empty() {
            if json {
                println!("[]");
            } else {
                println!("No OpenJFX SDKs found");
                println!(
                    "Add folders to 'javafx_search_paths' in {}",
                    self.config.config_path().display()
                );
            }
            return Ok(());
        }

        let spinner = spinner("Checking OpenJFX releases...", !json);
        let client = OpenJfxClient::from_config(self.config);
        let results = client.check_sdks(&sdks, &platform::sys_info());
        spinner.finish_and_clear();

        let reports: Vec<SdkReport> = results
            .into_iter()
            .map(|(sdk, update)| SdkReport {
                path: sdk.path,
                installed: update.installed.to_string(),
                latest: update.latest.to_string(),
                download_uri: Some(update.uri).filter(|uri| !uri.is_empty()),
            })
            .collect();

        if json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
            return Ok(());
        }

        for report in &reports {
            println!("{} {}", "OpenJFX".bold(), report.path.display());
            match report.download_uri {
                Some(ref uri) => {
                    println!(
                        "  {} -> {}",
                        report.installed,
                        report.latest.green().bold()
                    );
                    println!("  {}", uri.cyan());
                }
                None => println!("  {} {}", report.installed, "(up to date)".dimmed()),
            }
        }
        Ok(())
    }
}
