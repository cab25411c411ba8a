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
use crate::catalog::FoojayCatalog;
use crate::commands::{scan_distributions, spinner};
use crate::config::WatchConfig;
use crate::error::Result;
use crate::platform;
use crate::resolver::{AvailableUpdates, UpdateResolver};
use colored::Colorize;
use comfy_table::{Cell, Color, Table};

pub struct UpdatesCommand<'a> {
    config: &'a WatchConfig,
}

impl<'a> UpdatesCommand<'a> {
    pub fn new(config: &'a WatchConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let distributions = scan_distributions(self.config, !json);
        if distributions.is_empty() {
            if json {
                println!("[]");
            } else {
                println!("No JDK distributions found");
            }
            return Ok(());
        }

        let resolver = UpdateResolver::new(
            Box::new(FoojayCatalog::from_config(self.config)),
            platform::sys_info(),
        )
        .with_show_unknown_builds(self.config.show_unknown_builds)
        .with_parallel_requests(self.config.api.parallel_requests);

        let spinner = spinner("Checking foojay.io for updates...", !json);
        let updates = resolver.resolve(&distributions);
        spinner.finish_and_clear();

        if json {
            println!("{}", serde_json::to_string_pretty(&updates)?);
            return Ok(());
        }

        if updates.with_updates().next().is_none() {
            println!("{} All distributions are up to date", "✓".green().bold());
            return Ok(());
        }

        println!("{}", updates_table(&updates));
        Ok(())
    }
}

pub(crate) fn updates_table(updates: &AvailableUpdates) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Distribution"),
        Cell::new("Installed"),
        Cell::new("Available"),
        Cell::new("Vendor"),
        Cell::new("Archive"),
        Cell::new("Folder"),
    ]);

    for entry in updates.with_updates() {
        let installed = &entry.distribution;
        for package in &entry.packages {
            let vendor = if package.distribution == installed.api_string {
                Cell::new(&package.distribution)
            } else {
                Cell::new(&package.distribution).fg(Color::Yellow)
            };
            table.add_row(vec![
                Cell::new(&installed.name),
                Cell::new(installed.version.to_string()),
                Cell::new(&package.java_version).fg(Color::Green),
                vendor,
                Cell::new(&package.archive_type),
                Cell::new(&installed.parent_folder_name),
            ]);
        }
    }

    table
}
