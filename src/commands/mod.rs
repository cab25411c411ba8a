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
pub mod config_init;
pub mod javafx;
pub mod scan;
pub mod sysinfo;
pub mod updates;

use crate::config::WatchConfig;
use crate::models::distribution::Distribution;
use crate::scan::{ScanOptions, Scanner};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const SPINNER_TICKS: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

pub(crate) fn spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars(SPINNER_TICKS)
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// One scan cycle over the configured search paths.
pub(crate) fn scan_distributions(config: &WatchConfig, show_progress: bool) -> Vec<Distribution> {
    let roots = config.effective_search_paths();
    log::debug!("Search paths: {roots:?}");

    let spinner = spinner("Scanning for JDK distributions...", show_progress);
    let distributions = Scanner::new(ScanOptions::from_config(config)).scan(&roots);
    spinner.finish_and_clear();
    distributions
}
