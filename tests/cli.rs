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

use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn jdkwatch(home: &TempDir) -> Command {
    let mut command = Command::cargo_bin("jdkwatch").unwrap();
    command.env("JDKWATCH_HOME", home.path());
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("jdkwatch")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("scan"))
        .stdout(contains("updates"))
        .stdout(contains("javafx"))
        .stdout(contains("sysinfo"))
        .stdout(contains("config-init"));
}

#[test]
fn test_sysinfo_json() {
    let home = TempDir::new().unwrap();
    jdkwatch(&home)
        .args(["sysinfo", "--json"])
        .assert()
        .success()
        .stdout(contains("\"operating_mode\""))
        .stdout(contains("\"search_paths\""));
}

#[test]
fn test_scan_empty_search_path_json() {
    let home = TempDir::new().unwrap();
    let jdks = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        format!("search_paths = [{:?}]\n", jdks.path().display().to_string()),
    )
    .unwrap();

    jdkwatch(&home)
        .args(["scan", "--json"])
        .assert()
        .success()
        .stdout(contains("[]"));
}

#[test]
fn test_config_init_writes_file() {
    let home = TempDir::new().unwrap();
    jdkwatch(&home).arg("config-init").assert().success();

    let written = fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("search_paths"));
    assert!(written.contains("[scan]"));

    jdkwatch(&home)
        .arg("config-init")
        .assert()
        .success()
        .stdout(contains("already exists"));
}

#[test]
fn test_invalid_config_exit_code() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "[scan]\nworkers = 0\n").unwrap();

    jdkwatch(&home)
        .arg("scan")
        .assert()
        .code(2)
        .stderr(contains("scan.workers"));
}
