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

#![cfg(unix)]

mod common;

use common::fixtures::*;
use jdkwatch::models::distribution::{GENERIC_OPENJDK_API, UNKNOWN_BUILD_NAME};
use jdkwatch::scan::Scanner;
use serial_test::serial;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[test]
#[serial]
fn test_scan_classifies_installs() {
    let temp_dir = TempDir::new().unwrap();
    let zulu = write_fake_jdk(temp_dir.path(), "zulu-17", ZULU_17_BANNER);
    // Private runtime nested under the JDK must not be reported separately
    write_fake_jdk(&zulu, "jre", CORRETTO_11_BANNER);
    let temurin = write_fake_jdk(temp_dir.path(), "temurin-21", PLAIN_21_BANNER);
    write_release(
        &temurin,
        "IMPLEMENTOR=\"Eclipse Adoptium\"\nJAVA_VERSION=\"21.0.4\"\nOS_ARCH=\"aarch64\"\nMODULES=\"java.base java.logging\"\n",
    );

    let scanner = Scanner::new(scan_options(Duration::from_secs(10)));
    let found = scanner.scan(&[temp_dir.path().to_path_buf()]);

    let names: Vec<&str> = found.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Temurin", "Zulu"]);

    let temurin = &found[0];
    assert_eq!(temurin.api_string, "temurin");
    assert_eq!(temurin.major_version, 21);
    assert_eq!(temurin.parent_folder_name, "temurin-21");
    assert_eq!(temurin.architecture.unwrap().to_string(), "aarch64");
    assert_eq!(temurin.modules, vec!["java.base", "java.logging"]);

    let zulu = &found[1];
    assert_eq!(zulu.api_string, "zulu");
    assert_eq!(zulu.version.to_string(), "17.0.8+7");
    assert!(!zulu.in_use);
}

#[test]
#[serial]
fn test_scanning_same_root_twice_does_not_duplicate() {
    let temp_dir = TempDir::new().unwrap();
    write_fake_jdk(temp_dir.path(), "zulu-17", ZULU_17_BANNER);
    write_fake_jdk(temp_dir.path(), "corretto-11", CORRETTO_11_BANNER);

    let root = temp_dir.path().to_path_buf();
    let scanner = Scanner::new(scan_options(Duration::from_secs(10)));
    let found = scanner.scan(&[root.clone(), root.clone(), root.join("zulu-17")]);

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].name, "Corretto");
    assert_eq!(found[1].name, "Zulu");
}

#[test]
#[serial]
fn test_hanging_launcher_is_abandoned() {
    let temp_dir = TempDir::new().unwrap();
    write_fake_jdk(temp_dir.path(), "zulu-17", ZULU_17_BANNER);
    write_hanging_jdk(temp_dir.path(), "stuck");

    let scanner = Scanner::new(scan_options(Duration::from_millis(1500)));
    let started = Instant::now();
    let found = scanner.scan(&[temp_dir.path().to_path_buf()]);

    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Zulu");
}

#[test]
#[serial]
fn test_runtime_flags() {
    let temp_dir = TempDir::new().unwrap();
    let managed_root = temp_dir.path().join("sdkman");
    let zulu = write_fake_jdk(&managed_root, "17.0.8-zulu", ZULU_17_BANNER);
    write_fake_jdk(temp_dir.path(), "corretto-11", CORRETTO_11_BANNER);

    let mut options = scan_options(Duration::from_secs(10));
    options.java_home = Some(zulu.display().to_string());
    options.version_manager_roots = vec![managed_root];

    let found = Scanner::new(options).scan(&[temp_dir.path().to_path_buf()]);
    assert_eq!(found.len(), 2);

    let corretto = &found[0];
    assert!(!corretto.in_use);
    assert!(!corretto.managed_by_version_manager);

    let zulu = &found[1];
    assert!(zulu.in_use);
    assert!(zulu.managed_by_version_manager);
}

#[test]
#[serial]
fn test_unknown_builds_follow_toggle() {
    let temp_dir = TempDir::new().unwrap();
    write_fake_jdk(temp_dir.path(), "mystery", PLAIN_21_BANNER);
    let roots = [temp_dir.path().to_path_buf()];

    let hidden = Scanner::new(scan_options(Duration::from_secs(10))).scan(&roots);
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden[0].name, UNKNOWN_BUILD_NAME);
    assert_eq!(hidden[0].api_string, "");
    assert_eq!(hidden[0].version.to_string(), "21.0.4");

    let mut options = scan_options(Duration::from_secs(10));
    options.classifier.show_unknown_builds = true;
    let shown = Scanner::new(options).scan(&roots);
    assert_eq!(shown[0].api_string, GENERIC_OPENJDK_API);
}
