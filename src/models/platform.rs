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
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X64,
    X86,
    Aarch64,
    Arm32,
    Ppc64,
    Ppc64le,
    S390x,
    Sparcv9,
    Riscv64,
}

impl Architecture {
    /// Alternate tokens the catalog uses for the same architecture.
    ///
    /// An empty slice means the catalog only ever reports the canonical token.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Architecture::X64 => &["amd64", "x86_64", "x86-64"],
            Architecture::X86 => &["x32", "i386", "i586", "i686", "x86_32"],
            Architecture::Aarch64 => &["arm64"],
            Architecture::Arm32 => &["arm", "aarch32", "armv6", "armv7"],
            Architecture::Ppc64 => &["ppc"],
            Architecture::Ppc64le => &[],
            Architecture::S390x => &[],
            Architecture::Sparcv9 => &["sparc"],
            Architecture::Riscv64 => &["riscv"],
        }
    }

    /// True when `token` is this architecture's canonical name or one of its synonyms.
    pub fn matches_token(&self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        token == self.to_string() || self.synonyms().contains(&token.as_str())
    }
}

impl FromStr for Architecture {
    type Err = JdkWatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "x64" | "amd64" | "x86_64" | "x86-64" => Ok(Architecture::X64),
            "x86" | "x32" | "i386" | "i586" | "i686" | "x86_32" => Ok(Architecture::X86),
            "aarch64" | "arm64" => Ok(Architecture::Aarch64),
            "arm32" | "arm" | "aarch32" | "armv6" | "armv7" => Ok(Architecture::Arm32),
            "ppc64" | "ppc" => Ok(Architecture::Ppc64),
            "ppc64le" => Ok(Architecture::Ppc64le),
            "s390x" => Ok(Architecture::S390x),
            "sparcv9" | "sparc" => Ok(Architecture::Sparcv9),
            "riscv64" | "riscv" => Ok(Architecture::Riscv64),
            _ => Err(JdkWatchError::InvalidConfig(format!(
                "Unknown architecture: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arch = match self {
            Architecture::X64 => "x64",
            Architecture::X86 => "x86",
            Architecture::Aarch64 => "aarch64",
            Architecture::Arm32 => "arm32",
            Architecture::Ppc64 => "ppc64",
            Architecture::Ppc64le => "ppc64le",
            Architecture::S390x => "s390x",
            Architecture::Sparcv9 => "sparcv9",
            Architecture::Riscv64 => "riscv64",
        };
        write!(f, "{arch}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingSystem {
    Linux,
    AlpineLinux,
    Windows,
    MacOS,
    Solaris,
    Aix,
}

impl OperatingSystem {
    pub fn is_linux(&self) -> bool {
        matches!(self, OperatingSystem::Linux | OperatingSystem::AlpineLinux)
    }

    /// Token sent to the catalog. Alpine packages are published as linux
    /// builds and told apart by their libc type.
    pub fn catalog_token(&self) -> &'static str {
        match self {
            OperatingSystem::Linux | OperatingSystem::AlpineLinux => "linux",
            OperatingSystem::Windows => "windows",
            OperatingSystem::MacOS => "macos",
            OperatingSystem::Solaris => "solaris",
            OperatingSystem::Aix => "aix",
        }
    }
}

impl FromStr for OperatingSystem {
    type Err = JdkWatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linux" => Ok(OperatingSystem::Linux),
            "alpine" | "alpine-linux" | "alpine_linux" => Ok(OperatingSystem::AlpineLinux),
            "windows" | "win" => Ok(OperatingSystem::Windows),
            "macos" | "mac" | "darwin" | "osx" => Ok(OperatingSystem::MacOS),
            "solaris" | "sunos" => Ok(OperatingSystem::Solaris),
            "aix" => Ok(OperatingSystem::Aix),
            _ => Err(JdkWatchError::InvalidConfig(format!(
                "Unknown operating system: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let os = match self {
            OperatingSystem::Linux => "linux",
            OperatingSystem::AlpineLinux => "alpine_linux",
            OperatingSystem::Windows => "windows",
            OperatingSystem::MacOS => "macos",
            OperatingSystem::Solaris => "solaris",
            OperatingSystem::Aix => "aix",
        };
        write!(f, "{os}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    Native,
    Emulated,
    Unknown,
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self {
            OperatingMode::Native => "native",
            OperatingMode::Emulated => "emulated",
            OperatingMode::Unknown => "unknown",
        };
        write!(f, "{mode}")
    }
}

/// C library flavor reported by the catalog's `lib_c_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibCType {
    Glibc,
    Musl,
    Libc,
    CStdLib,
}

impl FromStr for LibCType {
    type Err = JdkWatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "glibc" => Ok(LibCType::Glibc),
            "musl" => Ok(LibCType::Musl),
            "libc" => Ok(LibCType::Libc),
            "c_std_lib" => Ok(LibCType::CStdLib),
            _ => Err(JdkWatchError::InvalidConfig(format!(
                "Unknown libc type: {s}"
            ))),
        }
    }
}

/// Host description: what the machine is, not what a JDK was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SysInfo {
    pub operating_system: Option<OperatingSystem>,
    pub architecture: Option<Architecture>,
    pub operating_mode: OperatingMode,
}
