//! Host detection: operating system (including musl-based Alpine), CPU
//! architecture and whether the process runs emulated.

use crate::models::platform::{Architecture, OperatingMode, OperatingSystem, SysInfo};
use std::env;
#[cfg(target_os = "linux")]
use std::fs;
#[cfg(target_os = "macos")]
use std::process::Command;
use std::str::FromStr;
use std::sync::OnceLock;

// Platform-specific libc detection
#[cfg(all(target_os = "linux", target_env = "musl"))]
const PLATFORM_LIBC: &str = "musl";

#[cfg(all(target_os = "linux", not(target_env = "musl")))]
const PLATFORM_LIBC: &str = "glibc";

#[cfg(target_os = "macos")]
const PLATFORM_LIBC: &str = "darwin"; // macOS uses its own system libraries

#[cfg(target_os = "windows")]
const PLATFORM_LIBC: &str = "windows"; // Windows uses MSVCRT

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const PLATFORM_LIBC: &str = "unknown";

#[cfg(target_os = "linux")]
const OS_RELEASE_FILE: &str = "/etc/os-release";

/// Cached host information to avoid repeated system calls.
static CACHED_SYS_INFO: OnceLock<SysInfo> = OnceLock::new();

/// Get the platform libc type for debugging and informational purposes
pub fn get_platform_libc() -> &'static str {
    PLATFORM_LIBC
}

/// Get host information with caching.
///
/// The host is probed once per process; the result describes the machine
/// itself and is what distributions default to when their `release` file
/// carries no OS or architecture hints.
pub fn sys_info() -> SysInfo {
    *CACHED_SYS_INFO.get_or_init(|| {
        let operating_system = detect_operating_system();
        let architecture = detect_architecture();
        let operating_mode = detect_operating_mode(architecture);
        log::debug!(
            "Detected host: os={operating_system:?} arch={architecture:?} mode={operating_mode}"
        );
        SysInfo {
            operating_system,
            architecture,
            operating_mode,
        }
    })
}

/// Detect the current operating system.
///
/// Linux hosts whose distribution id is `alpine` (or binaries built against
/// musl) report [`OperatingSystem::AlpineLinux`] so that update resolution
/// selects musl packages.
pub fn detect_operating_system() -> Option<OperatingSystem> {
    #[cfg(target_os = "linux")]
    {
        if PLATFORM_LIBC == "musl" || is_alpine_host() {
            return Some(OperatingSystem::AlpineLinux);
        }
        return Some(OperatingSystem::Linux);
    }

    #[cfg(target_os = "windows")]
    return Some(OperatingSystem::Windows);

    #[cfg(target_os = "macos")]
    return Some(OperatingSystem::MacOS);

    #[cfg(any(target_os = "solaris", target_os = "illumos"))]
    return Some(OperatingSystem::Solaris);

    #[cfg(target_os = "aix")]
    return Some(OperatingSystem::Aix);

    #[cfg(not(any(
        target_os = "linux",
        target_os = "windows",
        target_os = "macos",
        target_os = "solaris",
        target_os = "illumos",
        target_os = "aix"
    )))]
    return None;
}

#[cfg(target_os = "linux")]
fn is_alpine_host() -> bool {
    if sysinfo::System::distribution_id().eq_ignore_ascii_case("alpine") {
        return true;
    }

    match fs::read_to_string(OS_RELEASE_FILE) {
        Ok(contents) => os_release_is_alpine(&contents),
        Err(e) => {
            log::trace!("Could not read {OS_RELEASE_FILE}: {e}");
            false
        }
    }
}

/// True when an os-release document names Alpine in its `ID` or `NAME` entries.
pub fn os_release_is_alpine(contents: &str) -> bool {
    contents.lines().any(|line| {
        let Some((key, value)) = line.split_once('=') else {
            return false;
        };
        matches!(key.trim(), "ID" | "NAME")
            && value
                .trim()
                .trim_matches('"')
                .to_lowercase()
                .contains("alpine")
    })
}

/// Detect the current system architecture.
///
/// Windows reports the native processor through `PROCESSOR_ARCHITEW6432`
/// when the process itself runs under WOW64, so that value wins.
pub fn detect_architecture() -> Option<Architecture> {
    #[cfg(windows)]
    {
        for var in ["PROCESSOR_ARCHITEW6432", "PROCESSOR_ARCHITECTURE"] {
            if let Ok(value) = env::var(var)
                && let Ok(arch) = Architecture::from_str(&value)
            {
                return Some(arch);
            }
        }
    }

    compile_time_architecture()
}

fn compile_time_architecture() -> Option<Architecture> {
    let arch = match env::consts::ARCH {
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "sparc64" => "sparcv9",
        other => other,
    };
    Architecture::from_str(arch).ok()
}

/// Detect whether this process runs translated (Rosetta 2, WOW64).
pub fn detect_operating_mode(architecture: Option<Architecture>) -> OperatingMode {
    if architecture.is_none() {
        return OperatingMode::Unknown;
    }
    platform_operating_mode()
}

#[cfg(target_os = "macos")]
fn platform_operating_mode() -> OperatingMode {
    match Command::new("sysctl")
        .args(["-in", "sysctl.proc_translated"])
        .output()
    {
        Ok(output) if String::from_utf8_lossy(&output.stdout).trim() == "1" => {
            OperatingMode::Emulated
        }
        Ok(_) => OperatingMode::Native,
        Err(e) => {
            log::debug!("Failed to query Rosetta translation state: {e}");
            OperatingMode::Unknown
        }
    }
}

#[cfg(windows)]
fn platform_operating_mode() -> OperatingMode {
    if env::var_os("PROCESSOR_ARCHITEW6432").is_some() {
        OperatingMode::Emulated
    } else {
        OperatingMode::Native
    }
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_operating_mode() -> OperatingMode {
    OperatingMode::Native
}

/// `JAVA_HOME` of the current process, if set to something non-empty.
pub fn current_java_home() -> Option<String> {
    env::var("JAVA_HOME")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
