//! Platform detection utilities for the entire application.
//!
//! This module provides functions to detect the host's operating system,
//! architecture and emulation mode, plus the platform conventions (launcher
//! name, JDK install roots) the scanner relies on.

// Internal modules
mod constants;
mod detection;

// Re-export detection functions
pub use detection::{
    current_java_home, detect_architecture, detect_operating_mode, detect_operating_system,
    get_platform_libc, os_release_is_alpine, sys_info,
};

// Re-export constants
pub use constants::{
    default_search_paths, executable_extension, launcher_name, version_manager_roots,
    with_executable_extension,
};
