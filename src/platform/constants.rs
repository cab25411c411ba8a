//! Platform-specific constants and utility functions.

use std::path::PathBuf;

/// Get the executable file extension for the current platform
pub fn executable_extension() -> &'static str {
    #[cfg(windows)]
    return ".exe";
    #[cfg(not(windows))]
    return "";
}

/// Add the platform-specific executable extension to a file name
pub fn with_executable_extension(name: &str) -> String {
    format!("{}{}", name, executable_extension())
}

/// File name of the Java launcher on this platform
pub fn launcher_name() -> String {
    with_executable_extension("java")
}

/// Conventional JDK install roots for the current platform.
///
/// Only the SDKMAN candidates folder is filtered by existence; the walker
/// treats missing roots as empty anyway.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    #[cfg(target_os = "linux")]
    paths.push(PathBuf::from("/usr/lib/jvm"));

    #[cfg(target_os = "macos")]
    {
        paths.push(PathBuf::from("/Library/Java/JavaVirtualMachines"));
        paths.push(PathBuf::from(
            "/System/Volumes/Data/Library/Java/JavaVirtualMachines",
        ));
    }

    #[cfg(windows)]
    paths.push(PathBuf::from(r"C:\Program Files\Java"));

    if let Some(home) = dirs::home_dir() {
        let sdkman = home.join(".sdkman").join("candidates").join("java");
        if sdkman.is_dir() {
            paths.push(sdkman);
        }
    }

    paths
}

/// Folders whose JDKs are owned by a version manager (SDKMAN, asdf, kopi, jabba).
pub fn version_manager_roots() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };

    vec![
        home.join(".sdkman").join("candidates").join("java"),
        home.join(".asdf").join("installs").join("java"),
        home.join(".kopi").join("jdks"),
        home.join(".jabba").join("jdk"),
    ]
}
