use regex::Regex;
use std::sync::LazyLock;

static JVMCI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"jvmci-(\d+)\.(\d+)-b(\d+)").expect("valid jvmci pattern"));

/// JVMCI compiler-interface build tag, e.g. `jvmci-23.0-b12`.
///
/// Field order gives the derived ordering: major, then minor, then build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JvmciBuild {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl JvmciBuild {
    /// First tag shipped by GraalVM Community builds of OpenJDK.
    pub const COMMUNITY_THRESHOLD: JvmciBuild = JvmciBuild {
        major: 23,
        minor: 0,
        build: 12,
    };

    /// Find the first jvmci tag anywhere in `text`.
    pub fn find(text: &str) -> Option<Self> {
        let captures = JVMCI_PATTERN.captures(text)?;
        Some(Self {
            major: captures[1].parse().ok()?,
            minor: captures[2].parse().ok()?,
            build: captures[3].parse().ok()?,
        })
    }

    pub fn is_graalvm_community(&self) -> bool {
        *self >= Self::COMMUNITY_THRESHOLD
    }
}

impl std::fmt::Display for JvmciBuild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "jvmci-{}.{}-b{:02}", self.major, self.minor, self.build)
    }
}
