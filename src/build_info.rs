//! Build-time information
//!
//! Metadata captured by `build.rs` at compile time.

use std::fmt;

/// Build timestamp (when the binary was compiled)
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// Cargo optimization level (0, 1, 2, 3, s, z)
pub const CARGO_OPT_LEVEL: &str = env!("VERGEN_CARGO_OPT_LEVEL");

/// Target triple (e.g., x86_64-pc-windows-msvc)
pub const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// Rust channel (stable, beta, or nightly)
pub const RUSTC_CHANNEL: &str = env!("VERGEN_RUSTC_CHANNEL");

pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// All build metadata in one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub opt_level: &'static str,
    pub rustc: &'static str,
    pub channel: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: PKG_VERSION,
            timestamp: BUILD_TIMESTAMP,
            target: CARGO_TARGET_TRIPLE,
            opt_level: CARGO_OPT_LEVEL,
            rustc: RUSTC_SEMVER,
            channel: RUSTC_CHANNEL,
        }
    }

    /// Fields that came out empty at build time
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("timestamp", self.timestamp),
            ("target", self.target),
            ("opt_level", self.opt_level),
            ("rustc", self.rustc),
            ("channel", self.channel),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Short version string, e.g. `0.1.0 (x86_64-pc-windows-msvc-opt3)`
pub fn version_string() -> String {
    format!("{} ({}-opt{})", PKG_VERSION, CARGO_TARGET_TRIPLE, CARGO_OPT_LEVEL)
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Built: {}", self.timestamp)?;
        writeln!(f, "Target: {}", self.target)?;
        writeln!(f, "Optimization: {}", self.opt_level)?;
        write!(f, "Rustc: {} ({})", self.rustc, self.channel)
    }
}
