use serde::Serialize;

/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

/// CLI semantic version derived from the crate metadata.
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: CLI_VERSION,
        git_hash: option_env!("BUDGET_WISE_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("BUDGET_WISE_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("BUDGET_WISE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("BUDGET_WISE_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("BUDGET_WISE_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("BUDGET_WISE_BUILD_RUSTC").unwrap_or("unknown"),
    }
}

impl BuildMetadata {
    /// One-line summary shown by `budget_wise_cli version`.
    pub fn describe(&self) -> String {
        format!(
            "budget_wise {} ({} {}, {} {}, built {})",
            self.version, self.git_hash, self.git_status, self.target, self.profile, self.timestamp
        )
    }
}
