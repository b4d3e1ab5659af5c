use serde::Serialize;

/// Process-wide build metadata, fixed at compile time.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub commit_hash: &'static str,
    pub version: &'static str,
}

/// Commit hash comes from the build script (`MONGOVAULT_BUILD_COMMIT`
/// override, git probe, or `"unknown"`).
pub const BUILD_INFO: BuildInfo = BuildInfo {
    commit_hash: env!("MONGOVAULT_COMMIT_HASH"),
    version: env!("CARGO_PKG_VERSION"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_info_fields_are_populated() {
        assert!(!BUILD_INFO.commit_hash.is_empty());
        assert_eq!(BUILD_INFO.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn build_info_serializes_camel_case() {
        let json = serde_json::to_value(BUILD_INFO).unwrap();
        assert!(json.get("commitHash").is_some());
        assert!(json.get("version").is_some());
    }
}
