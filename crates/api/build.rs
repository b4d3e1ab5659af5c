use std::process::Command;

/// Capture the git commit hash at compile time for the `/version` endpoint.
///
/// Resolution order: `MONGOVAULT_BUILD_COMMIT` (set by CI/packagers), a
/// best-effort `git rev-parse` probe, then `"unknown"`. The build never
/// fails over missing git metadata.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MONGOVAULT_BUILD_COMMIT");

    let commit = std::env::var("MONGOVAULT_BUILD_COMMIT")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(git_commit_hash)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=MONGOVAULT_COMMIT_HASH={commit}");
}

fn git_commit_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if hash.is_empty() {
        None
    } else {
        Some(hash)
    }
}
