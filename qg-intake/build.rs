//! Build script for qg-intake
//!
//! Stamps the binary with a build version reported by `GET /api/health` and
//! the startup banner: `<crate version>+<short commit>`, e.g. `0.1.0+1a2b3c4d`.
//! Container builds without a `.git` directory can supply the commit through
//! `QG_GIT_HASH`.

use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string()).filter(|h| !h.is_empty())
}

fn main() {
    println!("cargo:rerun-if-env-changed=QG_GIT_HASH");
    println!("cargo:rerun-if-changed=../.git/HEAD");

    let commit = std::env::var("QG_GIT_HASH")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());

    let version = format!("{}+{}", env!("CARGO_PKG_VERSION"), commit);
    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=QG_BUILD_VERSION={}", version);
    println!("cargo:rustc-env=QG_BUILT_AT={}", built_at);
    println!("cargo:rustc-env=QG_BUILD_PROFILE={}", profile);
}
