//! Build script for drep-history
//!
//! Embeds build identification (short git hash, timestamp, profile) into
//! the binary for the startup banner.

fn main() {
    let git_hash = std::process::Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GIT_HASH={}", git_hash);

    println!(
        "cargo:rustc-env=BUILD_TIMESTAMP={}",
        chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
    );

    println!(
        "cargo:rustc-env=BUILD_PROFILE={}",
        std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string())
    );

    // No rerun-if-changed directives, so Cargo reruns this script on every
    // build and the hash and timestamp stay current
}
