//! Bun version discovery and candidate reduction.

use anyhow::Context;

/// Reads the running Bun version from `bun --version`.
pub async fn detect_bun_version() -> crate::error::Result<String> {
    let output = tokio::process::Command::new("bun")
        .arg("--version")
        .output()
        .await
        .context("Failed to run `bun --version`; pass --bun-version to skip detection")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("`bun --version` failed: {}", stderr.trim());
    }

    let version = String::from_utf8(output.stdout)
        .context("Failed to parse `bun --version` output as UTF-8")?
        .trim()
        .trim_start_matches('v')
        .to_string();

    anyhow::ensure!(!version.is_empty(), "`bun --version` printed nothing");
    Ok(version)
}

/// Progressively shorter forms of a version to try against the fetcher.
///
/// `1.2.3-canary.4+abc` yields `1.2.3-canary.4+abc`, `1.2.3-canary.4`, `1.2.3`.
/// Duplicates collapse, so a plain release yields just itself.
pub fn version_candidates(version: &str) -> Vec<String> {
    let version = version.trim();
    let without_build = version.split_once('+').map_or(version, |(head, _)| head);
    let release = without_build
        .split_once('-')
        .map_or(without_build, |(head, _)| head);

    let mut candidates: Vec<String> = Vec::with_capacity(3);
    for candidate in [version, without_build, release] {
        if !candidate.is_empty() && !candidates.iter().any(|c| c == candidate) {
            candidates.push(candidate.to_string());
        }
    }
    candidates
}
