use std::process::Command;

fn main() {
    // Packagers can pin the version; otherwise use the latest git tag
    let version = std::env::var("ANIME_SEASON_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_tag_version)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=APP_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=ANIME_SEASON_VERSION");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/tags");
}

fn git_tag_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--abbrev=0"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let tag = String::from_utf8(output.stdout).ok()?;
    let tag = tag.trim();
    Some(tag.strip_prefix('v').unwrap_or(tag).to_string())
}
