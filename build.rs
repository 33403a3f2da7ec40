use std::fs;
use std::path::Path;
use std::process::Command;

fn read_trimmed(path: &Path, fallback: &str) -> String {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| fallback.to_string())
}

fn main() {
    // Monotonic build number, persisted next to the manifest
    let build_file = Path::new("BUILD_NUMBER");
    let build: u64 = read_trimmed(build_file, "0").parse().unwrap_or(0) + 1;
    fs::write(build_file, build.to_string()).expect("failed to write BUILD_NUMBER");

    let version = read_trimmed(Path::new("VERSION"), "0.1.0");

    let profile = match std::env::var("PROFILE").as_deref() {
        Ok("release") => "release",
        _ => "development",
    };

    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=FPEMASK_VERSION={}", version);
    println!("cargo:rustc-env=FPEMASK_BUILD={}", build);
    println!("cargo:rustc-env=FPEMASK_PROFILE={}", profile);
    println!("cargo:rustc-env=FPEMASK_GIT_HASH={}", git_hash);

    println!("cargo:rerun-if-changed=BUILD_NUMBER");
    println!("cargo:rerun-if-changed=VERSION");
    println!("cargo:rerun-if-env-changed=PROFILE");
}
