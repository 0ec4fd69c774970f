use std::process::Command;

fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let hash = git(&["rev-parse", "--short", "HEAD"]);
    let commit_date = git(&["log", "-1", "--format=%cd", "--date=format:%Y-%m-%d"]);

    // Release builds are tagged commits; everything else reports the hash
    let tag = git(&["describe", "--exact-match", "--tags", "HEAD"]);
    let is_release = !tag.is_empty();

    println!("cargo:rustc-env=KEEPER_GIT_HASH={}", hash);
    println!("cargo:rustc-env=KEEPER_GIT_DATE={}", commit_date);
    println!("cargo:rustc-env=KEEPER_IS_RELEASE={}", is_release);
}
