use std::process::Command;

/// Stdout of `program args`, trimmed, when it runs successfully.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Stamp `var` for `--version`, preferring a value set in the environment.
fn stamp(var: &str, program: &str, args: &[&str]) {
    let value = std::env::var(var)
        .ok()
        .or_else(|| command_output(program, args))
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env={}={}", var, value);
    println!("cargo:rerun-if-env-changed={}", var);
}

fn main() {
    stamp("GIT_SHA", "git", &["rev-parse", "--short", "HEAD"]);
    stamp("BUILD_DATE", "date", &["+%Y-%m-%d"]);
}
