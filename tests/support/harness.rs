use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// CliHarness runs the seedcheck binary inside a temporary working directory
/// with its own config home, so no global or project config leaks in.
pub struct CliHarness {
    pub dir: TempDir,
    pub binary: PathBuf,
}

impl CliHarness {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("config-home")).expect("Failed to create config home");

        CliHarness {
            dir,
            binary: PathBuf::from(env!("CARGO_BIN_EXE_seedcheck")),
        }
    }

    /// Returns the working directory of the harness.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file relative to the working directory and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Executes the binary with the given arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary)
            .args(args)
            .current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config-home"))
            .env("HOME", self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run seedcheck")
    }
}

impl Default for CliHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
