// tests/common/mod.rs — Shared helpers for integration tests

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// A scratch source tree the binary is pointed at. Removed on drop.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Build a tree from (relative path, content) pairs, creating parent
    /// directories as needed.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("create fixture dir");
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create fixture subdir");
            }
            fs::write(&path, content).expect("write fixture file");
        }
        Fixture { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run the binary on this tree, extra flags after the path.
    pub fn run(&self, extra: &[&str]) -> Output {
        let mut args = vec![self.dir.path().to_str().expect("utf-8 fixture path")];
        args.extend_from_slice(extra);
        run_raw(&args)
    }
}

/// Run the binary with raw arguments; cargo exports the compiled binary
/// path to integration tests via `CARGO_BIN_EXE_<name>`.
pub fn run_raw(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codestat"))
        .args(args)
        .output()
        .expect("spawn codestat")
}
