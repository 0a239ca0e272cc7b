//! Project fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const ENTRY: &str = "// title: Demo\n// author: Al\nfunction TIC(){}\n";

/// A game project in a temp directory.
pub struct GameProject {
    pub dir: TempDir,
}

impl GameProject {
    pub fn new(entry_source: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("src")).expect("src dir");
        std::fs::write(dir.path().join("src/main.js"), entry_source).expect("entry");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_config(&self, json: &str) {
        std::fs::write(self.root().join("cartwright.config.json"), json).expect("config");
    }

    /// Standard config, optionally pointing at a runtime executable.
    pub fn write_default_config(&self, tic_executable: Option<&Path>) {
        let tic = match tic_executable {
            Some(path) => format!(r#","tic":{{"ticExecutable":"{}"}}"#, path.display()),
            None => String::new(),
        };
        self.write_config(&format!(
            r#"{{"entry":"src/main.js","outfile":"build/bundle.js","compression":{{"compressedFile":"build/game.js"}}{tic}}}"#
        ));
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.root().join("build/game.js")
    }

    pub fn artifact(&self) -> String {
        std::fs::read_to_string(self.artifact_path()).expect("artifact")
    }

    /// The binary, run inside the project with colours off.
    pub fn cartwright(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cartwright"));
        cmd.args(args)
            .current_dir(self.root())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// A shell script standing in for TIC-80.
    #[cfg(unix)]
    pub fn fake_runtime(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.root().join("fake-tic80");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
        path
    }
}
