#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in for `mathimg`: logs its argv, fails on fixtures named `broken*`,
/// and otherwise writes `<output-dir>/<stem>.svg`.
const FAKE_RENDERER: &str = r#"#!/bin/sh
echo "$@" >> "$MATHIMG_FAKE_LOG"
if [ -n "$MATHIMG_FAKE_LIVE" ]; then
  mkdir "$MATHIMG_FAKE_LIVE/$$"
  ls "$MATHIMG_FAKE_LIVE" | wc -l >> "$MATHIMG_FAKE_PEAK"
  sleep 0.2
  rmdir "$MATHIMG_FAKE_LIVE/$$"
fi
while [ $# -gt 2 ]; do shift; done
name=$(basename "$1" .xml)
case "$name" in
  broken*) echo "could not parse $1" >&2; exit 2 ;;
esac
printf '<svg xmlns="http://www.w3.org/2000/svg"/>' > "$2/$name.svg"
"#;

pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub home: PathBuf,
    pub log: PathBuf,
}

impl TestEnv {
    /// A working directory holding `fixtures/`, a fake renderer and a
    /// `mathimg-batch.toml` pointing at both.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("work");
        let home = tmp.path().join("home");
        fs::create_dir_all(root.join("fixtures/nested")).expect("create fixtures");
        fs::create_dir_all(&home).expect("create isolated home");

        let renderer = root.join("fake-mathimg");
        fs::write(&renderer, FAKE_RENDERER).expect("write fake renderer");
        let mut perms = fs::metadata(&renderer).expect("stat renderer").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&renderer, perms).expect("chmod renderer");

        fs::write(
            root.join("mathimg-batch.toml"),
            format!(
                "[run]\nfixtures_dir = \"fixtures\"\nbinary = \"{}\"\nbuild_command = \"true\"\n",
                renderer.display()
            ),
        )
        .expect("write config");

        let log = tmp.path().join("renderer.log");
        Self {
            _tmp: tmp,
            root,
            home,
            log,
        }
    }

    pub fn fixture(&self, rel: &str) -> PathBuf {
        let path = self.root.join("fixtures").join(rel);
        fs::write(&path, "<mfrac><mn>1</mn><mn>2</mn></mfrac>").expect("write fixture");
        path
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("mathimg-batch");
        cmd.current_dir(&self.root)
            .env("HOME", &self.home)
            .env("MATHIMG_FAKE_LOG", &self.log)
            .env("RUST_LOG", "warn");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Renderer argv lines, sorted.
    pub fn invocations(&self) -> Vec<String> {
        let mut lines: Vec<String> = fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    }

    pub fn svgs(&self, dir: &str) -> Vec<String> {
        let dir = self.root.join(dir);
        if !dir.exists() {
            return vec![];
        }
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("read output dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf8 path")
}
