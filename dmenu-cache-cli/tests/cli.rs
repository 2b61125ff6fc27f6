//! End-to-end tests driving the `dmenu-cache` binary.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

struct Sandbox {
    _root: TempDir,
    data_home: PathBuf,
    bin_dir: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempdir().unwrap();
        let data_home = root.path().join("data");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&bin_dir).unwrap();
        Self {
            _root: root,
            data_home,
            bin_dir,
        }
    }

    fn cache_file(&self) -> PathBuf {
        self.data_home.join("dmenu_cache").join("cache.json")
    }

    fn install(&self, names: &[&str]) {
        for name in names {
            fs::write(self.bin_dir.join(name), b"").unwrap();
        }
    }

    fn seed_cache(&self, json: &str) {
        let path = self.cache_file();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json).unwrap();
    }

    fn persisted(&self) -> Value {
        serde_json::from_str(&fs::read_to_string(self.cache_file()).unwrap()).unwrap()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dmenu-cache"));
        cmd.args(args)
            .env("XDG_DATA_HOME", &self.data_home)
            .env("PATH", &self.bin_dir)
            .env_remove("DMENU_CACHE_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().unwrap()
    }

    fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(stdin.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_no_command_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_unknown_command_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["frobnicate"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_update_echoes_and_persists() {
    let sandbox = Sandbox::new();
    let output = sandbox.run_with_stdin(&["update"], "vim\n\nvim\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "vim\n\nvim\n");
    assert_eq!(sandbox.persisted(), json!({"vim": 10}));
}

#[test]
fn test_show_reseeds_and_ages() {
    let sandbox = Sandbox::new();
    sandbox.install(&["a", "b"]);
    sandbox.seed_cache(r#"{"a": 3, "z": 9}"#);

    let output = sandbox.run(&["show"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "a\nb\n");
    assert_eq!(sandbox.persisted(), json!({"a": 2}));
}

#[test]
fn test_print_orders_by_count_then_name() {
    let sandbox = Sandbox::new();
    sandbox.seed_cache(r#"{"a": 2, "b": 5, "c": 2}"#);

    let output = sandbox.run(&["print"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "b: 5\na: 2\nc: 2\n");
}

#[test]
fn test_reset_clears_history() {
    let sandbox = Sandbox::new();
    sandbox.seed_cache(r#"{"vim": 40}"#);

    assert!(sandbox.run(&["reset"]).status.success());
    assert_eq!(sandbox.persisted(), json!({}));
}

#[test]
fn test_cache_file_override() {
    let sandbox = Sandbox::new();
    let custom = sandbox.bin_dir.join("custom.json");

    let output = sandbox.run_with_stdin(
        &["--cache-file", custom.to_str().unwrap(), "update"],
        "htop\n",
    );

    assert!(output.status.success());
    assert!(custom.exists());
    assert!(!sandbox.cache_file().exists());
}

#[test]
fn test_malformed_entry_warns_and_keeps_history() {
    let sandbox = Sandbox::new();
    sandbox.seed_cache(r#"{"vim": 40, "firefox": 12, "x": -1}"#);

    let output = sandbox.run(&["print"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "vim: 40\nfirefox: 12\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Skipping malformed cache entry"));
    assert_eq!(sandbox.persisted(), json!({"vim": 40, "firefox": 12}));
}

#[test]
fn test_quiet_run_logs_nothing() {
    let sandbox = Sandbox::new();
    sandbox.seed_cache(r#"{"vim": 40}"#);

    let output = sandbox.run(&["print"]);

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_unwritable_cache_reports_storage_error() {
    let sandbox = Sandbox::new();
    let blocked = sandbox.data_home.join("cache.json");
    fs::create_dir_all(&blocked).unwrap();

    let output = sandbox.run_with_stdin(
        &["--cache-file", blocked.to_str().unwrap(), "update"],
        "vim\n",
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cache file error:"));
    assert!(stderr.contains("Update failed"));
}
