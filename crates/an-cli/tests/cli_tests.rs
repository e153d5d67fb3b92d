use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn annotr(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_annotr"))
        .args(args)
        .env("ANNOTR_HOME", home)
        .env_remove("ANNOTR_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("run annotr")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn init_writes_default_ollama_config_once() {
    let home = TempDir::new().unwrap();

    let first = annotr(home.path(), &["init"]);
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(home.path().join("config.json")).unwrap()).unwrap();
    assert_eq!(written["defaultProvider"], "ollama");
    assert_eq!(written["defaultModel"], "qwen2.5-coder:1.5b");
    assert_eq!(written["commentStyle"], "line");

    let second = annotr(home.path(), &["init", "--style", "doc"]);
    assert!(!second.status.success());
    assert!(stdout(&second).contains("Configuration already exists"));
}

#[test]
fn init_infers_provider_from_key() {
    let home = TempDir::new().unwrap();
    let out = annotr(home.path(), &["init", "--api-key", "gsk_test", "--style", "block"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(home.path().join("config.json")).unwrap()).unwrap();
    assert_eq!(written["defaultProvider"], "groq");
    assert_eq!(written["apiKeys"]["groq"], "gsk_test");
    assert_eq!(written["commentStyle"], "block");
}

#[test]
fn init_rejects_mismatched_key() {
    let home = TempDir::new().unwrap();
    let out = annotr(home.path(), &["init", "--provider", "anthropic", "--api-key", "gsk_wrong"]);
    assert!(!out.status.success());
    assert!(!home.path().join("config.json").exists());
}

#[test]
fn annotate_without_config_points_to_init() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let file = work.path().join("main.go");
    fs::write(&file, "package main\n\nfunc main() {}\n").unwrap();

    let out = annotr(home.path(), &[file.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("annotr init"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "package main\n\nfunc main() {}\n");
}

#[test]
fn clear_directory_with_yes() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(work.path().join("a.go"), "// A.\nfunc a() {}\n").unwrap();
    fs::write(work.path().join("b.py"), "# B.\ndef b():\n    pass\n").unwrap();

    let out = annotr(home.path(), &["clear", work.path().to_str().unwrap(), "--yes"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Done! Cleared comments from 2 of 2 files"));
    assert_eq!(fs::read_to_string(work.path().join("a.go")).unwrap(), "func a() {}\n");
    assert_eq!(fs::read_to_string(work.path().join("b.py")).unwrap(), "def b():\n    pass\n");
}

#[test]
fn clear_dry_run_prints_without_writing() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let file = work.path().join("app.ts");
    fs::write(&file, "/* header */\nexport const x = 1;\n").unwrap();

    let out = annotr(home.path(), &["clear", "--dry-run", file.to_str().unwrap()]);
    assert!(out.status.success());
    let printed = stdout(&out);
    assert!(printed.contains("export const x = 1;"));
    assert!(printed.contains("Removed 1 comment blocks"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "/* header */\nexport const x = 1;\n");
}

#[test]
fn directory_prompt_declines_on_closed_stdin() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(work.path().join("a.go"), "// A.\nfunc a() {}\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_annotr"))
        .args(["clear", work.path().to_str().unwrap()])
        .env("ANNOTR_HOME", home.path())
        .stdin(std::process::Stdio::null())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Clear comments from a.go? (y/n): "));
    assert_eq!(fs::read_to_string(work.path().join("a.go")).unwrap(), "// A.\nfunc a() {}\n");
}
