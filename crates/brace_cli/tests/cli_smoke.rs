use std::path::PathBuf;
use std::process::{Command, Output};

/// Write `source` to a scratch file unique to this test.
fn write_source(name: &str, source: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("brace_cli_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path
}

fn run(args: &[&str], path: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_brace"))
        .args(args)
        .arg(path)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn prints_canonical_text() {
    let path = write_source("canonical.brace", "a = 1\nb = 2\na>b ? a+1:b\nfoo()");
    let output = run(&[], &path);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "a = 1\nb = 2\na > b ? a + 1 : b\nfoo()\n");
}

#[test]
fn prints_expression() {
    let path = write_source("expression.brace", "x  =  try!  f( y :1)");
    let output = run(&["--expression"], &path);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "x = try! f(y: 1)\n");
}

#[test]
fn prints_json_tree() {
    let path = write_source("tree.brace", "let x: Int? = nil");
    let output = run(&["--json"], &path);
    assert!(output.status.success());
    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["statements"].as_array().unwrap().len(), 1);
}

#[test]
fn lists_comments() {
    let path = write_source("comments.brace", "// first\nf() /* second */");
    let output = run(&["--comments"], &path);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("// 1:1:  first"), "{text}");
    assert!(text.contains("// 2:5:  second "), "{text}");
}

#[test]
fn reports_parse_errors() {
    let path = write_source("broken.brace", "a = (b");
    let output = run(&[], &path);
    assert_eq!(output.status.code(), Some(1));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("Found 1 error."), "{err}");
}

#[test]
fn honours_depth_limit() {
    let path = write_source("deep.brace", "((((((a))))))");
    assert!(run(&[], &path).status.success());
    assert_eq!(run(&["--max-depth", "3"], &path).status.code(), Some(1));
}

#[test]
fn shebang_can_be_disabled() {
    let path = write_source("script.brace", "#!/bin/sh\nprint(1)");
    let output = run(&[], &path);
    assert_eq!(stdout(&output), "#!/bin/sh\n\nprint(1)\n");
    assert_eq!(run(&["--no-shebang"], &path).status.code(), Some(1));
}
