use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str], file: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clireader"))
        .arg("--print")
        .args(args)
        .arg(file)
        .env_remove("RUST_LOG")
        .output()
        .expect("run clireader")
}

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents.as_bytes()).expect("write file");
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn detect_joins_and_wraps_paragraphs() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(&temp_dir, "menu.txt", "spam eggs\nbacon ham\n\n* beans\n");
    let output = run(&["--width", "15"], &path);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "spam eggs bacon\nham\n\n* beans\n");
}

#[test]
fn pages_are_separated_by_form_feeds() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(&temp_dir, "menu.txt", "a\nb\nc\n");
    let output = run(&["--wrap", "no-wrap", "--height", "2"], &path);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "a\nb\n\x0c\nc\n");
}

#[test]
fn man_mode_prints_plain_text_when_piped() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(
        &temp_dir,
        "spam.1",
        ".\\\" comment\n.SH NAME\nspam eggs\n.SH OPTIONS\n.TP\n.B \\-e\neggs please\n",
    );
    let output = run(&["--wrap", "man", "--width", "30"], &path);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(!text.contains('\x1b'), "{text:?}");
    assert!(text.starts_with("NAME\n    spam eggs\n"), "{text:?}");
    assert!(text.contains("OPTIONS\n"), "{text:?}");
    assert!(!text.contains("comment"), "{text:?}");
}

#[test]
fn missing_file_fails_with_message() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("absent.txt");
    let output = run(&[], &path);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("absent.txt does not exist."), "{}", stderr(&output));
}

#[test]
fn directory_fails_with_message() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let output = run(&[], temp_dir.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("is a directory."), "{}", stderr(&output));
}

#[test]
fn short_custom_frame_is_rejected_up_front() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(&temp_dir, "menu.txt", "spam\n");
    let output = run(&["--custom-frame", "abc"], &path);
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("must be 14 characters (got 3)"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn config_file_sets_wrap_mode() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(&temp_dir, "menu.txt", "spam\neggs\n");
    let config = write_file(&temp_dir, "config.json", r#"{"wrap_mode": "no_wrap"}"#);
    let config_arg = config.to_str().expect("utf-8 path");
    let output = run(&["--config", config_arg], &path);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "spam\neggs\n");
}
