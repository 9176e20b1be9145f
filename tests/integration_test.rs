use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn booklog_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_booklog"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    booklog_cmd().current_dir(dir).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn write_config(dir: &Path, yaml: &str) {
    fs::create_dir_all(dir.join(".booklog")).unwrap();
    fs::write(dir.join(".booklog/config.yaml"), yaml).unwrap();
}

fn show_json(dir: &Path) -> serde_json::Value {
    let output = run(dir, &["show", "--json"]);
    assert!(output.status.success());
    serde_json::from_str(&stdout(&output)).unwrap()
}

fn fill_step1(dir: &Path) {
    for (path, value) in [
        ("title", "해리포터"),
        ("author", "J.K. 롤링"),
        ("status", "finished"),
        ("publishedDate", "1997-06-26"),
        ("startDate", "2024-01-01"),
        ("endDate", "2024-02-01"),
    ] {
        let output = run(dir, &["set", path, value]);
        assert!(output.status.success(), "set {} failed", path);
    }
}

#[test]
fn test_fresh_project_starts_at_step1_with_defaults() {
    let tmp = TempDir::new().unwrap();

    let state = show_json(tmp.path());
    assert_eq!(state["route"], "/form/step1");
    assert_eq!(state["record"]["totalPages"], 300);
    assert_eq!(state["record"]["quotes"][0]["page"], 1);
    assert_eq!(state["record"]["isPublic"], false);
}

#[test]
fn test_set_persists_between_runs() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["set", "title", "해리포터"]);
    assert!(output.status.success());
    assert!(tmp.path().join(".booklog/multi-step-form_v1.json").exists());

    let state = show_json(tmp.path());
    assert_eq!(state["record"]["title"], "해리포터");
}

#[test]
fn test_set_rejects_bad_input() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["set", "rating", "abc"]);
    assert!(!output.status.success());

    let output = run(tmp.path(), &["set", "nickname", "x"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown field path"));
}

#[test]
fn test_submit_with_missing_fields_is_rejected() {
    let tmp = TempDir::new().unwrap();

    run(tmp.path(), &["set", "author", "롤링"]);
    let output = run(tmp.path(), &["submit"]);

    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("title: 도서 제목을 입력해주세요."));
    assert!(out.contains("Focus: title"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Step 1 has 3 invalid field(s)"));

    let state = show_json(tmp.path());
    assert_eq!(state["route"], "/form/step1");
}

#[test]
fn test_full_walkthrough_reaches_complete() {
    let tmp = TempDir::new().unwrap();

    fill_step1(tmp.path());
    assert!(run(tmp.path(), &["submit"]).status.success());

    run(tmp.path(), &["set", "recommended", "yes"]);
    run(tmp.path(), &["set", "rating", "4"]);
    assert!(run(tmp.path(), &["submit"]).status.success());
    assert!(run(tmp.path(), &["submit"]).status.success());

    run(tmp.path(), &["set", "quotes.0.text", "두려움은 이름을 부를수록 커진다"]);
    run(tmp.path(), &["set", "quotes.0.page", "42"]);
    assert!(run(tmp.path(), &["submit"]).status.success());

    run(tmp.path(), &["set", "isPublic", "true"]);
    let output = run(tmp.path(), &["submit"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("/form/complete"));

    let state = show_json(tmp.path());
    assert_eq!(state["route"], "/form/complete");
    assert_eq!(state["record"]["rating"], 4.0);
    assert_eq!(state["record"]["quotes"][0]["page"], 42);
}

#[test]
fn test_back_and_goto() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["back"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("no previous step"));

    assert!(run(tmp.path(), &["goto", "4"]).status.success());
    assert_eq!(show_json(tmp.path())["route"], "/form/step4");

    let output = run(tmp.path(), &["back"]);
    assert!(stdout(&output).contains("/form/step3"));

    assert!(!run(tmp.path(), &["goto", "7"]).status.success());
}

#[test]
fn test_quote_add_and_remove() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["quote", "remove", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("last quote"));

    assert!(run(tmp.path(), &["quote", "add"]).status.success());
    let state = show_json(tmp.path());
    assert_eq!(state["record"]["quotes"].as_array().unwrap().len(), 2);

    assert!(run(tmp.path(), &["quote", "remove", "1"]).status.success());
    let state = show_json(tmp.path());
    assert_eq!(state["record"]["quotes"].as_array().unwrap().len(), 1);
}

#[test]
fn test_options_filter() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["options", "authors", "r.r."]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 2);
    assert!(out.contains("J.R.R. 톨킨"));
    assert!(out.contains("조지 R.R. 마틴"));

    let output = run(tmp.path(), &["options", "titles"]);
    assert_eq!(stdout(&output).lines().count(), 10);
}

#[test]
fn test_pick_binds_option_value() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["pick", "authors", "한강"]);
    assert!(output.status.success());
    assert_eq!(show_json(tmp.path())["record"]["author"], "7");

    let output = run(tmp.path(), &["pick", "titles", "없는 책"]);
    assert!(!output.status.success());
}

#[test]
fn test_preview_renders_record() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "debounce_ms: 10\n");

    run(tmp.path(), &["set", "title", "해리포터"]);
    run(tmp.path(), &["set", "rating", "3.5"]);
    run(tmp.path(), &["set", "totalPages", "1200"]);

    let output = run(tmp.path(), &["preview"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("제목: 해리포터"));
    assert!(out.contains("별점: ★★★⯪☆ 3.5"));
    assert!(out.contains("전체 페이지: 1,200"));
    assert!(out.contains("비공개 상태"));

    let output = run(tmp.path(), &["preview", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["title"], "해리포터");
}

#[test]
fn test_reset_forgets_saved_record() {
    let tmp = TempDir::new().unwrap();

    run(tmp.path(), &["set", "title", "해리포터"]);
    run(tmp.path(), &["goto", "3"]);
    assert!(run(tmp.path(), &["reset"]).status.success());

    let state = show_json(tmp.path());
    assert_eq!(state["route"], "/form/step1");
    assert_eq!(state["record"]["title"], "");
}

#[test]
fn test_colliding_storage_keys_are_rejected() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "record_key: \"a:b\"\nroute_key: \"a_b\"\n");

    let output = run(tmp.path(), &["set", "title", "해리포터"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("both map to"));
    assert!(!tmp.path().join(".booklog/a_b.json").exists());
}

#[test]
fn test_unparseable_saved_record_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".booklog")).unwrap();
    fs::write(tmp.path().join(".booklog/multi-step-form_v1.json"), "{not json").unwrap();

    let state = show_json(tmp.path());
    assert_eq!(state["record"]["totalPages"], 300);
}

#[test]
fn test_interactive_session_from_stdin() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path(), "debounce_ms: 10\n");

    let mut child = booklog_cmd()
        .current_dir(tmp.path())
        .arg("interactive")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all("set title 해리포터\nsubmit\nfly away\n".as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("step1 has errors:"));
    assert!(out.contains("Focus: author"));
    assert!(out.contains("Unknown command: fly away"));
    assert!(out.contains("제목: 해리포터"));

    assert_eq!(show_json(tmp.path())["record"]["title"], "해리포터");
}
