//! CLI integration tests
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lustre");
    cmd.env("HOME", "/nonexistent-lustre-home");
    cmd
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_cli_file_input() {
    let output = cmd().arg(get_fixture_path("article.json")).output().unwrap();
    assert!(output.status.success());

    let article = stdout_json(&output);
    let content = article["content"].as_str().unwrap();
    assert!(content.contains(r#"<img src="https://example.com/img/valley-1920.jpg""#));
    assert!(!content.contains("loading="));
    assert_eq!(article["enclosures"][0]["type"], "image/jpeg");
    assert_eq!(article["enclosures"][1]["type"], "audio/mpeg");
}

#[test]
fn test_cli_preserves_passthrough_fields() {
    let output = cmd().arg(get_fixture_path("article.json")).output().unwrap();
    let article = stdout_json(&output);

    assert_eq!(article["guid"], "tag:example.com,2024:post-42");
    assert_eq!(article["feed_id"], 7);
    assert_eq!(article["score"], 0);
    assert_eq!(article["enclosures"][1]["length"], 120394);
}

#[test]
fn test_cli_stdin_array_input() {
    let json = std::fs::read_to_string(get_fixture_path("articles.json")).unwrap();
    let output = cmd().arg("-").write_stdin(json).output().unwrap();
    assert!(output.status.success());

    let articles = stdout_json(&output);
    let articles = articles.as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert!(articles[0]["content"].as_str().unwrap().starts_with(r#"<img src="https://cdn.example.com/a@2x.jpg""#));
    assert_eq!(articles[1]["content"], "");
    assert_eq!(articles[1]["enclosures"][0]["type"], "image/jpeg");
}

#[test]
fn test_cli_no_inline() {
    let output = cmd().args(["--no-inline", &get_fixture_path("article.json")]).output().unwrap();
    let article = stdout_json(&output);

    let content = article["content"].as_str().unwrap();
    assert!(content.contains("data-src="));
    assert!(content.contains(r#"loading="lazy""#));
}

#[test]
fn test_cli_no_fix_types() {
    let output = cmd().args(["--no-fix-types", &get_fixture_path("article.json")]).output().unwrap();
    let article = stdout_json(&output);
    assert_eq!(article["enclosures"][0]["type"], "");
}

#[test]
fn test_cli_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.json");
    std::fs::write(&config, r#"{"inline_enhancement": false}"#).unwrap();

    let output = cmd()
        .args(["--config", config.to_str().unwrap(), &get_fixture_path("article.json")])
        .output()
        .unwrap();
    let article = stdout_json(&output);

    assert!(article["content"].as_str().unwrap().contains("data-src="));
    assert_eq!(article["enclosures"][0]["type"], "image/jpeg");
}

#[test]
fn test_cli_missing_config_file() {
    cmd()
        .args(["--config", "/nonexistent/lustre.json", &get_fixture_path("article.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("output.json");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .arg(get_fixture_path("article.json"))
        .assert()
        .success();

    assert!(output.exists());
    let article: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(article["title"], "Spring in the valley");
}

#[test]
fn test_cli_pretty() {
    cmd()
        .args(["--pretty", &get_fixture_path("article.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"guid\""));
}

#[test]
fn test_cli_null_content_becomes_empty() {
    cmd()
        .arg("-")
        .write_stdin(r#"{"title": "Empty", "content": null}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""content":"""#));
}

#[test]
fn test_cli_null_fields_and_string_length() {
    let output = cmd()
        .arg("-")
        .write_stdin(
            r#"{"title": null, "link": null, "author": null, "content": null,
                "enclosures": [{"link": "https://x/a.png", "type": null, "length": "12345"}]}"#,
        )
        .output()
        .unwrap();
    assert!(output.status.success());

    let article = stdout_json(&output);
    assert_eq!(article["content"], "");
    assert_eq!(article["author"], "");
    assert_eq!(article["enclosures"][0]["type"], "image/png");
    assert_eq!(article["enclosures"][0]["length"], 12345);
}

#[test]
fn test_cli_unreadable_article_does_not_abort_batch() {
    let output = cmd()
        .arg("-")
        .write_stdin(
            r#"[{"title": "bad", "enclosures": "not-a-list", "content": null},
                {"title": "good", "enclosures": [{"link": "https://x/b.gif", "type": ""}]}]"#,
        )
        .output()
        .unwrap();
    assert!(output.status.success());

    let articles = stdout_json(&output);
    assert_eq!(articles[0]["enclosures"], "not-a-list");
    assert_eq!(articles[0]["content"], "");
    assert_eq!(articles[1]["enclosures"][0]["type"], "image/gif");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Passing through unreadable article"));
}

#[test]
fn test_cli_og_without_link_does_not_fetch() {
    cmd()
        .args(["--extract-og", "--enhance-content", "-"])
        .write_stdin(r#"{"title": "No link", "content": "<p>x</p>"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>x</p>"));
}

#[test]
fn test_cli_invalid_json() {
    cmd()
        .arg("-")
        .write_stdin("<html>not json</html>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is not valid JSON"));
}

#[test]
fn test_cli_non_object_input() {
    cmd()
        .arg("-")
        .write_stdin(r#""just a string""#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input must be an article object"));
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("/nonexistent/file.json").assert().failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", &get_fixture_path("article.json")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Enriching articles"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--upgrade-enclosures"));
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("1.0.0"));
}
