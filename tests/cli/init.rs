use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["root"], "./lang");
    assert_eq!(parsed["language"], "en");
    assert_eq!(parsed["files"][0], "**/*.txt");
    assert_eq!(parsed["delimiters"]["openLabel"], "[:");
    assert_eq!(parsed["unresolvedVariables"], "empty");

    // 2-space indentation
    assert!(content.contains("\n  \"root\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .glossarc.json

    ----- stderr -----
    ");
    assert!(test.root().join(".glossarc.json").exists());

    let content = test.read_file(".glossarc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_files(&[(".glossarc.json", "{}")])?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .glossarc.json already exists
    ");
    assert_eq!(test.read_file(".glossarc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("lang/en/main.txt", "[:hi:]{:Hello:}\n")?;

    let (stdout, stderr, code) = run(test.check_command())?;
    assert_eq!(
        code,
        Some(0),
        "Check command should work with initialized config. stderr: {}",
        stderr
    );
    assert_eq!(stdout, "\u{2713} Checked 1 language, 1 file - no issues found\n");

    Ok(())
}
