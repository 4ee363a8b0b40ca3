use anyhow::Result;
use insta::assert_snapshot;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

fn project() -> Result<CliTest> {
    CliTest::with_files(&[
        (
            "lang/en/main.txt",
            "# greetings\n[:greet:]{:Hello, (:name:)!:}\n[:welcome:]{:<:greet:> Welcome to (:app:).:}\n",
        ),
        (
            "lang/fr/main.txt",
            "[:greet:]{:Bonjour, (:name:) !:}\n[:welcome:]{:<:greet:> Bienvenue dans (:app:).:}\n",
        ),
    ])
}

#[test]
fn test_get_with_ad_hoc_substitution() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.get_command("greet").args(["--set", "name=Ada"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Hello, Ada!

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_get_embed_and_permanent_substitution() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".glossarc.json",
        r#"{ "substitutions": { "app": "Glossa" } }"#,
    )?;

    let (stdout, _, code) = run({
        let mut cmd = test.get_command("welcome");
        cmd.args(["--set", "name=Ada", "--language", "fr"]);
        cmd
    })?;
    assert_snapshot!(stdout.trim_end(), @"Bonjour, Ada ! Bienvenue dans Glossa.");
    assert_eq!(code, Some(0));

    Ok(())
}

#[test]
fn test_get_ad_hoc_overrides_permanent() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".glossarc.json",
        r#"{ "substitutions": { "app": "Glossa", "name": "everyone" } }"#,
    )?;

    let (stdout, _, _) = run(test.get_command("greet"))?;
    assert_eq!(stdout, "Hello, everyone!\n");

    let (stdout, _, _) = run({
        let mut cmd = test.get_command("greet");
        cmd.args(["--set", "name=Ada"]);
        cmd
    })?;
    assert_eq!(stdout, "Hello, Ada!\n");

    Ok(())
}

#[test]
fn test_get_unresolved_variable_policy() -> Result<()> {
    let test = project()?;

    let (stdout, stderr, _) = run(test.get_command("greet"))?;
    assert_eq!(stdout, "Hello, !\n");
    assert_eq!(stderr.trim(), "WARN no substitution for variable `name`");

    let (stdout, _, _) = run({
        let mut cmd = test.get_command("greet");
        cmd.args(["--unresolved", "placeholder"]);
        cmd
    })?;
    assert_eq!(stdout, "Hello, (:name:)!\n");

    Ok(())
}

#[test]
fn test_get_missing_key_uses_fail_entry() -> Result<()> {
    let test = project()?;

    let (stdout, stderr, code) = run(test.get_command("nope"))?;
    assert_eq!(stdout, "missing text for 'nope'\n");
    assert!(stderr.contains("no entry for key `nope`"));
    assert_eq!(code, Some(0));

    Ok(())
}

#[test]
fn test_get_custom_fail_entry() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".glossarc.json",
        r#"{ "failEntry": "<:greet:> (:__key__:) is missing" }"#,
    )?;

    let (stdout, _, code) = run({
        let mut cmd = test.get_command("nope");
        cmd.args(["--set", "name=Ada"]);
        cmd
    })?;
    assert_eq!(stdout, "Hello, Ada! nope is missing\n");
    assert_eq!(code, Some(0));

    Ok(())
}

#[test]
fn test_get_reports_compile_errors() -> Result<()> {
    let test = project()?;
    test.write_file("lang/en/main.txt", "[:greet:]{:Hello <:nobody:>:}\n")?;

    assert_cmd_snapshot!(test.get_command("greet"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error[en]: `greet` embeds `nobody`, which is not defined  missing-embed
      --> lang/en/main.txt:1:18
      |
    1 | [:greet:]{:Hello <:nobody:>:}
      |                  ^

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_get_rejects_malformed_substitution() -> Result<()> {
    let test = project()?;

    let (_, stderr, code) = run({
        let mut cmd = test.get_command("greet");
        cmd.args(["--set", "name"]);
        cmd
    })?;
    assert!(stderr.contains("expected NAME=VALUE"));
    assert_eq!(code, Some(2));

    Ok(())
}
