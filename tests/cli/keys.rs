use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_keys_are_sorted_across_files() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en/b.txt", "[:zeta:]{:z:}\n[:alpha:]{:a:}\n"),
        ("lang/en/a.txt", "[:menu.open:]{:Open:}\n"),
    ])?;

    assert_cmd_snapshot!(test.keys_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    alpha
    menu.open
    zeta

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_keys_for_other_language() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en/main.txt", "[:hi:]{:Hello:}\n"),
        ("lang/de/main.txt", "[:hallo:]{:Hallo:}\n"),
    ])?;

    assert_cmd_snapshot!(test.keys_command().args(["-l", "de"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    hallo

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_keys_with_root_override() -> Result<()> {
    let test = CliTest::with_files(&[("texts/en/main.txt", "[:hi:]{:Hello:}\n")])?;

    assert_cmd_snapshot!(test.keys_command().args(["--root", "texts"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    hi

    ----- stderr -----
    ");

    Ok(())
}
