use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_clean_languages() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en/main.txt", "[:hi:]{:Hello, (:name:)!:}\n"),
        ("lang/fr/main.txt", "[:hi:]{:Salut, (:name:) !:}\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 2 languages, 2 files - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_syntax_error() -> Result<()> {
    let test = CliTest::with_files(&[(
        "lang/en/main.txt",
        "[:hi:]{:Hello:}\n[:bye:]{:Bye\n",
    )])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error[en]: unexpected end of file in value of `bye`  syntax
      --> lang/en/main.txt:3:1

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_unexpected_token_shows_source_line() -> Result<()> {
    let test = CliTest::with_files(&[("lang/en/main.txt", "[:a:]{:one [:b:] two:}\n")])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error[en]: unexpected open-label `[:` in value  syntax
      --> lang/en/main.txt:1:12
      |
    1 | [:a:]{:one [:b:] two:}
      |            ^

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_duplicate_key_across_files() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en/a.txt", "[:x:]{:1:}"),
        ("lang/en/b.txt", "[:x:]{:2:}"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error[en]: duplicate key `x`  duplicate-key
      --> lang/en/b.txt:1:1
      |
    1 | [:x:]{:2:}
      | ^
      = note: first declared at lang/en/a.txt:1:1

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_circular_embed() -> Result<()> {
    let test = CliTest::with_files(&[("lang/en/main.txt", "[:a:]{:<:b:>:}\n[:b:]{:<:a:>:}\n")])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error[en]: circular embed: a -> b -> a  circular-embed

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_embed_points_at_embed() -> Result<()> {
    let test = CliTest::with_files(&[("lang/en/main.txt", "[:a:]{:see <:nowhere:>:}\n")])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error[en]: `a` embeds `nowhere`, which is not defined  missing-embed
      --> lang/en/main.txt:1:12
      |
    1 | [:a:]{:see <:nowhere:>:}
      |            ^

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_translation_missing_declared_file() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en/main.txt", "[:hi:]{:Hello:}"),
        ("lang/en/menu.txt", "[:open:]{:Open:}"),
        ("lang/fr/main.txt", "[:hi:]{:Salut:}"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error[fr]: language `fr` is missing declared file(s): menu.txt  file-set
      = note: every language must provide the declared files

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_parity_warnings_do_not_fail() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en/main.txt", "[:hi:]{:Hello:}\n[:bye:]{:Bye:}\n"),
        ("lang/fr/main.txt", "[:hi:]{:Salut:}\n[:old:]{:Vieux:}\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    warning[fr]: `bye` has no text in `fr`  missing-translation
      --> lang/en/main.txt:2:1
      |
    2 | [:bye:]{:Bye:}
      | ^
      = note: defined in primary language `en`

    warning[fr]: `old` is not defined in primary language `en`  orphan-key
      --> lang/fr/main.txt:2:1
      |
    2 | [:old:]{:Vieux:}
      | ^

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_selected_languages_only() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en/main.txt", "[:hi:]{:Hello:}"),
        ("lang/fr/main.txt", "[:hi:]{:Salut:}"),
        ("lang/de/main.txt", "[:hi:]{:Hallo:"),
    ])?;

    assert_cmd_snapshot!(test.check_command().arg("fr"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 2 languages, 2 files - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_fail_entry_from_config_is_checked() -> Result<()> {
    let test = CliTest::with_files(&[
        (".glossarc.json", r#"{ "failEntry": "see <:help:>" }"#),
        ("lang/en/main.txt", "[:hi:]{:Hello:}"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error[en]: `<fail entry>` embeds `help`, which is not defined  missing-embed

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_custom_delimiters_and_globs() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".glossarc.json",
            r#"{
                "root": "i18n",
                "files": ["texts/*.lang"],
                "delimiters": { "openLabel": "@", "closeLabel": "=", "openValue": "<<", "closeValue": ">>" }
            }"#,
        ),
        ("i18n/en/texts/main.lang", "@hi= <<Hello>>\n"),
        ("i18n/en/notes.md", "not declared"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 language, 1 file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_files(&[
        (".glossarc.json", r#"{ "delimiters": { "openVar": "[:" } }"#),
        ("lang/en/main.txt", "[:hi:]{:Hello:}"),
    ])?;

    let (stdout, stderr, code) = run(test.check_command())?;
    assert_eq!(stdout, "");
    assert!(stderr.starts_with("Error: "));
    assert!(stderr.contains("Invalid 'delimiters' in config"));
    assert_eq!(code, Some(2));

    Ok(())
}

#[test]
fn test_line_break_delimiter_is_rejected() -> Result<()> {
    let test = CliTest::with_files(&[
        (".glossarc.json", r#"{ "delimiters": { "closeValue": "\n;;" } }"#),
        ("lang/en/main.txt", "[:k:]{:v\n;;"),
    ])?;

    let (_, stderr, code) = run(test.check_command())?;
    assert!(stderr.contains("close-value delimiter must not contain a line break"));
    assert_eq!(code, Some(2));

    Ok(())
}

#[test]
fn test_missing_root_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let (_, stderr, code) = run(test.check_command())?;
    assert!(stderr.contains("Failed to list languages under lang"));
    assert_eq!(code, Some(2));

    Ok(())
}
