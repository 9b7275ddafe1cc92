use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_replaces_environment_variables_in_place() -> Result<()> {
    let test = CliTest::with_file(
        "app.conf",
        "host=${DB_HOST}\nport=${DB_PORT:5432}\nname=app\n",
    )?;

    let output = test
        .command_with_env(&[("DB_HOST", "db.internal")])
        .arg("app.conf")
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("app.conf")?,
        "host=db.internal\nport=5432\nname=app\n"
    );
    assert!(!test.exists("app.conf.tmp"));
    assert!(stdout(&output).contains("Processed 1 file (2 lines changed)"));
    Ok(())
}

#[test]
fn test_comma_separated_paths() -> Result<()> {
    let test = CliTest::with_file("a.txt", "${A}")?;
    test.write_file("b.txt", "${B:two}")?;

    let output = test
        .command_with_env(&[("A", "one")])
        .arg("a.txt,b.txt")
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(test.read_file("a.txt")?, @"one");
    assert_snapshot!(test.read_file("b.txt")?, @"two");
    Ok(())
}

#[test]
fn test_missing_required_variable_leaves_file_untouched() -> Result<()> {
    let original = "ok=${SET}\nsecret=${NOT_SET}\n";
    let test = CliTest::with_file("app.conf", original)?;

    let output = test
        .command_with_env(&[("SET", "1")])
        .arg("app.conf")
        .output()?;

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(test.read_file("app.conf")?, original);
    assert!(!test.exists("app.conf.tmp"));
    assert!(stderr(&output).contains("Environment Variable NOT_SET is required"));
    Ok(())
}

#[test]
fn test_failing_file_does_not_block_others() -> Result<()> {
    let test = CliTest::with_file("bad.txt", "${NOT_SET}")?;
    test.write_file("good.txt", "${SET}")?;

    let output = test
        .command_with_env(&[("SET", "1")])
        .args(["bad.txt", "good.txt"])
        .output()?;

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(test.read_file("bad.txt")?, "${NOT_SET}");
    assert_eq!(test.read_file("good.txt")?, "1");
    assert!(stdout(&output).contains("1 of 2 files failed"));
    Ok(())
}

#[test]
fn test_properties_file_replaces_environment() -> Result<()> {
    let test = CliTest::with_file("app.conf", "user=${USER_NAME:nobody}")?;
    test.write_file("prod.properties", "# production\nUSER_NAME = admin\n")?;

    let output = test
        .command_with_env(&[("USER_NAME", "from-env")])
        .args(["-p", "prod.properties", "app.conf"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(test.read_file("app.conf")?, @"user=admin");
    Ok(())
}

#[test]
fn test_properties_source_never_falls_back_to_environment() -> Result<()> {
    let test = CliTest::with_file("app.conf", "home=${ONLY_IN_ENV}")?;
    test.write_file("empty.properties", "")?;

    let output = test
        .command_with_env(&[("ONLY_IN_ENV", "x")])
        .args(["-p", "empty.properties", "app.conf"])
        .output()?;

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(test.read_file("app.conf")?, "home=${ONLY_IN_ENV}");
    Ok(())
}

#[test]
fn test_missing_properties_file_is_io_error() -> Result<()> {
    let test = CliTest::with_file("app.conf", "x")?;

    let output = test
        .command()
        .args(["-p", "nope.properties", "app.conf"])
        .output()?;

    assert_eq!(output.status.code(), Some(6));
    assert!(stderr(&output).contains("Failed to read properties file"));
    Ok(())
}

#[test]
fn test_origin_target_mapping() -> Result<()> {
    let test = CliTest::with_file("templates/app.tpl", "v=${V}")?;
    test.write_file("out/.keep", "")?;

    let output = test
        .command_with_env(&[("V", "42")])
        .arg("templates/app.tpl:out/app.conf")
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("templates/app.tpl")?, "v=${V}");
    assert_snapshot!(test.read_file("out/app.conf")?, @"v=42");
    Ok(())
}

#[test]
fn test_source_file_lists_paths() -> Result<()> {
    let test = CliTest::with_file("a.txt", "${A}")?;
    test.write_file("nested/b.txt", "${A}${A}")?;
    test.write_file("files.list", "a.txt\n./nested/b.txt\n")?;

    let output = test
        .command_with_env(&[("A", "x")])
        .args(["-s", "files.list"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("a.txt")?, "x");
    assert_eq!(test.read_file("nested/b.txt")?, "xx");
    Ok(())
}

#[test]
fn test_glob_pattern() -> Result<()> {
    let test = CliTest::with_file("conf/a.yml", "${A}")?;
    test.write_file("conf/b.yml", "${A:z}")?;
    test.write_file("conf/c.txt", "${UNTOUCHED}")?;

    let output = test
        .command_with_env(&[("A", "y")])
        .arg("conf/*.yml")
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("conf/a.yml")?, "y");
    assert_eq!(test.read_file("conf/b.yml")?, "y");
    assert_eq!(test.read_file("conf/c.txt")?, "${UNTOUCHED}");
    Ok(())
}

#[test]
fn test_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("missing.txt").output()?;

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("(File not found)"));
    Ok(())
}

#[test]
fn test_invalid_path_entry() -> Result<()> {
    let test = CliTest::with_file("a.txt", "x")?;

    let output = test.command().arg("a.txt:").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid path"));
    Ok(())
}

#[test]
fn test_no_paths_prints_usage() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"));
    Ok(())
}

#[test]
fn test_unknown_flag_is_invalid_arguments() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["--bogus", "a.txt"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_backup() -> Result<()> {
    let test = CliTest::with_file("app.conf", "v=${V}\n")?;

    let output = test
        .command_with_env(&[("V", "1")])
        .args(["-b", "app.conf"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("app.conf.bak")?, "v=${V}\n");
    assert_eq!(test.read_file("app.conf")?, "v=1\n");
    Ok(())
}

#[test]
fn test_existing_backup_requires_force() -> Result<()> {
    let test = CliTest::with_file("app.conf", "v=${V}")?;
    test.write_file("app.conf.bak", "old")?;

    let output = test
        .command_with_env(&[("V", "1")])
        .args(["-b", "app.conf"])
        .output()?;

    assert_eq!(output.status.code(), Some(4));
    assert_eq!(test.read_file("app.conf")?, "v=${V}");
    assert_eq!(test.read_file("app.conf.bak")?, "old");

    let output = test
        .command_with_env(&[("V", "1")])
        .args(["--force-backup", "app.conf"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("app.conf")?, "v=1");
    assert_eq!(test.read_file("app.conf.bak")?, "v=${V}");
    Ok(())
}

#[test]
fn test_escaped_brace_and_crlf() -> Result<()> {
    let test = CliTest::with_file("t.txt", "a=${X:{\\}}\r\nb=${Y:}\r\n")?;

    let output = test.command().arg("t.txt").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("t.txt")?, "a={}\r\nb=\r\n");
    Ok(())
}

#[test]
fn test_trace_prints_lines() -> Result<()> {
    let test = CliTest::with_file("t.txt", "${A}\nplain\n")?;

    let output = test
        .command_with_env(&[("A", "1")])
        .args(["--trace", "t.txt"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("input : ${A}\noutput: 1\ninput : plain\noutput: plain\n"));
    assert!(stderr(&output).contains("Moving tmp file from:"));
    Ok(())
}

#[test]
fn test_non_converging_value_is_internal_error() -> Result<()> {
    let test = CliTest::with_file("t.txt", "${LOOP}")?;

    let output = test
        .command_with_env(&[("LOOP", "${LOOP}")])
        .arg("t.txt")
        .output()?;

    assert_eq!(output.status.code(), Some(70));
    assert_eq!(test.read_file("t.txt")?, "${LOOP}");
    Ok(())
}

#[test]
fn test_destination_shared_with_another_entry_is_rejected() -> Result<()> {
    let test = CliTest::with_file("a.tpl", "v=${V}")?;
    test.write_file("b.conf", "w=${V}")?;

    let output = test
        .command_with_env(&[("V", "1")])
        .arg("a.tpl:b.conf,b.conf")
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("used by more than one entry"));
    assert_eq!(test.read_file("b.conf")?, "w=${V}");
    Ok(())
}

#[test]
fn test_properties_surrogate_pair_escape() -> Result<()> {
    let test = CliTest::with_file("app.conf", "icon=${ICON}")?;
    test.write_file("app.properties", "ICON=\\uD83D\\uDE00\n")?;

    let output = test
        .command()
        .args(["-p", "app.properties", "app.conf"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("app.conf")?, "icon=\u{1F600}");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_non_unicode_variable_is_not_treated_as_unset() -> Result<()> {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let test = CliTest::with_file("app.conf", "name=${NAME:fallback}")?;

    let output = test
        .command()
        .env("NAME", OsStr::from_bytes(b"caf\xe9"))
        .arg("app.conf")
        .output()?;

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("Environment Variable NAME is not valid unicode"));
    assert_eq!(test.read_file("app.conf")?, "name=${NAME:fallback}");
    Ok(())
}
