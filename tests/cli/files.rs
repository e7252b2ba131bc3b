use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout, translation_path};

#[test]
fn test_show() -> Result<()> {
    let test = CliTest::with_translations(&[("en", "common", r#"{"title":"Hi"}"#)])?;

    let output = test.run(&["show", "en", "common"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "{\n  \"title\": \"Hi\"\n}\n");
    Ok(())
}

#[test]
fn test_show_not_found() -> Result<()> {
    let test = CliTest::with_translations(&[])?;

    let output = test.run(&["show", "en", "common"])?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "\u{2718} not found: translation 'en/common' not found\n"
    );
    Ok(())
}

#[test]
fn test_create_and_collision() -> Result<()> {
    let test = CliTest::with_translations(&[])?;

    let output = test.run(&["create", "en", "common", "--content", r#"{"title":"Hi"}"#])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Created en/common.json\n");
    assert_eq!(test.read_translation("en", "common")?, json!({"title": "Hi"}));

    let output = test.run(&["create", "en", "common"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("validation error: translation 'en/common' already exists"));
    Ok(())
}

#[test]
fn test_delete() -> Result<()> {
    let test = CliTest::with_translations(&[("en", "common", "{}")])?;

    let output = test.run(&["delete", "en", "common"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(!test.root().join(translation_path("en", "common")).exists());
    Ok(())
}

#[test]
fn test_rename() -> Result<()> {
    let test = CliTest::with_translations(&[("en", "old", r#"{"a":"b"}"#)])?;

    let output = test.run(&["rename", "en", "old", "new"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Renamed en/old.json to en/new.json\n");
    assert!(!test.root().join(translation_path("en", "old")).exists());
    assert_eq!(test.read_translation("en", "new")?, json!({"a": "b"}));
    Ok(())
}

#[test]
fn test_upload_requires_matching_name() -> Result<()> {
    let test = CliTest::with_translations(&[("en", "common", "{}")])?;
    test.write_file("upload/auth.json", r#"{"login":"Log in"}"#)?;
    test.write_file("upload/common.json", r#"{"title":"Hi"}"#)?;

    let output = test.run(&["upload", "en", "common", "upload/auth.json"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid translation name"));
    assert_eq!(test.read_translation("en", "common")?, json!({}));

    let output = test.run(&["upload", "en", "common", "upload/common.json"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_translation("en", "common")?, json!({"title": "Hi"}));
    Ok(())
}

#[test]
fn test_add_field() -> Result<()> {
    let test = CliTest::with_translations(&[("en", "common", r#"{"title":"Hi"}"#)])?;

    let output = test.run(&["add-field", "en", "common", "nav.home", "--value", "Home"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} nav.home added in en/common.json\n");
    assert_eq!(
        test.read_translation("en", "common")?,
        json!({"title": "Hi", "nav": {"home": "Home"}})
    );

    let output = test.run(&["add-field", "en", "common", "count", "--value", "3", "--json"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_translation("en", "common")?["count"], 3);
    Ok(())
}

#[test]
fn test_generate_without_credentials() -> Result<()> {
    let test = CliTest::with_translations(&[("en", "common", r#"{"title":"Hi"}"#)])?;

    let output = test.run(&["generate", "en", "common", "de"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("validation error: AI translation is not configured"));
    assert!(!test.root().join(translation_path("de", "common")).exists());
    Ok(())
}
