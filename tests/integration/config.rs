//! Transforms described in TOML.

use anyhow::Result;
use filewrap::config::WrapConfig;
use filewrap::core::ErrorKind;
use filewrap::test_utils::{buffer_file, contents_string};
use tempfile::TempDir;

#[tokio::test]
async fn test_load_inline_config() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = dir.path().join("wrap.toml");
    tokio::fs::write(
        &config_path,
        r#"
template = "BEFORE <%= data.contents %> <%= data.someVar %> AFTER"

[data]
someVar = "someVal"

[options]
variable = "data"
"#,
    )
    .await?;

    let wrap = WrapConfig::load_from(&config_path).await?.build()?;
    let file = wrap.process(buffer_file("hello.txt", "Hello")).await?;

    assert_eq!(contents_string(file).await, "BEFORE Hello someVal AFTER");
    Ok(())
}

#[tokio::test]
async fn test_relative_src_resolves_against_config_dir() -> Result<()> {
    let dir = TempDir::new()?;
    tokio::fs::create_dir_all(dir.path().join("layouts")).await?;
    tokio::fs::write(dir.path().join("layouts/page.tpl"), "<main><%= contents %></main>").await?;

    let config_path = dir.path().join("wrap.toml");
    tokio::fs::write(
        &config_path,
        r#"
[template]
src = "layouts/page.tpl"
"#,
    )
    .await?;

    let wrap = WrapConfig::load_from(&config_path).await?.build()?;
    let file = wrap.process(buffer_file("index.txt", "hi")).await?;

    assert_eq!(contents_string(file).await, "<main>hi</main>");
    Ok(())
}

#[tokio::test]
async fn test_template_table_without_src() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = dir.path().join("wrap.toml");
    tokio::fs::write(&config_path, "[template]\n").await?;

    let error = WrapConfig::load_from(&config_path).await?.build().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Configuration);
    assert!(error.to_string().contains("Expecting `src` option"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_engine_in_config() -> Result<()> {
    let config = WrapConfig::from_toml_str(
        r#"
template = "x"

[options]
engine = "ejs"
"#,
    )?;

    let error = config.build().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Configuration);
    assert!(error.to_string().contains("ejs"));
    Ok(())
}

#[tokio::test]
async fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let result = WrapConfig::load_from(&dir.path().join("absent.toml")).await;

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to read wrap config"));
}
