//! Templates read from disk.

use anyhow::Result;
use filewrap::core::ErrorKind;
use filewrap::templating::TemplateSource;
use filewrap::test_utils::{buffer_file, contents_string};
use filewrap::wrap::Wrap;
use tempfile::TempDir;

#[tokio::test]
async fn test_template_from_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("wrap.tpl");
    tokio::fs::write(&path, "BEFORE <%= contents %> AFTER").await?;

    let wrap = Wrap::builder().template_file(&path).build()?;
    let file = wrap.process(buffer_file("a.txt", "Hello")).await?;

    assert_eq!(contents_string(file).await, "BEFORE Hello AFTER");
    Ok(())
}

#[tokio::test]
async fn test_template_file_is_read_once_per_instance() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("wrap.tpl");
    tokio::fs::write(&path, "v1 <%= contents %>").await?;

    let wrap = Wrap::new(TemplateSource::file(&path))?;
    assert!(!wrap.template().is_resolved());

    let first = wrap.process(buffer_file("a.txt", "a")).await?;
    assert!(wrap.template().is_resolved());

    tokio::fs::write(&path, "v2 <%= contents %>").await?;
    let second = wrap.process(buffer_file("b.txt", "b")).await?;

    assert_eq!(contents_string(first).await, "v1 a");
    assert_eq!(contents_string(second).await, "v1 b");

    // A new instance reads the file again.
    let fresh = Wrap::new(TemplateSource::file(&path))?;
    let third = fresh.process(buffer_file("c.txt", "c")).await?;
    assert_eq!(contents_string(third).await, "v2 c");
    Ok(())
}

#[tokio::test]
async fn test_unreadable_template_fails_every_file() -> Result<()> {
    let dir = TempDir::new()?;
    // A directory cannot be read as a template.
    let wrap = Wrap::builder().template_file(dir.path()).build()?;

    let first = wrap.process(buffer_file("a.txt", "a")).await.unwrap_err();
    let second = wrap.process(buffer_file("b.txt", "b")).await.unwrap_err();

    assert_eq!(first.kind(), ErrorKind::TemplateLoad);
    assert_eq!(second.kind(), ErrorKind::TemplateLoad);
    assert!(first.io_error().is_some());
    Ok(())
}

#[tokio::test]
async fn test_missing_template_file_is_not_a_build_error() -> Result<()> {
    let dir = TempDir::new()?;
    let wrap = Wrap::builder().template_file(dir.path().join("missing.tpl")).build()?;

    let error = wrap.process(buffer_file("a.txt", "a")).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TemplateLoad);
    assert!(error.to_string().contains("missing.tpl"));
    Ok(())
}

#[test]
fn test_empty_src_is_rejected_at_build() {
    let error = Wrap::builder().template_file("").build().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Configuration);
    assert!(error.to_string().contains("Expecting `src` option"));
}

#[tokio::test]
async fn test_passthrough_does_not_read_template() -> Result<()> {
    let dir = TempDir::new()?;
    let wrap = Wrap::builder().template_file(dir.path().join("missing.tpl")).build()?;

    let file = wrap.process(filewrap::core::FileRecord::default()).await?;
    assert!(file.is_null());
    assert!(!wrap.template().is_resolved());
    Ok(())
}
