//! Rendering scenarios for buffered file records.

use anyhow::Result;
use filewrap::core::{ErrorKind, FileRecord};
use filewrap::templating::RenderOptions;
use filewrap::test_utils::{buffer_file, contents_string, init_test_logging};
use filewrap::wrap::Wrap;
use serde_json::{Value, json};
use std::path::Path;

#[tokio::test]
async fn test_empty_file_passes_through() -> Result<()> {
    init_test_logging(None);
    let wrap = Wrap::new("")?;

    let file = wrap.process(FileRecord::default()).await?;
    assert!(file.is_null());
    Ok(())
}

#[tokio::test]
async fn test_literal_template() -> Result<()> {
    let wrap = Wrap::new("<%= contents %>bar")?;

    let file = wrap.process(FileRecord::unnamed("foo")).await?;
    assert!(file.is_buffer());
    assert_eq!(contents_string(file).await, "foobar");
    Ok(())
}

#[tokio::test]
async fn test_data_and_variable_option() -> Result<()> {
    let wrap = Wrap::builder()
        .template("BEFORE <%= data.contents %> <%= data.someVar %> AFTER")
        .data(json!({ "someVar": "someVal" }))
        .options(RenderOptions::default().with_variable("data"))
        .build()?;

    let file = wrap.process(buffer_file("hello.txt", "Hello")).await?;
    assert_eq!(contents_string(file).await, "BEFORE Hello someVal AFTER");
    Ok(())
}

#[tokio::test]
async fn test_file_props_in_template() -> Result<()> {
    let wrap = Wrap::new("Contents: [<%= contents %>] - File prop: [<%= file.someProp %>]")?;
    let file = FileRecord::unnamed("Hello").with_property("someProp", "someValue");

    let file = wrap.process(file).await?;
    assert_eq!(contents_string(file).await, "Contents: [Hello] - File prop: [someValue]");
    Ok(())
}

#[tokio::test]
async fn test_data_props_override_file_props() -> Result<()> {
    let wrap = Wrap::builder()
        .template("<%= contents %> - <%= file.someProp %>")
        .data(json!({ "file": { "someProp": "foo" } }))
        .build()?;
    let file = FileRecord::unnamed("Hello").with_property("someProp", "bar");

    let file = wrap.process(file).await?;
    assert_eq!(contents_string(file).await, "Hello - foo");
    Ok(())
}

#[tokio::test]
async fn test_user_data_overrides_file_data() -> Result<()> {
    let wrap = Wrap::builder()
        .template("<%= contents %> <%= prop %> <%= other %>")
        .data(json!({ "prop": "user" }))
        .build()?;
    let file = FileRecord::unnamed("Hello").with_data(json!({ "prop": "file", "other": "kept" }));

    let file = wrap.process(file).await?;
    assert_eq!(contents_string(file).await, "Hello user kept");
    Ok(())
}

#[tokio::test]
async fn test_file_data_is_merged() -> Result<()> {
    let wrap = Wrap::new("<%= contents %> <%= prop %>")?;
    let file = FileRecord::unnamed("Hello").with_data(json!({ "prop": "foo" }));

    let file = wrap.process(file).await?;
    assert_eq!(contents_string(file).await, "Hello foo");
    Ok(())
}

#[tokio::test]
async fn test_no_pollution_across_files() -> Result<()> {
    let wrap = Wrap::new("<%= file.foo %> <%= file.bar %> <%= contents %>")?;

    let first = FileRecord::unnamed("1").with_property("foo", "one");
    let second = FileRecord::unnamed("2").with_property("bar", "two");

    let first = wrap.process(first).await?;
    let second = wrap.process(second).await?;

    assert_eq!(contents_string(first).await, "one  1");
    assert_eq!(contents_string(second).await, " two 2");
    Ok(())
}

#[tokio::test]
async fn test_rendering_is_deterministic() -> Result<()> {
    let wrap = Wrap::builder()
        .template("<%= site %>/<%= contents.name %>")
        .data(json!({ "site": "docs" }))
        .build()?;

    let a = contents_string(wrap.process(buffer_file("a.json", r#"{"name":"x"}"#)).await?).await;
    let b = contents_string(wrap.process(buffer_file("a.json", r#"{"name":"x"}"#)).await?).await;
    assert_eq!(a, "docs/x");
    assert_eq!(a, b);
    Ok(())
}

#[tokio::test]
async fn test_imports_are_exposed() -> Result<()> {
    let wrap = Wrap::builder()
        .template("<%= contents %><%= sep %><%= file.path %>")
        .options(RenderOptions::default().with_import("sep", " @ "))
        .build()?;

    let file = wrap.process(buffer_file("a/b.txt", "Hello")).await?;
    assert_eq!(contents_string(file).await, "Hello @ a/b.txt");
    Ok(())
}

#[tokio::test]
async fn test_parse_json_by_default() -> Result<()> {
    let wrap = Wrap::new("BEFORE <%= contents.name %> AFTER")?;

    let file = wrap.process(buffer_file("data.json", r#"{"name": "foo"}"#)).await?;
    assert_eq!(contents_string(file).await, "BEFORE foo AFTER");
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_fails_with_path() -> Result<()> {
    let wrap = Wrap::new("BEFORE <%= contents.name %> AFTER")?;

    let error = wrap.process(buffer_file("data.json", r#"{"name": "#)).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::StructuredParse);
    assert!(error.to_string().contains("data.json"), "got: {error}");
    Ok(())
}

#[tokio::test]
async fn test_parse_yaml_by_default() -> Result<()> {
    let wrap = Wrap::new("BEFORE <%= contents.name %> AFTER")?;

    let file = wrap.process(buffer_file("data.yml", "name: foo")).await?;
    assert_eq!(contents_string(file).await, "BEFORE foo AFTER");

    let file = wrap.process(buffer_file("data.YAML", "name: bar")).await?;
    assert_eq!(contents_string(file).await, "BEFORE bar AFTER");
    Ok(())
}

#[tokio::test]
async fn test_parse_false_disables_parsing() -> Result<()> {
    let wrap = Wrap::builder()
        .template("<%= contents %>")
        .options(RenderOptions::default().with_parse(false))
        .build()?;

    let file = wrap.process(buffer_file("data.yml", "name: foo")).await?;
    assert_eq!(contents_string(file).await, "name: foo");
    Ok(())
}

#[tokio::test]
async fn test_template_function_uses_context() -> Result<()> {
    let wrap = Wrap::builder()
        .template_fn(|ctx| match ctx.lookup("file.layout").and_then(|v| v.as_str()) {
            Some("post") => "<article><%= contents %></article>".to_string(),
            _ => "<div><%= contents %></div>".to_string(),
        })
        .build()?;

    let post = wrap.process(FileRecord::unnamed("a").with_property("layout", "post")).await?;
    let page = wrap.process(FileRecord::unnamed("b")).await?;

    assert_eq!(contents_string(post).await, "<article>a</article>");
    assert_eq!(contents_string(page).await, "<div>b</div>");
    Ok(())
}

#[tokio::test]
async fn test_render_error_is_reported() -> Result<()> {
    let wrap = Wrap::builder()
        .template("{{ contents | no_such_filter }}")
        .options(RenderOptions::default().with_engine("tera"))
        .build()?;

    let error = wrap.process(buffer_file("a.txt", "x")).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Render);
    assert!(error.to_string().contains("'tera'"));
    Ok(())
}

#[tokio::test]
async fn test_handlebars_engine() -> Result<()> {
    let wrap = Wrap::builder()
        .template("{{data.greeting}}, {{data.contents}}")
        .data(json!({ "greeting": "Hi" }))
        .options(RenderOptions::default().with_engine("handlebars").with_variable("data"))
        .build()?;

    let file = wrap.process(buffer_file("a.txt", "<world>")).await?;
    assert_eq!(contents_string(file).await, "Hi, <world>");
    Ok(())
}

#[tokio::test]
async fn test_helper_functions_in_expressions() -> Result<()> {
    let wrap = Wrap::builder()
        .template("<%= dirname(file.path) %>")
        .data(json!({ "file": { "path": "a/b" } }))
        .options(RenderOptions::default().with_helper("dirname", |args: &[Value]| {
            let path = args.first().and_then(Value::as_str).unwrap_or_default();
            let dir = Path::new(path).parent().map(|p| p.display().to_string()).unwrap_or_default();
            Ok(Value::String(dir))
        }))
        .build()?;

    let file = wrap.process(buffer_file("test/fixtures/hello.txt", "Hello")).await?;
    assert_eq!(contents_string(file).await, "a");
    Ok(())
}

#[tokio::test]
async fn test_foreign_template_markers_pass_through() -> Result<()> {
    let wrap = Wrap::new("a{#b <%= contents %>")?;
    let file = wrap.process(buffer_file("x.txt", "X")).await?;
    assert_eq!(contents_string(file).await, "a{#b X");

    let wrap = Wrap::new("{% raw %}{{ x }} <%# dropped %><%= contents %>")?;
    let file = wrap.process(buffer_file("x.txt", "X")).await?;
    assert_eq!(contents_string(file).await, "{% raw %}{{ x }} X");
    Ok(())
}

#[tokio::test]
async fn test_lodash_statements() -> Result<()> {
    let wrap = Wrap::new("<% if file.draft %>DRAFT: <% endif %><%= contents %>")?;

    let draft = wrap.process(buffer_file("a.txt", "A").with_property("draft", true)).await?;
    let live = wrap.process(buffer_file("b.txt", "B")).await?;

    assert_eq!(contents_string(draft).await, "DRAFT: A");
    assert_eq!(contents_string(live).await, "B");
    Ok(())
}
