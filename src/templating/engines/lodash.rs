//! Lodash-style templates rendered with MiniJinja.
//!
//! All markers use lodash's `<% %>` family:
//!
//! | Marker          | Meaning                         |
//! |-----------------|---------------------------------|
//! | `<%= expr %>`   | interpolation                   |
//! | `<% stmt %>`    | statement (`if`, `for`, `set`)  |
//! | `<%# ... %>`    | comment                         |
//!
//! Nothing else is template syntax, so Jinja, Liquid or Handlebars markers
//! in the text pass through unchanged. Undefined values, including
//! attributes of undefined values, render as empty text.

use minijinja::syntax::SyntaxConfig;
use minijinja::value::Rest;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use std::sync::LazyLock;

use crate::templating::engine::{EngineError, Helper, Helpers, RenderEngine, RenderRequest};

const VARIABLE_START: &str = "<%=";
const BLOCK_START: &str = "<%";
const COMMENT_START: &str = "<%#";
const END: &str = "%>";

// Start markers may share a prefix; MiniJinja takes the longest match.
static SYNTAX: LazyLock<Result<SyntaxConfig, EngineError>> = LazyLock::new(|| {
    SyntaxConfig::builder()
        .variable_delimiters(VARIABLE_START, END)
        .block_delimiters(BLOCK_START, END)
        .comment_delimiters(COMMENT_START, END)
        .build()
        .map_err(|e| EngineError::from_error(&e))
});

/// The default engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LodashEngine;

impl LodashEngine {
    fn environment(&self, helpers: &Helpers) -> Result<Environment<'static>, EngineError> {
        let syntax = SYNTAX.as_ref().map_err(Clone::clone)?.clone();

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Chainable);

        for (name, helper) in helpers {
            let helper = helper.clone();
            env.add_function(name.clone(), move |args: Rest<minijinja::Value>| {
                call_helper(&helper, &args)
            });
        }
        Ok(env)
    }
}

fn call_helper(helper: &Helper, args: &[minijinja::Value]) -> Result<minijinja::Value, minijinja::Error> {
    let args = args
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    helper
        .call(&args)
        .map(minijinja::Value::from_serialize)
        .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.message().to_string()))
}

impl RenderEngine for LodashEngine {
    fn render(&self, request: &RenderRequest<'_>) -> Result<String, EngineError> {
        let env = self.environment(request.helpers)?;
        env.render_str(request.template, request.scoped_context())
            .map_err(|e| EngineError::from_error(&e))
    }
}
