//! Tera render engine.
//!
//! Helpers are registered twice: as a function taking keyword arguments
//! (`{{ dirname(path=file.path) }}`, arguments passed in key order) and as a
//! filter (`{{ file.path | dirname }}`, the piped value first).

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;
use tera::{Context as TeraContext, Tera};

use crate::templating::engine::{EngineError, Helper, RenderEngine, RenderRequest};

// Built-in filters and functions, without autoescaping for one-off templates.
static BASE: LazyLock<Tera> = LazyLock::new(Tera::default);

/// Renders Tera templates (`{{ expr }}`). Undefined variables are errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraEngine;

impl RenderEngine for TeraEngine {
    fn render(&self, request: &RenderRequest<'_>) -> Result<String, EngineError> {
        let context = TeraContext::from_value(request.scoped_context())
            .map_err(|e| EngineError::new(format_tera_error(&e)))?;

        let mut tera = BASE.clone();
        for (name, helper) in request.helpers {
            register_helper(&mut tera, name, helper);
        }

        tera.render_str(request.template, &context)
            .map_err(|e| EngineError::new(format_tera_error(&e)))
    }
}

fn register_helper(tera: &mut Tera, name: &str, helper: &Helper) {
    let function = helper.clone();
    tera.register_function(name, move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        let ordered: BTreeMap<&String, &Value> = args.iter().collect();
        let args: Vec<Value> = ordered.into_values().cloned().collect();
        function.call(&args).map_err(|e| tera::Error::msg(e.message()))
    });

    let filter = helper.clone();
    tera.register_filter(
        name,
        move |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
            let ordered: BTreeMap<&String, &Value> = args.iter().collect();
            let mut all = vec![value.clone()];
            all.extend(ordered.into_values().cloned());
            filter.call(&all).map_err(|e| tera::Error::msg(e.message()))
        },
    );
}

/// Collect a Tera error chain into one readable message.
///
/// One-off templates are named `__tera_one_off` internally; that name is
/// stripped from the messages since it means nothing to the template author.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut all_messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        all_messages.push(err.to_string());
        current = err.source();
    }

    let messages: Vec<String> = all_messages
        .iter()
        .map(|msg| {
            msg.replace("while rendering '__tera_one_off'", "")
                .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                .replace("'__tera_one_off'", "template")
                .trim()
                .to_string()
        })
        .filter(|msg| {
            !msg.is_empty() && msg != "Template rendering failed" && msg != "Template syntax error"
        })
        .collect();

    if messages.is_empty() {
        "Template syntax error".to_string()
    } else {
        messages.join(" -> ")
    }
}
