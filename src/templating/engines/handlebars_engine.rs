//! Handlebars render engine.
//!
//! Helpers are called with their positional parameters, e.g.
//! `{{dirname file.path}}`.

use handlebars::{Context, Handlebars, HelperDef, RenderContext, RenderError, RenderErrorReason, ScopedJson};
use serde_json::Value;
use std::sync::LazyLock;

use crate::templating::engine::{EngineError, Helper, RenderEngine, RenderRequest};

static BASE: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry
});

/// Renders Handlebars templates (`{{expr}}`) without HTML escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlebarsEngine;

impl RenderEngine for HandlebarsEngine {
    fn render(&self, request: &RenderRequest<'_>) -> Result<String, EngineError> {
        let context = request.scoped_context();
        let rendered = if request.helpers.is_empty() {
            BASE.render_template(request.template, &context)
        } else {
            let mut registry = BASE.clone();
            for (name, helper) in request.helpers {
                registry.register_helper(name, Box::new(HelperCall(helper.clone())));
            }
            registry.render_template(request.template, &context)
        };
        rendered.map_err(|e| EngineError::from_error(&e))
    }
}

struct HelperCall(Helper);

impl HelperDef for HelperCall {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &handlebars::Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let args: Vec<Value> = h.params().iter().map(|param| param.value().clone()).collect();
        self.0
            .call(&args)
            .map(ScopedJson::Derived)
            .map_err(|e| RenderErrorReason::Other(e.message().to_string()).into())
    }
}
