//! Render invocation.

use std::path::Path;

use super::context::RenderContext;
use super::engine::{EngineRegistry, RenderRequest};
use super::options::RenderOptions;
use crate::core::WrapError;

/// Render `template` against `context` with the engine named in `options`.
///
/// The engine is called exactly once. Its failure is reported as
/// [`WrapError::Render`] carrying the engine's message.
pub fn invoke(
    engines: &EngineRegistry,
    template: &str,
    context: &RenderContext,
    options: &RenderOptions,
    path: Option<&Path>,
) -> Result<String, WrapError> {
    let engine_name = options.engine.as_str();
    let engine = engines.get(engine_name).ok_or_else(|| WrapError::unknown_engine(path, engine_name))?;

    tracing::debug!("Rendering with engine '{}'", engine_name);
    context.log_trace();

    let request = RenderRequest {
        template,
        context: context.as_value(),
        variable: options.variable.as_deref(),
        imports: &options.imports,
        helpers: &options.helpers,
    };

    let rendered = engine
        .render(&request)
        .map_err(|e| WrapError::render(path, engine_name, e.message()))?;

    tracing::debug!("Rendered {} bytes", rendered.len());
    Ok(rendered)
}
