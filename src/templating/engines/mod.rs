//! Built-in render engines.
//!
//! - [`LodashEngine`] (`lodash`, the default): `<%= expr %>` interpolation
//! - [`TeraEngine`] (`tera`): Tera templates
//! - [`HandlebarsEngine`] (`handlebars`): Handlebars templates, unescaped

mod handlebars_engine;
mod lodash;
mod tera_engine;

pub use handlebars_engine::HandlebarsEngine;
pub use lodash::LodashEngine;
pub use tera_engine::TeraEngine;
