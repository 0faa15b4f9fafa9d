//! Feed module
//!
//! Renders the ranked feed into the static page that gets cached.

pub mod renderer;

pub use renderer::TemplateRenderer;
