//! Template fragments, their store, and the substitution engine interface

mod context;
mod errors;
mod fragment;
mod renderer;
mod repository;
mod resolver;

pub use context::SubstitutionContext;
pub use errors::{RenderTemplateError, TemplateSetError};
pub use fragment::{TemplateFragment, TemplateSet};
pub use renderer::SubstitutionEngine;
pub use repository::TemplateStore;
pub use resolver::TemplateSetResolver;
