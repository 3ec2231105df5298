//! Substitution engine adapters

pub mod handlebars_renderer;
