//! Infrastructure adapters for the domain collaborators

pub mod database;
pub mod email;
pub mod templating;
