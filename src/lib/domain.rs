//! Domain layer: value objects, collaborator traits and services

pub mod auth;
pub mod communication;
