//! Authentication domain

pub mod users;
