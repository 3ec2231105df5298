//! Users as seen by the mail pipeline: the recipient record placed in the template context.

mod repository;
mod user;

pub mod errors;

pub use repository::UserRepository;
pub use user::User;
