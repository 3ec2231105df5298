//! One-time link codes embedded in invitation and password recovery emails

mod errors;
mod issuer;
mod resolver;

pub use errors::LinkCodeError;
pub use issuer::CodeIssuer;
pub use resolver::{LinkCodeResolver, LinkCodeStrategy};

#[cfg(test)]
pub mod tests {
    pub use super::issuer::MockCodeIssuer;
}
