//! Auth-domain models: acquisition results, scopes, and redacted token secrets.

pub mod authentication;
pub mod scope;
pub mod secret;

pub use authentication::*;
pub use scope::*;
pub use secret::*;
