pub mod identity;
pub mod validate;

pub use identity::{current, resolve, Identity, Role, IDENTITY_HEADER};
