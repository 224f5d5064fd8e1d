//! SAML 2.0 types and data structures.
//!
//! The logout request entity, name identifiers, message identifiers and the
//! protocol constants they are rendered with.

mod constants;
mod id;
mod logout;
mod name_id;

pub use constants::*;
pub use id::*;
pub use logout::*;
pub use name_id::*;
