//! Protocol message identifiers.

use uuid::Uuid;

/// Generates a message identifier.
///
/// `xs:ID` values must be valid NCNames and so cannot start with a digit;
/// the leading underscore guarantees that for the UUID that follows.
#[must_use]
pub fn generate_id() -> String {
    format!("_{}", Uuid::new_v4())
}

/// Returns true if `id` can be used as an `xs:ID` attribute value.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
