//! Custom deserializers for forgiving request parsing.
//!
//! Clients send `role` as free text ("Student", "professional", missing, or
//! something else entirely). Rather than rejecting the request, the value is
//! normalized and anything unrecognized falls back to [`Role::Student`].

use serde::{Deserialize, Deserializer};

use crate::routine::Role;

/// Deserializes an optional role label into a [`Role`].
///
/// # Accepted Formats
///
/// * **Missing / null** → `Student`
/// * **String** (case-insensitive): `"STUDENT"` → `Student`,
///   `"PROFESSIONAL"` → `Professional`, anything else → `Student`
///
/// # Errors
///
/// Returns an error only if the value is present and not a string or null,
/// so a numeric `role` is still a shape error.
pub fn de_role_forgiving<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(Role::from_label(label.as_deref()))
}
