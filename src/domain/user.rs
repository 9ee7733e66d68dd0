use serde::{Deserialize, Serialize};

/// User model
///
/// Serialized verbatim into the store document; `password_hash` maps to the
/// `passwordHash` member on disk and never holds plaintext.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}
