use serde::{Deserialize, Serialize};

/// A user row as seen by this service.
///
/// Users are owned by an external auth subsystem; here they only serve as
/// the foreign-key target for health records and as the subject of bearer
/// tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User identifier (token subject)
    pub id: i64,

    /// Email address, if the directory carries one
    pub email: Option<String>,

    /// Display name, if the directory carries one
    pub name: Option<String>,
}
