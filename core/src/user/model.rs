use serde::{Deserialize, Serialize};

/// Identifier of a user record.
pub type UserId = i64;

/// A user that tasks can be assigned to.
///
/// Account management lives elsewhere in the application; this crate only
/// loads users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email_address: String,
}
