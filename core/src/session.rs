//! Caller identity

use crate::user::UserId;
use crate::{Error, Result};

/// Identity the service operations run under.
///
/// The surrounding application resolves this from its own session layer;
/// the core only needs the optional user id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<UserId>,
}

impl Session {
    /// Session for a signed-in user.
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Session without a signed-in user.
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// The caller's user id, failing when the session is anonymous.
    pub fn user_id(&self) -> Result<UserId> {
        self.user_id.ok_or(Error::NotAuthenticated)
    }
}
