use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Permission;
use crate::user::UserId;
use crate::{Error, Result};

/// Capability lookup consulted before the mutating task operations.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    /// Whether the given user holds the permission.
    async fn is_granted(&self, user_id: UserId, permission: Permission) -> bool;

    /// Fails with `PermissionDenied` when the permission is not granted.
    async fn authorize(&self, user_id: UserId, permission: Permission) -> Result<()> {
        if self.is_granted(user_id, permission).await {
            Ok(())
        } else {
            Err(Error::PermissionDenied(permission))
        }
    }
}

/// Grant table held in memory.
#[derive(Debug, Default)]
pub struct InMemoryPermissionChecker {
    grants: RwLock<HashMap<UserId, HashSet<Permission>>>,
}

impl InMemoryPermissionChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn grant(&self, user_id: UserId, permission: Permission) {
        let mut grants = self.grants.write().await;
        grants.entry(user_id).or_default().insert(permission);
    }

    pub async fn revoke(&self, user_id: UserId, permission: Permission) {
        let mut grants = self.grants.write().await;
        if let Some(held) = grants.get_mut(&user_id) {
            held.remove(&permission);
        }
    }
}

#[async_trait]
impl PermissionChecker for InMemoryPermissionChecker {
    async fn is_granted(&self, user_id: UserId, permission: Permission) -> bool {
        let grants = self.grants.read().await;
        grants
            .get(&user_id)
            .map_or(false, |held| held.contains(&permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn grant_and_revoke() {
        let checker = InMemoryPermissionChecker::new();
        assert!(!checker.is_granted(7, Permission::DeleteTasks).await);

        checker.grant(7, Permission::DeleteTasks).await;
        assert!(checker.is_granted(7, Permission::DeleteTasks).await);
        assert!(!checker.is_granted(7, Permission::AssignTaskToOthers).await);

        checker.revoke(7, Permission::DeleteTasks).await;
        assert!(!checker.is_granted(7, Permission::DeleteTasks).await);
    }

    #[tokio::test]
    async fn authorize_fails_without_grant() {
        let checker = InMemoryPermissionChecker::new();
        checker.grant(7, Permission::AssignTaskToOthers).await;

        checker
            .authorize(7, Permission::AssignTaskToOthers)
            .await
            .unwrap();
        let denied = checker.authorize(9, Permission::AssignTaskToOthers).await;
        assert!(matches!(
            denied,
            Err(Error::PermissionDenied(Permission::AssignTaskToOthers))
        ));
    }
}
