use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::{User, UserId};
use crate::{Error, Result};

/// Lookup interface for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user by id.
    async fn get(&self, id: UserId) -> Result<Option<User>>;

    /// Get a user by id, failing with `UserNotFound` when absent.
    async fn load(&self, id: UserId) -> Result<User> {
        self.get(id).await?.ok_or(Error::UserNotFound(id))
    }
}

/// File-based user store using JSON.
pub struct FileUserStore {
    path: PathBuf,
    cache: RwLock<HashMap<UserId, User>>,
}

impl FileUserStore {
    /// Create a new FileUserStore.
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let users: Vec<User> = serde_json::from_str(&content)?;
            users.into_iter().map(|u| (u.id, u)).collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Insert or replace a user record.
    pub async fn insert(&self, user: User) -> Result<()> {
        {
            let mut cache = self.cache.write().await;
            cache.insert(user.id, user);
        }
        self.persist().await
    }

    /// Persist the cache to disk
    async fn persist(&self) -> Result<()> {
        let cache = self.cache.read().await;
        let mut users: Vec<&User> = cache.values().collect();
        users.sort_by_key(|u| u.id);
        let content = serde_json::to_string_pretty(&users)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn get(&self, id: UserId) -> Result<Option<User>> {
        let cache = self.cache.read().await;
        Ok(cache.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn sample_user(id: UserId) -> User {
        User {
            id,
            name: format!("user-{}", id),
            email_address: format!("user{}@example.com", id),
        }
    }

    #[tokio::test]
    async fn get_and_load() {
        let temp = TempDir::new().unwrap();
        let store = FileUserStore::new(temp.path().join("users.json"))
            .await
            .unwrap();
        store.insert(sample_user(7)).await.unwrap();

        assert_eq!(store.get(7).await.unwrap(), Some(sample_user(7)));
        assert_eq!(store.get(9).await.unwrap(), None);

        assert_eq!(store.load(7).await.unwrap(), sample_user(7));
        assert!(matches!(
            store.load(9).await,
            Err(Error::UserNotFound(9))
        ));
    }

    #[tokio::test]
    async fn persists_across_instances() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("users.json");

        {
            let store = FileUserStore::new(&path).await.unwrap();
            store.insert(sample_user(3)).await.unwrap();
        }

        let store = FileUserStore::new(&path).await.unwrap();
        assert_eq!(store.get(3).await.unwrap(), Some(sample_user(3)));
    }
}
