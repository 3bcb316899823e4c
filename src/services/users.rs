use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::Gender;

/// Errors from the user directory
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserDirectoryError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),
}

/// Resolves user ids to the gender they registered with
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Register a new user and return their id
    async fn register(&self, gender: Gender) -> String;

    async fn gender_of(&self, user_id: &str) -> Result<Gender, UserDirectoryError>;
}

/// Process-local user directory
///
/// Users only live as long as the process does.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, Gender>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn register(&self, gender: Gender) -> String {
        let user_id = uuid::Uuid::new_v4().to_string();
        self.users.write().await.insert(user_id.clone(), gender);
        tracing::debug!("Registered user {} ({})", user_id, gender);
        user_id
    }

    async fn gender_of(&self, user_id: &str) -> Result<Gender, UserDirectoryError> {
        self.users
            .read()
            .await
            .get(user_id)
            .copied()
            .ok_or_else(|| UserDirectoryError::UnknownUser(user_id.to_string()))
    }
}
