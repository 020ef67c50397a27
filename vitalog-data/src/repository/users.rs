use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use super::errors::RepositoryError;
use crate::database::DatabasePool;
use crate::models::User;

/// Lookup of users by id.
///
/// Users are created and managed elsewhere; this service only resolves
/// token subjects to existing rows.
#[async_trait]
pub trait UserDirectory {
    /// Resolve a user id, returning `None` when no such user exists
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;
}

/// SQLite-backed user directory
#[derive(Clone)]
pub struct SqliteUserDirectory {
    pool: DatabasePool,
}

impl SqliteUserDirectory {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        debug!("Looking up user {}", id);

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT id, email, name FROM users WHERE id = ?1")?;

        let user = stmt.query_row([id], |row| {
            Ok(User {
                id: row.get(0)?,
                email: row.get(1)?,
                name: row.get(2)?,
            })
        });

        match user {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepositoryError::Sqlite(e)),
        }
    }
}

/// In-memory user directory for tests. Clones share the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<Mutex<HashMap<i64, User>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register a user so it can be resolved by id
    pub fn insert(&self, user: User) {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        users.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock()?;
        Ok(users.get(&id).cloned())
    }
}
