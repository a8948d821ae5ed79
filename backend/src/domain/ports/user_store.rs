//! Port for traveller account persistence.

use async_trait::async_trait;

use crate::domain::{UpsertUser, User, UserId};

use super::StoreError;

/// Reads and writes [`User`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Insert a new user or update the existing one with the same id.
    ///
    /// An existing record keeps its `created_at`; `updated_at` is refreshed.
    /// A payload without an id is stored under a freshly generated one.
    async fn upsert_user(&self, user: &UpsertUser) -> Result<User, StoreError>;
}
