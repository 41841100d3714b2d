//! Notification inbox: events, users, notifications and their seen state.
//!
//! The persistence layer is a collaborator boundary. The store contract
//! lives here behind a clonable handle; [`InMemoryNotificationStore`] is the
//! bundled implementation, a relational one can slot in behind the same
//! trait.

use std::sync::Arc;

use chrono::{DateTime, Utc};

mod memory;

pub use memory::InMemoryNotificationStore;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotificationError {
    /// Events are created through an explicit call, never implicitly from a
    /// notification creation.
    #[error("event `{provider_id}/{event_id}` does not exist")]
    EventNotFound {
        event_id: String,
        provider_id: String,
    },
    #[error("notification {0} does not exist")]
    NotificationNotFound(i64),
}

pub type StoreResult<T> = Result<T, NotificationError>;

/// External identity of an event, as supplied by its provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventKey {
    pub id: String,
    pub provider_id: String,
}

/// External identity of a user, as supplied by its provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserKey {
    pub id: String,
    pub provider_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Store-assigned row id, increasing in creation order.
    pub id: i64,
    pub event_id: String,
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub user_id: String,
    pub provider_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    pub event: Event,
    pub user: User,
    pub seen: bool,
}

#[async_trait::async_trait]
pub trait NotificationStoreInner: Send + Sync {
    async fn create_or_get_event(&self, key: &EventKey, created_at: DateTime<Utc>) -> StoreResult<Event>;

    async fn create_or_get_user(&self, key: &UserKey) -> StoreResult<User>;

    /// Idempotent on the `(event, user)` pair; the user is created on demand,
    /// the event must already exist.
    async fn create_or_get_notification(&self, event: &EventKey, user: &UserKey) -> StoreResult<Notification>;

    async fn mark_seen(&self, id: i64) -> StoreResult<Notification>;

    /// All notifications, oldest first; filtered to one user when a key is
    /// given. An unknown filter user yields an empty list, not an error.
    async fn notifications(&self, user: Option<&UserKey>) -> StoreResult<Vec<Notification>>;

    async fn notification(&self, id: i64) -> StoreResult<Option<Notification>>;

    async fn count(&self) -> StoreResult<u64>;
}

/// Cheaply clonable handle to a notification store implementation.
#[derive(Clone)]
pub struct NotificationStore {
    inner: Arc<dyn NotificationStoreInner>,
}

impl NotificationStore {
    pub fn new(inner: impl NotificationStoreInner + 'static) -> NotificationStore {
        NotificationStore {
            inner: Arc::new(inner),
        }
    }

    pub async fn create_or_get_event(&self, key: &EventKey, created_at: DateTime<Utc>) -> StoreResult<Event> {
        self.inner.create_or_get_event(key, created_at).await
    }

    pub async fn create_or_get_user(&self, key: &UserKey) -> StoreResult<User> {
        self.inner.create_or_get_user(key).await
    }

    pub async fn create_or_get_notification(&self, event: &EventKey, user: &UserKey) -> StoreResult<Notification> {
        self.inner.create_or_get_notification(event, user).await
    }

    pub async fn mark_seen(&self, id: i64) -> StoreResult<Notification> {
        self.inner.mark_seen(id).await
    }

    pub async fn notifications(&self, user: Option<&UserKey>) -> StoreResult<Vec<Notification>> {
        self.inner.notifications(user).await
    }

    pub async fn notification(&self, id: i64) -> StoreResult<Option<Notification>> {
        self.inner.notification(id).await
    }

    pub async fn count(&self) -> StoreResult<u64> {
        self.inner.count().await
    }
}
