use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::{
    Event, EventKey, Notification, NotificationError, NotificationStoreInner, StoreResult, User,
    UserKey,
};

/// In-memory notification store. Row ids start at 1 and grow per table, like
/// the relational layout this stands in for.
#[derive(Default)]
pub struct InMemoryNotificationStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    users: Vec<User>,
    notifications: Vec<Row>,
}

/// Notification row; `event` and `user` are row ids.
struct Row {
    id: i64,
    event: i64,
    user: i64,
    seen: bool,
}

impl State {
    fn event_by_key(&self, key: &EventKey) -> Option<&Event> {
        self.events
            .iter()
            .find(|event| event.event_id == key.id && event.provider_id == key.provider_id)
    }

    fn user_by_key(&self, key: &UserKey) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.user_id == key.id && user.provider_id == key.provider_id)
    }

    fn create_or_get_user(&mut self, key: &UserKey) -> User {
        if let Some(user) = self.user_by_key(key) {
            return user.clone();
        }
        let user = User {
            id: self.users.len() as i64 + 1,
            user_id: key.id.clone(),
            provider_id: key.provider_id.clone(),
        };
        self.users.push(user.clone());
        user
    }

    fn hydrate(&self, row: &Row) -> Option<Notification> {
        let event = self.events.iter().find(|event| event.id == row.event)?;
        let user = self.users.iter().find(|user| user.id == row.user)?;
        Some(Notification {
            id: row.id,
            event: event.clone(),
            user: user.clone(),
            seen: row.seen,
        })
    }
}

#[async_trait::async_trait]
impl NotificationStoreInner for InMemoryNotificationStore {
    async fn create_or_get_event(&self, key: &EventKey, created_at: DateTime<Utc>) -> StoreResult<Event> {
        let mut state = self.state.lock().await;
        if let Some(event) = state
            .events
            .iter()
            .find(|event| {
                event.event_id == key.id
                    && event.provider_id == key.provider_id
                    && event.created_at == created_at
            })
        {
            return Ok(event.clone());
        }
        let event = Event {
            id: state.events.len() as i64 + 1,
            event_id: key.id.clone(),
            provider_id: key.provider_id.clone(),
            created_at,
        };
        state.events.push(event.clone());
        Ok(event)
    }

    async fn create_or_get_user(&self, key: &UserKey) -> StoreResult<User> {
        let mut state = self.state.lock().await;
        Ok(state.create_or_get_user(key))
    }

    async fn create_or_get_notification(&self, event: &EventKey, user: &UserKey) -> StoreResult<Notification> {
        let mut state = self.state.lock().await;
        let Some(event) = state.event_by_key(event).cloned() else {
            return Err(NotificationError::EventNotFound {
                event_id: event.id.clone(),
                provider_id: event.provider_id.clone(),
            });
        };
        let user = state.create_or_get_user(user);

        if let Some(row) = state
            .notifications
            .iter()
            .find(|row| row.event == event.id && row.user == user.id)
        {
            return Ok(Notification {
                id: row.id,
                seen: row.seen,
                event,
                user,
            });
        }

        let row = Row {
            id: state.notifications.len() as i64 + 1,
            event: event.id,
            user: user.id,
            seen: false,
        };
        let notification = Notification {
            id: row.id,
            seen: row.seen,
            event,
            user,
        };
        state.notifications.push(row);
        Ok(notification)
    }

    async fn mark_seen(&self, id: i64) -> StoreResult<Notification> {
        let mut state = self.state.lock().await;
        let Some(index) = state.notifications.iter().position(|row| row.id == id) else {
            return Err(NotificationError::NotificationNotFound(id));
        };
        state.notifications[index].seen = true;
        let row = &state.notifications[index];
        state
            .hydrate(row)
            .ok_or(NotificationError::NotificationNotFound(id))
    }

    async fn notifications(&self, user: Option<&UserKey>) -> StoreResult<Vec<Notification>> {
        let state = self.state.lock().await;
        let user_id = match user {
            Some(key) => match state.user_by_key(key) {
                Some(user) => Some(user.id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        Ok(state
            .notifications
            .iter()
            .filter(|row| user_id.is_none_or(|id| row.user == id))
            .filter_map(|row| state.hydrate(row))
            .collect())
    }

    async fn notification(&self, id: i64) -> StoreResult<Option<Notification>> {
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .find(|row| row.id == id)
            .and_then(|row| state.hydrate(row)))
    }

    async fn count(&self) -> StoreResult<u64> {
        let state = self.state.lock().await;
        Ok(state.notifications.len() as u64)
    }
}
