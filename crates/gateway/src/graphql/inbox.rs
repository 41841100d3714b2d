use async_graphql::{Context, Error, InputObject, Object, Result, SimpleObject, ID};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use notification_store::{EventKey, NotificationStore, UserKey};

#[derive(Debug, SimpleObject)]
pub struct Event {
    pub provider_id: String,
    pub id: String,
}

#[derive(Debug, SimpleObject)]
pub struct User {
    pub provider_id: String,
    pub id: String,
}

#[derive(Debug, SimpleObject)]
pub struct Notification {
    /// Opaque global id, stable across refetches.
    pub id: ID,
    pub event: Event,
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub seen: bool,
}

#[derive(Debug, SimpleObject)]
pub struct NotificationConnection {
    /// Total number of notifications in the store, unaffected by the filter.
    pub total_count: u64,
    pub edges: Vec<NotificationEdge>,
}

#[derive(Debug, SimpleObject)]
pub struct NotificationEdge {
    pub node: Notification,
}

#[derive(Debug, InputObject)]
pub struct EventInput {
    pub provider_id: String,
    pub id: String,
}

#[derive(Debug, InputObject)]
pub struct UserInput {
    pub provider_id: String,
    pub id: String,
}

impl From<EventInput> for EventKey {
    fn from(input: EventInput) -> Self {
        EventKey {
            id: input.id,
            provider_id: input.provider_id,
        }
    }
}

impl From<UserInput> for UserKey {
    fn from(input: UserInput) -> Self {
        UserKey {
            id: input.id,
            provider_id: input.provider_id,
        }
    }
}

impl From<notification_store::Notification> for Notification {
    fn from(notification: notification_store::Notification) -> Self {
        Notification {
            id: ID(global_id(notification.id)),
            event: Event {
                provider_id: notification.event.provider_id,
                id: notification.event.event_id,
            },
            user: User {
                provider_id: notification.user.provider_id,
                id: notification.user.user_id,
            },
            created_at: notification.event.created_at,
            seen: notification.seen,
        }
    }
}

fn global_id(row_id: i64) -> String {
    STANDARD.encode(format!("notification-{row_id}"))
}

/// Splits a global id on the literal `-` and returns the row id suffix.
fn decode_global_id(id: &str) -> Result<i64> {
    let invalid = || Error::new(format!("invalid notification id `{id}`"));
    let bytes = STANDARD.decode(id.as_bytes()).map_err(|_| invalid())?;
    let decoded = String::from_utf8(bytes).map_err(|_| invalid())?;
    let (kind, row_id) = decoded.split_once('-').ok_or_else(invalid)?;
    if kind != "notification" {
        return Err(invalid());
    }
    row_id.parse().map_err(|_| invalid())
}

#[derive(Default)]
pub struct NotificationQuery;

#[Object]
impl NotificationQuery {
    async fn notifications(
        &self,
        ctx: &Context<'_>,
        user: Option<UserInput>,
    ) -> Result<NotificationConnection> {
        let store = ctx.data_unchecked::<NotificationStore>();
        let filter: Option<UserKey> = user.map(Into::into);
        let notifications = store.notifications(filter.as_ref()).await?;
        let total_count = store.count().await?;
        Ok(NotificationConnection {
            total_count,
            edges: notifications
                .into_iter()
                .map(|notification| NotificationEdge {
                    node: notification.into(),
                })
                .collect(),
        })
    }

    async fn notification(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Notification>> {
        let store = ctx.data_unchecked::<NotificationStore>();
        let row_id = decode_global_id(&id)?;
        Ok(store.notification(row_id).await?.map(Into::into))
    }
}

#[derive(Default)]
pub struct NotificationMutation;

#[Object]
impl NotificationMutation {
    async fn create_event(
        &self,
        ctx: &Context<'_>,
        event: EventInput,
        created_at: DateTime<Utc>,
    ) -> Result<Event> {
        let store = ctx.data_unchecked::<NotificationStore>();
        let event = store.create_or_get_event(&event.into(), created_at).await?;
        Ok(Event {
            provider_id: event.provider_id,
            id: event.event_id,
        })
    }

    async fn create_notification(
        &self,
        ctx: &Context<'_>,
        event: EventInput,
        user: UserInput,
    ) -> Result<Notification> {
        let store = ctx.data_unchecked::<NotificationStore>();
        let notification = store
            .create_or_get_notification(&event.into(), &user.into())
            .await?;
        Ok(notification.into())
    }

    /// Marks a notification as seen.
    async fn change_notification_status(&self, ctx: &Context<'_>, id: ID) -> Result<Notification> {
        let store = ctx.data_unchecked::<NotificationStore>();
        let row_id = decode_global_id(&id)?;
        Ok(store.mark_seen(row_id).await?.into())
    }
}
