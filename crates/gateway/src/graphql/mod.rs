use async_graphql::{EmptySubscription, MergedObject, Schema};
use notification_store::NotificationStore;
use resolution::ResolutionEngine;

mod content;
mod inbox;

pub use content::{AliasInput, Article, ArticleRevision, Instance, License, Page, UnknownUuid, Uuid};
pub use inbox::{
    Event, EventInput, Notification, NotificationConnection, NotificationEdge, User, UserInput,
};

pub type GatewaySchema = Schema<Query, Mutation, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct Query(content::ContentQuery, inbox::NotificationQuery);

#[derive(MergedObject, Default)]
pub struct Mutation(inbox::NotificationMutation);

pub fn build_schema(engine: ResolutionEngine, store: NotificationStore) -> GatewaySchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(engine)
        .data(store)
        .finish()
}
