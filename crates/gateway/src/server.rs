use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use content_source::HttpContentSource;
use notification_store::{InMemoryNotificationStore, NotificationStore};
use resolution::ResolutionEngine;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::graphql::{self, GatewaySchema};
use crate::Error;

/// Starts the gateway and serves until ctrl-c.
pub async fn serve(config: Config) -> Result<(), Error> {
    let source = HttpContentSource::content_source(config.upstream.url.clone());
    let engine = ResolutionEngine::new(source);
    let store = NotificationStore::new(InMemoryNotificationStore::default());
    let schema = graphql::build_schema(engine, store);

    let app = router(schema);

    let listen_address = config.network.listen_address;
    let listener = tokio::net::TcpListener::bind(listen_address)
        .await
        .map_err(|err| Error::Bind(listen_address, err))?;
    tracing::info!("GraphQL endpoint exposed at http://{listen_address}/graphql");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Server)?;

    Ok(())
}

pub fn router(schema: GatewaySchema) -> Router {
    Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(schema)
}

async fn graphql_handler(State(schema): State<GatewaySchema>, request: GraphQLRequest) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
}
