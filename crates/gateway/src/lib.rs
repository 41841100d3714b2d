//! The outward-facing GraphQL gateway: schema, HTTP server and
//! configuration. The interesting resolution logic lives in the `resolution`
//! crate; this crate binds it to the transport.

pub mod config;
pub mod graphql;
pub mod server;

/// The gateway error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("binding {0}: {1}")]
    Bind(std::net::SocketAddr, #[source] std::io::Error),
    #[error("serving requests: {0}")]
    Server(#[source] std::io::Error),
}
