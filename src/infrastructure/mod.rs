// Infrastructure layer - External dependencies and adapters
pub mod cache;
pub mod config;
pub mod graphql_client;
pub mod http_response;
pub mod logging;
pub mod operations;
pub mod reqwest_transport;
