// Presentation layer - HTTP surface of the proxy and the terminal dashboard
pub mod app_state;
pub mod console;
pub mod handlers;
pub mod render;
pub mod routes;
