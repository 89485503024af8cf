// Application layer - Use cases and the traits they depend on
pub mod agent_view;
pub mod coach_gateway;
pub mod dashboard_view;
pub mod proxy_service;
pub mod upstream;
