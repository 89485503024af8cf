//! Baby-care dashboard: the `/api/graphql` edge proxy, the GraphQL client
//! with its normalized cache, and the dashboard and Q&A view state.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
