//! HTTP layer: configuration, auth, routing, handlers and the shared
//! response/error envelopes.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod upload;
