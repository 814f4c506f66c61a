//! HTTP API: server, routing, and request/response mapping.
//!
//! The access core is a library; this crate is the thin axum surface around
//! it — identity middleware, the request guard adapter, and a small routing
//! tree for businesses and their teams.

pub mod app;
pub mod context;
pub mod guard;
pub mod middleware;
