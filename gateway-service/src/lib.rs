//! gateway-service: create/list/get over a document store, plus health and
//! schema introspection.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
