//! # SiteChat Gateway
//!
//! HTTP API (Axum) serving the chatbot endpoint and the static site.

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
