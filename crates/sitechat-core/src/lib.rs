//! # SiteChat Core
//!
//! Shared configuration and error types for the SiteChat crates.

pub mod config;
pub mod error;

pub use config::SiteChatConfig;
pub use error::{Result, SiteChatError};
