//! # PostRelay
//!
//! In-memory order lifecycle tracker behind the PostRelay notification demo.
//!
//! Orders move through `placed → confirmed → shipped → delivered`; every
//! step fabricates one SMS and one email. State lives in a single actor
//! ([`actors::DashboardService`]) that applies the pure functions in
//! [`store`] and swaps the result in. Callers talk to it through
//! [`clients::DashboardClient`].
//!
//! ```no_run
//! # async fn demo() -> Result<(), postrelay::error::OrderError> {
//! use postrelay::app_system::DashboardSystem;
//! use postrelay::app_config::AppConfig;
//!
//! let system = DashboardSystem::new(&AppConfig::default());
//! let receipt = system.client.advance_order("ORD-001".to_string()).await?;
//! assert_eq!(receipt.notifications.len(), 2);
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actors;
pub mod app_config;
pub mod app_system;
pub mod clients;
pub mod demo;
pub mod domain;
pub mod error;
pub mod export;
pub mod messages;
pub mod simulation;
pub mod store;
pub mod summary;
pub mod templates;
pub mod webhook;

#[cfg(test)]
mod mock_framework;
