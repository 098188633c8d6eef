// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Fetch Interceptor - DevTools Request Interception
//!
//! Register URL-glob interception rules against a DevTools-controlled page
//! and rewrite, delay, mock or fail in-flight requests and responses.
//!
//! ## Features
//!
//! - Glob patterns: `*` and `?` wildcards, matched against the full URL
//! - Request stage: continue with overrides, fulfill locally, or fail
//! - Response stage: rewrite the body, status and headers, or fail
//! - Artificial latency on any modification
//! - Live registry: add and remove rules while events are in flight
//! - Metrics: terminal action counts and resolution latency percentiles
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fetch_interceptor::cdp::CdpSession;
//! use fetch_interceptor::network::{Interception, RequestInterceptionManager, ResponseModification};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (session, events) = CdpSession::connect("ws://127.0.0.1:9222/devtools/page/ABC").await?;
//!     let manager = Arc::new(RequestInterceptionManager::new(session));
//!     let _subscription = manager.listen(events);
//!
//!     manager
//!         .intercept([Interception::new("*://example.com/*").modify_response(
//!             |body, _event| async move {
//!                 Ok(Some(ResponseModification::body(body.to_uppercase())))
//!             },
//!         )])
//!         .await?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     manager.clear().await?;
//!     Ok(())
//! }
//! ```

#[cfg(feature = "websocket")]
pub mod cdp;
pub mod error;
pub mod network;

// Re-exports for convenience

// Errors
pub use error::{Error, ErrorContext, Result};

// Engine
pub use network::{
    Interception, InterceptorConfig, RequestInterceptionManager, Subscription,
};

// Modifications
pub use network::{
    ContinueOverrides, FulfillResponse, RequestModification, ResponseModification,
};

// Protocol types
pub use network::{ErrorReason, FetchTransport, HeaderEntry, RequestPausedEvent, ResourceType};

// Metrics
pub use network::{InterceptionMetrics, MetricsReport};

// Transport
#[cfg(feature = "websocket")]
pub use cdp::{CdpConfig, CdpSession};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
