// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interception callbacks
//!
//! `ModifyRequest` decides a request before it is sent, `ModifyResponse`
//! decides it after the response arrived. Async closures implement both
//! traits, so most callers never name them.
//!
//! # Example
//!
//! ```rust,no_run
//! use fetch_interceptor::network::{
//!     ModifyRequest, RequestModification, RequestPausedEvent, ErrorReason,
//! };
//! use fetch_interceptor::Result;
//! use async_trait::async_trait;
//!
//! struct BlockTrackers;
//!
//! #[async_trait]
//! impl ModifyRequest for BlockTrackers {
//!     async fn modify_request(
//!         &self,
//!         event: &RequestPausedEvent,
//!     ) -> Result<Option<RequestModification>> {
//!         if event.url().contains("tracker") {
//!             return Ok(Some(RequestModification::fail(ErrorReason::BlockedByClient)));
//!         }
//!         Ok(None)
//!     }
//! }
//! ```

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use super::event::{ErrorReason, RequestPausedEvent};
use super::modification::{FulfillResponse, RequestModification, ResponseModification};
use crate::error::Result;

/// Request-stage callback
///
/// Returning `Ok(None)` lets the request continue unchanged.
#[async_trait]
pub trait ModifyRequest: Send + Sync {
    async fn modify_request(
        &self,
        event: &RequestPausedEvent,
    ) -> Result<Option<RequestModification>>;
}

/// Response-stage callback
///
/// `body` is the observed response body as text. Returning `Ok(None)`
/// delivers the observed response unchanged.
#[async_trait]
pub trait ModifyResponse: Send + Sync {
    async fn modify_response(
        &self,
        body: String,
        event: &RequestPausedEvent,
    ) -> Result<Option<ResponseModification>>;
}

#[async_trait]
impl<F, Fut> ModifyRequest for F
where
    F: Fn(RequestPausedEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<RequestModification>>> + Send + 'static,
{
    async fn modify_request(
        &self,
        event: &RequestPausedEvent,
    ) -> Result<Option<RequestModification>> {
        (self)(event.clone()).await
    }
}

#[async_trait]
impl<F, Fut> ModifyResponse for F
where
    F: Fn(String, RequestPausedEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<ResponseModification>>> + Send + 'static,
{
    async fn modify_response(
        &self,
        body: String,
        event: &RequestPausedEvent,
    ) -> Result<Option<ResponseModification>> {
        (self)(body, event.clone()).await
    }
}

/// Fails every request it sees
#[derive(Debug, Clone)]
pub struct BlockRequests {
    reason: ErrorReason,
}

impl BlockRequests {
    pub fn new(reason: ErrorReason) -> Self {
        Self { reason }
    }
}

impl Default for BlockRequests {
    fn default() -> Self {
        Self::new(ErrorReason::BlockedByClient)
    }
}

#[async_trait]
impl ModifyRequest for BlockRequests {
    async fn modify_request(
        &self,
        event: &RequestPausedEvent,
    ) -> Result<Option<RequestModification>> {
        tracing::info!(url = %event.url(), reason = %self.reason, "Blocking request");
        Ok(Some(RequestModification::fail(self.reason)))
    }
}

/// Answers every request with the same canned response
#[derive(Debug, Clone)]
pub struct MockResponse {
    response: FulfillResponse,
}

impl MockResponse {
    pub fn new(response: FulfillResponse) -> Self {
        Self { response }
    }

    /// 200 with a JSON body
    pub fn json(body: impl Into<String>) -> Self {
        Self::new(
            FulfillResponse::new()
                .status(200)
                .header("content-type", "application/json")
                .body(body),
        )
    }
}

#[async_trait]
impl ModifyRequest for MockResponse {
    async fn modify_request(
        &self,
        _event: &RequestPausedEvent,
    ) -> Result<Option<RequestModification>> {
        Ok(Some(RequestModification::fulfill(self.response.clone())))
    }
}

/// Holds every request back for a fixed latency, then lets it through
#[derive(Debug, Clone)]
pub struct Latency {
    delay: Duration,
}

impl Latency {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ModifyRequest for Latency {
    async fn modify_request(
        &self,
        _event: &RequestPausedEvent,
    ) -> Result<Option<RequestModification>> {
        Ok(Some(RequestModification::pass().with_delay(self.delay)))
    }
}

/// Logs responses and passes them through untouched
#[derive(Debug, Clone, Default)]
pub struct ResponseLogger {
    /// Log response bodies
    pub log_bodies: bool,
}

#[async_trait]
impl ModifyResponse for ResponseLogger {
    async fn modify_response(
        &self,
        body: String,
        event: &RequestPausedEvent,
    ) -> Result<Option<ResponseModification>> {
        tracing::info!(
            url = %event.url(),
            resource_type = %event.resource_type,
            status = event.response_status_code.unwrap_or_default(),
            size = body.len(),
            "Response"
        );

        if self.log_bodies {
            tracing::debug!(body = %body, "Response body");
        }

        Ok(None)
    }
}
