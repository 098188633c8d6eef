// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam between the interception engine and the browser
//!
//! Implementations forward each call to the `Fetch` domain of a DevTools
//! session. Calls are expected to fail fast; nothing here retries.

use std::sync::Arc;

use async_trait::async_trait;

use super::command::{
    ContinueRequestParams, EnableParams, FailRequestParams, FulfillRequestParams, ResponseBody,
};
use crate::error::Result;

/// Fetch domain commands used by the interception engine
#[async_trait]
pub trait FetchTransport: Send + Sync {
    /// `Fetch.enable`; replaces the whole active pattern set
    async fn enable(&self, params: EnableParams) -> Result<()>;

    /// `Fetch.disable`
    async fn disable(&self) -> Result<()>;

    /// `Fetch.continueRequest`
    async fn continue_request(&self, params: ContinueRequestParams) -> Result<()>;

    /// `Fetch.failRequest`
    async fn fail_request(&self, params: FailRequestParams) -> Result<()>;

    /// `Fetch.fulfillRequest`
    async fn fulfill_request(&self, params: FulfillRequestParams) -> Result<()>;

    /// `Fetch.getResponseBody`
    async fn get_response_body(&self, request_id: &str) -> Result<ResponseBody>;
}

#[async_trait]
impl<T: FetchTransport + ?Sized> FetchTransport for Arc<T> {
    async fn enable(&self, params: EnableParams) -> Result<()> {
        (**self).enable(params).await
    }

    async fn disable(&self) -> Result<()> {
        (**self).disable().await
    }

    async fn continue_request(&self, params: ContinueRequestParams) -> Result<()> {
        (**self).continue_request(params).await
    }

    async fn fail_request(&self, params: FailRequestParams) -> Result<()> {
        (**self).fail_request(params).await
    }

    async fn fulfill_request(&self, params: FulfillRequestParams) -> Result<()> {
        (**self).fulfill_request(params).await
    }

    async fn get_response_body(&self, request_id: &str) -> Result<ResponseBody> {
        (**self).get_response_body(request_id).await
    }
}
