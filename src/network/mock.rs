// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Recording transport for tests

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::command::{
    ContinueRequestParams, EnableParams, FailRequestParams, FulfillRequestParams, ResponseBody,
};
use super::transport::FetchTransport;
use crate::error::{Error, Result};

/// A transport call as it reached the browser
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Enable(EnableParams),
    Disable,
    Continue(ContinueRequestParams),
    Fail(FailRequestParams),
    Fulfill(FulfillRequestParams),
    GetResponseBody(String),
}

impl Call {
    /// Continue, fail or fulfill
    pub fn is_terminal(&self) -> bool {
        matches!(self, Call::Continue(_) | Call::Fail(_) | Call::Fulfill(_))
    }
}

/// Records every call, serves canned response bodies
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<(Instant, Call)>>,
    bodies: Mutex<HashMap<String, ResponseBody>>,
    fail_methods: Mutex<Vec<&'static str>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `Fetch.getResponseBody` of `request_id`
    pub fn with_body(self, request_id: &str, body: ResponseBody) -> Self {
        self.bodies.lock().insert(request_id.to_string(), body);
        self
    }

    /// Make every call of `method` fail
    pub fn failing(self, method: &'static str) -> Self {
        self.fail_methods.lock().push(method);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
        self.calls.lock().clone()
    }

    pub fn terminal_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_terminal).collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, method: &'static str, call: Call) -> Result<()> {
        self.calls.lock().push((Instant::now(), call));
        if self.fail_methods.lock().contains(&method) {
            return Err(Error::transport(method, "mock failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl FetchTransport for MockTransport {
    async fn enable(&self, params: EnableParams) -> Result<()> {
        self.record("Fetch.enable", Call::Enable(params))
    }

    async fn disable(&self) -> Result<()> {
        self.record("Fetch.disable", Call::Disable)
    }

    async fn continue_request(&self, params: ContinueRequestParams) -> Result<()> {
        self.record("Fetch.continueRequest", Call::Continue(params))
    }

    async fn fail_request(&self, params: FailRequestParams) -> Result<()> {
        self.record("Fetch.failRequest", Call::Fail(params))
    }

    async fn fulfill_request(&self, params: FulfillRequestParams) -> Result<()> {
        self.record("Fetch.fulfillRequest", Call::Fulfill(params))
    }

    async fn get_response_body(&self, request_id: &str) -> Result<ResponseBody> {
        self.record(
            "Fetch.getResponseBody",
            Call::GetResponseBody(request_id.to_string()),
        )?;
        self.bodies.lock().get(request_id).cloned().ok_or_else(|| Error::Cdp {
            code: -32000,
            message: "No resource with given identifier found".to_string(),
            data: None,
        })
    }
}
