// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Modification results returned by interception callbacks
//!
//! A callback either lets the exchange through (optionally rewritten),
//! answers it with a synthetic response, or fails it. Any of those can be
//! postponed by a delay.

use std::time::Duration;

use super::event::{ErrorReason, HeaderEntry};

/// Request fields to rewrite before the request hits the network
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinueOverrides {
    pub url: Option<String>,
    pub method: Option<String>,
    /// Plain text body, encoded on the way out
    pub post_data: Option<String>,
    pub headers: Option<Vec<HeaderEntry>>,
}

impl ContinueOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Rewrite method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Rewrite request body
    pub fn post_data(mut self, body: impl Into<String>) -> Self {
        self.post_data = Some(body.into());
        self
    }

    /// Replace request headers
    pub fn headers(mut self, headers: Vec<HeaderEntry>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Nothing to rewrite
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.method.is_none()
            && self.post_data.is_none()
            && self.headers.is_none()
    }
}

/// Synthetic (or rewritten) response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FulfillResponse {
    pub response_code: Option<u16>,
    pub response_headers: Option<Vec<HeaderEntry>>,
    /// Plain text body, encoded on the way out
    pub body: Option<String>,
    pub response_phrase: Option<String>,
}

impl FulfillResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set status code
    pub fn status(mut self, code: u16) -> Self {
        self.response_code = Some(code);
        self
    }

    /// Set response headers
    pub fn headers(mut self, headers: Vec<HeaderEntry>) -> Self {
        self.response_headers = Some(headers);
        self
    }

    /// Add a single response header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.response_headers
            .get_or_insert_with(Vec::new)
            .push(HeaderEntry::new(name, value));
        self
    }

    /// Set body
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set status text
    pub fn phrase(mut self, phrase: impl Into<String>) -> Self {
        self.response_phrase = Some(phrase.into());
        self
    }
}

/// Terminal decision for a request-stage pause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAction {
    /// Send the (possibly rewritten) request to the network
    Continue(ContinueOverrides),
    /// Answer without touching the network
    Fulfill(FulfillResponse),
    /// Fail the request
    Fail(ErrorReason),
}

/// Terminal decision for a response-stage pause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseAction {
    /// Deliver this response to the page
    Fulfill(FulfillResponse),
    /// Fail the request
    Fail(ErrorReason),
}

/// Result of a `modify_request` callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestModification {
    pub action: RequestAction,
    pub delay: Option<Duration>,
}

impl RequestModification {
    /// Continue with rewritten request fields
    pub fn continue_with(overrides: ContinueOverrides) -> Self {
        RequestAction::Continue(overrides).into()
    }

    /// Continue unchanged
    pub fn pass() -> Self {
        Self::continue_with(ContinueOverrides::default())
    }

    /// Answer with a synthetic response
    pub fn fulfill(response: FulfillResponse) -> Self {
        RequestAction::Fulfill(response).into()
    }

    /// Fail the request
    pub fn fail(reason: ErrorReason) -> Self {
        RequestAction::Fail(reason).into()
    }

    /// Postpone the terminal action
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Postpone the terminal action by `ms` milliseconds
    pub fn with_delay_ms(self, ms: u64) -> Self {
        self.with_delay(Duration::from_millis(ms))
    }
}

impl From<RequestAction> for RequestModification {
    fn from(action: RequestAction) -> Self {
        Self {
            action,
            delay: None,
        }
    }
}

/// Result of a `modify_response` callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseModification {
    pub action: ResponseAction,
    pub delay: Option<Duration>,
}

impl ResponseModification {
    /// Deliver this response; unset status and headers fall back to the
    /// observed ones, an unset body is sent empty
    pub fn fulfill(response: FulfillResponse) -> Self {
        ResponseAction::Fulfill(response).into()
    }

    /// Deliver the observed status and headers with a new body
    pub fn body(body: impl Into<String>) -> Self {
        Self::fulfill(FulfillResponse::new().body(body))
    }

    /// Fail the request
    pub fn fail(reason: ErrorReason) -> Self {
        ResponseAction::Fail(reason).into()
    }

    /// Postpone the terminal action
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Postpone the terminal action by `ms` milliseconds
    pub fn with_delay_ms(self, ms: u64) -> Self {
        self.with_delay(Duration::from_millis(ms))
    }
}

impl From<ResponseAction> for ResponseModification {
    fn from(action: ResponseAction) -> Self {
        Self {
            action,
            delay: None,
        }
    }
}
