// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetch-domain request interception
//!
//! Register URL-glob rules with async callbacks, keep the browser's pause
//! patterns in sync with them and resolve every paused request.

mod command;
mod config;
mod event;
mod handler;
mod interceptor;
mod metrics;
mod modification;
mod pattern;
mod registry;
mod transport;

#[cfg(test)]
mod mock;

pub use command::{
    decode_body, encode_body, ContinueRequestParams, EnableParams, FailRequestParams,
    FulfillRequestParams, ResponseBody,
};
pub use config::{InterceptorConfig, STATUS_CODE_OK};
pub use event::{
    ErrorReason, HeaderEntry, Request, RequestPattern, RequestPausedEvent, RequestStage,
    ResourceType,
};
pub use handler::{BlockRequests, Latency, MockResponse, ModifyRequest, ModifyResponse, ResponseLogger};
pub use interceptor::{RequestInterceptionManager, Subscription};
pub use metrics::{InterceptionMetrics, MetricsReport, TerminalAction};
pub use modification::{
    ContinueOverrides, FulfillResponse, RequestAction, RequestModification, ResponseAction,
    ResponseModification,
};
pub use pattern::{get_url_pattern_regex, UrlPattern};
pub use registry::{CompiledInterception, Interception, Registry};
pub use transport::FetchTransport;
