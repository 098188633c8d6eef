// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetch domain event types
//!
//! Mirrors the JSON shapes of `Fetch.requestPaused` and the enums it
//! references, so events can be deserialized straight off the wire.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Header entry (CDP `Fetch.HeaderEntry`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Resource type as reported by the browser (CDP `Network.ResourceType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Document,
    Stylesheet,
    Image,
    Media,
    Font,
    Script,
    TextTrack,
    #[serde(rename = "XHR")]
    Xhr,
    Fetch,
    Prefetch,
    EventSource,
    WebSocket,
    Manifest,
    SignedExchange,
    Ping,
    #[serde(rename = "CSPViolationReport")]
    CspViolationReport,
    Preflight,
    #[serde(rename = "FedCM")]
    FedCm,
    /// Also stands in for types this crate does not know yet
    #[serde(other)]
    Other,
}

impl ResourceType {
    /// Wire name of the resource type
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Document => "Document",
            ResourceType::Stylesheet => "Stylesheet",
            ResourceType::Image => "Image",
            ResourceType::Media => "Media",
            ResourceType::Font => "Font",
            ResourceType::Script => "Script",
            ResourceType::TextTrack => "TextTrack",
            ResourceType::Xhr => "XHR",
            ResourceType::Fetch => "Fetch",
            ResourceType::Prefetch => "Prefetch",
            ResourceType::EventSource => "EventSource",
            ResourceType::WebSocket => "WebSocket",
            ResourceType::Manifest => "Manifest",
            ResourceType::SignedExchange => "SignedExchange",
            ResourceType::Ping => "Ping",
            ResourceType::CspViolationReport => "CSPViolationReport",
            ResourceType::Preflight => "Preflight",
            ResourceType::FedCm => "FedCM",
            ResourceType::Other => "Other",
        }
    }

    /// All known resource types
    pub fn all() -> &'static [ResourceType] {
        &[
            ResourceType::Document,
            ResourceType::Stylesheet,
            ResourceType::Image,
            ResourceType::Media,
            ResourceType::Font,
            ResourceType::Script,
            ResourceType::TextTrack,
            ResourceType::Xhr,
            ResourceType::Fetch,
            ResourceType::Prefetch,
            ResourceType::EventSource,
            ResourceType::WebSocket,
            ResourceType::Manifest,
            ResourceType::SignedExchange,
            ResourceType::Ping,
            ResourceType::CspViolationReport,
            ResourceType::Preflight,
            ResourceType::FedCm,
            ResourceType::Other,
        ]
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResourceType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidResourceType(s.to_string()))
    }
}

/// Network level fetch failure reason (CDP `Network.ErrorReason`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorReason {
    Failed,
    Aborted,
    TimedOut,
    AccessDenied,
    ConnectionClosed,
    ConnectionReset,
    ConnectionRefused,
    ConnectionAborted,
    ConnectionFailed,
    NameNotResolved,
    InternetDisconnected,
    AddressUnreachable,
    BlockedByClient,
    BlockedByResponse,
}

impl ErrorReason {
    /// Wire name of the error reason
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorReason::Failed => "Failed",
            ErrorReason::Aborted => "Aborted",
            ErrorReason::TimedOut => "TimedOut",
            ErrorReason::AccessDenied => "AccessDenied",
            ErrorReason::ConnectionClosed => "ConnectionClosed",
            ErrorReason::ConnectionReset => "ConnectionReset",
            ErrorReason::ConnectionRefused => "ConnectionRefused",
            ErrorReason::ConnectionAborted => "ConnectionAborted",
            ErrorReason::ConnectionFailed => "ConnectionFailed",
            ErrorReason::NameNotResolved => "NameNotResolved",
            ErrorReason::InternetDisconnected => "InternetDisconnected",
            ErrorReason::AddressUnreachable => "AddressUnreachable",
            ErrorReason::BlockedByClient => "BlockedByClient",
            ErrorReason::BlockedByResponse => "BlockedByResponse",
        }
    }

    fn all() -> &'static [ErrorReason] {
        &[
            ErrorReason::Failed,
            ErrorReason::Aborted,
            ErrorReason::TimedOut,
            ErrorReason::AccessDenied,
            ErrorReason::ConnectionClosed,
            ErrorReason::ConnectionReset,
            ErrorReason::ConnectionRefused,
            ErrorReason::ConnectionAborted,
            ErrorReason::ConnectionFailed,
            ErrorReason::NameNotResolved,
            ErrorReason::InternetDisconnected,
            ErrorReason::AddressUnreachable,
            ErrorReason::BlockedByClient,
            ErrorReason::BlockedByResponse,
        ]
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorReason {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ErrorReason::all()
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidErrorReason(s.to_string()))
    }
}

/// Stage at which to begin intercepting requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStage {
    Request,
    Response,
}

/// Pattern descriptor sent with `Fetch.enable`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPattern {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_stage: Option<RequestStage>,
}

/// The paused request as the browser sees it (CDP `Network.Request`, trimmed)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Request URL without fragment
    pub url: String,
    /// Fragment, if the URL had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_fragment: Option<String>,
    /// HTTP method
    #[serde(default)]
    pub method: String,
    /// Request headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Request body, when small enough to be inlined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_post_data: Option<bool>,
}

impl Request {
    /// Create a GET request for a URL
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            url_fragment: None,
            method: "GET".to_string(),
            headers: HashMap::new(),
            post_data: None,
            has_post_data: None,
        }
    }
}

/// `Fetch.requestPaused` event parameters
///
/// The same logical exchange can be paused twice: once before the request is
/// sent and once after the response headers arrive. `response_status_code` is
/// only present in the second case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPausedEvent {
    /// Each paused request has a unique id
    pub request_id: String,
    /// Details of the intercepted request
    pub request: Request,
    /// Frame that initiated the request
    #[serde(default)]
    pub frame_id: String,
    /// How the requested resource will be used
    pub resource_type: ResourceType,
    /// Unknown reasons read as absent
    #[serde(
        default,
        deserialize_with = "lenient_error_reason",
        skip_serializing_if = "Option::is_none"
    )]
    pub response_error_reason: Option<ErrorReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<Vec<HeaderEntry>>,
    /// Network.requestWillBeSent id, if the Network domain is enabled too
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
}

impl RequestPausedEvent {
    /// Create a request-stage event
    pub fn request_stage(
        request_id: impl Into<String>,
        url: impl Into<String>,
        resource_type: ResourceType,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            request: Request::get(url),
            frame_id: String::new(),
            resource_type,
            response_error_reason: None,
            response_status_code: None,
            response_status_text: None,
            response_headers: None,
            network_id: None,
        }
    }

    /// Create a response-stage event with the observed status and headers
    pub fn response_stage(
        request_id: impl Into<String>,
        url: impl Into<String>,
        resource_type: ResourceType,
        status: u16,
        headers: Vec<HeaderEntry>,
    ) -> Self {
        Self {
            response_status_code: Some(status),
            response_headers: Some(headers),
            ..Self::request_stage(request_id, url, resource_type)
        }
    }

    /// Whether the response for this exchange has already been received
    pub fn is_response_stage(&self) -> bool {
        self.response_status_code.is_some()
    }

    /// Request URL
    pub fn url(&self) -> &str {
        &self.request.url
    }
}

fn lenient_error_reason<'de, D>(deserializer: D) -> std::result::Result<Option<ErrorReason>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.parse().ok()))
}
