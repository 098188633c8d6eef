// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the interception engine
//!
//! Configuration errors surface synchronously from registration calls.
//! Transport and callback errors propagate out of the pause resolver.

use thiserror::Error;

/// Result type alias for interception operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// URL glob could not be compiled into a matcher
    #[error("Invalid URL pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Unknown `Network.ResourceType` value
    #[error("Invalid resource type: {0}")]
    InvalidResourceType(String),

    /// Unknown `Network.ErrorReason` value
    #[error("Invalid error reason: {0}")]
    InvalidErrorReason(String),

    /// A transport command failed before the browser answered
    #[error("Transport error in {method}: {reason}")]
    Transport { method: String, reason: String },

    /// The browser rejected a command
    #[error("CDP error {code}: {message}")]
    Cdp {
        code: i64,
        message: String,
        data: Option<String>,
    },

    /// Timeout error
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// WebSocket error
    #[error("WebSocket error: {reason}")]
    WebSocket { reason: String, url: Option<String> },

    /// The debugging session went away
    #[error("DevTools connection closed")]
    ConnectionClosed,

    /// A user-supplied modification callback failed
    #[error("Interception callback failed: {0}")]
    Callback(String),

    /// Response body could not be decoded
    #[error("Body decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn transport(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Transport {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Create a WebSocket error for the endpoint at `url`
    pub fn websocket(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::WebSocket {
            reason: reason.into(),
            url: Some(url.into()),
        }
    }

    /// Create a callback error
    pub fn callback<S: Into<String>>(msg: S) -> Self {
        Error::Callback(msg.into())
    }

    /// Check if this error was caused by bad caller input at registration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidPattern { .. }
                | Error::InvalidResourceType(_)
                | Error::InvalidErrorReason(_)
        )
    }

    /// Check if this error came from talking to the browser
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. }
                | Error::Cdp { .. }
                | Error::Timeout { .. }
                | Error::WebSocket { .. }
                | Error::ConnectionClosed
        )
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Attribute a failure to a transport method
    fn with_method(self, method: &str) -> Result<T>;

    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_method(self, method: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            Error::Other(reason) => Error::transport(method, reason),
            Error::Serialization(err) => Error::transport(method, err.to_string()),
            other => other,
        })
    }

    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}
