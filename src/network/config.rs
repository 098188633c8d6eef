// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor configuration

/// Status code used when a request-stage fulfill does not set one
pub const STATUS_CODE_OK: u16 = 200;

/// Interceptor configuration
#[derive(Debug, Clone)]
pub struct InterceptorConfig {
    /// Forward `handleAuthRequests` to `Fetch.enable`
    pub handle_auth_requests: bool,
    /// Status for request-stage fulfills without an explicit code
    pub default_response_code: u16,
    /// Issue at most one terminal command per paused event
    pub single_resolution: bool,
    /// Continue paused events that no rule applied to
    pub continue_unmatched: bool,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            handle_auth_requests: false,
            default_response_code: STATUS_CODE_OK,
            single_resolution: true,
            continue_unmatched: false,
        }
    }
}

impl InterceptorConfig {
    /// Create a new interceptor config
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the browser to pause auth challenges too
    pub fn handle_auth_requests(mut self, handle: bool) -> Self {
        self.handle_auth_requests = handle;
        self
    }

    /// Set default fulfill status
    pub fn default_response_code(mut self, code: u16) -> Self {
        self.default_response_code = code;
        self
    }

    /// Enable/disable the one-terminal-command-per-event guard
    pub fn single_resolution(mut self, enabled: bool) -> Self {
        self.single_resolution = enabled;
        self
    }

    /// Enable/disable continuing unmatched events
    pub fn continue_unmatched(mut self, enabled: bool) -> Self {
        self.continue_unmatched = enabled;
        self
    }

    /// Config for a session where this engine is the only Fetch client
    pub fn for_exclusive_session() -> Self {
        Self {
            continue_unmatched: true,
            ..Default::default()
        }
    }
}
