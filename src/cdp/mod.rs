// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Chrome DevTools Protocol transport
//!
//! WebSocket implementation of [`FetchTransport`](crate::network::FetchTransport).

mod message;
mod session;

pub use message::{
    build_cdp_message, parse_cdp_event, parse_cdp_response, CdpEvent, CdpResponse,
    CdpResponseError, REQUEST_PAUSED,
};
pub use session::{CdpConfig, CdpSession};
