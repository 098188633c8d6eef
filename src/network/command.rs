// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetch domain command parameters
//!
//! Field names and optionality follow the DevTools protocol; absent optional
//! fields are omitted from the serialized JSON.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::event::{ErrorReason, HeaderEntry, RequestPattern};
use crate::error::Result;

/// `Fetch.enable` parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableParams {
    pub handle_auth_requests: bool,
    pub patterns: Vec<RequestPattern>,
}

/// `Fetch.continueRequest` parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueRequestParams {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Base64-encoded request body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<HeaderEntry>>,
    /// Pause this exchange again once the response arrives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercept_response: Option<bool>,
}

impl ContinueRequestParams {
    /// Continue the request unchanged
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Default::default()
        }
    }
}

/// `Fetch.failRequest` parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailRequestParams {
    pub request_id: String,
    pub error_reason: ErrorReason,
}

/// `Fetch.fulfillRequest` parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillRequestParams {
    pub request_id: String,
    pub response_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<Vec<HeaderEntry>>,
    /// Base64-encoded response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_phrase: Option<String>,
}

impl FulfillRequestParams {
    /// Decode the body back to text (empty when no body is sent)
    pub fn decoded_body(&self) -> Result<String> {
        match self.body {
            Some(ref body) => decode_body(body),
            None => Ok(String::new()),
        }
    }
}

/// `Fetch.getResponseBody` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub body: String,
    pub base64_encoded: bool,
}

impl ResponseBody {
    /// Plain text body
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            base64_encoded: false,
        }
    }

    /// Body as the browser would ship binary content
    pub fn base64(raw: impl AsRef<[u8]>) -> Self {
        Self {
            body: STANDARD.encode(raw),
            base64_encoded: true,
        }
    }

    /// Body as UTF-8 text, decoding base64 when flagged
    pub fn into_text(self) -> Result<String> {
        if self.base64_encoded {
            decode_body(&self.body)
        } else {
            Ok(self.body)
        }
    }

    /// Body as UTF-8 text without consuming the raw body
    pub fn text_lossy(&self) -> Result<String> {
        if self.base64_encoded {
            decode_body(&self.body)
        } else {
            Ok(self.body.clone())
        }
    }

    /// Exact bytes as base64, ready for `Fetch.fulfillRequest`
    pub fn into_base64(self) -> String {
        if self.base64_encoded {
            self.body
        } else {
            encode_body(&self.body)
        }
    }
}

/// Encode a body for `Fetch.fulfillRequest` / `Fetch.continueRequest`
pub fn encode_body(body: &str) -> String {
    STANDARD.encode(body.as_bytes())
}

/// Decode a base64 body to text; invalid UTF-8 is replaced, not rejected
pub fn decode_body(encoded: &str) -> Result<String> {
    let raw = STANDARD.decode(encoded)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::event::{RequestStage, ResourceType};

    #[test]
    fn test_enable_params_wire_shape() {
        let params = EnableParams {
            handle_auth_requests: false,
            patterns: vec![RequestPattern {
                url_pattern: Some("*.js".to_string()),
                resource_type: Some(ResourceType::Script),
                request_stage: Some(RequestStage::Request),
            }],
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({
                "handleAuthRequests": false,
                "patterns": [{
                    "urlPattern": "*.js",
                    "resourceType": "Script",
                    "requestStage": "Request"
                }]
            })
        );
    }

    #[test]
    fn test_continue_params_omit_unset_fields() {
        let params = ContinueRequestParams {
            intercept_response: Some(true),
            ..ContinueRequestParams::new("r1")
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({ "requestId": "r1", "interceptResponse": true })
        );
    }

    #[test]
    fn test_body_codec() {
        assert_eq!(encode_body("X"), "WA==");
        assert_eq!(decode_body("WA==").unwrap(), "X");
        assert!(decode_body("not base64!").is_err());
    }

    #[test]
    fn test_response_body_text() {
        assert_eq!(ResponseBody::text("hi").into_text().unwrap(), "hi");
        assert_eq!(ResponseBody::base64("héllo").into_text().unwrap(), "héllo");
        assert_eq!(
            ResponseBody::base64([0xff, b'a']).into_text().unwrap(),
            "\u{fffd}a"
        );
    }

    #[test]
    fn test_response_body_keeps_raw_bytes() {
        let binary = ResponseBody::base64([0x89, b'P', b'N', b'G', 0xff, 0x00]);
        assert_eq!(binary.text_lossy().unwrap(), "\u{fffd}PNG\u{fffd}\0");
        assert_eq!(binary.into_base64(), STANDARD.encode([0x89, b'P', b'N', b'G', 0xff, 0x00]));

        assert_eq!(ResponseBody::text("hi").into_base64(), "aGk=");
    }
}
