// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DevTools JSON-RPC message framing

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event method forwarded to the interception engine
pub const REQUEST_PAUSED: &str = "Fetch.requestPaused";

/// Outgoing command
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CdpCommand<'a> {
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

/// Browser answer to a command
#[derive(Debug, Clone)]
pub struct CdpResponse {
    pub id: u64,
    pub result: Option<Value>,
    pub error: Option<CdpResponseError>,
}

/// Error object of a failed command
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CdpResponseError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<String>,
}

/// Unsolicited browser event
#[derive(Debug, Clone)]
pub struct CdpEvent {
    pub method: String,
    pub params: Value,
}

/// Build a command message
pub fn build_cdp_message(id: u64, method: &str, params: Value) -> Value {
    serde_json::json!({
        "id": id,
        "method": method,
        "params": params,
    })
}

/// Parse a message carrying an `id` as a command response
pub fn parse_cdp_response(json: &Value) -> Option<CdpResponse> {
    let id = json.get("id")?.as_u64()?;
    Some(CdpResponse {
        id,
        result: json.get("result").cloned(),
        error: json
            .get("error")
            .and_then(|e| serde_json::from_value(e.clone()).ok()),
    })
}

/// Parse a message without an `id` as an event
pub fn parse_cdp_event(json: &Value) -> Option<CdpEvent> {
    if json.get("id").is_some() {
        return None;
    }
    let method = json.get("method")?.as_str()?.to_string();
    let params = json.get("params").cloned().unwrap_or(Value::Null);
    Some(CdpEvent { method, params })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{RequestPausedEvent, ResourceType};

    #[test]
    fn test_build_cdp_message() {
        let msg = build_cdp_message(3, "Fetch.enable", serde_json::json!({"patterns": []}));
        assert_eq!(msg["id"], 3);
        assert_eq!(msg["method"], "Fetch.enable");
        assert!(msg["params"]["patterns"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_command_serialization() {
        let cmd = CdpCommand {
            id: 7,
            method: "Fetch.failRequest",
            params: serde_json::json!({"requestId": "interception-1", "errorReason": "Failed"}),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json, build_cdp_message(7, "Fetch.failRequest", cmd.params.clone()));
    }

    #[test]
    fn test_parse_response_error() {
        let json = serde_json::json!({
            "id": 2,
            "error": {"code": -32602, "message": "Invalid InterceptionId."}
        });
        let resp = parse_cdp_response(&json).unwrap();
        assert_eq!(resp.id, 2);
        assert!(resp.result.is_none());
        assert_eq!(
            resp.error,
            Some(CdpResponseError {
                code: -32602,
                message: "Invalid InterceptionId.".to_string(),
                data: None,
            })
        );
    }

    #[test]
    fn test_parse_response_requires_id() {
        let json = serde_json::json!({"method": "Fetch.requestPaused", "params": {}});
        assert!(parse_cdp_response(&json).is_none());
    }

    #[test]
    fn test_parse_request_paused_event() {
        let json = serde_json::json!({
            "method": REQUEST_PAUSED,
            "params": {
                "requestId": "interception-job-1.0",
                "request": {
                    "url": "https://example.com/app.js",
                    "method": "GET",
                    "headers": {"Accept": "*/*"}
                },
                "frameId": "F1",
                "resourceType": "Script",
                "responseStatusCode": 200,
                "responseHeaders": [{"name": "content-type", "value": "text/javascript"}]
            }
        });

        let event = parse_cdp_event(&json).unwrap();
        assert_eq!(event.method, REQUEST_PAUSED);

        let paused: RequestPausedEvent = serde_json::from_value(event.params).unwrap();
        assert_eq!(paused.request_id, "interception-job-1.0");
        assert_eq!(paused.resource_type, ResourceType::Script);
        assert!(paused.is_response_stage());
    }

    #[test]
    fn test_parse_event_rejects_response() {
        let json = serde_json::json!({"id": 1, "result": {}});
        assert!(parse_cdp_event(&json).is_none());

        let no_params = parse_cdp_event(&serde_json::json!({"method": "Fetch.authRequired"})).unwrap();
        assert_eq!(no_params.params, Value::Null);
    }
}
