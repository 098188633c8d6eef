// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DevTools WebSocket session
//!
//! Correlates command responses by id and forwards `Fetch.requestPaused`
//! events to a channel the interception manager can listen on.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::message::{parse_cdp_event, parse_cdp_response, CdpCommand, CdpResponse, REQUEST_PAUSED};
use crate::error::{Error, ErrorContext, Result};
use crate::network::{
    ContinueRequestParams, EnableParams, FailRequestParams, FetchTransport, FulfillRequestParams,
    RequestPausedEvent, ResponseBody,
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type Pending = Arc<Mutex<HashMap<u64, oneshot::Sender<CdpResponse>>>>;

/// Session configuration
#[derive(Debug, Clone)]
pub struct CdpConfig {
    /// How long to wait for the browser to answer a command
    pub command_timeout: Duration,
}

impl Default for CdpConfig {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_secs(30),
        }
    }
}

impl CdpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set command timeout
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }
}

/// Connection to one DevTools target
pub struct CdpSession {
    ws_url: String,
    config: CdpConfig,
    next_id: AtomicU64,
    pending: Pending,
    writer: Mutex<WsSink>,
    reader: JoinHandle<()>,
}

impl CdpSession {
    /// Connect to a target's WebSocket debugger URL
    ///
    /// Returns the session and the stream of paused requests.
    pub async fn connect(
        ws_url: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<RequestPausedEvent>)> {
        Self::connect_with_config(ws_url, CdpConfig::default()).await
    }

    /// Connect with custom configuration
    pub async fn connect_with_config(
        ws_url: &str,
        config: CdpConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<RequestPausedEvent>)> {
        tracing::info!(url = %ws_url, "Connecting to DevTools");

        let (stream, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|e| Error::websocket(ws_url, e.to_string()))?;

        let (writer, reader) = stream.split();
        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let reader = tokio::spawn(read_loop(reader, Arc::clone(&pending), events_tx));

        tracing::info!(url = %ws_url, "DevTools session established");

        let session = Self {
            ws_url: ws_url.to_string(),
            config,
            next_id: AtomicU64::new(1),
            pending,
            writer: Mutex::new(writer),
            reader,
        };
        Ok((session, events_rx))
    }

    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Reader task still running
    pub fn is_connected(&self) -> bool {
        !self.reader.is_finished()
    }

    /// Send a command and wait for its result
    pub async fn send_command(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let json = serde_json::to_string(&CdpCommand { id, method, params })?;

        // Register before sending so a fast answer cannot be missed
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        tracing::trace!(id, method, "Sending command");

        let sent = self.writer.lock().await.send(Message::Text(json)).await;
        if let Err(e) = sent {
            self.pending.lock().await.remove(&id);
            return Err(Error::websocket(self.ws_url.as_str(), e.to_string()));
        }

        let timeout = self.config.command_timeout;
        let response = match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(_)) => return Err(Error::ConnectionClosed),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                return Err(Error::timeout(method, timeout.as_millis() as u64));
            }
        };

        if let Some(err) = response.error {
            return Err(Error::Cdp {
                code: err.code,
                message: err.message,
                data: err.data,
            });
        }

        Ok(response.result.unwrap_or(Value::Null))
    }

    async fn send<P: serde::Serialize>(&self, method: &str, params: P) -> Result<Value> {
        let params = serde_json::to_value(params).with_method(method)?;
        self.send_command(method, params).await
    }
}

impl Drop for CdpSession {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

#[async_trait]
impl FetchTransport for CdpSession {
    async fn enable(&self, params: EnableParams) -> Result<()> {
        self.send("Fetch.enable", params).await.map(drop)
    }

    async fn disable(&self) -> Result<()> {
        self.send_command("Fetch.disable", serde_json::json!({}))
            .await
            .map(drop)
    }

    async fn continue_request(&self, params: ContinueRequestParams) -> Result<()> {
        self.send("Fetch.continueRequest", params).await.map(drop)
    }

    async fn fail_request(&self, params: FailRequestParams) -> Result<()> {
        self.send("Fetch.failRequest", params).await.map(drop)
    }

    async fn fulfill_request(&self, params: FulfillRequestParams) -> Result<()> {
        self.send("Fetch.fulfillRequest", params).await.map(drop)
    }

    async fn get_response_body(&self, request_id: &str) -> Result<ResponseBody> {
        let result = self
            .send_command(
                "Fetch.getResponseBody",
                serde_json::json!({ "requestId": request_id }),
            )
            .await?;
        serde_json::from_value(result).with_method("Fetch.getResponseBody")
    }
}

/// Dispatch incoming messages until the socket closes
async fn read_loop(
    mut reader: SplitStream<WsStream>,
    pending: Pending,
    events: mpsc::UnboundedSender<RequestPausedEvent>,
) {
    while let Some(message) = reader.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => continue,
            },
            Ok(Message::Close(_)) => {
                tracing::info!("DevTools closed the connection");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "WebSocket read error");
                break;
            }
        };

        let json: Value = match serde_json::from_str(&text) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed DevTools message");
                continue;
            }
        };

        if let Some(response) = parse_cdp_response(&json) {
            match pending.lock().await.remove(&response.id) {
                Some(tx) => {
                    let _ = tx.send(response);
                }
                None => tracing::debug!(id = response.id, "Response for unknown command"),
            }
            continue;
        }

        let Some(event) = parse_cdp_event(&json) else {
            continue;
        };
        if event.method != REQUEST_PAUSED {
            tracing::trace!(method = %event.method, "Ignoring event");
            continue;
        }

        match serde_json::from_value::<RequestPausedEvent>(event.params) {
            Ok(paused) => {
                tracing::debug!(request_id = %paused.request_id, url = %paused.url(), "Request paused");
                if events.send(paused).is_err() {
                    tracing::debug!("Paused event receiver dropped");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Undecodable Fetch.requestPaused event"),
        }
    }

    // Waiting callers see ConnectionClosed
    pending.lock().await.clear();
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;

    use super::*;
    use crate::network::{ErrorReason, RequestPattern, RequestStage};

    /// Minimal DevTools endpoint: emits one paused event, then answers commands
    async fn fake_browser() -> (String, JoinHandle<Vec<Value>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

            let paused = serde_json::json!({
                "method": REQUEST_PAUSED,
                "params": {
                    "requestId": "interception-1",
                    "request": {"url": "https://example.com/", "method": "GET", "headers": {}},
                    "frameId": "F1",
                    "resourceType": "Document"
                }
            });
            ws.send(Message::Text(paused.to_string())).await.unwrap();

            let mut received = Vec::new();
            while let Some(Ok(Message::Text(text))) = ws.next().await {
                let command: Value = serde_json::from_str(&text).unwrap();
                let id = command["id"].clone();
                let reply = match command["method"].as_str() {
                    Some("Fetch.getResponseBody") => serde_json::json!({
                        "id": id,
                        "result": {"body": "aGk=", "base64Encoded": true}
                    }),
                    Some("Fetch.failRequest") => serde_json::json!({
                        "id": id,
                        "error": {"code": -32602, "message": "Invalid InterceptionId."}
                    }),
                    _ => serde_json::json!({"id": id, "result": {}}),
                };
                received.push(command);
                ws.send(Message::Text(reply.to_string())).await.unwrap();
            }
            received
        });

        (format!("ws://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let (url, browser) = fake_browser().await;
        let (session, mut events) = CdpSession::connect(&url).await.unwrap();
        assert!(session.is_connected());

        let paused = events.recv().await.unwrap();
        assert_eq!(paused.request_id, "interception-1");
        assert!(!paused.is_response_stage());

        session
            .enable(EnableParams {
                handle_auth_requests: false,
                patterns: vec![RequestPattern {
                    url_pattern: Some("*".to_string()),
                    resource_type: None,
                    request_stage: Some(RequestStage::Request),
                }],
            })
            .await
            .unwrap();

        let body = session.get_response_body("interception-1").await.unwrap();
        assert_eq!(body.into_text().unwrap(), "hi");

        let err = session
            .fail_request(FailRequestParams {
                request_id: "stale".to_string(),
                error_reason: ErrorReason::Failed,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cdp { code: -32602, .. }));

        drop(session);
        let received = browser.await.unwrap();
        assert_eq!(received.len(), 3);
        assert_eq!(received[0]["method"], "Fetch.enable");
        assert_eq!(received[0]["params"]["patterns"][0]["requestStage"], "Request");
        assert_eq!(received[0]["params"]["handleAuthRequests"], false);
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let err = CdpSession::connect("ws://127.0.0.1:1/devtools/page/none")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, Error::WebSocket { url: Some(_), .. }));
    }
}
