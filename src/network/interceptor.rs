// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interception manager
//!
//! Owns the rule registry, keeps the browser's `Fetch` patterns in sync with
//! it and resolves every paused request with a terminal command.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use super::command::{
    encode_body, ContinueRequestParams, EnableParams, FailRequestParams, FulfillRequestParams,
};
use super::config::InterceptorConfig;
use super::event::{ErrorReason, RequestPausedEvent};
use super::metrics::{InterceptionMetrics, TerminalAction};
use super::modification::{ContinueOverrides, FulfillResponse, RequestAction, ResponseAction};
use super::registry::{CompiledInterception, Interception, Registry};
use super::transport::FetchTransport;
use crate::error::Result;

/// Whether the resolver may look at further rules for the current event
enum Flow {
    Next,
    Stop,
}

/// Interception engine bound to one DevTools session
///
/// Mutations (`intercept`, `remove_intercept`, `clear`) resend the complete
/// pattern set to the browser. Paused events are resolved against a snapshot
/// of the registry taken when handling starts, so a concurrent mutation is
/// never observed halfway through an event.
pub struct RequestInterceptionManager<T: FetchTransport> {
    /// Transport, exclusively owned
    transport: T,
    /// Active rules
    registry: RwLock<Registry>,
    /// Serializes registry mutations with the enable/disable that follows
    sync: Mutex<()>,
    config: InterceptorConfig,
    metrics: InterceptionMetrics,
}

impl<T: FetchTransport> RequestInterceptionManager<T> {
    /// Create a manager with default configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, InterceptorConfig::default())
    }

    /// Create a manager with custom configuration
    pub fn with_config(transport: T, config: InterceptorConfig) -> Self {
        Self {
            transport,
            registry: RwLock::new(Registry::new()),
            sync: Mutex::new(()),
            config,
            metrics: InterceptionMetrics::new(),
        }
    }

    /// Register rules, replacing any with the same URL pattern
    ///
    /// Resolves once the browser acknowledged the new pattern set. An empty
    /// input is a no-op. If any pattern fails to compile nothing is
    /// registered.
    pub async fn intercept<I>(&self, interceptions: I) -> Result<()>
    where
        I: IntoIterator<Item = Interception>,
    {
        let compiled = interceptions
            .into_iter()
            .map(Interception::compile)
            .collect::<Result<Vec<_>>>()?;

        if compiled.is_empty() {
            return Ok(());
        }

        let _guard = self.sync.lock().await;
        {
            let mut registry = self.registry.write();
            for rule in compiled {
                tracing::debug!(
                    url_pattern = %rule.url_pattern(),
                    stage = ?rule.request_stage(),
                    "Registering interception"
                );
                registry.insert(rule);
            }
        }

        self.send_enable().await
    }

    /// Remove the rule registered under `url_pattern`
    ///
    /// Returns `false` without touching the transport if no such rule exists.
    pub async fn remove_intercept(&self, url_pattern: &str) -> Result<bool> {
        let _guard = self.sync.lock().await;

        let removed = self.registry.write().remove(url_pattern).is_some();
        if !removed {
            return Ok(false);
        }

        tracing::debug!(url_pattern = %url_pattern, "Removed interception");

        let now_empty = self.registry.read().is_empty();
        if now_empty {
            self.send_disable().await?;
        } else {
            self.send_enable().await?;
        }
        Ok(true)
    }

    /// Remove every rule and disable interception
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.sync.lock().await;
        self.registry.write().clear();
        self.send_disable().await
    }

    /// Resend the current pattern set with `Fetch.enable`
    pub async fn enable(&self) -> Result<()> {
        let _guard = self.sync.lock().await;
        self.send_enable().await
    }

    /// Send `Fetch.disable`
    pub async fn disable(&self) -> Result<()> {
        let _guard = self.sync.lock().await;
        self.send_disable().await
    }

    /// Registered rules in registration order
    pub fn interceptions(&self) -> Vec<Arc<CompiledInterception>> {
        self.registry.read().snapshot()
    }

    /// Rule registered under `url_pattern`
    pub fn get(&self, url_pattern: &str) -> Option<Arc<CompiledInterception>> {
        self.registry.read().get(url_pattern)
    }

    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    /// Interception is enabled exactly when rules are registered
    pub fn is_enabled(&self) -> bool {
        !self.is_empty()
    }

    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &InterceptionMetrics {
        &self.metrics
    }

    async fn send_enable(&self) -> Result<()> {
        let patterns = self.registry.read().request_patterns();
        tracing::debug!(patterns = patterns.len(), "Enabling Fetch interception");

        self.transport
            .enable(EnableParams {
                handle_auth_requests: self.config.handle_auth_requests,
                patterns,
            })
            .await
    }

    async fn send_disable(&self) -> Result<()> {
        tracing::debug!("Disabling Fetch interception");
        self.transport.disable().await
    }

    /// Resolve one `Fetch.requestPaused` event
    ///
    /// Rules are visited in registration order. Request-stage events go
    /// through every applicable rule's `modify_request`; response-stage events
    /// through every applicable rule's `modify_response`, stopping at the
    /// first one that fails the request. With `single_resolution` enabled
    /// only the first applicable rule issues a terminal command.
    ///
    /// Callback and transport errors are returned as-is; nothing is rolled
    /// back and the request may stay paused.
    pub async fn on_request_paused(&self, event: RequestPausedEvent) -> Result<()> {
        let started = Instant::now();
        self.metrics.record_paused(event.is_response_stage());

        let rules = self.registry.read().snapshot();
        let mut resolved = false;

        for rule in &rules {
            if !rule.applies_to(&event) {
                continue;
            }
            if event.is_response_stage() && rule.modify_response().is_none() {
                continue;
            }

            if resolved && self.config.single_resolution {
                tracing::warn!(
                    request_id = %event.request_id,
                    url_pattern = %rule.url_pattern(),
                    "Request already resolved by an earlier rule, skipping"
                );
                self.metrics.record_duplicate_skipped();
                continue;
            }

            let flow = match event.response_status_code {
                None => self.resolve_request(rule, &event).await?,
                Some(status) => self.resolve_response(rule, &event, status).await?,
            };
            resolved = true;

            if let Flow::Stop = flow {
                break;
            }
        }

        if !resolved {
            self.resolve_unmatched(&event).await?;
        }

        self.metrics
            .record_resolution(started.elapsed().as_millis() as u64);
        Ok(())
    }

    async fn resolve_request(
        &self,
        rule: &CompiledInterception,
        event: &RequestPausedEvent,
    ) -> Result<Flow> {
        let modification = match rule.modify_request() {
            Some(callback) => callback.modify_request(event).await?,
            None => None,
        };

        let (action, delay) = match modification {
            Some(m) => (m.action, m.delay),
            None => (RequestAction::Continue(ContinueOverrides::default()), None),
        };

        if let Some(delay) = delay {
            tracing::debug!(request_id = %event.request_id, delay_ms = delay.as_millis() as u64, "Delaying request");
            tokio::time::sleep(delay).await;
        }

        match action {
            RequestAction::Continue(overrides) => {
                let intercept_response = rule.modify_response().is_some();
                self.continue_request(event, overrides, intercept_response)
                    .await?;
            }
            RequestAction::Fail(reason) => {
                self.fail_request(event, reason).await?;
            }
            RequestAction::Fulfill(response) => {
                let code = response
                    .response_code
                    .unwrap_or(self.config.default_response_code);
                self.fulfill_request(event, code, response).await?;
            }
        }

        Ok(Flow::Next)
    }

    async fn resolve_response(
        &self,
        rule: &CompiledInterception,
        event: &RequestPausedEvent,
        status: u16,
    ) -> Result<Flow> {
        let Some(callback) = rule.modify_response() else {
            return Ok(Flow::Next);
        };

        let raw = self.transport.get_response_body(&event.request_id).await?;
        let text = raw.text_lossy()?;

        let Some(modification) = callback.modify_response(text, event).await? else {
            // Forward the observed bytes, not the text the callback saw
            self.send_fulfill(
                event,
                FulfillRequestParams {
                    request_id: event.request_id.clone(),
                    response_code: status,
                    response_headers: event.response_headers.clone(),
                    body: Some(raw.into_base64()),
                    response_phrase: None,
                },
            )
            .await?;
            return Ok(Flow::Next);
        };

        if let Some(delay) = modification.delay {
            tracing::debug!(request_id = %event.request_id, delay_ms = delay.as_millis() as u64, "Delaying response");
            tokio::time::sleep(delay).await;
        }

        match modification.action {
            ResponseAction::Fail(reason) => {
                self.fail_request(event, reason).await?;
                Ok(Flow::Stop)
            }
            ResponseAction::Fulfill(mut response) => {
                let code = response.response_code.unwrap_or(status);
                if response.response_headers.is_none() {
                    response.response_headers = event.response_headers.clone();
                }
                self.fulfill_request(event, code, response).await?;
                Ok(Flow::Next)
            }
        }
    }

    async fn resolve_unmatched(&self, event: &RequestPausedEvent) -> Result<()> {
        self.metrics.record_unmatched();

        if !self.config.continue_unmatched {
            tracing::debug!(
                request_id = %event.request_id,
                url = %event.url(),
                "No interception applies, leaving request paused"
            );
            return Ok(());
        }

        tracing::debug!(
            request_id = %event.request_id,
            url = %event.url(),
            "No interception applies, continuing"
        );
        self.continue_request(event, ContinueOverrides::default(), false)
            .await
    }

    async fn continue_request(
        &self,
        event: &RequestPausedEvent,
        overrides: ContinueOverrides,
        intercept_response: bool,
    ) -> Result<()> {
        tracing::debug!(
            request_id = %event.request_id,
            url = %event.url(),
            intercept_response,
            "Continuing request"
        );

        self.transport
            .continue_request(ContinueRequestParams {
                request_id: event.request_id.clone(),
                url: overrides.url,
                method: overrides.method,
                post_data: overrides.post_data.as_deref().map(encode_body),
                headers: overrides.headers,
                intercept_response: intercept_response.then_some(true),
            })
            .await?;

        self.metrics.record_terminal(TerminalAction::Continue);
        Ok(())
    }

    async fn fail_request(&self, event: &RequestPausedEvent, reason: ErrorReason) -> Result<()> {
        tracing::debug!(
            request_id = %event.request_id,
            url = %event.url(),
            reason = %reason,
            "Failing request"
        );

        self.transport
            .fail_request(FailRequestParams {
                request_id: event.request_id.clone(),
                error_reason: reason,
            })
            .await?;

        self.metrics.record_terminal(TerminalAction::Fail);
        Ok(())
    }

    async fn fulfill_request(
        &self,
        event: &RequestPausedEvent,
        code: u16,
        response: FulfillResponse,
    ) -> Result<()> {
        self.send_fulfill(
            event,
            FulfillRequestParams {
                request_id: event.request_id.clone(),
                response_code: code,
                response_headers: response.response_headers,
                body: response.body.as_deref().map(encode_body),
                response_phrase: response.response_phrase,
            },
        )
        .await
    }

    async fn send_fulfill(
        &self,
        event: &RequestPausedEvent,
        params: FulfillRequestParams,
    ) -> Result<()> {
        tracing::debug!(
            request_id = %event.request_id,
            url = %event.url(),
            status = params.response_code,
            "Fulfilling request"
        );

        self.transport.fulfill_request(params).await?;

        self.metrics.record_terminal(TerminalAction::Fulfill);
        Ok(())
    }
}

impl<T: FetchTransport + 'static> RequestInterceptionManager<T> {
    /// Resolve paused events from `events` until the stream ends
    ///
    /// Each event is handled on its own task, so a slow callback only stalls
    /// its own exchange. Handler errors are logged and counted. Dropping the
    /// returned [`Subscription`] stops listening; handlers already running
    /// finish.
    pub fn listen(
        self: &Arc<Self>,
        mut events: mpsc::UnboundedReceiver<RequestPausedEvent>,
    ) -> Subscription {
        let manager = Arc::clone(self);

        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move {
                    let request_id = event.request_id.clone();
                    if let Err(e) = manager.on_request_paused(event).await {
                        manager.metrics.record_handler_error();
                        tracing::error!(
                            request_id = %request_id,
                            error = %e,
                            "Failed to resolve paused request"
                        );
                    }
                });
            }
            tracing::debug!("Paused event stream closed");
        });

        Subscription { handle }
    }
}

/// Handle to a running [`RequestInterceptionManager::listen`] loop
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Stop listening for paused events
    pub fn unsubscribe(self) {
        self.handle.abort();
    }

    /// Listener is still running
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
