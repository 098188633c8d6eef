// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interception rules and their ordered registry

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::event::{RequestPattern, RequestPausedEvent, RequestStage, ResourceType};
use super::handler::{ModifyRequest, ModifyResponse};
use super::modification::{RequestModification, ResponseModification};
use super::pattern::UrlPattern;
use crate::error::Result;

/// Interception rule as registered by the caller
///
/// A rule with `modify_request` pauses at the request stage; if it also has
/// `modify_response` the continued request is paused again once its response
/// arrives. A rule with only `modify_response` pauses at the response stage.
///
/// # Example
///
/// ```rust,no_run
/// use fetch_interceptor::network::{Interception, ResponseModification};
///
/// let shout = Interception::new("*://example.com/*").modify_response(|body, _event| async move {
///     Ok(Some(ResponseModification::body(body.to_uppercase())))
/// });
/// ```
#[derive(Clone)]
pub struct Interception {
    pub url_pattern: String,
    pub resource_type: Option<ResourceType>,
    pub modify_request: Option<Arc<dyn ModifyRequest>>,
    pub modify_response: Option<Arc<dyn ModifyResponse>>,
}

impl Interception {
    /// Rule for a URL glob, without callbacks
    pub fn new(url_pattern: impl Into<String>) -> Self {
        Self {
            url_pattern: url_pattern.into(),
            resource_type: None,
            modify_request: None,
            modify_response: None,
        }
    }

    /// Restrict to one resource type
    pub fn resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    /// Set the request-stage callback from an async closure
    pub fn modify_request<F, Fut>(self, callback: F) -> Self
    where
        F: Fn(RequestPausedEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<RequestModification>>> + Send + 'static,
    {
        self.modify_request_with(callback)
    }

    /// Set the response-stage callback from an async closure
    pub fn modify_response<F, Fut>(self, callback: F) -> Self
    where
        F: Fn(String, RequestPausedEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<ResponseModification>>> + Send + 'static,
    {
        self.modify_response_with(callback)
    }

    /// Set the request-stage callback from a handler
    pub fn modify_request_with(mut self, handler: impl ModifyRequest + 'static) -> Self {
        self.modify_request = Some(Arc::new(handler));
        self
    }

    /// Set the response-stage callback from a handler
    pub fn modify_response_with(mut self, handler: impl ModifyResponse + 'static) -> Self {
        self.modify_response = Some(Arc::new(handler));
        self
    }

    /// Compile the URL glob
    pub fn compile(self) -> Result<CompiledInterception> {
        let matcher = UrlPattern::compile(&self.url_pattern)?;
        Ok(CompiledInterception {
            interception: self,
            matcher,
        })
    }
}

impl fmt::Debug for Interception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interception")
            .field("url_pattern", &self.url_pattern)
            .field("resource_type", &self.resource_type)
            .field("modify_request", &self.modify_request.is_some())
            .field("modify_response", &self.modify_response.is_some())
            .finish()
    }
}

/// Interception rule with its URL matcher compiled
#[derive(Debug, Clone)]
pub struct CompiledInterception {
    interception: Interception,
    matcher: UrlPattern,
}

impl CompiledInterception {
    /// Registry key
    pub fn url_pattern(&self) -> &str {
        &self.interception.url_pattern
    }

    pub fn resource_type(&self) -> Option<ResourceType> {
        self.interception.resource_type
    }

    pub fn matcher(&self) -> &UrlPattern {
        &self.matcher
    }

    pub fn modify_request(&self) -> Option<&Arc<dyn ModifyRequest>> {
        self.interception.modify_request.as_ref()
    }

    pub fn modify_response(&self) -> Option<&Arc<dyn ModifyResponse>> {
        self.interception.modify_response.as_ref()
    }

    /// Stage the browser should first pause matching requests at
    pub fn request_stage(&self) -> RequestStage {
        if self.interception.modify_request.is_some() {
            RequestStage::Request
        } else {
            RequestStage::Response
        }
    }

    /// Pattern descriptor for `Fetch.enable`
    pub fn request_pattern(&self) -> RequestPattern {
        RequestPattern {
            url_pattern: Some(self.interception.url_pattern.clone()),
            resource_type: self.interception.resource_type,
            request_stage: Some(self.request_stage()),
        }
    }

    /// Resource type and URL both match the event
    pub fn applies_to(&self, event: &RequestPausedEvent) -> bool {
        if let Some(resource_type) = self.interception.resource_type {
            if resource_type != event.resource_type {
                return false;
            }
        }
        self.matcher.is_universal() || self.matcher.is_match(event.url())
    }
}

/// Insertion-ordered map from URL glob to compiled rule
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Arc<CompiledInterception>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule; an existing rule with the same key is replaced in place
    pub fn insert(&mut self, rule: CompiledInterception) {
        let rule = Arc::new(rule);
        match self.position(rule.url_pattern()) {
            Some(idx) => self.entries[idx] = rule,
            None => self.entries.push(rule),
        }
    }

    /// Remove the rule keyed by `url_pattern`
    pub fn remove(&mut self, url_pattern: &str) -> Option<Arc<CompiledInterception>> {
        self.position(url_pattern).map(|idx| self.entries.remove(idx))
    }

    pub fn get(&self, url_pattern: &str) -> Option<Arc<CompiledInterception>> {
        self.position(url_pattern).map(|idx| self.entries[idx].clone())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rules in registration order
    pub fn snapshot(&self) -> Vec<Arc<CompiledInterception>> {
        self.entries.clone()
    }

    /// Pattern descriptors in registration order
    pub fn request_patterns(&self) -> Vec<RequestPattern> {
        self.entries.iter().map(|r| r.request_pattern()).collect()
    }

    fn position(&self, url_pattern: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|r| r.url_pattern() == url_pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::handler::{BlockRequests, ResponseLogger};

    fn compiled(interception: Interception) -> CompiledInterception {
        interception.compile().unwrap()
    }

    #[test]
    fn test_request_stage_from_callbacks() {
        let inert = compiled(Interception::new("*"));
        assert_eq!(inert.request_stage(), RequestStage::Response);

        let request = compiled(Interception::new("*").modify_request_with(BlockRequests::default()));
        assert_eq!(request.request_stage(), RequestStage::Request);

        let both = compiled(
            Interception::new("*")
                .modify_request_with(BlockRequests::default())
                .modify_response_with(ResponseLogger::default()),
        );
        assert_eq!(both.request_stage(), RequestStage::Request);
    }

    #[test]
    fn test_request_pattern_descriptor() {
        let rule = compiled(Interception::new("*.css").resource_type(ResourceType::Stylesheet));
        assert_eq!(
            rule.request_pattern(),
            RequestPattern {
                url_pattern: Some("*.css".to_string()),
                resource_type: Some(ResourceType::Stylesheet),
                request_stage: Some(RequestStage::Response),
            }
        );
    }

    #[test]
    fn test_applies_to() {
        let rule = compiled(Interception::new("*://example.com/*").resource_type(ResourceType::Xhr));

        let xhr = RequestPausedEvent::request_stage("1", "https://example.com/api", ResourceType::Xhr);
        let script = RequestPausedEvent::request_stage("2", "https://example.com/a.js", ResourceType::Script);
        let other_host = RequestPausedEvent::request_stage("3", "https://example.org/api", ResourceType::Xhr);

        assert!(rule.applies_to(&xhr));
        assert!(!rule.applies_to(&script));
        assert!(!rule.applies_to(&other_host));

        let everything = compiled(Interception::new(""));
        assert!(everything.applies_to(&script));
        assert!(everything.applies_to(&other_host));
    }

    #[test]
    fn test_registry_replaces_in_place() {
        let mut registry = Registry::new();
        registry.insert(compiled(Interception::new("a")));
        registry.insert(compiled(Interception::new("b")));
        registry.insert(compiled(Interception::new("a").resource_type(ResourceType::Image)));

        let keys: Vec<String> = registry
            .snapshot()
            .iter()
            .map(|r| r.url_pattern().to_string())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(
            registry.get("a").and_then(|r| r.resource_type()),
            Some(ResourceType::Image)
        );
    }

    #[test]
    fn test_registry_remove_and_clear() {
        let mut registry = Registry::new();
        registry.insert(compiled(Interception::new("a")));
        registry.insert(compiled(Interception::new("b")));

        assert!(registry.remove("missing").is_none());
        assert!(registry.remove("a").is_some());
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.request_patterns().is_empty());
    }
}
