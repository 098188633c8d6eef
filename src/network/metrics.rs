// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interception metrics
//!
//! Counts paused events and the terminal action each one ended with.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Terminal transport action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalAction {
    Continue,
    Fulfill,
    Fail,
}

/// Interception metrics collector
#[derive(Debug)]
pub struct InterceptionMetrics {
    events_paused: AtomicU64,
    response_stage_events: AtomicU64,
    continued: AtomicU64,
    fulfilled: AtomicU64,
    failed: AtomicU64,
    /// Later applicable rules skipped by the single-resolution guard
    duplicates_skipped: AtomicU64,
    unmatched: AtomicU64,
    handler_errors: AtomicU64,
    started_at: RwLock<(DateTime<Utc>, Instant)>,
    /// Event handling times for percentile calculation
    resolution_latencies: RwLock<Vec<u64>>,
}

/// Metrics report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub started_at: DateTime<Utc>,
    pub uptime_secs: u64,
    pub events_paused: u64,
    pub response_stage_events: u64,
    pub continued: u64,
    pub fulfilled: u64,
    pub failed: u64,
    pub duplicates_skipped: u64,
    pub unmatched: u64,
    pub handler_errors: u64,
    /// Handling time percentiles
    pub latency_p50_ms: u64,
    pub latency_p95_ms: u64,
    pub latency_p99_ms: u64,
}

impl Default for InterceptionMetrics {
    fn default() -> Self {
        Self {
            events_paused: AtomicU64::new(0),
            response_stage_events: AtomicU64::new(0),
            continued: AtomicU64::new(0),
            fulfilled: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            duplicates_skipped: AtomicU64::new(0),
            unmatched: AtomicU64::new(0),
            handler_errors: AtomicU64::new(0),
            started_at: RwLock::new((Utc::now(), Instant::now())),
            resolution_latencies: RwLock::new(Vec::new()),
        }
    }
}

impl InterceptionMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an incoming paused event
    pub fn record_paused(&self, response_stage: bool) {
        self.events_paused.fetch_add(1, Ordering::Relaxed);
        if response_stage {
            self.response_stage_events.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a terminal command sent to the transport
    pub fn record_terminal(&self, action: TerminalAction) {
        let counter = match action {
            TerminalAction::Continue => &self.continued,
            TerminalAction::Fulfill => &self.fulfilled,
            TerminalAction::Fail => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate_skipped(&self) {
        self.duplicates_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unmatched(&self) {
        self.unmatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_handler_error(&self) {
        self.handler_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record how long one event took to resolve
    pub fn record_resolution(&self, latency_ms: u64) {
        let mut latencies = self.resolution_latencies.write();
        latencies.push(latency_ms);

        // Keep only last 10000 latencies
        if latencies.len() > 10000 {
            latencies.drain(0..5000);
        }
    }

    /// Get current report
    pub fn report(&self) -> MetricsReport {
        let (started_at, start) = *self.started_at.read();
        let (p50, p95, p99) = calculate_percentiles(&self.resolution_latencies.read());

        MetricsReport {
            started_at,
            uptime_secs: start.elapsed().as_secs(),
            events_paused: self.events_paused.load(Ordering::Relaxed),
            response_stage_events: self.response_stage_events.load(Ordering::Relaxed),
            continued: self.continued.load(Ordering::Relaxed),
            fulfilled: self.fulfilled.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            duplicates_skipped: self.duplicates_skipped.load(Ordering::Relaxed),
            unmatched: self.unmatched.load(Ordering::Relaxed),
            handler_errors: self.handler_errors.load(Ordering::Relaxed),
            latency_p50_ms: p50,
            latency_p95_ms: p95,
            latency_p99_ms: p99,
        }
    }

    /// Reset all metrics
    pub fn reset(&self) {
        for counter in [
            &self.events_paused,
            &self.response_stage_events,
            &self.continued,
            &self.fulfilled,
            &self.failed,
            &self.duplicates_skipped,
            &self.unmatched,
            &self.handler_errors,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        *self.started_at.write() = (Utc::now(), Instant::now());
        self.resolution_latencies.write().clear();
    }
}

/// Calculate percentiles from latencies
fn calculate_percentiles(latencies: &[u64]) -> (u64, u64, u64) {
    if latencies.is_empty() {
        return (0, 0, 0);
    }

    let mut sorted: Vec<u64> = latencies.to_vec();
    sorted.sort_unstable();

    let len = sorted.len();
    let p50 = sorted[len / 2];
    let p95 = sorted[((len as f64 * 0.95) as usize).min(len - 1)];
    let p99 = sorted[((len as f64 * 0.99) as usize).min(len - 1)];

    (p50, p95, p99)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_basic() {
        let metrics = InterceptionMetrics::new();

        metrics.record_paused(false);
        metrics.record_paused(true);
        metrics.record_terminal(TerminalAction::Continue);
        metrics.record_terminal(TerminalAction::Fulfill);
        metrics.record_duplicate_skipped();

        let report = metrics.report();
        assert_eq!(report.events_paused, 2);
        assert_eq!(report.response_stage_events, 1);
        assert_eq!(report.continued, 1);
        assert_eq!(report.fulfilled, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.duplicates_skipped, 1);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = InterceptionMetrics::new();

        metrics.record_paused(false);
        metrics.record_resolution(12);
        metrics.reset();

        let report = metrics.report();
        assert_eq!(report.events_paused, 0);
        assert_eq!(report.latency_p50_ms, 0);
    }

    #[test]
    fn test_percentiles() {
        let latencies: Vec<u64> = (1..=100).collect();
        let (p50, p95, p99) = calculate_percentiles(&latencies);

        assert_eq!(p50, 51);
        assert_eq!(p95, 96);
        assert_eq!(p99, 100);
        assert_eq!(calculate_percentiles(&[7]), (7, 7, 7));
    }
}
