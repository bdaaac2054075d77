//! Metrics collection and reporting.
//!
//! Uses Prometheus for metrics collection and exposition.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Metrics collector.
pub struct Metrics {
    /// Prometheus registry
    registry: Registry,
    /// HTTP requests by method and status
    pub http_requests: IntCounterVec,
    /// HTTP request duration
    pub http_request_duration: Histogram,
    /// Proposals created
    pub proposals_created: IntCounter,
    /// Votes recorded
    pub votes_cast: IntCounter,
    /// Finalizations, including re-finalizations
    pub proposals_finalized: IntCounter,
}

impl Metrics {
    /// Create a collector with its own registry.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("tourism_http_requests_total", "Total number of HTTP requests"),
            &["method", "status"],
        )?;
        registry.register(Box::new(http_requests.clone()))?;

        let http_request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "tourism_http_request_duration_seconds",
                "HTTP request duration",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        )?;
        registry.register(Box::new(http_request_duration.clone()))?;

        let proposals_created = IntCounter::new(
            "tourism_proposals_created_total",
            "Total number of proposals created",
        )?;
        registry.register(Box::new(proposals_created.clone()))?;

        let votes_cast = IntCounter::new("tourism_votes_cast_total", "Total number of votes cast")?;
        registry.register(Box::new(votes_cast.clone()))?;

        let proposals_finalized = IntCounter::new(
            "tourism_proposals_finalized_total",
            "Total number of proposal finalizations",
        )?;
        registry.register(Box::new(proposals_finalized.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            http_request_duration,
            proposals_created,
            votes_cast,
            proposals_finalized,
        })
    }

    /// Export metrics in Prometheus text format.
    pub fn export(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Record one HTTP request.
    pub fn record_request(&self, method: &str, status: u16, duration: Duration) {
        self.http_requests
            .with_label_values(&[method, &status.to_string()])
            .inc();
        self.http_request_duration.observe(duration.as_secs_f64());
    }
}
