use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static BILLING_FETCH_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Install the request-metrics recorder and the billing registry.
/// Later calls are no-ops.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    });

    REGISTRY.get_or_init(|| {
        let registry = Registry::new();

        let fetch_total = IntCounterVec::new(
            Opts::new(
                "billing_fetch_total",
                "Billing document fetches by outcome",
            ),
            &["outcome"],
        )
        .expect("metric can be created");

        registry
            .register(Box::new(fetch_total.clone()))
            .expect("collector can be registered");

        let _ = BILLING_FETCH_TOTAL.set(fetch_total);
        registry
    });
}

/// Count one settled fetch. Does nothing before [`init_metrics`].
pub fn record_fetch(outcome: &str) {
    if let Some(counter) = BILLING_FETCH_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = REGISTRY.get() {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
            tracing::warn!(error = %e, "Failed to encode billing metrics");
        }
        if let Ok(custom) = String::from_utf8(buffer) {
            output.push_str(&custom);
        }
    }

    output
}
