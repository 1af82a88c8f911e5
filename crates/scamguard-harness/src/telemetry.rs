//! Metric names and recording helpers

use scamguard_core::Label;

pub const CLASSIFICATIONS_TOTAL: &str = "scamguard_classifications_total";
pub const CLASSIFICATION_FAILURES_TOTAL: &str = "scamguard_classification_failures_total";
pub const STRESS_BATCH_DURATION_MS: &str = "scamguard_stress_batch_duration_ms";
pub const COMPARATIVE_AGREEMENT_RATE: &str = "scamguard_comparative_agreement_rate";

/// Register metric descriptions with the installed recorder, if any
pub fn describe() {
    metrics::describe_counter!(
        CLASSIFICATIONS_TOTAL,
        "Total number of classifier calls by runner and predicted label"
    );
    metrics::describe_counter!(
        CLASSIFICATION_FAILURES_TOTAL,
        "Total number of failed classifier calls by runner"
    );
    metrics::describe_histogram!(
        STRESS_BATCH_DURATION_MS,
        metrics::Unit::Milliseconds,
        "Wall-clock duration of stress batches"
    );
    metrics::describe_gauge!(
        COMPARATIVE_AGREEMENT_RATE,
        "Agreement rate of the last comparative run"
    );
}

pub(crate) fn record_classification(runner: &'static str, label: Label) {
    metrics::counter!(CLASSIFICATIONS_TOTAL, "runner" => runner, "label" => label.as_str())
        .increment(1);
}

pub(crate) fn record_failure(runner: &'static str) {
    metrics::counter!(CLASSIFICATION_FAILURES_TOTAL, "runner" => runner).increment(1);
}
