//! Single-shot classifier call shared by every runner

use crate::telemetry;
use scamguard_classifiers::ClassifierPort;
use scamguard_core::{ClassificationResult, Error, Result};
use tracing::warn;

/// Classify once and validate the result.
///
/// `ModelNotLoaded` and `UnknownModelId` pass through unchanged; any other
/// port error, and any result with an out-of-range confidence, becomes a
/// `ClassificationFailure`. No retries.
pub(crate) async fn classify_checked(
    port: &dyn ClassifierPort,
    text: &str,
    model_id: Option<&str>,
    runner: &'static str,
) -> Result<ClassificationResult> {
    let outcome = match port.classify(text, model_id).await {
        Ok(result) => result.validate().map(|_| result),
        Err(e) if e.is_port_error() => Err(e),
        Err(e @ Error::ClassificationFailure(_)) => Err(e),
        Err(e) => Err(Error::classification(e.to_string())),
    };

    match outcome {
        Ok(result) => {
            telemetry::record_classification(runner, result.label);
            Ok(result)
        }
        Err(e) => {
            telemetry::record_failure(runner);
            warn!(runner, model = model_id.unwrap_or("default"), "Classifier call failed: {}", e);
            Err(e)
        }
    }
}

/// Short preview of a message for log lines
pub(crate) fn preview(message: &str) -> String {
    const MAX_CHARS: usize = 45;
    if message.chars().count() > MAX_CHARS {
        let head: String = message.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short"), "short");

        let long = "é".repeat(60);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 48);
    }
}
