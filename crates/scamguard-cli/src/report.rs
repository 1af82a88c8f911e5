//! Plain-text summaries of runner output

use scamguard_classifiers::{ClassifierPort, ModelRegistry};
use scamguard_core::Label;
use scamguard_harness::{
    ComparativeRun, EdgeCaseRun, MetricsSnapshot, StreamRun, StressRun, Termination,
};
use std::io::{self, Write};

const RULE: &str = "======================================================================";

fn header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}\n{}\n{}", RULE, title, RULE)
}

fn status(is_scam: bool) -> &'static str {
    if is_scam {
        "SCAM"
    } else {
        "SAFE"
    }
}

fn cancelled_note<W: Write>(out: &mut W, termination: Termination) -> io::Result<()> {
    if termination == Termination::Cancelled {
        writeln!(out, "(stopped early, partial results)")?;
    }
    Ok(())
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

pub fn stream_summary<W: Write>(out: &mut W, run: &StreamRun) -> io::Result<()> {
    header(out, "STREAM SUMMARY")?;
    cancelled_note(out, run.termination)?;
    writeln!(out, "Total Messages:  {}", run.messages_seen)?;
    writeln!(out, "Scam Blocked:    {}", run.scam_blocked)?;
    writeln!(out, "Safe Allowed:    {}", run.safe_allowed())?;
    writeln!(out, "Block Rate:      {:.1}%", run.block_rate() * 100.0)?;
    writeln!(out, "Elapsed:         {:.2}s", run.elapsed.as_secs_f64())
}

pub fn metrics_report<W: Write>(out: &mut W, snapshot: &MetricsSnapshot) -> io::Result<()> {
    header(out, "DETECTION PATTERN ANALYSIS")?;

    writeln!(out, "Performance Metrics:")?;
    writeln!(out, "   Accuracy:        {:.2}%", snapshot.accuracy * 100.0)?;
    writeln!(out, "   Total Analyzed:  {}", snapshot.total)?;
    writeln!(out, "   Correct:         {}", snapshot.correct)?;
    writeln!(out, "   Incorrect:       {}", snapshot.incorrect())?;

    let matrix = &snapshot.confusion;
    writeln!(out, "\nConfusion Matrix (actual x predicted):")?;
    writeln!(out, "   {:<12} {:>10} {:>10}", "", "scam", "legitimate")?;
    for actual in Label::ALL {
        writeln!(
            out,
            "   {:<12} {:>10} {:>10}",
            actual.as_str(),
            matrix.get(actual, Label::Scam),
            matrix.get(actual, Label::Legitimate)
        )?;
    }
    if let Some(precision) = matrix.precision() {
        writeln!(out, "   Precision:       {:.2}%", precision * 100.0)?;
    }
    if let Some(recall) = matrix.recall() {
        writeln!(out, "   Recall:          {:.2}%", recall * 100.0)?;
    }

    writeln!(out, "\nDetection Breakdown:")?;
    for label in Label::ALL {
        writeln!(out, "   {:<12} {}", label.as_str(), snapshot.predicted(label))?;
    }

    let stats = &snapshot.confidence;
    writeln!(out, "\nConfidence Statistics:")?;
    writeln!(out, "   Mean:    {:.2}%", stats.mean)?;
    writeln!(out, "   Median:  {:.2}%", stats.median)?;
    writeln!(out, "   Min:     {:.2}%", stats.min)?;
    writeln!(out, "   Max:     {:.2}%", stats.max)?;
    writeln!(out, "   Std Dev: {:.2}", stats.std_dev)?;

    if !snapshot.confidence_by_prediction.is_empty() {
        writeln!(out, "\nConfidence by Prediction:")?;
        for (label, stats) in &snapshot.confidence_by_prediction {
            writeln!(
                out,
                "   {:<12} mean {:.2}%  median {:.2}%  (n={})",
                label.as_str(),
                stats.mean,
                stats.median,
                stats.count
            )?;
        }
    }

    Ok(())
}

fn message_lines<W: Write>(out: &mut W, run: &EdgeCaseRun, grouped: bool) -> io::Result<()> {
    let mut current: Option<&str> = None;
    for record in &run.log {
        let category = record.category.as_deref().unwrap_or_default();
        if grouped && current != Some(category) {
            writeln!(out, "\n[{}]", category)?;
            current = Some(category);
        }
        writeln!(out, "Message: {}", record.message)?;
        write!(
            out,
            "Result:  {} (Confidence: {:.2}%)",
            status(record.is_scam()),
            record.confidence
        )?;
        match record.is_correct() {
            Some(true) => writeln!(out, " correct")?,
            Some(false) => writeln!(out, " WRONG")?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}

/// Per-message results grouped by category
pub fn edge_case_report<W: Write>(out: &mut W, title: &str, run: &EdgeCaseRun) -> io::Result<()> {
    header(out, title)?;
    cancelled_note(out, run.termination)?;
    message_lines(out, run, true)?;

    writeln!(out, "\nBy Category:")?;
    for summary in run.by_category() {
        writeln!(
            out,
            "   {:<40} {}/{} flagged, mean confidence {:.1}%",
            summary.name, summary.scam_count, summary.total, summary.mean_confidence
        )?;
    }
    Ok(())
}

/// One verdict per scenario: a scam attempt if any message was flagged
pub fn scenario_report<W: Write>(out: &mut W, run: &EdgeCaseRun) -> io::Result<()> {
    edge_case_report(out, "REAL-WORLD SCENARIOS", run)?;
    writeln!(out, "\nScenario Assessment:")?;
    for summary in run.by_category() {
        let verdict = if summary.is_scam_attempt() {
            "SCAM ATTEMPT, block sender and report"
        } else {
            "appears legitimate"
        };
        writeln!(out, "   {:<40} {}", summary.name, verdict)?;
    }
    Ok(())
}

/// Caller-supplied messages with overall totals
pub fn batch_report<W: Write>(out: &mut W, run: &EdgeCaseRun) -> io::Result<()> {
    header(out, "BATCH CLASSIFICATION")?;
    cancelled_note(out, run.termination)?;
    message_lines(out, run, false)?;

    let total = run.log.len();
    let scam = run.log.scam_count();
    let mean = if total == 0 {
        0.0
    } else {
        run.log.iter().map(|r| r.confidence).sum::<f64>() / total as f64
    };

    writeln!(out, "\nTotal:            {}", total)?;
    writeln!(out, "Scam:             {} ({:.1}%)", scam, percent(scam, total))?;
    writeln!(
        out,
        "Safe:             {} ({:.1}%)",
        total - scam,
        percent(total - scam, total)
    )?;
    writeln!(out, "Mean Confidence:  {:.2}%", mean)
}

pub fn stress_report<W: Write>(out: &mut W, run: &StressRun) -> io::Result<()> {
    header(out, "PERFORMANCE STRESS TEST")?;
    cancelled_note(out, run.termination)?;
    writeln!(out, "Total Messages:     {}/{}", run.completed(), run.requested)?;
    writeln!(
        out,
        "Total Time:         {:.2} seconds",
        run.total_elapsed.as_secs_f64()
    )?;
    writeln!(
        out,
        "Average Time:       {:.2} ms/message",
        run.per_message_elapsed().as_secs_f64() * 1000.0
    )?;
    writeln!(
        out,
        "Throughput:         {:.2} messages/second",
        run.throughput_per_second()
    )
}

pub fn comparative_report<W: Write>(out: &mut W, run: &ComparativeRun) -> io::Result<()> {
    header(out, "COMPARATIVE MODEL ANALYSIS")?;
    cancelled_note(out, run.termination)?;

    for (i, message) in run.messages.iter().enumerate().take(run.len()) {
        writeln!(out, "\nMessage: {}", message)?;
        for (model_id, results) in &run.per_model {
            let result = &results[i];
            writeln!(
                out,
                "   {:<25} -> {} ({:.1}%)",
                model_id,
                status(result.is_scam()),
                result.confidence
            )?;
        }
    }

    let agreeing = run.len() - run.disagreements().len();
    writeln!(out, "\nModel Agreement Analysis:")?;
    writeln!(
        out,
        "   Perfect Agreement: {}/{} ({:.1}%)",
        agreeing,
        run.len(),
        run.agreement_rate() * 100.0
    )?;

    writeln!(out, "\nAverage Confidence by Model:")?;
    for (model_id, mean) in run.mean_confidence_by_model() {
        writeln!(out, "   {:<25} -> {:.2}%", model_id, mean)?;
    }
    Ok(())
}

pub fn models_report<W: Write>(out: &mut W, registry: &ModelRegistry) -> io::Result<()> {
    header(out, "LOADED MODELS")?;
    let default = registry.default_model();
    for id in registry.list_model_ids() {
        let marker = if Some(id.as_str()) == default { "*" } else { " " };
        writeln!(out, " {} {}", marker, id)?;
    }
    writeln!(out, "\n{} model(s), * marks the default", registry.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scamguard_classifiers::ModelsConfig;
    use scamguard_core::{ClassificationResult, LogRecord};
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn render<F>(report: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        report(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn edge_run(records: Vec<LogRecord>) -> EdgeCaseRun {
        EdgeCaseRun {
            log: records.into(),
            termination: Termination::Completed,
        }
    }

    /// Writer that accepts a fixed number of bytes, then fails
    struct FullWriter(usize);

    impl Write for FullWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.0 == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "full"));
            }
            let n = buf.len().min(self.0);
            self.0 -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_summary_counts() {
        let mut run = StreamRun {
            messages_seen: 4,
            scam_blocked: 1,
            elapsed: Duration::from_secs(2),
            ..Default::default()
        };
        let text = render(|out| stream_summary(out, &run));
        assert!(text.contains("Total Messages:  4"));
        assert!(text.contains("Safe Allowed:    3"));
        assert!(text.contains("Block Rate:      25.0%"));
        assert!(!text.contains("stopped early"));

        run.termination = Termination::Cancelled;
        assert!(render(|out| stream_summary(out, &run)).contains("stopped early"));
    }

    #[test]
    fn test_scenario_verdicts() {
        let run = edge_run(vec![
            LogRecord::from_result("a", &ClassificationResult::new(Label::Scam, 80.0, "m"))
                .with_category("Lottery"),
            LogRecord::from_result("b", &ClassificationResult::new(Label::Legitimate, 80.0, "m"))
                .with_category("Business"),
        ]);

        let text = render(|out| scenario_report(out, &run));
        assert!(text.contains("[Lottery]"));
        assert!(text.contains("SCAM ATTEMPT"));
        assert!(text.contains("appears legitimate"));
    }

    #[test]
    fn test_batch_report_totals() {
        let run = edge_run(vec![
            LogRecord::from_result("WIN", &ClassificationResult::new(Label::Scam, 90.0, "m"))
                .with_category("batch"),
            LogRecord::from_result("hi", &ClassificationResult::new(Label::Legitimate, 70.0, "m"))
                .with_category("batch"),
            LogRecord::from_result("yo", &ClassificationResult::new(Label::Legitimate, 80.0, "m"))
                .with_category("batch"),
        ]);

        let text = render(|out| batch_report(out, &run));
        assert!(text.contains("Message: WIN\nResult:  SCAM (Confidence: 90.00%)\n"));
        assert!(!text.contains("[batch]"));
        assert!(text.contains("Total:            3"));
        assert!(text.contains("Scam:             1 (33.3%)"));
        assert!(text.contains("Safe:             2 (66.7%)"));
        assert!(text.contains("Mean Confidence:  80.00%"));
    }

    #[test]
    fn test_comparative_report_agreement() {
        let mut per_model = BTreeMap::new();
        per_model.insert(
            "a".to_string(),
            vec![ClassificationResult::new(Label::Scam, 90.0, "a")],
        );
        per_model.insert(
            "b".to_string(),
            vec![ClassificationResult::new(Label::Scam, 70.0, "b")],
        );
        let run = ComparativeRun {
            messages: vec!["WIN".to_string()],
            per_model,
            agreements: vec![true],
            ..Default::default()
        };

        let text = render(|out| comparative_report(out, &run));
        assert!(text.contains("Perfect Agreement: 1/1 (100.0%)"));
        assert!(text.contains("-> 90.00%"));
        assert!(text.contains("-> 70.00%"));
    }

    #[test]
    fn test_models_report_marks_default() {
        let registry = ModelRegistry::from_config(&ModelsConfig::default()).unwrap();
        let text = render(|out| models_report(out, &registry));
        assert!(text.contains(" * keyword\n"));
        assert!(text.contains("   rules\n"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let registry = ModelRegistry::from_config(&ModelsConfig::default()).unwrap();
        let err = models_report(&mut FullWriter(10), &registry).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }
}
