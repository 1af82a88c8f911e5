//! Subcommand execution

use crate::cli::{Commands, RunOptions};
use crate::config::HarnessConfig;
use crate::report;
use anyhow::Context;
use scamguard_classifiers::{ClassifierPort, ModelRegistry};
use scamguard_core::ResultLog;
use scamguard_harness::export::{export_to_path, import_from_path};
use scamguard_harness::samples;
use scamguard_harness::{
    ComparativeRunner, EdgeCaseCategory, EdgeCaseRun, EdgeCaseRunner, MetricsAnalyzer,
    RunResult, StopSignal, StreamRun, StreamSimulator, StressRunner,
};
use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const FULL_SUITE_STREAM_SECS: u64 = 20;
const FULL_SUITE_STRESS_MESSAGES: usize = 50;
const BATCH_CATEGORY: &str = "batch";

/// Positional messages followed by the non-blank lines of `file`
fn collect_messages(mut messages: Vec<String>, file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read messages from {}", path.display()))?;
        messages.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    Ok(messages)
}

/// Everything a subcommand needs to run
pub struct Session<'a> {
    config: &'a HarnessConfig,
    registry: &'a ModelRegistry,
    stop: &'a StopSignal,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a HarnessConfig, registry: &'a ModelRegistry, stop: &'a StopSignal) -> Self {
        Self {
            config,
            registry,
            stop,
        }
    }

    /// Run one subcommand, writing its report to `out`
    pub async fn execute<W: Write>(&self, command: Commands, out: &mut W) -> anyhow::Result<()> {
        match command {
            Commands::Stream {
                duration,
                scam_bias,
                seed,
                no_pacing,
                options,
            } => {
                let mut stream = self.config.stream.to_stream_config();
                if let Some(secs) = duration {
                    stream.duration = Duration::from_secs(secs);
                }
                if let Some(bias) = scam_bias {
                    stream.scam_bias = bias;
                }
                if seed.is_some() {
                    stream.seed = seed;
                }
                if no_pacing {
                    stream.pacing = None;
                }
                stream.model_id = options.model.clone();

                let run = self.stream(StreamSimulator::new(stream), &options).await?;
                report::stream_summary(out, &run)?;
                self.analyze_and_report(&run.log, out)?;
            }

            Commands::EdgeCases { options } => {
                let run = self
                    .edge_cases(&samples::edge_case_suite(), &options)
                    .await?;
                report::edge_case_report(out, "EDGE CASE TESTING", &run)?;
            }

            Commands::Suite { options } => {
                let run = self
                    .edge_cases(&samples::labeled_test_suite(), &options)
                    .await?;
                report::edge_case_report(out, "COMPREHENSIVE TEST SUITE", &run)?;
                self.analyze_and_report(&run.log, out)?;
            }

            Commands::Scenarios { options } => {
                let run = self
                    .edge_cases(&samples::real_world_scenarios(), &options)
                    .await?;
                report::scenario_report(out, &run)?;
            }

            Commands::Stress { count, options } => {
                let count = count.unwrap_or(self.config.stress.message_count);
                self.stress(count, &options, out).await?;
            }

            Commands::Batch {
                messages,
                file,
                options,
            } => {
                let messages = collect_messages(messages, file.as_deref())?;
                let suite = [EdgeCaseCategory::new(BATCH_CATEGORY, messages)];
                let run = self.edge_cases(&suite, &options).await?;
                report::batch_report(out, &run)?;
            }

            Commands::Compare {
                messages,
                file,
                models,
                export,
            } => {
                let mut messages = collect_messages(messages, file.as_deref())?;
                if messages.is_empty() {
                    messages = samples::STREAM_SCAM_MESSAGES
                        .iter()
                        .chain(samples::STREAM_LEGIT_MESSAGES)
                        .map(|m| m.to_string())
                        .collect();
                }

                let model_ids: BTreeSet<String> = if models.is_empty() {
                    self.registry.list_model_ids()
                } else {
                    models.into_iter().collect()
                };

                let result = ComparativeRunner::new()
                    .run(self.registry, &messages, &model_ids, self.stop)
                    .await;
                let run = self.settle(result, export.as_deref(), |run| run.to_log())?;
                report::comparative_report(out, &run)?;
            }

            Commands::Analyze { input } => {
                let log = import_from_path(&input)
                    .with_context(|| format!("Failed to load result log {}", input.display()))?;
                info!(records = log.len(), "Loaded result log");
                self.analyze_and_report(&log, out)?;
            }

            Commands::FullSuite { model, export } => {
                self.full_suite(model, export.as_deref(), out).await?;
            }

            Commands::Models => {
                report::models_report(out, self.registry)?;
            }
        }

        Ok(())
    }

    async fn stream(&self, simulator: StreamSimulator, options: &RunOptions) -> anyhow::Result<StreamRun> {
        let result = simulator
            .run(
                self.registry,
                samples::STREAM_SCAM_MESSAGES,
                samples::STREAM_LEGIT_MESSAGES,
                self.stop,
            )
            .await;
        self.settle(result, options.export.as_deref(), |run| run.log.clone())
    }

    async fn edge_cases(
        &self,
        suite: &[EdgeCaseCategory],
        options: &RunOptions,
    ) -> anyhow::Result<EdgeCaseRun> {
        let mut runner = EdgeCaseRunner::new();
        if let Some(model) = &options.model {
            runner = runner.with_model(model.clone());
        }

        let result = runner.run(self.registry, suite, self.stop).await;
        self.settle(result, options.export.as_deref(), |run| run.log.clone())
    }

    async fn stress<W: Write>(
        &self,
        count: usize,
        options: &RunOptions,
        out: &mut W,
    ) -> anyhow::Result<ResultLog> {
        let mut runner = StressRunner::new().with_progress_every(self.config.stress.progress_every);
        if let Some(model) = &options.model {
            runner = runner.with_model(model.clone());
        }

        let result = runner
            .run(self.registry, count, samples::stress_message, self.stop)
            .await;
        let run = self.settle(result, options.export.as_deref(), |run| {
            run.to_log(samples::stress_message)
        })?;
        report::stress_report(out, &run)?;
        Ok(run.to_log(samples::stress_message))
    }

    async fn full_suite<W: Write>(
        &self,
        model: Option<String>,
        export: Option<&Path>,
        out: &mut W,
    ) -> anyhow::Result<()> {
        let options = RunOptions {
            model: model.clone(),
            export: None,
        };

        writeln!(out, "\n[1/4] Message Stream Simulation...")?;
        let mut stream = self.config.stream.to_stream_config();
        stream.duration = Duration::from_secs(FULL_SUITE_STREAM_SECS);
        stream.model_id = model;
        let stream_run = self.stream(StreamSimulator::new(stream), &options).await?;
        report::stream_summary(out, &stream_run)?;

        writeln!(out, "\n[2/4] Pattern Analysis...")?;
        self.analyze_and_report(&stream_run.log, out)?;

        writeln!(out, "\n[3/4] Edge Case Testing...")?;
        let edge_run = self
            .edge_cases(&samples::edge_case_suite(), &options)
            .await?;
        report::edge_case_report(out, "EDGE CASE TESTING", &edge_run)?;

        writeln!(out, "\n[4/4] Stress Test...")?;
        let stress_log = self
            .stress(FULL_SUITE_STRESS_MESSAGES, &options, out)
            .await?;

        if let Some(path) = export {
            let combined = ResultLog::concat([stream_run.log, edge_run.log, stress_log]);
            self.export(&combined, path)?;
        }

        writeln!(out, "\nFull simulation suite completed!")?;
        Ok(())
    }

    /// Unwrap a runner result, exporting whatever was collected either way
    fn settle<T, F>(&self, result: RunResult<T>, export: Option<&Path>, to_log: F) -> anyhow::Result<T>
    where
        T: fmt::Debug,
        F: Fn(&T) -> ResultLog,
    {
        match result {
            Ok(run) => {
                if let Some(path) = export {
                    self.export(&to_log(&run), path)?;
                }
                Ok(run)
            }
            Err(aborted) => {
                let (error, partial) = aborted.into_parts();
                if let Some(path) = export {
                    let log = to_log(&partial);
                    if !log.is_empty() {
                        warn!(
                            records = log.len(),
                            "Exporting records collected before the failure"
                        );
                        self.export(&log, path)?;
                    }
                }
                Err(anyhow::Error::new(error).context("Run aborted"))
            }
        }
    }

    fn export(&self, log: &ResultLog, path: &Path) -> anyhow::Result<()> {
        let path = self.config.export_path(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        export_to_path(log, &path)
            .with_context(|| format!("Failed to export results to {}", path.display()))
    }

    fn analyze_and_report<W: Write>(&self, log: &ResultLog, out: &mut W) -> anyhow::Result<()> {
        if log.is_empty() {
            writeln!(out, "\nNo results to analyze.")?;
            return Ok(());
        }

        let snapshot = MetricsAnalyzer::new()
            .analyze(log)
            .context("Cannot analyze results")?;
        report::metrics_report(out, &snapshot)?;
        Ok(())
    }
}
