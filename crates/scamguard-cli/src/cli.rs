use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scamguard")]
#[command(
    author,
    version,
    about = "Evaluation harness for scam message classifiers"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "scamguard.yaml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by runners that classify with a single model
#[derive(Args, Debug, Clone, Default)]
pub struct RunOptions {
    /// Model to classify with (defaults to the registry default)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Write the result log to this path (.csv or .jsonl)
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate a real-time message stream
    Stream {
        /// Duration in seconds
        #[arg(short, long)]
        duration: Option<u64>,

        /// Extra probability of forcing a scam message (0.0-1.0)
        #[arg(long)]
        scam_bias: Option<f64>,

        /// Seed for reproducible streams
        #[arg(long)]
        seed: Option<u64>,

        /// Send messages back to back instead of pacing them
        #[arg(long)]
        no_pacing: bool,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Classify the built-in edge-case categories
    EdgeCases {
        #[command(flatten)]
        options: RunOptions,
    },

    /// Run the labeled test suite and score it
    Suite {
        #[command(flatten)]
        options: RunOptions,
    },

    /// Run the multi-message real-world scenarios
    Scenarios {
        #[command(flatten)]
        options: RunOptions,
    },

    /// Measure sequential throughput
    Stress {
        /// Number of messages
        #[arg(short = 'n', long)]
        count: Option<usize>,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Classify your own messages as one unlabeled batch
    Batch {
        /// Messages to classify
        messages: Vec<String>,

        /// Read additional messages from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Compare models side by side on the same messages
    Compare {
        /// Messages to compare
        messages: Vec<String>,

        /// Read additional messages from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Models to compare (repeatable; defaults to every loaded model)
        #[arg(short, long = "model")]
        models: Vec<String>,

        /// Write the result log to this path (.csv or .jsonl)
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Analyze a previously exported, labeled result log
    Analyze {
        /// Exported log (.csv or .jsonl)
        input: PathBuf,
    },

    /// Stream, analysis, edge cases and stress test in one go
    FullSuite {
        /// Model to classify with (defaults to the registry default)
        #[arg(short, long)]
        model: Option<String>,

        /// Write the combined result log to this path (.csv or .jsonl)
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// List loaded models
    Models,
}
