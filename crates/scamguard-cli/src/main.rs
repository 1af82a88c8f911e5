use clap::Parser;
use scamguard_classifiers::ModelRegistry;
use scamguard_cli::{Cli, HarnessConfig, Session};
use scamguard_harness::{telemetry, StopSignal};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    telemetry::describe();

    let config = HarnessConfig::load(&cli.config)?;
    let registry = ModelRegistry::from_config(&config.models)?;
    info!(
        models = registry.len(),
        default = registry.default_model().unwrap_or("none"),
        "Model registry loaded"
    );

    let stop = StopSignal::new();
    let ctrl_c_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing the current message");
            ctrl_c_stop.stop();
        }
    });

    let session = Session::new(&config, &registry, &stop);
    let mut stdout = std::io::stdout().lock();
    session.execute(cli.command, &mut stdout).await?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "scamguard=debug,scamguard_cli=debug,scamguard_harness=debug,scamguard_classifiers=debug"
    } else {
        "scamguard=info,scamguard_cli=info,scamguard_harness=info,scamguard_classifiers=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
