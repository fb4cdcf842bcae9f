// runner/src/main.rs
use clap::Parser;
use runner::{ExitPolicy, RunConfig, RunSettings, Runner, Scenario};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "contract-runner")]
#[command(about = "Deploys and invokes fixture contracts, committing every transaction", version, long_about = None)]
struct Cli {
    /// Directory receiving the result and signed-tx artifacts
    target_dir: PathBuf,

    /// Private key file handed to the signer
    privkey_path: PathBuf,

    /// Node binary; its directory is the node working directory
    node_bin: PathBuf,

    /// Optional TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the execution service URL
    #[arg(long)]
    rpc_url: Option<String>,

    /// Override the sender address
    #[arg(long)]
    sender: Option<String>,

    /// Scenario to run (repeatable, defaults to all)
    #[arg(short, long = "scenario", value_enum)]
    scenarios: Vec<Scenario>,

    /// Keep going when an external command exits nonzero
    #[arg(long)]
    lenient_commands: bool,

    /// Skip the post-scenario static-call checks
    #[arg(long)]
    no_verify: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={level},contract_runner={level},rpc={level},storage={level},hyper=warn,reqwest=warn",
                    env!("CARGO_PKG_NAME"),
                    level = log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut settings = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            RunSettings::from_file(path)?
        }
        None => RunSettings::default(),
    };
    if let Some(url) = cli.rpc_url {
        settings.rpc.url = url;
    }
    if let Some(sender) = cli.sender {
        settings.rpc.sender = sender;
    }
    if cli.lenient_commands {
        settings.commands.exit_policy = ExitPolicy::Lenient;
    }
    if cli.no_verify {
        settings.scenarios.verify = false;
    }

    let scenarios = if cli.scenarios.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        cli.scenarios
    };

    let config = RunConfig::new(cli.target_dir, cli.privkey_path, cli.node_bin, settings);
    let mut runner = Runner::new(config)?;

    runner.run(&scenarios).await?;
    Ok(())
}
