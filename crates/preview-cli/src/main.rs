//! `bizplan-preview` - run planning operations against a local store

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use preview_api::{CallShim, Notifier, Operation, PreviewApi, PreviewConfig, StorageConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("bizplan-preview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Business-planning preview backend")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Persist to this JSON file instead of memory"),
        )
        .arg(
            Arg::new("latency-ms")
                .long("latency-ms")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Simulated call latency in milliseconds"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("call")
                .about("Run one operation and print its envelope")
                .arg(
                    Arg::new("operation")
                        .required(true)
                        .help(r#"Operation as JSON, e.g. '{"op":"getProject","args":{"projectId":"PRJ-20251231-0001"}}'"#),
                ),
        )
        .subcommand(Command::new("reset").about("Wipe the store and reseed"))
        .subcommand(Command::new("dump").about("Print every collection"))
        .subcommand(Command::new("user").about("Print the current user"))
}

/// Proposal notices on stderr, keeping stdout for envelopes
#[derive(Debug)]
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<PreviewConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => PreviewConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PreviewConfig::new(),
    };
    if let Some(path) = matches.get_one::<PathBuf>("store") {
        config = config.with_storage(StorageConfig::File { path: path.clone() });
    }
    if let Some(ms) = matches.get_one::<u64>("latency-ms") {
        config = config.with_latency(Duration::from_millis(*ms));
    }
    Ok(config)
}

fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let text = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let json = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    init_tracing(&config.log_filter, matches.get_flag("log-json"));
    tracing::debug!(?config, "configuration loaded");

    let api = PreviewApi::from_config(&config)
        .context("opening store")?
        .with_notifier(Arc::new(StderrNotifier));
    let shim = CallShim::new(Arc::new(api), config.latency());

    match matches.subcommand() {
        Some(("call", args)) => {
            let text = args
                .get_one::<String>("operation")
                .context("missing operation")?;
            let op: Operation = serde_json::from_str(text).context("parsing operation")?;
            let name = op.name();
            let envelope = shim
                .call(op)
                .await
                .with_context(|| format!("{name} failed"))?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            if !envelope.success {
                std::process::exit(1);
            }
        }
        Some(("reset", _)) => {
            let envelope = shim.api().initialize()?;
            println!("{}", envelope.message.unwrap_or_default());
        }
        Some(("dump", _)) => {
            let dataset = shim.api().store().snapshot()?;
            println!("{}", serde_json::to_string_pretty(&dataset)?);
        }
        Some(("user", _)) => {
            let user = shim.api().current_user();
            println!("{}", user.into_data().map(|u| u.email).unwrap_or_default());
        }
        _ => unreachable!("subcommand is required"),
    }
    Ok(())
}
