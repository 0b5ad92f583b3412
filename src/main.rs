// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use boardwalk::backends::console::{parse_cli_value, ConsoleInput};
use boardwalk::config::{load_engine_config, load_graph, EngineConfig, InputValues, RuntimeBuilder};
use boardwalk::engine::{traverse, BaseTraversalContext};

const USAGE: &str = "Usage: boardwalk [--config engine.yaml] <graph.json> [key=value ...]";

struct CliArgs {
    config: Option<PathBuf>,
    graph: PathBuf,
    preset: InputValues,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut config = None;
    let mut graph = None;
    let mut preset = InputValues::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("--config requires a file path")?;
            config = Some(PathBuf::from(path));
        } else if let Some((key, value)) = arg.split_once('=') {
            preset.insert(key.to_string(), parse_cli_value(value));
        } else if graph.is_none() {
            graph = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected argument '{}'\n{}", arg, USAGE);
        }
    }

    let graph = graph.context(USAGE)?;
    Ok(CliArgs {
        config,
        graph,
        preset,
    })
}

fn init_tracing(cfg: &EngineConfig) {
    // RUST_LOG takes precedence over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.get_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args)?;

    let cfg = match &cli.config {
        Some(path) => load_engine_config(path)
            .with_context(|| format!("failed to load engine config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };
    init_tracing(&cfg);

    let graph = load_graph(&cli.graph)
        .with_context(|| format!("failed to load graph '{}'", cli.graph.display()))?;
    let root_path = std::fs::canonicalize(&cli.graph)
        .with_context(|| format!("failed to resolve '{}'", cli.graph.display()))?;

    let context = BaseTraversalContext::new(RuntimeBuilder::from_config(&cfg))
        .with_input_source(Arc::new(ConsoleInput::new(cli.preset)))
        .with_root_path(root_path);

    let outputs = traverse(&context, &graph).await?;
    println!("{}", serde_json::to_string_pretty(&outputs)?);

    Ok(())
}
