//! Print the registration order of routes declared in YAML files
//!
//! ```text
//! route-order demos/sensorthings.yaml
//! RUST_LOG=route_precedence=debug route-order --json a.yaml b.yaml
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use route_precedence::prelude::*;
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "route-order")]
#[command(about = "Order HTTP routes by specificity for a first-match router", long_about = None)]
struct Cli {
    /// Emit the ordered table as JSON
    #[arg(long)]
    json: bool,

    /// Route configuration files, merged in the given order
    #[arg(required = true)]
    files: Vec<String>,
}

#[derive(Serialize)]
struct RouteLine<'a> {
    position: usize,
    method: HttpMethod,
    path: &'a str,
    endpoint: &'a str,
    handler: &'a str,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let configs = cli
        .files
        .iter()
        .map(|file| {
            RoutesConfig::from_yaml_file(file).with_context(|| format!("loading {}", file))
        })
        .collect::<Result<Vec<_>>>()?;
    let config = RoutesConfig::merge(configs);

    // Handlers stay symbolic: the name from the configuration is the handler.
    let (_, table) = RouteTableBuilder::new()
        .register_config(&config, |name| Some(name.to_string()))?
        .build()
        .context("route configuration is ambiguous")?;

    let lines: Vec<RouteLine<'_>> = table
        .iter()
        .enumerate()
        .map(|(position, route)| RouteLine {
            position,
            method: route.method,
            path: route.path.as_str(),
            endpoint: &route.endpoint,
            handler: &route.handler,
        })
        .collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for line in &lines {
            println!(
                "{:>4}  {:<6} {:<60} {}",
                line.position,
                line.method.as_str(),
                line.path,
                line.endpoint
            );
        }
    }

    Ok(())
}
