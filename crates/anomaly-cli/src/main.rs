// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]

mod commands;
mod format;

use anomaly_config::{AnomalyConfig, load_config, validate_config};
use anomaly_model::{ReasonRegistry, to_anomaly, to_object, to_response, to_response_in};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use format::OutputFormat;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "anomaly", version, about = "Classify and serialize anomalies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config with a `[reasons]` table.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra reason description as CODE=DESCRIPTION. Can be repeated.
    #[arg(long = "reason", global = true)]
    reasons: Vec<String>,

    /// Output format: json | json-pretty | text.
    #[arg(long, global = true, default_value = "json")]
    format: OutputFormat,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every category with its status code and retriability.
    Categories,

    /// Report whether a value is an anomaly and whether it is retriable.
    Classify {
        /// JSON value, bare text, or `-` for stdin.
        value: String,
        /// Treat object input as a persistent map.
        #[arg(long)]
        persistent: bool,
    },

    /// Normalize a value into an anomaly.
    Coerce {
        /// JSON value, bare text, or `-` for stdin.
        value: String,
        /// Treat object input as a persistent map.
        #[arg(long)]
        persistent: bool,
    },

    /// Serialize an anomaly into its caller-facing object.
    Object {
        /// JSON value, bare text, or `-` for stdin.
        value: String,
        /// Read and produce persistent maps.
        #[arg(long)]
        persistent: bool,
    },

    /// Build the `{statusCode, body}` response for a value.
    Response {
        /// JSON value, bare text, or `-` for stdin.
        value: String,
        /// Read and produce persistent maps.
        #[arg(long)]
        persistent: bool,
    },

    /// Print the JSON schema of the config file.
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())
        .with_context(|| match &cli.config {
            Some(p) => format!("load config '{}'", p.display()),
            None => "load default config".to_string(),
        })?;

    let level = if cli.debug {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("anomaly={level}")))
        .with_writer(std::io::stderr)
        .init();

    for warning in validate_config(&config).context("validate config")? {
        warn!(target: "anomaly.config", "{warning}");
    }

    let reasons = build_registry(&config, &cli.reasons)?;
    let out = run(cli.command, cli.format, &config, &reasons)?;
    println!("{out}");
    Ok(())
}

fn build_registry(config: &AnomalyConfig, extra: &[String]) -> Result<ReasonRegistry> {
    let reasons = config.reason_registry();
    for arg in extra {
        let (code, description) = commands::parse_reason_arg(arg)?;
        reasons.register(code, description);
    }
    debug!(target: "anomaly.cli", count = reasons.len(), "reason registry ready");
    Ok(reasons)
}

fn run(
    command: Commands,
    format: OutputFormat,
    config: &AnomalyConfig,
    reasons: &ReasonRegistry,
) -> Result<String> {
    let text = match command {
        Commands::Categories => format::format_categories(format)?,
        Commands::Schema => commands::schema_json()?,
        Commands::Classify { value, persistent } => {
            let value = input(&value, persistent)?;
            format::format_classification(&commands::classify(&value), format)?
        }
        Commands::Coerce { value, persistent } => {
            let value = input(&value, persistent)?;
            format::format_value(&to_anomaly(value), format)?
        }
        Commands::Object { value, persistent } => {
            let family = commands::output_family(persistent, config);
            let value = input(&value, persistent)?;
            let object = to_object(&value, reasons, family).context("serialize anomaly")?;
            format::format_value(&object, format)?
        }
        Commands::Response { value, persistent } => {
            let family = commands::output_family(persistent, config);
            let value = input(&value, persistent)?;
            if family == anomaly_model::Family::Plain {
                format::format_response(&to_response(&value, reasons), format)?
            } else {
                let wrapped = to_response_in(&value, reasons, family).context("build response")?;
                format::format_value(&wrapped, format)?
            }
        }
    };
    Ok(text)
}

fn input(arg: &str, persistent: bool) -> Result<anomaly_model::Value> {
    let text = commands::read_input(arg)?;
    commands::lift(commands::parse_value(&text), persistent)
}
