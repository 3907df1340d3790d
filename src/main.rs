// Inherit lint configuration from lib.rs for consistency
#![allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use karte2json::batch;
use karte2json::chart;
use karte2json::cli::commands::{Cli, Command};
use karte2json::cli::output::{self, OutputFormat};
use karte2json::config::{Config, UserSettings};
use karte2json::error::KarteError;
use karte2json::operations;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the JSON output.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn run(cli: Cli) -> CmdResult {
    let config = get_config(cli.config.as_deref())?;
    match cli.command {
        Command::Convert {
            path,
            format,
            output,
        } => cmd_convert(&config, path.as_deref(), format, output.as_deref()),
        Command::Flat { path, format } => cmd_flat(&config, path.as_deref(), format),
        Command::Batch { path, dry_run } => cmd_batch(&config, &path, dry_run),
        Command::Stats { path } => cmd_stats(path.as_deref()),
        Command::Init { force } => cmd_init(&config, force),
    }
}

fn get_config(path: Option<&Path>) -> Result<Config, Box<dyn std::fmt::Display>> {
    match path {
        Some(p) => Ok(Config::new(p)),
        None => Config::from_cwd().map_err(map_err),
    }
}

fn resolve_format(
    config: &Config,
    format: Option<OutputFormat>,
) -> Result<OutputFormat, Box<dyn std::fmt::Display>> {
    match format {
        Some(f) => Ok(f),
        None => config.output_format().map_err(map_err),
    }
}

fn cmd_convert(
    config: &Config,
    path: Option<&Path>,
    format: Option<OutputFormat>,
    out_path: Option<&Path>,
) -> CmdResult {
    let format = resolve_format(config, format)?;
    let text = operations::read_chart_text(path).map_err(map_err)?;
    if text.trim().is_empty() {
        return Err(map_err(KarteError::EmptyInput));
    }

    let records = chart::parse_medical_text(&text);
    if records.is_empty() {
        tracing::warn!("no encounters recognized in input");
    }
    let json = output::format_records(&records, format).map_err(map_err)?;

    match out_path {
        Some(out) => {
            std::fs::write(out, json + "\n").map_err(map_err)?;
            tracing::info!(path = %out.display(), records = records.len(), "JSON written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_flat(config: &Config, path: Option<&Path>, format: Option<OutputFormat>) -> CmdResult {
    let format = resolve_format(config, format)?;
    let text = operations::read_chart_text(path).map_err(map_err)?;
    let records = chart::parse_flat(&text);
    println!(
        "{}",
        output::format_records(&records, format).map_err(map_err)?
    );
    Ok(())
}

fn cmd_batch(config: &Config, path: &Path, dry_run: bool) -> CmdResult {
    let result = batch::run_batch(path, config, dry_run).map_err(map_err)?;
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_stats(path: Option<&Path>) -> CmdResult {
    let text = operations::read_chart_text(path).map_err(map_err)?;
    let stats = operations::get_text_stats(&text);
    println!("{}", output::format_json(&stats));
    Ok(())
}

fn cmd_init(config: &Config, force: bool) -> CmdResult {
    if config.exists() && !force {
        return Err(map_err(format!(
            "{} already exists (use --force to overwrite)",
            config.config_path.display()
        )));
    }
    let fresh = Config {
        config_path: config.config_path.clone(),
        settings: UserSettings::default(),
    };
    fresh.save_settings().map_err(map_err)?;
    println!(
        "{}",
        output::format_json(&serde_json::json!({
            "ok": true,
            "path": fresh.config_path.display().to_string(),
        }))
    );
    Ok(())
}
