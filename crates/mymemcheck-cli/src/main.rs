mod reader;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};

use mymemcheck_core::{estimate, read_settings, render, validate, Error, MemoryOptions, MemorySize};
use reader::read_profile;

#[derive(Parser)]
#[command(
    name = "mymemcheck",
    version,
    about = "Check whether a MySQL option file can use more memory than the machine has"
)]
struct Cli {
    /// Option file (my.cnf) or SHOW VARIABLES dump to check
    config: Option<PathBuf>,

    /// Server machine memory size (default: 4G)
    #[arg(short, long, value_name = "NUM")]
    memory: Option<MemorySize>,

    /// Server system memory size (default: 256M)
    #[arg(short, long, value_name = "NUM")]
    system: Option<MemorySize>,

    /// Output format: human (default) or json
    #[arg(long, default_value = "human")]
    format: String,

    /// Never color the verdict
    #[arg(long)]
    no_color: bool,
}

enum Outcome {
    Report(String),
    Missing(Vec<String>),
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let Some(config_path) = cli.config.as_deref() else {
        let _ = Cli::command().print_help();
        process::exit(1);
    };

    match run_check(config_path, &cli) {
        Ok(Outcome::Report(output)) => {
            println!("{output}");
        }
        Ok(Outcome::Missing(names)) => {
            println!("[ABORT] missing variables:\n  {}\n", names.join("\n  "));
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Log to stderr only when RUST_LOG is set; stdout carries the report.
fn init_tracing() {
    use tracing_subscriber::prelude::*;

    if std::env::var("RUST_LOG").is_err() {
        return;
    }

    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal());
    let init_result = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    if let Err(err) = init_result {
        tracing::warn!(error = %err, "tracing already initialized");
    }
}

fn run_check(config_path: &Path, cli: &Cli) -> Result<Outcome, String> {
    let options = memory_options(config_path, cli).map_err(|e| e.to_string())?;
    let settings = read_settings(config_path).map_err(|e| e.to_string())?;

    match validate(&settings) {
        Ok(()) => {}
        Err(Error::MissingSettings(names)) => return Ok(Outcome::Missing(names)),
        Err(e) => return Err(e.to_string()),
    }

    let report = estimate(&settings, &options);

    if cli.format == "json" {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        return Ok(Outcome::Report(json));
    }

    Ok(Outcome::Report(render(&report, use_color(cli))))
}

/// Flags win over the profile, which wins over the built-in defaults.
fn memory_options(config_path: &Path, cli: &Cli) -> Result<MemoryOptions, Error> {
    let dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let profile = read_profile(dir)?.unwrap_or_default();
    let defaults = MemoryOptions::default();

    let machine_memory = match (&cli.memory, &profile.machine_memory) {
        (Some(size), _) => size.clone(),
        (None, Some(size)) => size.to_memory_size()?,
        (None, None) => defaults.machine_memory,
    };
    let system_memory = match (&cli.system, &profile.system_memory) {
        (Some(size), _) => size.clone(),
        (None, Some(size)) => size.to_memory_size()?,
        (None, None) => defaults.system_memory,
    };

    Ok(MemoryOptions {
        machine_memory,
        system_memory,
    })
}

fn use_color(cli: &Cli) -> bool {
    !cli.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}
