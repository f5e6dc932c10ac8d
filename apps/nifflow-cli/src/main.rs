//! `nifflow`: runs FREME connectors from the command line.
//!
//! Records are read as JSON lines from stdin (or `--input`) and output
//! records are written as JSON lines to stdout. Logs go to stderr.

mod instance;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use instance::{InstanceFile, read_records};
use nifflow_core::{Connector, Engine, EngineSettings};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nifflow", version, about = "Configurable connectors for FREME NLP services")]
struct Cli {
    /// Directory of additional connector definitions (overrides NIFFLOW_CONNECTORS_DIR).
    #[arg(long, global = true)]
    connectors_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available connectors.
    List,
    /// Show a connector's settings, defaults and completable fields.
    Describe { id: String },
    /// Validate the options of an instance file.
    Validate { instance: PathBuf },
    /// Process JSON-lines records and print one output record per line.
    Run {
        instance: PathBuf,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the requests `run` would send, without sending them.
    DryRun {
        instance: PathBuf,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Send one request built from an empty record.
    Check { instance: PathBuf },
    /// List valid values of a completable field.
    Complete { instance: PathBuf, field: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let mut settings = EngineSettings::from_env().context("Invalid engine settings")?;
    if let Some(dir) = cli.connectors_dir {
        settings.connectors_dir = Some(dir);
    }
    let engine = Engine::from_settings(&settings).context("Failed to initialize engine")?;

    match cli.command {
        Command::List => {
            for id in engine.registry().ids() {
                let descriptor = engine.registry().get(id)?;
                println!("{:<24} {}", id, descriptor.name);
            }
        }
        Command::Describe { id } => {
            let descriptor = engine.registry().get(&id)?;
            let description = Description {
                id: &descriptor.id,
                name: &descriptor.name,
                description: descriptor.description.as_deref(),
                api_version: &descriptor.api_version,
                path: &descriptor.path,
                recognized_keys: descriptor.recognized_keys(),
                completable_fields: descriptor.completable_fields(),
                defaults: &descriptor.defaults,
                settings: descriptor.settings(),
            };
            print!("{}", serde_yaml::to_string(&description)?);
        }
        Command::Validate { instance } => {
            let connector = load_connector(&engine, &instance)?;
            connector.validate()?;
            tracing::info!(connector = %connector.descriptor().id, "Options are valid");
        }
        Command::Run { instance, input } => {
            let connector = load_validated(&engine, &instance)?;
            let records = load_records(input.as_deref())?;
            let mut failed = 0usize;
            let mut stdout = io::stdout().lock();
            for result in connector.receive_all(&records) {
                match result {
                    Ok(output) => writeln!(stdout, "{}", serde_json::to_string(&output)?)?,
                    Err(_) => failed += 1,
                }
            }
            if failed > 0 {
                tracing::error!(failed, total = records.len(), "Some records failed");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::DryRun { instance, input } => {
            let connector = load_validated(&engine, &instance)?;
            let mut stdout = io::stdout().lock();
            for record in load_records(input.as_deref())? {
                let request = connector.dry_run(&record)?;
                writeln!(stdout, "{}", serde_json::to_string(&request)?)?;
            }
        }
        Command::Check { instance } => {
            let connector = load_validated(&engine, &instance)?;
            let output = connector.check()?;
            println!("{}", serde_json::to_string(&output)?);
            if !output.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Complete { instance, field } => {
            let connector = load_connector(&engine, &instance)?;
            let options = connector.complete(&field)?;
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct Description<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    api_version: &'a str,
    path: &'a str,
    recognized_keys: Vec<&'a str>,
    completable_fields: Vec<&'a str>,
    defaults: &'a nifflow_core::Configuration,
    settings: Vec<nifflow_core::components::SettingDef>,
}

fn load_connector(engine: &Engine, path: &Path) -> Result<Connector> {
    let instance = InstanceFile::load(path)?;
    Ok(engine.connector(&instance.connector, &instance.options)?)
}

fn load_validated(engine: &Engine, path: &Path) -> Result<Connector> {
    let connector = load_connector(engine, path)?;
    connector
        .validate()
        .with_context(|| format!("Invalid options in {:?}", path))?;
    Ok(connector)
}

fn load_records(input: Option<&Path>) -> Result<Vec<Value>> {
    match input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
            read_records(BufReader::new(file))
        }
        None => read_records(io::stdin().lock()),
    }
}
