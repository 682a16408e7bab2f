//! `vlx` command-line tool
//!
//! Loads VLX text documents through the default codec registry to check them,
//! summarise them or write them back out.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use vlx::config::{Config, ErrorPolicy, SerializerConfig};
use vlx::foundation::logging;
use vlx::serialization::{Registry, Serializer, VlxError};

#[derive(Parser)]
#[command(name = "vlx", about = "VLX scene document tools")]
struct Cli {
    /// Serializer configuration (.toml or .ron)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report field errors as diagnostics instead of failing
    #[arg(long, global = true)]
    collect: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a document and report errors
    Check { path: PathBuf },
    /// Count the objects of a document by type
    Info { path: PathBuf },
    /// Load a document and write it back out
    Roundtrip { input: PathBuf, output: PathBuf },
    /// Write the default configuration
    InitConfig { path: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config(cli.config.as_deref(), cli.collect) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_with_filter(&config.log_level);

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>, collect: bool) -> Result<SerializerConfig, VlxError> {
    let mut config = match path {
        Some(path) => SerializerConfig::load_from_file(path)?,
        None => SerializerConfig::default(),
    };
    if collect {
        config.error_policy = ErrorPolicy::Collect;
    }
    config.validate()?;
    Ok(config)
}

fn run(command: Commands, config: SerializerConfig) -> Result<(), VlxError> {
    if let Commands::InitConfig { path } = &command {
        config.save_to_file(path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let serializer = Serializer::new(Arc::new(Registry::with_defaults()), config);
    match command {
        Commands::Check { path } => {
            let imported = serializer.load_vlx_file(&path)?;
            report(&imported.diagnostics);
            println!(
                "{}: ok, {} resources, {} objects",
                path.display(),
                imported.resources().len(),
                imported.store.len()
            );
        }
        Commands::Info { path } => {
            let imported = serializer.load_vlx_file(&path)?;
            report(&imported.diagnostics);
            println!("{}", path.display());
            for (type_name, count) in imported.store.count_by_type() {
                println!("  {type_name:<32} {count}");
            }
        }
        Commands::Roundtrip { input, output } => {
            let imported = serializer.load_vlx_file(&input)?;
            report(&imported.diagnostics);
            let diagnostics = serializer.write_vlx_file(&output, &imported.store, imported.database)?;
            report(&diagnostics);
            println!("{} -> {}", input.display(), output.display());
        }
        Commands::InitConfig { .. } => {}
    }
    Ok(())
}

fn report(diagnostics: &[VlxError]) {
    for diagnostic in diagnostics {
        eprintln!("warning: {diagnostic}");
    }
}
