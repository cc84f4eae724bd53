//! `sn`: parse, render, sign and verify Super Notation documents.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use super_notation_config::Config;

mod commands;

use commands::{info, parse, render, sign, unsign, verify};

#[derive(Parser)]
#[command(name = "sn")]
#[command(version)]
#[command(about = "Super Notation document tool")]
struct Cli {
    /// Show debug logging and extra detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and print a summary
    Parse {
        /// SN file
        file: PathBuf,
        /// Fail on the first problem instead of recovering
        #[arg(long)]
        strict: bool,
        /// Print the parsed document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a file to HTML
    Render {
        /// SN file
        file: PathBuf,
        /// Output file (default: next to the input, or in the configured output_dir)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Fail on the first problem instead of recovering
        #[arg(long)]
        strict: bool,
        /// Write only the document block, without page head or stylesheet
        #[arg(long)]
        fragment: bool,
    },
    /// Sign and seal a file in place
    Sign {
        /// SN file
        file: PathBuf,
    },
    /// Check a file's signature
    Verify {
        /// SN file
        file: PathBuf,
    },
    /// Remove the signature and seal from a file
    Unsign {
        /// SN file
        file: PathBuf,
    },
    /// Show information about a file
    Info {
        /// SN file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = Config::load_or_default()
        .with_context(|| format!("loading {}", Config::config_path().display()))?;
    log::debug!("config: {config:?}");

    let verbose = cli.verbose;
    match cli.command {
        Commands::Parse { file, strict, json } => {
            parse::run(&file, commands::mode(strict, &config), json, verbose)?
        }
        Commands::Render {
            file,
            output,
            strict,
            fragment,
        } => render::run(
            &file,
            output.as_deref(),
            commands::mode(strict, &config),
            fragment,
            &config,
        )?,
        Commands::Sign { file } => sign::run(&file)?,
        Commands::Verify { file } => return verify::run(&file),
        Commands::Unsign { file } => unsign::run(&file)?,
        Commands::Info { file } => info::run(&file, commands::mode(false, &config), verbose)?,
    }
    Ok(true)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
