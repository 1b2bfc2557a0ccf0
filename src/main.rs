//! # Hashtag Harvest CLI (`hashtags`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `hashtags report <folder>` | Write `<folder>/hashtags.csv` |
//! | `hashtags collect <folder>` | Print every hashtag found under a folder |
//! | `hashtags list <folder>` | Print the documents that would be scanned |
//! | `hashtags text <file>` | Print the plain text of one document |
//! | `hashtags tags <file>` | Print the hashtags of one document |
//!
//! ## Examples
//!
//! ```bash
//! hashtags report ~/notes --output ~/reports --filename notes-tags
//! hashtags --format docx collect ./minutes --with-origin
//! RUST_LOG=debug hashtags --progress json report ./archive
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use hashtag_harvest::config::{self, Config};
use hashtag_harvest::discover;
use hashtag_harvest::document::DocumentFormat;
use hashtag_harvest::extract;
use hashtag_harvest::harvest::{self, Harvest};
use hashtag_harvest::hashtag;
use hashtag_harvest::progress::ProgressMode;

/// Hashtag Harvest — collect #hashtags from documents into a CSV report.
#[derive(Parser)]
#[command(
    name = "hashtags",
    about = "Collect #hashtags from word-processor documents into a CSV report",
    version,
    long_about = "Walks a directory tree for word-processor documents (ODT by default), \
    extracts their paragraph text, and reports every #hashtag found alongside the file \
    it came from."
)]
struct Cli {
    /// Path to an optional configuration file (TOML).
    ///
    /// Without it, built-in defaults are used: ODT documents, walk order,
    /// `hashtags.csv` written into the scanned folder.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Document format to read: `odt` or `docx`. Overrides `scan.format`.
    #[arg(long, global = true)]
    format: Option<DocumentFormat>,

    /// Progress on stderr: `auto` (human when stderr is a TTY), `human`, `json`, or `off`.
    #[arg(long, global = true, default_value = "auto")]
    progress: ProgressMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest a folder and write the CSV report.
    ///
    /// The report is written only after every document loaded successfully.
    Report {
        /// Root folder to scan recursively.
        folder: PathBuf,

        /// Directory to write the report into. Defaults to the scanned folder.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report base name; `.csv` is always appended.
        #[arg(long)]
        filename: Option<String>,
    },

    /// Print every hashtag found under a folder, one per line.
    Collect {
        /// Root folder to scan recursively.
        folder: PathBuf,

        /// Append a tab and the origin file to each hashtag.
        #[arg(long)]
        with_origin: bool,
    },

    /// List the documents that would be scanned.
    List {
        /// Root folder to scan recursively.
        folder: PathBuf,
    },

    /// Print the extracted plain text of a single document.
    Text {
        /// Document path.
        file: PathBuf,
    },

    /// Print the hashtags of a single document, one per line.
    Tags {
        /// Document path.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load(cli.config.as_deref(), cli.format)?;

    match cli.command {
        Commands::Report {
            folder,
            output,
            filename,
        } => {
            if let Some(name) = filename.as_deref() {
                config::validate_filename(name)?;
            }
            let reporter = cli.progress.reporter();
            let path = harvest::generate_report(
                &folder,
                output.as_deref(),
                filename.as_deref(),
                &cfg,
                reporter.as_ref(),
            )?;
            println!("{}", path.display());
        }
        Commands::Collect {
            folder,
            with_origin,
        } => match harvest::hashtags_in_folder(&folder, &cfg.scan, with_origin)? {
            Harvest::Bare(tags) => {
                for tag in tags {
                    println!("{}", tag);
                }
            }
            Harvest::WithOrigin(report) => {
                for record in &report {
                    println!("{}\t{}", record.hashtag, record.originfile.display());
                }
            }
        },
        Commands::List { folder } => {
            for path in discover::list_documents(&folder, &cfg.scan)? {
                println!("{}", path.display());
            }
        }
        Commands::Text { file } => {
            println!("{}", extract::file_text(&file, cfg.scan.format)?);
        }
        Commands::Tags { file } => {
            for tag in hashtag::hashtags_from_file(&file, cfg.scan.format)? {
                println!("{}", tag);
            }
        }
    }

    Ok(())
}

fn load(path: Option<&Path>, format: Option<DocumentFormat>) -> Result<Config> {
    let mut cfg = match path {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    if let Some(format) = format {
        cfg.scan.format = format;
    }
    config::validate(&cfg).context("Invalid configuration")?;
    Ok(cfg)
}
