//! Intake CLI: pick local files, upload them and register them with the API.
//!
//! Upload mode reads INTAKE_API_URL, INTAKE_API_KEY and the storage settings
//! from the environment (or `.env`). Pass-through mode needs none of them.

use anyhow::Context;
use clap::{Parser, Subcommand};
use intake_cli::{
    build_pipeline, init_tracing, AcceptPattern, ConsoleNotifier, JsonPrinter, LocalPicker,
    PickerOptions,
};
use intake_core::{KeyPrefix, OrchestrationPolicy, TransferOptions};
use intake_uploader::{DropOutcome, Uploader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "intake", about = "Upload files and register them with the intake API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one or more files
    Upload {
        /// Paths of the files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Allow more than one file per batch
        #[arg(long)]
        multiple: bool,
        /// Skip transfer and registration; print the selected files instead
        #[arg(long)]
        pass_through: bool,
        /// Identifier segment of the storage key (e.g. a user or tenant id)
        #[arg(long, conflicts_with = "pass_through")]
        identifier: Option<String>,
        /// Leading segment of the storage key
        #[arg(long, conflicts_with = "pass_through")]
        key_prefix: Option<String>,
        /// Accepted types: `.ext`, `type/*` or an exact MIME type (repeatable)
        #[arg(long)]
        accept: Vec<String>,
        /// Drop files larger than this many bytes
        #[arg(long)]
        max_size: Option<u64>,
        /// Drop files smaller than this many bytes
        #[arg(long)]
        min_size: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            files,
            multiple,
            pass_through,
            identifier,
            key_prefix,
            accept,
            max_size,
            min_size,
        } => {
            let policy = if pass_through {
                OrchestrationPolicy::pass_through()
            } else {
                let key_prefix = key_prefix
                    .map(KeyPrefix::new)
                    .transpose()
                    .context("Invalid --key-prefix")?;
                let options = TransferOptions::new(identifier, key_prefix);
                options.validate().context("Invalid --identifier")?;
                OrchestrationPolicy::upload(options)
            };
            let policy = policy.with_multiple(multiple);

            let accept = accept
                .iter()
                .map(|pattern| pattern.parse::<AcceptPattern>())
                .collect::<anyhow::Result<Vec<_>>>()?;
            let picker = LocalPicker::new(
                files,
                PickerOptions {
                    accept,
                    max_size,
                    min_size,
                },
            );

            let pipeline = build_pipeline(pass_through, Arc::new(ConsoleNotifier)).await?;
            let mut uploader = Uploader::new(pipeline, policy);
            let trigger = uploader.trigger(Arc::new(picker));

            let outcome = uploader
                .select(&trigger, Some(&JsonPrinter))
                .await
                .context("Failed to select files")?;

            match outcome {
                DropOutcome::Ran(run) if run.is_success() => Ok(ExitCode::SUCCESS),
                DropOutcome::Ran(_) | DropOutcome::Rejected(_) => Ok(ExitCode::FAILURE),
            }
        }
    }
}
