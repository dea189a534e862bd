//! CLI for formsync.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formsync_core::config;
use formsync_core::store::FormStore;
use std::path::PathBuf;

use commands::{run_checksum, run_forms, run_get, run_list, run_remove, GetArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "formsync")]
#[command(about = "Fetch blank forms from an OpenRosa server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show the server's form list and how each form compares to what is stored locally.
    List {
        /// Server base URL (overrides server_url in config.toml).
        #[arg(long)]
        server: Option<String>,
        /// Print entries as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Download forms from the server.
    Get {
        /// Form IDs to download.
        #[arg(value_name = "FORM_ID", required_unless_present = "all")]
        form_ids: Vec<String>,
        /// Download every form on the server.
        #[arg(long, conflicts_with = "form_ids")]
        all: bool,
        /// Server base URL (overrides server_url in config.toml).
        #[arg(long)]
        server: Option<String>,
        /// Directory for downloaded forms (overrides forms_dir in config.toml).
        #[arg(long, value_name = "DIR")]
        forms_dir: Option<PathBuf>,
        /// Always print the per-form details, not only when something failed.
        #[arg(long)]
        details: bool,
    },

    /// List downloaded forms.
    Forms,

    /// Forget a downloaded form by its store ID.
    Remove {
        id: i64,
        /// Also delete the form file and its media directory.
        #[arg(long)]
        delete_files: bool,
    },

    /// Compute the MD5 (or SHA-256) of a file.
    Checksum {
        path: PathBuf,
        #[arg(long)]
        sha256: bool,
    },
}

impl Cli {
    /// Parse arguments and run the command. Returns the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        if let CliCommand::Checksum { path, sha256 } = &cli.command {
            run_checksum(path, *sha256)?;
            return Ok(0);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!(server = ?cfg.server_url, "loaded config");
        let store = FormStore::open_default().await?;

        let code = match cli.command {
            CliCommand::List { server, json } => {
                run_list(&cfg, &store, server.as_deref(), json).await?;
                0
            }
            CliCommand::Get {
                form_ids,
                all,
                server,
                forms_dir,
                details,
            } => {
                let args = GetArgs {
                    form_ids,
                    all,
                    server,
                    forms_dir,
                    details,
                };
                run_get(&cfg, &store, args).await?
            }
            CliCommand::Forms => {
                run_forms(&store).await?;
                0
            }
            CliCommand::Remove { id, delete_files } => {
                run_remove(&store, id, delete_files).await?;
                0
            }
            CliCommand::Checksum { .. } => 0,
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests;
