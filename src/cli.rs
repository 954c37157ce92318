use crate::config::PackConfig;
use crate::git::GitRepository;
use crate::load_config::load_config;
use crate::pack::{PackOptions, Packer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// CLI for llm-pack: turn a git working tree into one LLM-ready document.
#[derive(Parser)]
#[clap(
    name = "llm-pack",
    version,
    about = "Pack a git working tree into a single document for LLM consumption"
)]
pub struct Cli {
    /// Log debug output to stderr
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack the repository containing the given path
    Pack {
        /// Path inside the repository (defaults to the current directory)
        #[clap(long, default_value = ".")]
        repo: PathBuf,

        /// Additional glob pattern to exclude; may be repeated
        #[clap(long = "ignore", short = 'i')]
        ignore: Vec<String>,

        /// Path to a YAML config file
        #[clap(long)]
        config: Option<PathBuf>,

        /// Write the document here instead of stdout
        #[clap(long, short = 'o')]
        output: Option<PathBuf>,

        /// Do not ask git which paths it ignores
        #[clap(long)]
        no_vcs_ignore: bool,
    },
}

/// Fold command-line flags into a loaded config. Flags win over file values;
/// ignore patterns accumulate.
pub fn apply_overrides(
    config: &mut PackConfig,
    ignore: Vec<String>,
    output: Option<PathBuf>,
    no_vcs_ignore: bool,
) {
    config.ignore.extend(ignore);
    if output.is_some() {
        config.output = output;
    }
    if no_vcs_ignore {
        config.vcs_ignore = false;
    }
}

/// CLI logic entrypoint, shared by main() and integration tests.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Pack {
            repo,
            ignore,
            config,
            output,
            no_vcs_ignore,
        } => {
            let mut pack_config = match config {
                Some(path) => load_config(path)?,
                None => PackConfig::default(),
            };
            apply_overrides(&mut pack_config, ignore, output, no_vcs_ignore);

            let repository = GitRepository::discover(&repo)
                .with_context(|| format!("Failed to locate repository from {}", repo.display()))?;
            let packer = Packer::new(repository, PackOptions::from(&pack_config));
            let document = packer.pack();

            match &pack_config.output {
                Some(path) => {
                    fs::write(path, &document)
                        .with_context(|| format!("Failed to write output to {}", path.display()))?;
                    info!(path = %path.display(), bytes = document.len(), "Wrote packed document");
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout
                        .write_all(document.as_bytes())
                        .and_then(|_| stdout.flush())
                        .context("Failed to write document to stdout")?;
                }
            }
            Ok(())
        }
    }
}
