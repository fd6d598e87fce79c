//! # Archplan CLI Module
//!
//! This module implements the CLI interface for Archplan.
//!
//! ## Available Commands
//!
//! - `plan` - Compute the materials still needed for a goal
//! - `show` - Show one material, artefact, or collection
//! - `status` - Show knowledge base counts
//! - `check` - Report references to unregistered names
//! - `export` - Write the loaded dataset to a file

mod commands;

use crate::config::ArchplanConfig;
use archplan_core::{ArchplanError, EntityKind, KnowledgeBase};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Archplan - artefact restoration planner
///
/// Loads the game's materials, artefacts, and collections, then works out
/// which materials are still needed to restore what you ask for.
#[derive(Parser, Debug)]
#[command(name = "archplan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Dataset file (TOML, JSON, or binary snapshot)
    #[arg(short = 'D', long, global = true)]
    pub data: Option<PathBuf>,

    /// Configuration file (default: ./archplan.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Entity kinds accepted by `show`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// A material
    Material,
    /// An artefact and its bill of materials
    Artefact,
    /// A collection and its artefacts
    Collection,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Material => Self::Material,
            KindArg::Artefact => Self::Artefact,
            KindArg::Collection => Self::Collection,
        }
    }
}

/// Output formats accepted by `export`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Binary snapshot (header + postcard)
    Snapshot,
    /// JSON dataset
    Json,
    /// TOML dataset
    Toml,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the materials still needed for a goal
    Plan {
        /// Collection to restore (repeatable)
        #[arg(short, long = "collection")]
        collections: Vec<String>,

        /// Artefact to restore once (repeatable)
        #[arg(short, long = "artefact")]
        artefacts: Vec<String>,

        /// Material storage file to offset against (TOML or JSON)
        #[arg(short, long)]
        storage: Option<PathBuf>,
    },

    /// Show one definition
    Show {
        /// What to look up
        #[arg(value_enum)]
        kind: KindArg,

        /// Name of the entry
        name: String,
    },

    /// Show knowledge base counts
    Status,

    /// Report references to unregistered materials or artefacts
    Check,

    /// Export the loaded dataset
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format
        #[arg(short = 't', long, value_enum, default_value = "snapshot")]
        format: ExportFormat,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
///
/// Reloads the process-wide knowledge base from the dataset before running
/// the command.
pub fn execute(cli: Cli, config: &ArchplanConfig) -> Result<(), ArchplanError> {
    let json_mode = cli.json_mode;
    let data = cli.data.or_else(|| config.data.clone());

    let mut knowledge = KnowledgeBase::write_shared();
    knowledge.clear();

    match &data {
        Some(path) => {
            let dataset = load_dataset(path)?;
            dataset.load_into(&mut knowledge)?;
            tracing::info!(
                path = %path.display(),
                materials = knowledge.material_count(),
                artefacts = knowledge.artefact_count(),
                collections = knowledge.collection_count(),
                "Loaded dataset"
            );
        }
        None => tracing::warn!("No dataset given; the knowledge base is empty"),
    }

    match cli.command {
        Some(Commands::Plan {
            collections,
            artefacts,
            storage,
        }) => {
            let storage = storage.or_else(|| config.storage.clone());
            cmd_plan(&knowledge, json_mode, &collections, &artefacts, storage.as_deref())
        }
        Some(Commands::Show { kind, name }) => {
            cmd_show(&knowledge, json_mode, kind.into(), &name)
        }
        Some(Commands::Status) => cmd_status(&knowledge, json_mode, data.as_deref()),
        Some(Commands::Check) => cmd_check(&knowledge, json_mode),
        Some(Commands::Export { output, format }) => cmd_export(&knowledge, &output, format),
        None => {
            // No subcommand - show status by default
            cmd_status(&knowledge, json_mode, data.as_deref())
        }
    }
}
