//! Defines the command-line arguments and subcommands for the anbn CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "anbn",
    version,
    about = "Generate, recognize and derive strings of the language a^n b^n."
)]
pub struct AnbnArgs {
    /// When to colour output.
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Colour when stdout is a terminal.
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

/// Settings shared by the commands that run the generators.
#[derive(Debug, Clone, Args)]
pub struct PipelineArgs {
    /// YAML or JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Largest n for generated members.
    #[arg(long)]
    pub max_n: Option<usize>,

    /// Number of random distractors to add.
    #[arg(long)]
    pub distractors: Option<usize>,

    /// Seed for the distractor generator.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full pipeline: generate, recognize, derive and print the transcript.
    Run {
        #[command(flatten)]
        pipeline: PipelineArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the generated members and distractors.
    Generate {
        #[command(flatten)]
        pipeline: PipelineArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Recognize strings; exits with status 1 if any is rejected.
    Check {
        /// Candidate strings. `ε` stands for the empty string.
        strings: Vec<String>,

        /// A file or directory of `.txt` files with one candidate per line.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Say why each rejected string was rejected.
        #[arg(long)]
        explain: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Render the derivation tree of a^n b^n.
    Tree {
        /// Number of pairs.
        #[arg(allow_negative_numbers = true)]
        n: i64,

        /// Build the tree in an arena; required for very large n.
        #[arg(long)]
        arena: bool,

        /// YAML or JSON configuration file (for the pair limits and rendering).
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Count the pairs of a string and render its derivation tree.
    Derive {
        input: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the automaton's steps on a string.
    Trace {
        input: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
