//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scrivener CLI - Chat with your documents from the terminal.
#[derive(Debug, Parser)]
#[command(name = "scrivener")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Answer from retrieved context only, without a language model
    #[arg(long, global = true)]
    pub offline: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Plain text (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a document and print a text preview
    Show(ShowArgs),

    /// Ask a single question about a document
    Ask(AskArgs),

    /// Enter interactive chat mode
    Chat(ChatArgs),
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Document to preview (.pdf, .docx, .txt, .md)
    pub file: PathBuf,

    /// Maximum characters to print
    #[arg(short = 'n', long, default_value_t = 2000)]
    pub chars: usize,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Document to question
    pub file: PathBuf,

    /// The question to ask
    pub question: String,
}

/// Arguments for the chat command.
#[derive(Debug, Parser)]
pub struct ChatArgs {
    /// Document to load before the first prompt
    pub file: Option<PathBuf>,
}
