//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract a selected fragment into the component's message
//!   catalog and print the replacement reference expression
//! - `init`: Initialize the intlx configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a text fragment into the component's message catalog
    Extract(ExtractCommand),
    /// Create a default .intlxrc.json in the current directory
    Init(InitCommand),
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Source file the selection comes from
    pub file: PathBuf,

    /// Variable name, for messages.<NAME>
    #[arg(short, long)]
    pub name: String,

    /// Message id, like component.foo.bar
    #[arg(short, long)]
    pub id: String,

    /// The selected text, passed verbatim
    #[arg(long, conflicts_with = "range")]
    pub text: Option<String>,

    /// Byte range of the selection within FILE, as START..END
    #[arg(long)]
    pub range: Option<String>,

    /// Produce a <FormattedMessage {...messages.<NAME>} /> reference instead
    /// of {messages.<NAME>}
    #[arg(long)]
    pub tagged: bool,

    /// Locale dictionary JSON file; overrides the config file and is
    /// remembered there on first use
    #[arg(long)]
    pub locale_file: Option<PathBuf>,

    /// Replace the selection range in FILE with the reference expression
    #[arg(long, requires = "range")]
    pub write: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Locale dictionary path to record in the new config file
    #[arg(long)]
    pub locale_file: Option<PathBuf>,
}
