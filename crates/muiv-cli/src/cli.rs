//! CLI argument definitions.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// MUIV student assistant.
#[derive(Parser)]
#[command(
    name = "muiv",
    version,
    about = "MUIV student assistant -- local answers first, a hosted model otherwise",
    long_about = "A conversational assistant for students of the Moscow Witte University. \
                  Known questions (schedule, contacts, library, exams) get canned answers; \
                  everything else is forwarded to a remote text-generation model."
)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, short, global = true, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Default log level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server with the embedded chat page.
    Serve {
        /// Address to bind the HTTP server to (overrides config).
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides config).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Answer a single question and print the reply.
    Ask {
        /// The question text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print the intent label for a text.
    Classify {
        /// The text to classify.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Interactive chat in the terminal.
    Chat,
}
