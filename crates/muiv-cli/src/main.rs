//! CLI entry point for the MUIV student assistant.
//!
//! This binary provides the `muiv` command with subcommands for serving the
//! web chat, answering a single question, classifying a text, and chatting
//! in the terminal.

mod cli;
mod config;
mod helpers;
mod repl;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use muiv_intent::{Classifier, clean_text};
use muiv_web::WebServer;

use crate::cli::{Cli, Commands};
use crate::config::{AppConfig, load_app_config};
use crate::helpers::{build_pipeline, init_tracing, load_knowledge};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = load_app_config(&cli.config);

    match cli.command {
        Commands::Serve { bind, port } => cmd_serve(config, bind, port).await,
        Commands::Ask { text } => cmd_ask(&config, &text.join(" ")).await,
        Commands::Classify { text } => cmd_classify(&config, &text.join(" ")),
        Commands::Chat => {
            let pipeline = build_pipeline(&config)?;
            repl::cmd_chat(pipeline).await
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn cmd_serve(mut config: AppConfig, bind: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(bind) = bind {
        config.web.bind_addr = bind;
    }
    if let Some(port) = port {
        config.web.port = port;
    }

    let pipeline = build_pipeline(&config)?;
    let server = WebServer::new(config.web.clone(), pipeline, config.inference.model.clone());

    println!();
    println!("  MUIV assistant v{}", env!("CARGO_PKG_VERSION"));
    println!("  Model: {}", config.inference.model);
    println!("  Open http://{} in a browser.", server.addr());
    println!();

    server.start().await.context("web server failed")
}

async fn cmd_ask(config: &AppConfig, question: &str) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let answer = pipeline.respond(question).await;
    info!(category = %answer.category, source = ?answer.source, "answered");
    println!("{}", answer.text);
    Ok(())
}

fn cmd_classify(config: &AppConfig, text: &str) -> Result<()> {
    let classifier = Classifier::new(Arc::new(load_knowledge(config)?));
    println!("{}", classifier.classify(&clean_text(text)));
    Ok(())
}
