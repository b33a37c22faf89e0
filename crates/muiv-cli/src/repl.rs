//! Subcommand: `muiv chat`, the interactive REPL.
//!
//! Prints the greeting, then answers one question per line until `quit`,
//! `exit`, or end of input.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use muiv_intent::Pipeline;

/// Run the chat loop over stdin and stdout.
pub async fn cmd_chat(pipeline: Pipeline) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = std::io::stdout();
    run_repl(&pipeline, stdin, &mut stdout.lock()).await
}

/// The chat loop, generic over its input and output.
pub async fn run_repl<R, W>(pipeline: &Pipeline, reader: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out)?;
    writeln!(out, "  {}", pipeline.greeting())?;
    writeln!(out, "  Type your question, or 'quit' to exit.")?;
    writeln!(out)?;

    let mut lines = reader.lines();

    loop {
        write!(out, "> ")?;
        out.flush().ok();

        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            writeln!(out)?;
            info!("EOF received, exiting");
            break;
        };

        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        if trimmed == "quit" || trimmed == "exit" {
            info!("user requested exit");
            break;
        }

        let reply = pipeline.answer(trimmed).await;
        writeln!(out, "{reply}")?;
        writeln!(out)?;
    }

    Ok(())
}
