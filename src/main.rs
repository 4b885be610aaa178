use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use chatsweep::config::FilterConfig;
use chatsweep::pipeline::{ChatMessage, ChatPipeline, ChatSink};

/// Emits synthesized lines (the commendation summary) straight to stdout.
struct StdoutSink;

impl ChatSink for StdoutSink {
    fn emit(&self, text: &str) {
        println!("{text}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = FilterConfig::from_env().context("loading filter configuration")?;

    eprintln!("chatsweep v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("  Feed chat lines on stdin, one per line: <channel_code>\\t<sender>\\t<body>");
    eprintln!("  Suppressed lines are dropped; rewritten lines are printed in their new form.\n");

    let pipeline = ChatPipeline::new(config, Arc::new(StdoutSink));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.is_empty() {
            continue;
        }
        let Some(message) = parse_line(&line) else {
            warn!(line, "skipping malformed input line");
            continue;
        };
        let verdict = pipeline.handle(&message);
        if let Some(text) = verdict.display_text(&message.body) {
            println!("{text}");
        }
    }

    Ok(())
}

/// Parse `<channel_code>\t<sender>\t<body>`.
fn parse_line(line: &str) -> Option<ChatMessage> {
    let mut parts = line.splitn(3, '\t');
    let code = parts.next()?.trim().parse().ok()?;
    let sender = parts.next()?;
    let body = parts.next()?;
    Some(ChatMessage::new(code, 0, sender, body))
}
