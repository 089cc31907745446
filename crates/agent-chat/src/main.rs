//! A terminal chat with a REST webhook agent, built on `agent-chat` as a
//! library.

#[macro_use]
extern crate tracing;

use agent_chat::terminal::TerminalView;
use agent_chat::{SessionBuilder, SessionConfig};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match SessionConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let session = SessionBuilder::new(config, TerminalView::stdout()).build();
    println!(
        "{}",
        "Type a message and press Enter. Press Ctrl-D to quit.".dimmed()
    );

    let mut lines = io::BufReader::new(io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                error!("error reading input: {}", err);
                break;
            }
        };
        if session.send_line(&line).is_err() {
            // The terminal went away under us.
            return;
        }
    }

    // Let outstanding replies land before leaving.
    if let Err(err) = session.settle().await {
        debug!("widget closed before replies settled: {}", err);
    }
    session.close();
}
