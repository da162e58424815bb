//! Terminal chat client - Entry Point
//!
//! Asks for a nickname if none was given, then chats over stdin/stdout.

use clap::Parser;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use broadcast_chat::message::validate_name;
use broadcast_chat::{ChatClient, ClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never mix with chat output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = ClientConfig::parse();
    let mut stdin = BufReader::new(io::stdin());

    let nickname = match config.nick.clone() {
        Some(nick) => nick,
        None => loop {
            let mut stdout = io::stdout();
            stdout
                .write_all(b"Enter your nickname (max 24 bytes): ")
                .await?;
            stdout.flush().await?;

            let mut line = String::new();
            if stdin.read_line(&mut line).await? == 0 {
                return Ok(());
            }
            let nick = line.trim().to_string();
            match validate_name(&nick) {
                Ok(()) => break nick,
                Err(e) => eprintln!("Invalid nickname: {}", e),
            }
        },
    };

    let client = ChatClient::connect(&config.server_addr(), &nickname).await?;
    client.run(stdin, io::stdout()).await?;

    Ok(())
}
