//! Interactive terminal chat client.
//!
//! Usage: `chat-demo <username> <password> [config-file]`
//!
//! Connects to the server from the config (or `127.0.0.1:50000`), logs
//! in, then bridges the terminal and the session: stdin lines go out as
//! chat messages, inbound traffic is printed as it arrives. EOF (ctrl-D)
//! disconnects.

use std::env;

use parley_client::{ClientConfig, Ranking, Session};
use parley_protocol::{Command, Message};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let username = args.next().unwrap_or_else(|| "guest".to_string());
    let password = args.next().unwrap_or_default();
    let config = match args.next() {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };

    let mut session = Session::new();
    session.connect(&config.host, config.port).await?;
    session.login(&username, &password).await?;
    let mut events = session.listen()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = events.next() => match event {
                Ok(message) => render(&message),
                Err(e) => {
                    eprintln!("connection lost: {e}");
                    break;
                }
            },
            line = lines.next_line() => match line? {
                Some(text) if !text.trim().is_empty() => {
                    session
                        .send_message(Command::ChatMessageFromClient, &[&text])
                        .await?;
                }
                Some(_) => {}
                None => break,
            },
        }
    }

    session.disconnect().await;
    Ok(())
}

fn render(message: &Message) {
    match (message.command(), message.fields()) {
        (Command::ChatMessageFromServer, [sender, text]) => {
            println!("<{sender}> {text}");
        }
        (Command::LoginResult, [outcome]) => {
            println!("* login: {outcome}");
        }
        (Command::RankingEntry, [record]) => match record.parse::<Ranking>() {
            Ok(r) => println!(
                "* #{} {}: {} points, {} wins",
                r.rank, r.username, r.score, r.wins
            ),
            Err(e) => eprintln!("* bad ranking record: {e}"),
        },
        (command, fields) => {
            println!("* [{command}] {fields:?}");
        }
    }
}
