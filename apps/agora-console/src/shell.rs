//! The interactive prompt.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use tokio::io::{AsyncBufReadExt, BufReader};

use agora_core::ports::Toast;
use agora_shared::ApiResponse;

use crate::commands::{Command, Line};
use crate::error::UiError;
use crate::reply::Reply;
use crate::session::Session;

/// How replies are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    /// The documented request and response envelope for every command.
    Json,
}

enum LoopAction {
    Continue,
    Exit,
}

pub async fn run(mut session: Session, output: Output) -> Result<()> {
    println!("Agora console. Type `help` for a list of commands, `quit` to leave.");

    let mut reader = BufReader::new(tokio::io::stdin());
    loop {
        print!("agora> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            println!();
            break;
        }
        let command = match parse_line(&line) {
            Ok(Parsed::Command(command)) => command,
            Ok(Parsed::Blank) => continue,
            Ok(Parsed::Shown(text)) => {
                println!("{text}");
                continue;
            }
            Err(err) => {
                report_failure(&session, &err, output).await?;
                continue;
            }
        };

        match handle(&mut session, command, output).await? {
            LoopAction::Continue => {}
            LoopAction::Exit => break,
        }
    }

    tracing::info!("Console closed");
    Ok(())
}

#[derive(Debug)]
enum Parsed {
    Blank,
    /// `--help` output, printed as is.
    Shown(String),
    Command(Command),
}

/// Split one prompt line into words and parse it. Unbalanced quotes and
/// clap rejections come back as [`UiError::Usage`].
fn parse_line(line: &str) -> Result<Parsed, UiError> {
    let tokens = shell_words::split(line.trim())
        .map_err(|err| UiError::Usage(format!("Unable to parse command: {err}")))?;
    if tokens.is_empty() {
        return Ok(Parsed::Blank);
    }
    match Line::try_parse_from(tokens) {
        Ok(line) => Ok(Parsed::Command(line.command)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::DisplayVersion => Ok(Parsed::Shown(err.render().to_string())),
            _ => {
                let rendered = err.render().to_string();
                let message = rendered.trim();
                Err(UiError::Usage(
                    message.strip_prefix("error: ").unwrap_or(message).to_string(),
                ))
            }
        },
    }
}

async fn handle(session: &mut Session, command: Command, output: Output) -> Result<LoopAction> {
    let quit = matches!(command, Command::Quit);
    let toasts = session.state().toasts.clone();

    match session.execute(command).await {
        Ok(reply) => {
            print_reply(&reply, output)?;
            if let Some(message) = &reply.toast {
                toasts.push(Toast::success(message.as_str())).await?;
            }
        }
        Err(err) => {
            report_failure(session, &err, output).await?;
            return Ok(LoopAction::Continue);
        }
    }
    flush_toasts(session).await;

    Ok(if quit {
        LoopAction::Exit
    } else {
        LoopAction::Continue
    })
}

/// A failed line gets a destructive toast, and an error envelope in JSON mode.
async fn report_failure(session: &Session, err: &UiError, output: Output) -> Result<()> {
    tracing::warn!(error = %err, code = err.result_code().as_str(), "Command failed");
    session.state().toasts.push(err.toast()).await?;
    if output == Output::Json {
        print_error(err)?;
    }
    flush_toasts(session).await;
    Ok(())
}

async fn flush_toasts(session: &Session) {
    for toast in session.state().toasts.take_pending().await {
        let mark = if toast.is_destructive() { "[!]" } else { "[ok]" };
        println!("{mark} {}", toast.description);
    }
}

fn print_reply(reply: &Reply, output: Output) -> Result<()> {
    match output {
        Output::Text => {
            if !reply.text.is_empty() {
                println!("{}", reply.text);
            }
        }
        Output::Json => println!("{}", serde_json::to_string_pretty(&reply.to_json()?)?),
    }
    Ok(())
}

fn print_error(err: &UiError) -> Result<()> {
    let envelope = ApiResponse::<()>::error(err.result_code(), err.to_string());
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
