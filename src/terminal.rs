//! Line-oriented terminal front end
//!
//! Each input line is one UI event. Plain text is a question; slash commands
//! drive the other controls.

use crate::client::{Action, AskClient};
use crate::orchestrator::Orchestrator;
use crate::session::SessionStore;
use crate::state_machine::Controls;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const HELP: &str = "\
Type a question and press enter to ask it.
  /image <path>    attach an image to the next question
  /remove-image    drop the attached image
  /regenerate      explain the last question again
  /simplify        make the last answer simpler
  /status          show which controls are active
  /quit            exit
An empty line submits the attached image on its own.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the question text and submit it
    Ask(String),
    AttachImage(PathBuf),
    RemoveImage,
    Regenerate,
    Simplify,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Ask(trimmed.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "image" if !arg.is_empty() => Command::AttachImage(PathBuf::from(arg)),
            "remove-image" => Command::RemoveImage,
            "regenerate" => Command::Regenerate,
            "simplify" => Command::Simplify,
            "status" => Command::Status,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// One-line summary of the controls
#[must_use]
pub fn describe_controls(controls: &Controls) -> String {
    let on_off = |b: bool| if b { "on" } else { "off" };
    format!(
        "submit: {}, regenerate/simplify: {}, loading: {}",
        on_off(controls.submit_enabled),
        on_off(controls.secondary_enabled),
        on_off(controls.loading),
    )
}

/// Read commands until `/quit` or end of input
///
/// # Errors
///
/// Only I/O errors on `input` or `out` end the loop; backend failures are
/// shown and the loop continues.
pub async fn run<C, S, R, W>(form: &mut Orchestrator<C, S>, input: R, mut out: W) -> std::io::Result<()>
where
    C: AskClient,
    S: SessionStore,
    R: tokio::io::AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    out.write_all(format!("{HELP}\n").as_bytes()).await?;

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => out.write_all(format!("{HELP}\n").as_bytes()).await?,
            Command::Status => {
                let status = describe_controls(&form.controls());
                out.write_all(format!("{status}\n").as_bytes()).await?;
            }
            Command::Unknown(raw) => {
                out.write_all(format!("Unknown command: {raw}\n").as_bytes()).await?;
            }
            Command::AttachImage(path) => {
                if form.attach_image(&path).await {
                    if let Some(image) = &form.input().image {
                        let note = format!(
                            "Attached {} ({}, {} bytes)\n",
                            image.file_name,
                            image.media_type,
                            image.len()
                        );
                        out.write_all(note.as_bytes()).await?;
                    }
                } else {
                    show_surface(form, &mut out).await?;
                }
            }
            Command::RemoveImage => {
                form.remove_image();
                out.write_all(b"Image removed\n").await?;
            }
            Command::Ask(text) => {
                form.set_text(text);
                submit(form, Action::Ask, &mut out).await?;
            }
            Command::Regenerate => submit(form, Action::Regenerate, &mut out).await?,
            Command::Simplify => submit(form, Action::Simplify, &mut out).await?,
        }
        out.flush().await?;
    }

    Ok(())
}

async fn submit<C, S, W>(form: &mut Orchestrator<C, S>, action: Action, out: &mut W) -> std::io::Result<()>
where
    C: AskClient,
    S: SessionStore,
    W: AsyncWrite + Unpin,
{
    if !form.controls().allows(action) {
        let note = format!("{action} is not available yet\n");
        return out.write_all(note.as_bytes()).await;
    }

    if form.would_dispatch(action) {
        out.write_all(b"Thinking...\n").await?;
        out.flush().await?;
    }
    form.submit(action).await;
    show_surface(form, out).await
}

async fn show_surface<C, S, W>(form: &Orchestrator<C, S>, out: &mut W) -> std::io::Result<()>
where
    C: AskClient,
    S: SessionStore,
    W: AsyncWrite + Unpin,
{
    let surface = form.surface();
    if let Some(error) = &surface.error {
        out.write_all(format!("[error] {error}\n").as_bytes()).await?;
    }
    if let Some(answer) = &surface.answer {
        out.write_all(format!("{answer}\n").as_bytes()).await?;
    }
    Ok(())
}
