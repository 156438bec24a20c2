//! Line-oriented edit surface.
//!
//! Reads one command per line (`brightness 0.2`, `save`, `load 1`, ...),
//! applies it to an [`EditSession`] and reports render results as they
//! arrive. Errors are printed and the session carries on.

use crate::error::{EditorError, StoreError};
use crate::models::Preset;
use crate::services::{EditSession, ImageSink, RenderEvent};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::RecvError;
use tone_pipeline::Parameter;

/// One console command
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Set(Parameter, f32),
    /// Load a new photo; the rest of the line is the path
    Open(PathBuf),
    Show,
    Reset,
    Save,
    Presets,
    /// 1-based position in the `presets` listing
    Load(usize),
    Delete(usize),
    Export,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("'{0}' needs a value")]
    MissingArgument(String),

    #[error("invalid value '{0}'")]
    InvalidValue(String),
}

impl FromStr for EditCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandParseError::Empty)?.to_ascii_lowercase();
        let arg = words.next();

        let index = |arg: Option<&str>| -> Result<usize, CommandParseError> {
            let raw = arg.ok_or_else(|| CommandParseError::MissingArgument(head.clone()))?;
            match raw.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(CommandParseError::InvalidValue(raw.to_string())),
            }
        };

        match head.as_str() {
            "open" => {
                let path = line
                    .trim_start()
                    .split_once(char::is_whitespace)
                    .map(|(_, rest)| rest.trim())
                    .filter(|rest| !rest.is_empty())
                    .ok_or_else(|| CommandParseError::MissingArgument(head.clone()))?;
                Ok(EditCommand::Open(PathBuf::from(path)))
            }
            "show" | "params" => Ok(EditCommand::Show),
            "reset" => Ok(EditCommand::Reset),
            "save" => Ok(EditCommand::Save),
            "presets" | "list" => Ok(EditCommand::Presets),
            "load" | "apply" => Ok(EditCommand::Load(index(arg)?)),
            "delete" | "rm" => Ok(EditCommand::Delete(index(arg)?)),
            "export" => Ok(EditCommand::Export),
            "status" => Ok(EditCommand::Status),
            "help" | "?" => Ok(EditCommand::Help),
            "quit" | "exit" | "q" => Ok(EditCommand::Quit),
            name => {
                let parameter = Parameter::from_str(name)
                    .map_err(|_| CommandParseError::Unknown(name.to_string()))?;
                let raw = arg.ok_or_else(|| CommandParseError::MissingArgument(name.to_string()))?;
                let value = raw
                    .parse::<f32>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| CommandParseError::InvalidValue(raw.to_string()))?;
                Ok(EditCommand::Set(parameter, value))
            }
        }
    }
}

const HELP: &str = "\
commands:
  open <path>     load a photo
  brightness|contrast|shadows|midtones|highlights <value>
  show            current parameters
  reset           default parameters, unload image
  save            save parameters as a preset
  presets         list presets, newest first
  load <n>        apply preset n
  delete <n>      delete preset n
  export          write the displayed image
  status          render state
  quit
";

/// Drive `session` from `input` until EOF or `quit`.
///
/// Render results are reported on `output` as they are published. Before
/// returning, the console waits for pending renders to settle.
pub async fn run_console<R, W>(
    session: &mut EditSession,
    sink: &dyn ImageSink,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut events = session.subscribe();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<EditCommand>() {
                    Ok(EditCommand::Quit) => break,
                    Ok(command) => execute(session, sink, command, &mut output).await?,
                    Err(e) => say(&mut output, &format!("error: {e}")).await?,
                }
            }
            event = events.recv() => match event {
                Ok(event) => report(&event, &mut output).await?,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Console fell behind render events");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    if let Err(e) = session.settled().await {
        say(&mut output, &format!("error: {e}")).await?;
    }
    while let Ok(event) = events.try_recv() {
        report(&event, &mut output).await?;
    }
    output.flush().await
}

async fn execute<W: AsyncWrite + Unpin>(
    session: &mut EditSession,
    sink: &dyn ImageSink,
    command: EditCommand,
    out: &mut W,
) -> std::io::Result<()> {
    match apply(session, sink, command).await {
        Ok(message) => say(out, &message).await,
        Err(e) => say(out, &format!("error: {e}")).await,
    }
}

async fn apply(
    session: &mut EditSession,
    sink: &dyn ImageSink,
    command: EditCommand,
) -> Result<String, EditorError> {
    match command {
        EditCommand::Set(parameter, value) => {
            let stored = session.set_parameter(parameter, value)?;
            Ok(format!(
                "{} = {}",
                parameter.label(),
                parameter.format_value(stored)
            ))
        }
        EditCommand::Open(path) => {
            session.load_image_path(&path).await?;
            Ok(format!("opened {}", path.display()))
        }
        EditCommand::Show => Ok(describe_params(session)),
        EditCommand::Reset => {
            session.reset()?;
            Ok("reset to defaults".to_string())
        }
        EditCommand::Save => {
            let preset = session.save_preset().await?;
            Ok(format!("saved preset: {}", preset.params))
        }
        EditCommand::Presets => {
            let presets = session.list_presets().await?;
            if presets.is_empty() {
                return Ok("no presets saved".to_string());
            }
            Ok(presets
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{:>3}. {}", i + 1, p.summary()))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        EditCommand::Load(n) => {
            let preset = nth_preset(session, n).await?;
            let params = session.apply_preset(&preset).await?;
            Ok(format!("applied preset {n}: {params}"))
        }
        EditCommand::Delete(n) => {
            let preset = nth_preset(session, n).await?;
            session.delete_preset(&preset).await?;
            Ok(format!("deleted preset {n}"))
        }
        EditCommand::Export => {
            session.settled().await?;
            let frame = session.export(sink).await?;
            Ok(format!(
                "exported {}x{} to {}",
                frame.width(),
                frame.height(),
                sink.describe()
            ))
        }
        EditCommand::Status => Ok(format!(
            "image: {}, processing: {} ({:?})",
            if session.has_image() { "loaded" } else { "none" },
            if session.is_processing() { "yes" } else { "no" },
            session.state()
        )),
        EditCommand::Help => Ok(HELP.trim_end().to_string()),
        EditCommand::Quit => Ok(String::new()),
    }
}

async fn nth_preset(session: &EditSession, n: usize) -> Result<Preset, EditorError> {
    let presets = session.list_presets().await?;
    n.checked_sub(1)
        .and_then(|i| presets.into_iter().nth(i))
        .ok_or(EditorError::Store(StoreError::NotFound))
}

fn describe_params(session: &EditSession) -> String {
    let params = session.params();
    Parameter::ALL
        .iter()
        .map(|&p| {
            let range = p.range();
            let bounds = match p.bound_labels() {
                Some((low, high)) => format!("  ({low} .. {high})"),
                None => String::new(),
            };
            format!(
                "{:<11} {:>6}  [{} .. {}]{}",
                p.label(),
                p.format_value(params.get(p)),
                p.format_value(range.min),
                p.format_value(range.max),
                bounds
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

async fn report<W: AsyncWrite + Unpin>(event: &RenderEvent, out: &mut W) -> std::io::Result<()> {
    match event {
        RenderEvent::Rendered(frame) => {
            say(
                out,
                &format!(
                    "rendered {}x{} ({})",
                    frame.width(),
                    frame.height(),
                    frame.params
                ),
            )
            .await
        }
        RenderEvent::Failed { error, .. } => say(out, &format!("error: {error}")).await,
    }
}

async fn say<W: AsyncWrite + Unpin>(out: &mut W, message: &str) -> std::io::Result<()> {
    out.write_all(message.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}
