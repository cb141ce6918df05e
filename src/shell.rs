//! Interactive front end for a conversion session.
//!
//! Plain lines are converted; lines starting with '.' are meta-commands.

use chrono::{Local, TimeZone};
use rustyline::error::ReadlineError;

use crate::plugins::history::HistoryEntryPreview;
use crate::services::clipboard::ClipboardPort;
use crate::services::session::Session;

const PROMPT: &str = "json-prompt> ";

const HELP_TEXT: &str = "\
Type text and press Enter to convert it to a JSON prompt.

Meta-commands:
  .help          Show this help
  .history       List recent conversions (newest first)
  .show <n>      Print the input and JSON of history entry n
  .copy [n]      Copy the current output, or history entry n, to the clipboard
  .clear         Clear the conversion history
  .reset         Clear the current input/output
  .status        Show the state of the last conversion
  .health        Check that the conversion service is reachable
  .config        Show the active configuration
  .exit, .quit   Leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Help,
    History,
    Show(usize),
    Copy(Option<usize>),
    Clear,
    Reset,
    Status,
    Health,
    Config,
    Exit,
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Empty,
    Meta(MetaCommand),
    Convert(String),
}

/// Parse a 1-based entry number as typed by the user into a 0-based index.
fn parse_entry_number(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Invalid entry number: {}", raw)),
    }
}

fn parse_meta(line: &str) -> MetaCommand {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let arg = parts.next();
    if parts.next().is_some() {
        return MetaCommand::Invalid(format!("Too many arguments for {}", command));
    }

    match (command, arg) {
        (".help", None) => MetaCommand::Help,
        (".history", None) => MetaCommand::History,
        (".show", Some(n)) => match parse_entry_number(n) {
            Ok(index) => MetaCommand::Show(index),
            Err(err) => MetaCommand::Invalid(err),
        },
        (".show", None) => MetaCommand::Invalid("Usage: .show <n>".to_string()),
        (".copy", None) => MetaCommand::Copy(None),
        (".copy", Some(n)) => match parse_entry_number(n) {
            Ok(index) => MetaCommand::Copy(Some(index)),
            Err(err) => MetaCommand::Invalid(err),
        },
        (".clear", None) => MetaCommand::Clear,
        (".reset", None) => MetaCommand::Reset,
        (".status", None) => MetaCommand::Status,
        (".health", None) => MetaCommand::Health,
        (".config", None) => MetaCommand::Config,
        (".exit" | ".quit", None) => MetaCommand::Exit,
        _ => MetaCommand::Invalid(format!("Unknown command: {} (try .help)", line.trim())),
    }
}

pub fn parse_input(line: &str) -> ShellInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellInput::Empty;
    }
    if trimmed.starts_with('.') {
        return ShellInput::Meta(parse_meta(trimmed));
    }
    ShellInput::Convert(trimmed.to_string())
}

/// `index` is 0-based; shown to the user as its 1-based entry number.
fn missing_entry_message(index: usize) -> String {
    format!("No history entry #{}", index.saturating_add(1))
}

pub(crate) fn format_timestamp(created_at_ms: u64) -> String {
    match Local.timestamp_millis_opt(created_at_ms as i64).single() {
        Some(time) => time.format("%b %-d, %H:%M").to_string(),
        None => "-".to_string(),
    }
}

pub fn format_history(previews: &[HistoryEntryPreview], capacity: usize) -> String {
    if previews.is_empty() {
        return "No conversion history. Convert some text to see it here.".to_string();
    }
    let mut out = format!(
        "Your latest {} text-to-JSON conversions (keeping {}):\n",
        previews.len(),
        capacity
    );
    for (i, entry) in previews.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. [{}] {}\n",
            i + 1,
            format_timestamp(entry.created_at_ms),
            entry.preview
        ));
    }
    out.pop();
    out
}

enum Flow {
    Continue,
    Exit,
}

pub struct Shell<C: ClipboardPort> {
    session: Session<C>,
    editor: rustyline::DefaultEditor,
}

impl<C: ClipboardPort> Shell<C> {
    pub fn new(session: Session<C>) -> Result<Self, String> {
        let editor = rustyline::DefaultEditor::new()
            .map_err(|e| format!("Failed to initialize line editor: {e}"))?;
        Ok(Self { session, editor })
    }

    pub async fn run(&mut self) -> Result<(), String> {
        println!("JSON prompt converter. Type .help for commands.");
        loop {
            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(format!("Failed to read input: {err}")),
            };

            let input = parse_input(&line);
            if !matches!(input, ShellInput::Empty) {
                let _ = self.editor.add_history_entry(line.as_str());
            }

            if let Flow::Exit = self.handle(input).await {
                break;
            }
        }
        Ok(())
    }

    async fn handle(&mut self, input: ShellInput) -> Flow {
        match input {
            ShellInput::Empty => {}
            ShellInput::Convert(text) => {
                println!("Converting...");
                match self.session.convert(&text).await {
                    Ok(result) => println!("{}", result.output_json),
                    Err(err) => eprintln!("{}", err.user_message()),
                }
            }
            ShellInput::Meta(command) => return self.handle_meta(command).await,
        }
        Flow::Continue
    }

    async fn handle_meta(&mut self, command: MetaCommand) -> Flow {
        match command {
            MetaCommand::Help => println!("{HELP_TEXT}"),
            MetaCommand::History => {
                let capacity = self.session.history_capacity();
                println!("{}", format_history(&self.session.history_previews(), capacity));
            }
            MetaCommand::Show(index) => {
                let history = self.session.history();
                match history.get(index) {
                    Some(entry) => {
                        println!("[{}] {}", format_timestamp(entry.created_at_ms), entry.id);
                        println!("Input text:\n{}", entry.input_text);
                        println!("Generated JSON:\n{}", entry.output_json);
                    }
                    None => eprintln!("{}", missing_entry_message(index)),
                }
            }
            MetaCommand::Copy(index) => {
                let copied = match index {
                    Some(index) => self.session.copy_nth(index),
                    None => self.session.copy_current(),
                };
                match copied {
                    Ok(()) => println!("Copied!"),
                    Err(err) => eprintln!("Failed to copy: {err}"),
                }
            }
            MetaCommand::Clear => {
                self.session.clear_history();
                println!("History cleared.");
            }
            MetaCommand::Reset => {
                self.session.clear_current();
                println!("Output cleared.");
            }
            MetaCommand::Status => println!("Last conversion: {:?}", self.session.status()),
            MetaCommand::Health => match self.session.health_check().await {
                Ok(health) => println!("Service is up ({}): {}", health.status, health.message),
                Err(err) => eprintln!("Service check failed: {}", err.user_message()),
            },
            MetaCommand::Config => {
                let public = self.session.config().public();
                match serde_json::to_string_pretty(&public) {
                    Ok(text) => println!("{text}"),
                    Err(err) => eprintln!("Failed to render config: {err}"),
                }
            }
            MetaCommand::Exit => return Flow::Exit,
            MetaCommand::Invalid(message) => eprintln!("{message}"),
        }
        Flow::Continue
    }
}
