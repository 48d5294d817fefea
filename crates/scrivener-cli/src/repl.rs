//! Interactive chat mode.
//!
//! Free text is a question against the loaded document; lines starting
//! with ':' are REPL commands. The session context (active document and
//! per-document conversation logs) lives for the duration of the loop.

use crate::config::CliConfig;
use crate::engine::CliAgent;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use scrivener_agent::{LoadedDocument, SessionContext};
use std::fs;
use std::path::PathBuf;

/// A parsed REPL input line.
#[derive(Debug, PartialEq)]
enum ReplInput {
    /// Load (or reload) a document
    Load(PathBuf),
    /// Show the current document's conversation history
    History,
    /// Write the current conversation transcript to a file
    Save(PathBuf),
    /// Show help
    Help,
    /// Leave the REPL
    Exit,
    /// A question for the loaded document
    Question(String),
}

/// Run the interactive chat loop.
pub fn run_chat(
    agent: &CliAgent,
    config: &CliConfig,
    formatter: &Formatter,
    initial: Option<PathBuf>,
) -> Result<()> {
    println!(
        "{}",
        formatter.info("Scrivener chat - ':load <file>' to pick a document, ':help' for commands")
    );
    println!();

    let rl_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(rl_config).map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = SessionContext::new();
    let mut current: Option<LoadedDocument> = None;

    if let Some(path) = initial {
        load_document(agent, formatter, &mut session, &mut current, path);
    }

    loop {
        let prompt = if current.is_some() {
            "scrivener> "
        } else {
            "scrivener (no document)> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_input(line) {
                    Ok(ReplInput::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplInput::Help) => print_help(formatter),
                    Ok(ReplInput::Load(path)) => {
                        load_document(agent, formatter, &mut session, &mut current, path);
                    }
                    Ok(ReplInput::History) => show_history(formatter, &session, &current),
                    Ok(ReplInput::Save(path)) => {
                        save_transcript(formatter, &session, &current, &path);
                    }
                    Ok(ReplInput::Question(question)) => {
                        ask_question(agent, formatter, &mut session, &current, &question);
                    }
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use ':exit' to quit"));
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}", formatter.error(&format!("Input error: {}", e)));
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let _ = editor.save_history(&history_path);

    Ok(())
}

/// Load or reload a document, replacing the current one on success.
///
/// A failed load leaves the previously loaded document (and its
/// conversation) untouched.
fn load_document(
    agent: &CliAgent,
    formatter: &Formatter,
    session: &mut SessionContext,
    current: &mut Option<LoadedDocument>,
    path: PathBuf,
) {
    match agent.reload(&path, current.as_ref()) {
        Ok(Some(loaded)) => {
            session.select(loaded.document().id);
            println!(
                "{}",
                formatter.success(&format!(
                    "Loaded '{}' ({} chunks)",
                    loaded.document().name,
                    loaded.document().chunk_count()
                ))
            );
            *current = Some(loaded);
        }
        Ok(None) => {
            println!("{}", formatter.info("Document unchanged, index kept"));
        }
        Err(e) => {
            eprintln!("{}", formatter.warning(&e.to_string()));
        }
    }
}

/// Answer a question against the current document.
fn ask_question(
    agent: &CliAgent,
    formatter: &Formatter,
    session: &mut SessionContext,
    current: &Option<LoadedDocument>,
    question: &str,
) {
    let Some(loaded) = current else {
        eprintln!("{}", formatter.warning(&CliError::NoDocument.to_string()));
        return;
    };

    match agent.answer(loaded, session, question) {
        Ok(answer) => match formatter.format_answer(question, &answer) {
            Ok(output) => println!("{}", output),
            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
        },
        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
    }
}

/// Print the current document's conversation history.
fn show_history(formatter: &Formatter, session: &SessionContext, current: &Option<LoadedDocument>) {
    let Some(loaded) = current else {
        eprintln!("{}", formatter.warning(&CliError::NoDocument.to_string()));
        return;
    };

    if let Some(log) = session.log(loaded.document().id) {
        match formatter.format_history(log) {
            Ok(output) => println!("{}", output),
            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
        }
    }
}

/// Write the current conversation transcript to a file.
fn save_transcript(
    formatter: &Formatter,
    session: &SessionContext,
    current: &Option<LoadedDocument>,
    path: &PathBuf,
) {
    let Some(loaded) = current else {
        eprintln!("{}", formatter.warning(&CliError::NoDocument.to_string()));
        return;
    };

    let Some(log) = session.log(loaded.document().id) else {
        eprintln!("{}", formatter.warning(&CliError::NoDocument.to_string()));
        return;
    };

    match fs::write(path, formatter.format_transcript(log)) {
        Ok(()) => println!(
            "{}",
            formatter.success(&format!("Transcript written to {}", path.display()))
        ),
        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
    }
}

/// Parse a REPL input line.
fn parse_repl_input(line: &str) -> Result<ReplInput> {
    if !line.starts_with(':') {
        return Ok(ReplInput::Question(line.to_string()));
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("");
    let rest = parts.next().map(str::trim).unwrap_or("");

    match command {
        ":exit" | ":quit" => Ok(ReplInput::Exit),
        ":help" => Ok(ReplInput::Help),
        ":history" => Ok(ReplInput::History),
        ":load" => {
            if rest.is_empty() {
                Err(CliError::InvalidInput("Usage: :load <file>".to_string()))
            } else {
                Ok(ReplInput::Load(PathBuf::from(rest)))
            }
        }
        ":save" => {
            if rest.is_empty() {
                Err(CliError::InvalidInput("Usage: :save <file>".to_string()))
            } else {
                Ok(ReplInput::Save(PathBuf::from(rest)))
            }
        }
        other => Err(CliError::InvalidInput(format!(
            "Unknown command '{}'. Type ':help' for commands.",
            other
        ))),
    }
}

/// Print REPL help.
fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Commands:"));
    println!("  :load <file>   Load a document (.pdf, .docx, .txt, .md)");
    println!("  :history       Show this document's conversation");
    println!("  :save <file>   Write the conversation transcript to a file");
    println!("  :help          Show this help");
    println!("  :exit          Leave chat mode");
    println!();
    println!("Anything else is asked as a question about the loaded document.");
}

/// Path of the persisted readline history.
fn get_history_path() -> Result<PathBuf> {
    Ok(CliConfig::dir()?.join("history"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question() {
        assert_eq!(
            parse_repl_input("what is chapter two about?").unwrap(),
            ReplInput::Question("what is chapter two about?".to_string())
        );
    }

    #[test]
    fn test_parse_exit_and_quit() {
        assert_eq!(parse_repl_input(":exit").unwrap(), ReplInput::Exit);
        assert_eq!(parse_repl_input(":quit").unwrap(), ReplInput::Exit);
    }

    #[test]
    fn test_parse_load() {
        assert_eq!(
            parse_repl_input(":load notes with spaces.pdf").unwrap(),
            ReplInput::Load(PathBuf::from("notes with spaces.pdf"))
        );
    }

    #[test]
    fn test_parse_load_without_path() {
        assert!(parse_repl_input(":load").is_err());
        assert!(parse_repl_input(":load   ").is_err());
    }

    #[test]
    fn test_parse_save() {
        assert_eq!(
            parse_repl_input(":save transcript.txt").unwrap(),
            ReplInput::Save(PathBuf::from("transcript.txt"))
        );
    }

    #[test]
    fn test_parse_history_and_help() {
        assert_eq!(parse_repl_input(":history").unwrap(), ReplInput::History);
        assert_eq!(parse_repl_input(":help").unwrap(), ReplInput::Help);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse_repl_input(":frobnicate").is_err());
    }
}
