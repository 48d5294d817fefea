//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use scrivener_domain::ConversationLog;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a question/answer pair.
    pub fn format_answer(&self, question: &str, answer: &str) -> Result<String> {
        match self.format {
            CliFormat::Json => {
                let value = serde_json::json!({
                    "question": question,
                    "answer": answer,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            CliFormat::Text => Ok(answer.to_string()),
        }
    }

    /// Format a document's conversation history.
    pub fn format_history(&self, log: &ConversationLog) -> Result<String> {
        match self.format {
            CliFormat::Json => self.format_history_json(log),
            CliFormat::Text => Ok(self.format_history_table(log)),
        }
    }

    /// Format history as JSON.
    fn format_history_json(&self, log: &ConversationLog) -> Result<String> {
        let turns: Vec<serde_json::Value> = log
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.role.to_string(),
                    "message": turn.message,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&turns)?)
    }

    /// Format history as a table.
    fn format_history_table(&self, log: &ConversationLog) -> String {
        if log.is_empty() {
            return self.colorize("No conversation yet.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Role", "Message"]);

        for (i, turn) in log.iter().enumerate() {
            builder.push_record([
                &(i + 1).to_string(),
                &turn.role.to_string(),
                &turn.message,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Render a conversation as a plain transcript (for `:save`).
    pub fn format_transcript(&self, log: &ConversationLog) -> String {
        let mut out = String::new();
        for turn in log.iter() {
            out.push_str(&format!("{}: {}\n", turn.role, turn.message));
        }
        out
    }

    /// Format a document text preview, bounded to `chars` characters.
    pub fn format_preview(&self, text: &str, chars: usize) -> String {
        let total = text.chars().count();
        let preview: String = text.chars().take(chars).collect();

        if total > chars {
            format!("{}\n... ({} of {} characters shown)", preview, chars, total)
        } else {
            preview
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
