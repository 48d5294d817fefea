//! Ask command implementation - one-shot question against a document.

use crate::cli::AskArgs;
use crate::engine::CliAgent;
use crate::error::Result;
use crate::output::Formatter;
use scrivener_agent::SessionContext;

/// Execute the ask command.
pub fn execute_ask(args: AskArgs, agent: &CliAgent, formatter: &Formatter) -> Result<()> {
    let loaded = agent.load(&args.file)?;

    let mut session = SessionContext::new();
    session.select(loaded.document().id);

    let answer = agent.answer(&loaded, &mut session, &args.question)?;

    println!("{}", formatter.format_answer(&args.question, &answer)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliFormat;
    use crate::config::CliConfig;
    use crate::engine::build_agent;
    use std::io::Write;

    #[test]
    fn test_ask_offline_round_trip() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "The mill was built in 1884 beside the river.").unwrap();

        let agent = build_agent(&CliConfig::default(), true).unwrap();
        let formatter = Formatter::new(CliFormat::Text, false);

        let args = AskArgs {
            file: file.path().to_path_buf(),
            question: "When was the mill built?".to_string(),
        };

        assert!(execute_ask(args, &agent, &formatter).is_ok());
    }

    #[test]
    fn test_ask_missing_file_fails() {
        let agent = build_agent(&CliConfig::default(), true).unwrap();
        let formatter = Formatter::new(CliFormat::Text, false);

        let args = AskArgs {
            file: "/nonexistent/notes.txt".into(),
            question: "anything?".to_string(),
        };

        assert!(execute_ask(args, &agent, &formatter).is_err());
    }
}
