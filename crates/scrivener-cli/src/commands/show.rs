//! Show command implementation - extract a document and preview its text.

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use scrivener_extract::FileExtractor;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, formatter: &Formatter) -> Result<()> {
    let extractor = FileExtractor::new();
    let text = extractor.extract_auto(&args.file)?;

    println!(
        "{}",
        formatter.info(&format!(
            "{}: {} characters extracted",
            args.file.display(),
            text.chars().count()
        ))
    );
    println!();
    println!("{}", formatter.format_preview(&text, args.chars));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliFormat;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_show_plain_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "preview me").unwrap();

        let formatter = Formatter::new(CliFormat::Text, false);
        let args = ShowArgs {
            file: file.path().to_path_buf(),
            chars: 100,
        };

        assert!(execute_show(args, &formatter).is_ok());
    }

    #[test]
    fn test_show_unsupported_file() {
        let formatter = Formatter::new(CliFormat::Text, false);
        let args = ShowArgs {
            file: PathBuf::from("/tmp/file.xyz"),
            chars: 100,
        };

        assert!(execute_show(args, &formatter).is_err());
    }
}
