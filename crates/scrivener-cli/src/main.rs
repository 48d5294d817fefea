//! Scrivener CLI - chat with your documents from the terminal.

use clap::Parser;
use scrivener_cli::cli::CliFormat;
use scrivener_cli::{build_agent, commands, repl, Cli, CliConfig, Command, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> scrivener_cli::Result<()> {
    let cli = Cli::parse();

    // Load config (an explicit --config path must exist; the default
    // location falls back to built-in defaults)
    let config = match &cli.config {
        Some(path) => CliConfig::load_from(path)?,
        None => CliConfig::load().unwrap_or_default(),
    };

    let format = cli.format.unwrap_or(CliFormat::Text);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None => {
            let agent = build_agent(&config, cli.offline)?;
            repl::run_chat(&agent, &config, &formatter, None)?;
        }
        Some(Command::Chat(args)) => {
            let agent = build_agent(&config, cli.offline)?;
            repl::run_chat(&agent, &config, &formatter, args.file)?;
        }
        Some(Command::Show(args)) => {
            commands::execute_show(args, &formatter)?;
        }
        Some(Command::Ask(args)) => {
            let agent = build_agent(&config, cli.offline)?;
            commands::execute_ask(args, &agent, &formatter)?;
        }
    }

    Ok(())
}
