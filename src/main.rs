use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use adpost::error::Result;
use adpost::form::submit::LogSubmitter;
use adpost::terminal::Terminal;
use adpost::{AppConfig, AppState, Runtime, logging};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "adpost")]
#[command(about = "Post a classified ad from the terminal", long_about = None)]
struct Cli {
    /// YAML file with locations, seller name and timings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write logs (default: ./adpost.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the submitted ad as JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "adpost failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let _guard = logging::init(cli.log_file.as_deref(), &config.log_level)?;
    info!(config = ?cli.config, "starting");

    let state = AppState::new(&config, Box::new(LogSubmitter::new()));
    let terminal = Terminal::new()?;
    let mut runtime = Runtime::new(state, terminal);

    let Some(submission) = runtime.run()? else {
        info!("closed without posting");
        return Ok(());
    };

    let json = submission.to_json()?;
    match cli.output {
        Some(path) => {
            fs::write(&path, json)?;
            info!(path = %path.display(), "submission written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
