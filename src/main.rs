mod app;
mod db;
mod ui;
mod utils;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use app::App;
use db::{ConnectionManager, OracleConnector, Outcome};
use ui::{render_outcome, TerminalConsole, TerminalPrompt, TextChartRenderer};
use utils::{AppConfig, JsonSettingsStore};

/// Run SQL against Oracle with leading option flags (see `?` for the list).
#[derive(Debug, Parser)]
#[command(name = "sqlcell", version, about)]
struct Cli {
    /// Run a single line invocation, e.g. `-q SELECT * FROM EMPLOYEE`.
    #[arg(short = 'c', long = "command", allow_hyphen_values = true)]
    command: Option<String>,

    /// Run the file as a block; statements are separated by the delimiter.
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Option flags for the block given with --file, e.g. "-d -q".
    #[arg(long = "flags", default_value = "", allow_hyphen_values = true)]
    flags: String,

    /// Where the last successful connection is saved.
    #[arg(long = "settings", env = "SQLCELL_SETTINGS")]
    settings: Option<PathBuf>,

    /// Wall-clock seconds for the -t timer flag.
    #[arg(long = "timer-seconds")]
    timer_seconds: Option<u64>,

    /// Keep passwords out of the OS keyring.
    #[arg(long = "no-keyring")]
    no_keyring: bool,

    /// Log dispatch decisions to stderr.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_app(cli: &Cli) -> Result<App, utils::SettingsError> {
    let mut config = AppConfig::load();
    if let Some(seconds) = cli.timer_seconds {
        config.timer_seconds = seconds;
    }
    if cli.no_keyring {
        config.use_keyring = false;
    }

    let settings_path = match &cli.settings {
        Some(path) => path.clone(),
        None => JsonSettingsStore::default_path()?,
    };
    let connections = ConnectionManager::new(
        Box::new(OracleConnector::new(config.auto_commit)),
        Box::new(JsonSettingsStore::new(settings_path, config.use_keyring)),
        Box::new(TerminalPrompt),
    );

    Ok(App::new(
        config,
        connections,
        Box::new(TerminalConsole),
        Box::new(TextChartRenderer::stdout()),
    ))
}

fn show(outcome: &Outcome) {
    if let Some(text) = render_outcome(outcome) {
        println!("{}", text);
    }
}

/// Read invocations interactively. A line starting with `%%` opens a block
/// (flags follow the `%%`); an empty line runs it.
fn run_repl(app: &mut App) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    println!("sqlcell - type ? for options, ? CONNECT for connection help, exit to quit");

    loop {
        let prompt = if app.session().is_connected() {
            format!("{}> ", app.session().settings.database)
        } else {
            "SQL> ".to_string()
        };
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        };
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        let _ = rl.add_history_entry(line.as_str());

        if let Some(flags) = trimmed.strip_prefix("%%") {
            let mut block = String::new();
            loop {
                match rl.readline("...> ") {
                    Ok(body) if body.trim().is_empty() => break,
                    Ok(body) => {
                        block.push_str(&body);
                        block.push('\n');
                    }
                    Err(ReadlineError::Interrupted) => {
                        block.clear();
                        break;
                    }
                    Err(ReadlineError::Eof) => break,
                    Err(err) => return Err(err),
                }
            }
            if !block.is_empty() {
                show(&app.invoke(flags, Some(block.as_str())));
            }
            continue;
        }

        show(&app.invoke(&line, None));
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut app = match build_app(&cli) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &cli.file {
        let block = match fs::read_to_string(path) {
            Ok(block) => block,
            Err(err) => {
                eprintln!("Error: cannot read {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        };
        show(&app.invoke(&cli.flags, Some(block.as_str())));
        return ExitCode::SUCCESS;
    }

    if let Some(command) = &cli.command {
        show(&app.invoke(command, None));
        return ExitCode::SUCCESS;
    }

    match run_repl(&mut app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
