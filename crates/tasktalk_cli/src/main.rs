//! Terminal chat front end.
//!
//! # Responsibility
//! - Wire config, logging and file storage into a `ChatSession`.
//! - Render the transcript on stdout and feed it one stdin line at a time.

use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tasktalk_core::{
    init_logging, AppConfig, Assistant, ChatSession, FileTaskRepository, LogLevel, Render, Sender,
    SessionState,
};

const DIVIDER: &str = "____________________________________________________________";

#[derive(Debug, Parser)]
#[command(name = "tasktalk", version, about = "Chat-style task tracker")]
struct Args {
    /// Task store path (overrides TASKTALK_DATA_FILE).
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,
    /// trace|debug|info|warn|error (overrides TASKTALK_LOG_LEVEL).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (overrides TASKTALK_LOG_DIR).
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// Name the assistant introduces itself with.
    #[arg(long)]
    name: Option<String>,
}

struct TerminalView<W: Write> {
    out: W,
    echo_user: bool,
}

impl<W: Write> TerminalView<W> {
    fn write_message(&mut self, text: &str, sender: Sender) -> io::Result<()> {
        match sender {
            Sender::User if self.echo_user => writeln!(self.out, "> {text}")?,
            Sender::User => {}
            Sender::Assistant => {
                let mut block = String::new();
                block.push_str(DIVIDER);
                block.push('\n');
                for line in text.lines() {
                    block.push_str("  ");
                    block.push_str(line);
                    block.push('\n');
                }
                block.push_str(DIVIDER);
                writeln!(self.out, "{block}")?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> Render for TerminalView<W> {
    fn render(&mut self, text: &str, sender: Sender) {
        if let Err(err) = self.write_message(text, sender) {
            log::warn!("event=render module=cli status=error error={err}");
        }
    }
}

fn resolve_config(args: Args) -> Result<AppConfig, String> {
    let mut config = AppConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(data_file) = args.data_file {
        config.data_file = data_file;
    }
    if let Some(level) = args.log_level {
        config.log_level = LogLevel::parse(&level).map_err(|err| err.to_string())?;
    }
    if let Some(log_dir) = args.log_dir {
        config.log_dir = Some(log_dir);
    }
    if let Some(name) = args.name {
        config.assistant_name = name;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let config = match resolve_config(Args::parse()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("tasktalk: {err}");
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("tasktalk: {err}");
            return ExitCode::from(2);
        }
    }

    let assistant = Assistant::start(
        FileTaskRepository::new(&config.data_file),
        config.assistant_name.as_str(),
    );
    let view = TerminalView {
        out: io::stdout(),
        echo_user: !io::stdin().is_terminal(),
    };
    let mut session = ChatSession::open(assistant, view);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("event=stdin_read module=cli status=error error={err}");
                eprintln!("tasktalk: failed to read input: {err}");
                return ExitCode::FAILURE;
            }
        };
        if session.submit(&line) == SessionState::Terminated {
            break;
        }
    }

    ExitCode::SUCCESS
}
