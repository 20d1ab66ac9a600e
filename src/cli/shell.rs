//! Interactive shell
//!
//! Reads one command per line and applies it to the session. Each command
//! runs to completion, including its request, before the next line is read.

use crate::error::Result;
use crate::export::{write_records_to_csv, CsvWriterConfig};
use crate::ledger::PageSource;
use crate::pagination::Session;
use crate::render::render_session;
use crate::types::{OptionStringExt, PageSize, EXAMPLE_ACCOUNT};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

const PROMPT: &str = "xrpl> ";

const HELP: &str = "\
Commands:
  search [address]   search an account (uses the address input if omitted)
  address <text>     set the address input without searching
  clear              clear the address input
  next | n           next page
  prev | p           previous page
  size <n>           page size for the next search (10, 50, 100, 150, 200)
  prepare            collect all fetched transactions for export
  download [path]    write the prepared transactions to CSV
  show               redraw the current page
  status             show the session state
  help               show this help
  quit               leave";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(Option<String>),
    Address(String),
    Clear,
    Next,
    Previous,
    Size(PageSize),
    Prepare,
    Download(Option<PathBuf>),
    Show,
    Status,
    Help,
    Quit,
}

/// Parse one input line; `Ok(None)` for a blank line
pub fn parse_command(line: &str) -> std::result::Result<Option<ShellCommand>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = rest.to_string().none_if_empty();

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "search" | "s" => ShellCommand::Search(arg),
        "address" | "a" => ShellCommand::Address(rest.to_string()),
        "clear" => ShellCommand::Clear,
        "next" | "n" => ShellCommand::Next,
        "prev" | "previous" | "p" => ShellCommand::Previous,
        "size" => {
            let value = arg.ok_or_else(|| format!("usage: size <{}>", PageSize::allowed_values()))?;
            ShellCommand::Size(value.parse()?)
        }
        "prepare" => ShellCommand::Prepare,
        "download" => ShellCommand::Download(arg.map(PathBuf::from)),
        "show" => ShellCommand::Show,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(Some(command))
}

/// Run a blocking terminal read without stalling the runtime's other tasks
pub(super) fn read_blocking<T>(read: impl FnOnce() -> T) -> T {
    tokio::task::block_in_place(read)
}

/// Interactive front end over a session
pub struct Shell<S> {
    session: Session<S>,
    export_path: PathBuf,
    csv: CsvWriterConfig,
}

impl<S: PageSource> Shell<S> {
    /// Create a shell; downloads go to `export_path` unless a path is given
    pub fn new(session: Session<S>, export_path: PathBuf) -> Self {
        Self {
            session,
            export_path,
            csv: CsvWriterConfig::default(),
        }
    }

    /// Use `csv` for downloads instead of the default comma-separated layout
    #[must_use]
    pub fn with_csv_config(mut self, csv: CsvWriterConfig) -> Self {
        self.csv = csv;
        self
    }

    /// The session being driven
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Read and execute commands until quit or end of input
    ///
    /// Must be called from a multi-threaded runtime.
    pub async fn run(&mut self, initial_address: Option<String>) -> Result<()> {
        let mut editor = DefaultEditor::new()?;

        println!("XRP Ledger account history");
        println!("Example account: {EXAMPLE_ACCOUNT}");
        println!("Type 'help' for commands.");

        if let Some(address) = initial_address {
            let output = self.execute(ShellCommand::Search(Some(address))).await;
            self.print_outcome(output);
        }

        loop {
            let line = match read_blocking(|| editor.readline(PROMPT)) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            if !line.trim().is_empty() {
                let _ = editor.add_history_entry(line.as_str());
            }

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    println!("{message}");
                    continue;
                }
            };

            debug!(command = ?command, "Executing shell command");
            if command == ShellCommand::Quit {
                break;
            }
            let output = self.execute(command).await;
            self.print_outcome(output);
        }

        Ok(())
    }

    fn print_outcome(&self, output: Result<String>) {
        match output {
            Ok(text) => println!("{text}"),
            // The failure is part of the rendered session state
            Err(e) if e.is_transport() => println!("{}", render_session(&self.session)),
            Err(e) => println!("{e}"),
        }
    }

    /// Apply one command and return the text to print
    pub async fn execute(&mut self, command: ShellCommand) -> Result<String> {
        match command {
            ShellCommand::Search(address) => {
                if let Some(address) = address {
                    self.session.set_address(address);
                }
                self.session.search().await?;
                Ok(render_session(&self.session))
            }
            ShellCommand::Address(address) => {
                self.session.set_address(address);
                Ok(format!("Address set to '{}'", self.session.address_input()))
            }
            ShellCommand::Clear => {
                self.session.clear_address();
                Ok("Address cleared".to_string())
            }
            ShellCommand::Next => {
                self.session.next().await?;
                Ok(render_session(&self.session))
            }
            ShellCommand::Previous => {
                self.session.previous()?;
                Ok(render_session(&self.session))
            }
            ShellCommand::Size(size) => {
                self.session.set_page_size(size);
                Ok(format!("Page size set to {size} for the next search"))
            }
            ShellCommand::Prepare => {
                let count = self.session.prepare_export()?;
                Ok(format!("Prepared {count} transactions for download"))
            }
            ShellCommand::Download(path) => {
                let path = path.unwrap_or_else(|| self.export_path.clone());
                let buffer = self.session.download_ready()?;
                let rows = write_records_to_csv(&path, buffer.records(), Some(&self.csv))?;
                Ok(format!("Wrote {rows} transactions to {}", path.display()))
            }
            ShellCommand::Show => Ok(render_session(&self.session)),
            ShellCommand::Status => Ok(self.status()),
            ShellCommand::Help => Ok(HELP.to_string()),
            ShellCommand::Quit => Ok("Bye".to_string()),
        }
    }

    fn status(&self) -> String {
        let cache = self.session.cache();
        let mut lines = vec![
            format!("Address input:  '{}'", self.session.address_input()),
            format!("Page size:      {}", self.session.page_size()),
            format!(
                "Last searched:  {}",
                cache.last_searched().unwrap_or("(none)")
            ),
            format!(
                "Pages fetched:  {} ({} transactions)",
                cache.len(),
                cache.total_transactions()
            ),
            format!("Prepared:       {} transactions", self.session.export_buffer().len()),
        ];
        if let Some(failure) = self.session.failure() {
            lines.push(format!("Last failure:   {failure}"));
        }
        lines.join("\n")
    }
}
