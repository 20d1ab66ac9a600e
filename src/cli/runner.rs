//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::shell::Shell;
use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use crate::export::{write_records_to_csv, CsvWriterConfig};
use crate::http::HttpClient;
use crate::ledger::{LedgerClient, PageSource};
use crate::pagination::Session;
use crate::render::rejection_message;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

/// Outcome of a non-interactive export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Pages fetched
    pub pages: usize,
    /// Transactions written
    pub rows: usize,
    /// Whether the history continues past the last fetched page
    pub truncated: bool,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = Settings::load(self.cli.config.as_deref(), &self.cli.overrides())?;
        debug!(endpoint = %settings.endpoint, page_size = %settings.page_size, "Settings loaded");

        let http = HttpClient::with_config(settings.http_client_config())?;
        let client = LedgerClient::new(http, settings.endpoint.clone());
        let session = Session::new(client, settings.page_size);
        let csv = settings.export.writer_config()?;

        match &self.cli.command {
            None => {
                Shell::new(session, settings.export.path())
                    .with_csv_config(csv)
                    .run(None)
                    .await
            }
            Some(Commands::Shell { address }) => {
                Shell::new(session, settings.export.path())
                    .with_csv_config(csv)
                    .run(address.clone())
                    .await
            }
            Some(Commands::Export {
                address,
                pages,
                output,
            }) => {
                let path = output.clone().unwrap_or_else(|| settings.export.path());
                let started = Instant::now();
                let summary = export_history(session, address, *pages, &path, &csv).await?;

                if summary.rows == 0 {
                    println!("No transactions found for {address}");
                } else {
                    println!(
                        "Wrote {} transactions from {} pages to {}",
                        summary.rows,
                        summary.pages,
                        path.display()
                    );
                }
                if summary.truncated {
                    println!("Stopped at the page limit; more history is available");
                }
                info!(elapsed_ms = started.elapsed().as_millis() as u64, "Export finished");
                Ok(())
            }
        }
    }
}

/// Fetch up to `max_pages` pages of an account's history and write them to `path`
/// using the `csv` layout
///
/// Nothing is written when the account has no transactions. A rejected
/// query is returned as an error carrying the user-facing message.
pub async fn export_history<S: PageSource>(
    mut session: Session<S>,
    address: &str,
    max_pages: Option<usize>,
    path: &Path,
    csv: &CsvWriterConfig,
) -> Result<ExportSummary> {
    if max_pages == Some(0) {
        return Err(Error::invalid_value("pages", "must be at least 1"));
    }

    session.set_address(address);
    let page = session.search().await?;
    if page.is_error() {
        return Err(Error::Other(rejection_message(page)));
    }

    let limit = max_pages.unwrap_or(usize::MAX);
    while session.cache().len() < limit && session.controls().next {
        session.next().await?;
        if let Some(page) = session.current_page().filter(|page| page.is_error()) {
            return Err(Error::Other(rejection_message(page)));
        }
    }

    let pages = session.cache().len();
    let truncated = session.controls().next;
    let prepared = session.prepare_export()?;
    if prepared == 0 {
        return Ok(ExportSummary {
            pages,
            rows: 0,
            truncated,
        });
    }

    let rows = write_records_to_csv(path, session.download_ready()?.records(), Some(csv))
        .with_context(|| format!("Export of {address} failed"))?;

    Ok(ExportSummary {
        pages,
        rows,
        truncated,
    })
}
