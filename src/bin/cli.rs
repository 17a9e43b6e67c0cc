//! bidview CLI
//!
//! Scrape bids through the backend and browse them from the terminal.

use std::path::{Path, PathBuf};

use bidview::{
    console::{Console, Flow},
    error::{AppError, Result},
    models::{Config, DataResponse, Record},
    pipeline::{self, Banner},
    query::FilterKey,
    render::render_page,
    services::{HttpBackend, ScrapeBackend, wait_until_done},
    session::Session,
};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// bidview - Bid listing viewer
#[derive(Parser, Debug)]
#[command(
    name = "bidview",
    version,
    about = "Search, filter and export scraped bid listings"
)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, default_value = "bidview.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a keyword and print the first page
    Scrape {
        keyword: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show a saved /data response
    View {
        /// JSON file with `{"data": [...]}` or a bare array of rows
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Interactive console reading commands from stdin
    Browse {
        /// Keyword to fetch on start
        keyword: Option<String>,
    },

    /// Ask a question about the processed document
    Ask {
        question: String,

        /// Fail right away instead of waiting for processing to finish
        #[arg(long)]
        no_wait: bool,
    },

    /// Show the document processing status
    Status {
        /// Keep polling until processing is done
        #[arg(long)]
        watch: bool,
    },

    /// Validate the configuration file
    Validate,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Global search over every column
    #[arg(long)]
    search: Option<String>,

    /// Bid number contains
    #[arg(long)]
    id: Option<String>,

    /// Items contain any of these words
    #[arg(long)]
    items: Option<String>,

    /// Department contains
    #[arg(long)]
    department: Option<String>,

    /// Quantity condition, e.g. ">=10"
    #[arg(long, allow_hyphen_values = true)]
    quantity: Option<String>,

    /// Start date lower bound
    #[arg(long)]
    start: Option<String>,

    /// End date upper bound
    #[arg(long)]
    end: Option<String>,

    /// Rows per page
    #[arg(long)]
    rows: Option<usize>,

    /// Page to show
    #[arg(long)]
    page: Option<usize>,

    /// Export the filtered rows to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,
}

impl ViewArgs {
    fn apply(&self, session: &mut Session) -> Result<()> {
        if let Some(search) = &self.search {
            session.set_global_search(Some(search));
        }
        let filters = [
            (FilterKey::Id, &self.id),
            (FilterKey::Items, &self.items),
            (FilterKey::Department, &self.department),
            (FilterKey::Quantity, &self.quantity),
            (FilterKey::StartDate, &self.start),
            (FilterKey::EndDate, &self.end),
        ];
        for (key, value) in filters {
            if let Some(value) = value {
                session.set_filter(key, Some(value));
            }
        }
        if let Some(rows) = self.rows {
            session.set_rows_per_page(rows)?;
        }
        if let Some(page) = self.page {
            session.select_page(page);
        }
        Ok(())
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Read a saved data file: either the `/data` envelope or a bare row array.
fn read_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Vec<Record>>(&content) {
        Ok(records) => Ok(records),
        Err(_) => serde_json::from_str::<DataResponse>(&content)?.into_records(),
    }
}

/// Apply view flags, print the page and run the optional export.
fn show(config: &Config, session: &mut Session, view: &ViewArgs) -> Result<()> {
    view.apply(session)?;
    print!("{}", render_page(&session.view(), config.view.cell_width));

    if let Some(path) = &view.export {
        match pipeline::export_session(session, path) {
            Ok(count) => println!(
                "{}",
                Banner::success(format!("Exported {} rows to {}", count, path.display()))
            ),
            Err(e) => println!("{}", Banner::from_error(&e)),
        }
    }
    Ok(())
}

async fn browse(
    config: &Config,
    backend: &dyn ScrapeBackend,
    keyword: Option<String>,
) -> Result<()> {
    let mut console = Console::new(config, backend);
    let mut stdout = tokio::io::stdout();

    let mut flow = match keyword {
        Some(keyword) => console.handle_line(&format!("fetch {}", keyword)).await,
        None => Flow::Continue(bidview::console::HELP.to_string()),
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match flow {
            Flow::Continue(text) => {
                stdout.write_all(text.as_bytes()).await?;
                if !text.ends_with('\n') {
                    stdout.write_all(b"\n").await?;
                }
                stdout.write_all(b"> ").await?;
                stdout.flush().await?;
            }
            Flow::Quit => break,
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        flow = console.handle_line(&line).await;
    }

    log::info!("Leaving console");
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Scrape { keyword, view } => {
            let backend = HttpBackend::new(&config.server)?;
            let mut session = Session::new(config.view.clone());
            let result = pipeline::run_fetch(
                &mut session,
                &backend,
                &keyword,
                config.server.settle_delay(),
            )
            .await;
            println!("{}", Banner::from_fetch(&result));
            result?;
            show(&config, &mut session, &view)?;
        }

        Command::View { file, view } => {
            let records = read_records(&file)?;
            log::info!("Loaded {} rows from {}", records.len(), file.display());
            let mut session = Session::new(config.view.clone());
            session.load(records);
            show(&config, &mut session, &view)?;
        }

        Command::Browse { keyword } => {
            let backend = HttpBackend::new(&config.server)?;
            browse(&config, &backend, keyword).await?;
        }

        Command::Ask { question, no_wait } => {
            if question.trim().is_empty() {
                return Err(AppError::validation("No question provided."));
            }
            let backend = HttpBackend::new(&config.server)?;
            let max_polls = no_wait.then_some(1);
            if !wait_until_done(&backend, config.status.poll_interval(), max_polls).await? {
                return Err(AppError::NotReady);
            }
            let answer = backend.ask_question(question.trim()).await?;
            println!("Answer: {}", answer);
        }

        Command::Status { watch } => {
            let backend = HttpBackend::new(&config.server)?;
            if watch {
                wait_until_done(&backend, config.status.poll_interval(), None).await?;
                println!("Document processed. You can now ask questions.");
            } else {
                let status = backend.processing_status().await?;
                if status.is_done() {
                    println!("Document processed. You can now ask questions.");
                } else {
                    println!("{}", AppError::NotReady);
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({})", cli.config.display());
        }
    }

    Ok(())
}
