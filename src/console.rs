// src/console.rs

//! Interactive console: one line in, one session update and one screen out.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::pipeline::{Banner, QuestionPrompt, export_session, open_document, run_ask, run_fetch};
use crate::query::FilterKey;
use crate::render::render_page;
use crate::services::{ScrapeBackend, StatusGate};
use crate::session::Session;

pub const HELP: &str = "\
Commands:
  fetch <keyword>           scrape a keyword and load the results
  search [text]             global search (no text clears it)
  filter <column> [value]   column filter: id, items, department, quantity, start, end
  clear                     clear all filters
  rows <n>                  rows per page
  page <n>                  go to page n
  next | prev               move the page-link window
  show                      redraw the current page
  export [path]             export the filtered rows as CSV
  open <row>                download the document of a row on this page
  ask <question>            ask about the opened document
  status                    show the document processing status
  help                      this text
  quit                      leave";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Fetch(String),
    Search(Option<String>),
    Filter(FilterKey, Option<String>),
    Clear,
    Rows(usize),
    Page(usize),
    Next,
    Prev,
    Show,
    Export(Option<PathBuf>),
    Open(usize),
    Ask(String),
    Status,
    Help,
    Quit,
}

fn parse_number(arg: &str, what: &str) -> Result<usize> {
    arg.trim().parse().map_err(|_| {
        AppError::validation(format!("{} must be a positive number, got '{}'", what, arg))
    })
}

fn optional(arg: &str) -> Option<String> {
    let arg = arg.trim();
    (!arg.is_empty()).then(|| arg.to_string())
}

impl FromStr for ConsoleCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_lowercase().as_str() {
            "fetch" | "scrape" => Ok(ConsoleCommand::Fetch(rest.to_string())),
            "search" => Ok(ConsoleCommand::Search(optional(rest))),
            "filter" => {
                let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if key.is_empty() {
                    return Err(AppError::validation("filter needs a column name"));
                }
                Ok(ConsoleCommand::Filter(key.parse()?, optional(value)))
            }
            "clear" => Ok(ConsoleCommand::Clear),
            "rows" => Ok(ConsoleCommand::Rows(parse_number(rest, "rows")?)),
            "page" => Ok(ConsoleCommand::Page(parse_number(rest, "page")?)),
            "next" => Ok(ConsoleCommand::Next),
            "prev" => Ok(ConsoleCommand::Prev),
            "show" | "" => Ok(ConsoleCommand::Show),
            "export" => Ok(ConsoleCommand::Export(optional(rest).map(PathBuf::from))),
            "open" => Ok(ConsoleCommand::Open(parse_number(rest, "row")?)),
            "ask" => Ok(ConsoleCommand::Ask(rest.to_string())),
            "status" => Ok(ConsoleCommand::Status),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
            other => Err(AppError::validation(format!(
                "unknown command '{}', type 'help'",
                other
            ))),
        }
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

/// Console state bound to one session and one backend.
pub struct Console<'a> {
    config: &'a Config,
    backend: &'a dyn ScrapeBackend,
    session: Session,
    gate: StatusGate,
    prompt: QuestionPrompt,
}

impl<'a> Console<'a> {
    pub fn new(config: &'a Config, backend: &'a dyn ScrapeBackend) -> Self {
        Self {
            config,
            backend,
            session: Session::new(config.view.clone()),
            gate: StatusGate::new(),
            prompt: QuestionPrompt::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn prompt(&self) -> &QuestionPrompt {
        &self.prompt
    }

    /// Parse and run one line. Errors are turned into a banner line.
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => return Flow::Continue(Banner::from_error(&e).to_string()),
        };
        match self.execute(command).await {
            Ok(flow) => flow,
            Err(e) => Flow::Continue(Banner::from_error(&e).to_string()),
        }
    }

    /// The current page as text.
    pub fn screen(&self) -> String {
        render_page(&self.session.view(), self.config.view.cell_width)
    }

    pub async fn execute(&mut self, command: ConsoleCommand) -> Result<Flow> {
        let output = match command {
            ConsoleCommand::Fetch(keyword) => {
                self.prompt.close();
                let result = run_fetch(
                    &mut self.session,
                    self.backend,
                    &keyword,
                    self.config.server.settle_delay(),
                )
                .await;
                let banner = Banner::from_fetch(&result);
                match result {
                    Ok(_) => format!("{}\n{}", banner, self.screen()),
                    Err(_) => banner.to_string(),
                }
            }
            ConsoleCommand::Search(text) => {
                self.session.set_global_search(text.as_deref());
                self.screen()
            }
            ConsoleCommand::Filter(key, value) => {
                self.session.set_filter(key, value.as_deref());
                self.screen()
            }
            ConsoleCommand::Clear => {
                self.session.clear_filters();
                self.screen()
            }
            ConsoleCommand::Rows(rows) => {
                self.session.set_rows_per_page(rows)?;
                self.screen()
            }
            ConsoleCommand::Page(page) => {
                self.session.select_page(page);
                self.screen()
            }
            ConsoleCommand::Next => {
                self.session.next_window();
                self.screen()
            }
            ConsoleCommand::Prev => {
                self.session.prev_window();
                self.screen()
            }
            ConsoleCommand::Show => self.screen(),
            ConsoleCommand::Export(path) => {
                let path = path.unwrap_or_else(|| self.config.export.path.clone());
                let count = export_session(&self.session, &path)?;
                Banner::success(format!("Exported {} rows to {}", count, path.display()))
                    .to_string()
            }
            ConsoleCommand::Open(row) => {
                let view = self.session.view();
                let record = row
                    .checked_sub(1)
                    .and_then(|i| view.rows.get(i))
                    .copied()
                    .ok_or_else(|| {
                        AppError::validation(format!(
                            "row {} is not on this page (1-{})",
                            row,
                            view.rows.len()
                        ))
                    })?;
                let path = open_document(
                    self.backend,
                    record,
                    &self.config.export.download_dir,
                    &mut self.prompt,
                )
                .await?;
                let status = self.gate.poll(self.backend).await.cloned();
                let mut text = Banner::success(format!("Saved {}", path.display())).to_string();
                text.push_str("\nQuestion prompt open. Use 'ask <question>'.");
                if status.is_some_and(|s| !s.is_done()) {
                    text.push('\n');
                    text.push_str(self.gate.notice());
                }
                text
            }
            ConsoleCommand::Ask(question) => {
                if !self.prompt.is_open() {
                    return Err(AppError::validation(
                        "open a document first with 'open <row>'",
                    ));
                }
                let answer = run_ask(self.backend, &mut self.gate, &question).await?;
                format!("Answer: {}", answer)
            }
            ConsoleCommand::Status => {
                self.gate.poll(self.backend).await;
                if self.gate.is_ready() {
                    "Document processed. You can now ask questions.".to_string()
                } else {
                    self.gate.notice().to_string()
                }
            }
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        };
        Ok(Flow::Continue(output))
    }
}
