//! # Interactive Shell
//!
//! The command loop: read a command word, run its flow, go back to waiting.
//!
//! Every field a flow collects goes through [`Prompter::ask`] with a typed parser, so
//! a flow never moves past a field until it is valid and never writes a value that
//! failed validation. Input errors re-prompt; anything else aborts the current command,
//! is reported, and the loop carries on with the store still open.
//!
//! `exit` and end of input both return from [`Shell::run`]. Closing the store is left
//! to whoever owns the shell, which gets it back through [`Shell::into_api`].

use crate::api::{BookChange, BookField, CmdResult, KeeperApi, MessageLevel};
use crate::config::KeeperConfig;
use crate::error::{KeeperError, Result};
use crate::index::DisplayIndex;
use crate::model::{
    parse_date_input, parse_required_text, validate_state, BookEntry, BookState, DateInput,
};
use crate::prompt::Prompter;
use crate::render::render_books;
use crate::store::BookStore;
use chrono::NaiveDate;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::str::FromStr;

const HELP: &str = "Available commands:
list, show: list books in the database
add: adds a book to the database
delete: removes a book from the database
update: changes one property of a book
help: shows this message
exit: exits from the program";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Add,
    List,
    Delete,
    Update,
    Help,
    Exit,
}

impl FromStr for ShellCommand {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(ShellCommand::Add),
            "list" | "show" => Ok(ShellCommand::List),
            "delete" => Ok(ShellCommand::Delete),
            "update" => Ok(ShellCommand::Update),
            "help" => Ok(ShellCommand::Help),
            "exit" => Ok(ShellCommand::Exit),
            other => Err(KeeperError::InvalidInput(format!(
                "{} is not a valid command",
                other
            ))),
        }
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub struct Shell<S: BookStore, R, W> {
    api: KeeperApi<S>,
    prompter: Prompter<R, W>,
    config: KeeperConfig,
    today: fn() -> NaiveDate,
}

impl<S: BookStore, R: BufRead, W: Write> Shell<S, R, W> {
    pub fn new(api: KeeperApi<S>, input: R, output: W, config: KeeperConfig) -> Self {
        Self {
            api,
            prompter: Prompter::new(input, output),
            config,
            today: local_today,
        }
    }

    /// Overrides what "today" means for empty date input.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn into_api(self) -> KeeperApi<S> {
        self.api
    }

    /// Runs until `exit` or end of input. Only terminal I/O failures are returned.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let line = match self.prompter.read_line("> ") {
                Ok(Some(line)) => line,
                Ok(None) => {
                    writeln!(self.prompter.output())?;
                    return Ok(());
                }
                Err(e) if e.is_input_error() => {
                    self.prompter.report_retry(&e)?;
                    continue;
                }
                Err(e) => return Err(e),
            };
            let token = line.trim();
            if token.is_empty() {
                continue;
            }

            let command = match token.parse::<ShellCommand>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.prompter.output(), "{}", e)?;
                    continue;
                }
            };

            let outcome = match command {
                ShellCommand::Exit => return Ok(()),
                ShellCommand::Help => {
                    writeln!(self.prompter.output(), "{}", HELP)?;
                    continue;
                }
                ShellCommand::Add => self.handle_add(),
                ShellCommand::List => self.handle_list(),
                ShellCommand::Delete => self.handle_delete(),
                ShellCommand::Update => self.handle_update(),
            };

            match outcome {
                Ok(Some(result)) => self.print_messages(&result)?,
                // Input ended in the middle of a flow
                Ok(None) => return Ok(()),
                Err(e @ KeeperError::Io(_)) => return Err(e),
                Err(e) => {
                    tracing::debug!(?command, error = %e, "command failed");
                    let text = format!("Error: {}", e);
                    writeln!(self.prompter.output(), "{}", text.red())?;
                }
            }
        }
    }

    fn handle_add(&mut self) -> Result<Option<CmdResult>> {
        let Some(title) = self.prompter.ask("Title: ", parse_required_text)? else {
            return Ok(None);
        };
        let Some(author) = self.prompter.ask("Author: ", parse_required_text)? else {
            return Ok(None);
        };
        let Some(start) = self.ask_date("Start Date", true)? else {
            return Ok(None);
        };
        let Some(end) = self.ask_date("End Date", true)? else {
            return Ok(None);
        };
        let Some(state) = self.ask_state()? else {
            return Ok(None);
        };

        let entry =
            BookEntry::new(title, author, state).with_dates(start.into_option(), end.into_option());
        self.api.add_book(entry).map(Some)
    }

    fn handle_list(&mut self) -> Result<Option<CmdResult>> {
        let result = self.api.list_books()?;
        if !result.listed_books.is_empty() {
            let table = render_books(&result.listed_books, &self.config);
            let out = self.prompter.output();
            writeln!(out, "{}", table)?;
            writeln!(out, "{} book(s)", result.listed_books.len())?;
        }
        Ok(Some(result))
    }

    fn handle_delete(&mut self) -> Result<Option<CmdResult>> {
        let Some(index) = self
            .prompter
            .ask("Select a book number to delete: ", DisplayIndex::from_str)?
        else {
            return Ok(None);
        };
        self.api.delete_book(index).map(Some)
    }

    fn handle_update(&mut self) -> Result<Option<CmdResult>> {
        let Some(index) = self
            .prompter
            .ask("Select a book number to update: ", DisplayIndex::from_str)?
        else {
            return Ok(None);
        };
        let target = self.api.book_at(index)?;

        let out = self.prompter.output();
        writeln!(out, "{}", render_books(&[target.clone()], &self.config))?;
        writeln!(out, "Which property do you want to change?")?;
        for (i, field) in BookField::ALL.iter().enumerate() {
            writeln!(out, "{}) {}", i + 1, field)?;
        }

        let Some(field) = self.prompter.ask("Property: ", BookField::from_str)? else {
            return Ok(None);
        };

        let change = match field {
            BookField::Title => self
                .prompter
                .ask("New title: ", parse_required_text)?
                .map(BookChange::Title),
            BookField::Author => self
                .prompter
                .ask("New author: ", parse_required_text)?
                .map(BookChange::Author),
            BookField::StartDate => self
                .ask_date("New Start Date", false)?
                .map(|d| BookChange::StartDate(d.into_option())),
            BookField::EndDate => self
                .ask_date("New End Date", false)?
                .map(|d| BookChange::EndDate(d.into_option())),
            BookField::State => self.ask_state()?.map(BookChange::State),
        };
        let Some(change) = change else {
            return Ok(None);
        };

        self.api.update_book(target.book.id, &change).map(Some)
    }

    /// With `empty_is_today` unset, empty input is re-prompted instead.
    fn ask_date(&mut self, label: &str, empty_is_today: bool) -> Result<Option<DateInput>> {
        let token = &self.config.unspecified_token;
        let prompt = if empty_is_today {
            format!(
                "{} (leave empty for the current day or {} for an undefined date): ",
                label, token
            )
        } else {
            format!("{} (dd-mm-yyyy or {} for an undefined date): ", label, token)
        };

        let today = (self.today)();
        let config = &self.config;
        self.prompter.ask(&prompt, |raw| {
            if !empty_is_today && raw.trim().is_empty() {
                return Err(KeeperError::InvalidInput("A new date is required".into()));
            }
            parse_date_input(raw, today, config)
        })
    }

    fn ask_state(&mut self) -> Result<Option<BookState>> {
        let choices: Vec<&str> = BookState::ALL.iter().map(|s| s.as_str()).collect();
        let prompt = format!("Reading State ({}): ", choices.join(", "));
        self.prompter.ask(&prompt, validate_state)
    }

    fn print_messages(&mut self, result: &CmdResult) -> Result<()> {
        let out = self.prompter.output();
        for message in &result.messages {
            match message.level {
                MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
                MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
                MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            }
        }
        Ok(())
    }
}
