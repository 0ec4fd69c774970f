use crate::error::{KeeperError, Result};
use crate::index::DisplayBook;
use crate::model::{BookEntry, BookState};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

pub mod add;
pub mod delete;
pub mod list;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<BookEntry>,
    pub listed_books: Vec<DisplayBook>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<BookEntry>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<DisplayBook>) -> Self {
        self.listed_books = books;
        self
    }
}

/// The fields a user can pick from the update menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    StartDate,
    EndDate,
    State,
}

impl BookField {
    pub const ALL: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::StartDate,
        BookField::EndDate,
        BookField::State,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::StartDate => "start date",
            BookField::EndDate => "end date",
            BookField::State => "state",
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookField {
    type Err = KeeperError;

    /// Accepts the menu number (1-5) or the field label.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if let Some(field) = n.checked_sub(1).and_then(|i| BookField::ALL.get(i).copied()) {
                return Ok(field);
            }
        }
        BookField::ALL
            .into_iter()
            .find(|field| field.label() == s)
            .ok_or_else(|| KeeperError::InvalidInput(format!("{} is not a valid property", s)))
    }
}

/// A single-field change to an existing book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookChange {
    Title(String),
    Author(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    State(BookState),
}

impl BookChange {
    pub fn field(&self) -> BookField {
        match self {
            BookChange::Title(_) => BookField::Title,
            BookChange::Author(_) => BookField::Author,
            BookChange::StartDate(_) => BookField::StartDate,
            BookChange::EndDate(_) => BookField::EndDate,
            BookChange::State(_) => BookField::State,
        }
    }

    pub fn apply(&self, book: &mut BookEntry) {
        match self {
            BookChange::Title(title) => book.title = title.clone(),
            BookChange::Author(author) => book.author = author.clone(),
            BookChange::StartDate(date) => book.date_start = *date,
            BookChange::EndDate(date) => book.date_end = *date,
            BookChange::State(state) => book.state = *state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_from_number_or_label() {
        assert_eq!("1".parse::<BookField>().unwrap(), BookField::Title);
        assert_eq!("5".parse::<BookField>().unwrap(), BookField::State);
        assert_eq!("start date".parse::<BookField>().unwrap(), BookField::StartDate);
        assert!("0".parse::<BookField>().is_err());
        assert!("6".parse::<BookField>().is_err());
        assert!("colour".parse::<BookField>().is_err());
    }

    #[test]
    fn change_touches_one_field() {
        let mut book = BookEntry::new("Dune", "Herbert", BookState::Reading);
        book.id = 8;
        let before = book.clone();

        BookChange::State(BookState::Dropped).apply(&mut book);
        assert_eq!(book.state, BookState::Dropped);
        assert_eq!(book.id, before.id);
        assert_eq!(book.title, before.title);
        assert_eq!(book.author, before.author);
    }
}
