//! # API Facade
//!
//! A thin layer over [`crate::commands`]. It owns the store, parses user-facing
//! indexes and dispatches to the command functions. No business logic and no I/O
//! live here.
//!
//! `KeeperApi<S: BookStore>` is generic over the storage backend:
//! - Production: `KeeperApi<SqliteStore>`
//! - Testing: `KeeperApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::index::{resolve_display_index, DisplayBook, DisplayIndex};
use crate::model::BookEntry;
use crate::store::BookStore;

/// The main API facade for bookkeeper operations.
pub struct KeeperApi<S: BookStore> {
    store: S,
}

impl<S: BookStore> KeeperApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add_book(&mut self, entry: BookEntry) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, entry)
    }

    pub fn list_books(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    /// The book currently listed at `index`, with its internal id.
    pub fn book_at(&self, index: DisplayIndex) -> Result<DisplayBook> {
        resolve_display_index(&self.store, index)
    }

    pub fn delete_book(&mut self, index: DisplayIndex) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, index)
    }

    /// Updates by internal id; resolve the display index with [`Self::book_at`] first.
    pub fn update_book(
        &mut self,
        id: u64,
        change: &commands::BookChange,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, change)
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}

pub use commands::{BookChange, BookField, CmdMessage, CmdResult, MessageLevel};
