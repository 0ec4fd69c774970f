use super::BookStore;
use crate::error::{KeeperError, Result};
use crate::model::BookEntry;
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    books: BTreeMap<u64, BookEntry>,
    sequence: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookStore for InMemoryStore {
    fn add(&mut self, entry: &BookEntry) -> Result<u64> {
        self.sequence += 1;
        let mut book = entry.clone();
        book.id = self.sequence;
        self.books.insert(book.id, book);
        Ok(self.sequence)
    }

    fn update(&mut self, entry: &BookEntry) -> Result<()> {
        match self.books.get_mut(&entry.id) {
            Some(book) => {
                *book = entry.clone();
                Ok(())
            }
            None => Err(KeeperError::NotFound(entry.id)),
        }
    }

    fn delete_by_id(&mut self, id: u64) -> Result<()> {
        if self.books.remove(&id).is_none() {
            return Err(KeeperError::NotFound(id));
        }
        Ok(())
    }

    fn get(&self, id: u64) -> Result<BookEntry> {
        self.books.get(&id).cloned().ok_or(KeeperError::NotFound(id))
    }

    fn get_all(&self) -> Result<Vec<BookEntry>> {
        Ok(self.books.values().cloned().collect())
    }

    fn count(&self) -> usize {
        self.books.len()
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::BookState;
    use chrono::NaiveDate;

    pub fn date(day: u32, month: u32, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` books started on consecutive days of January 2020
        pub fn with_books(mut self, count: usize) -> Self {
            for i in 0..count {
                let book = BookEntry::new(
                    format!("Book {}", i + 1),
                    format!("Author {}", i + 1),
                    BookState::Reading,
                )
                .with_dates(Some(date(i as u32 + 1, 1, 2020)), None);
                self.store.add(&book).unwrap();
            }
            self
        }

        pub fn with_book(mut self, title: &str, start: Option<NaiveDate>) -> Self {
            let book = BookEntry::new(title, "Someone", BookState::Reading).with_dates(start, None);
            self.store.add(&book).unwrap();
            self
        }
    }
}
