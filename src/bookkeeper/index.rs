//! # Display Indexes
//!
//! Books are keyed by an internal id that never changes, but users refer to them by their
//! position in the listing: "book 3" is the third book when sorted by start date. This
//! module turns one into the other.
//!
//! ## Ordering
//!
//! - Ascending by `date_start`
//! - Books with no start date come first (`None` sorts before any date)
//! - Books with the same start date keep id order, so the oldest entry comes first
//!
//! ## No caching
//!
//! The listing is rebuilt from [`BookStore::get_all`] every time an index is resolved.
//! Adding or deleting a book shifts the positions of others, so an index is only valid
//! against the listing it came from.

use crate::error::{KeeperError, Result};
use crate::model::BookEntry;
use crate::store::BookStore;
use std::fmt;
use std::str::FromStr;

/// A 1-based position in the date-sorted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(pub usize);

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = KeeperError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        s.parse()
            .map(DisplayIndex)
            .map_err(|_| KeeperError::InvalidInput(format!("{} is not a valid book number", s)))
    }
}

impl DisplayIndex {
    /// Zero-based position, if this index falls inside a listing of `len` books.
    pub fn position(&self, len: usize) -> Option<usize> {
        self.0.checked_sub(1).filter(|pos| *pos < len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBook {
    pub book: BookEntry,
    pub index: DisplayIndex,
}

/// Sorts books for display and numbers them from 1.
pub fn index_books(mut books: Vec<BookEntry>) -> Vec<DisplayBook> {
    // sort_by is stable; pre-sorting by id makes the tie order explicit
    books.sort_by_key(|b| b.id);
    books.sort_by(|a, b| a.date_start.cmp(&b.date_start));

    books
        .into_iter()
        .enumerate()
        .map(|(i, book)| DisplayBook {
            book,
            index: DisplayIndex(i + 1),
        })
        .collect()
}

pub fn indexed_books<S: BookStore>(store: &S) -> Result<Vec<DisplayBook>> {
    Ok(index_books(store.get_all()?))
}

/// Finds the book currently shown at `index`.
///
/// The returned entry carries its internal id; use that, not the index, for
/// any follow-up store call.
pub fn resolve_display_index<S: BookStore>(store: &S, index: DisplayIndex) -> Result<DisplayBook> {
    let mut indexed = indexed_books(store)?;
    let len = indexed.len();
    let position = index
        .position(len)
        .ok_or(KeeperError::InvalidIndex { index: index.0, len })?;
    Ok(indexed.swap_remove(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookState;
    use crate::store::memory::fixtures::{date, StoreFixture};

    fn make_book(id: u64, title: &str, start: Option<chrono::NaiveDate>) -> BookEntry {
        let mut book = BookEntry::new(title, "Someone", BookState::Reading).with_dates(start, None);
        book.id = id;
        book
    }

    fn titles(indexed: &[DisplayBook]) -> Vec<&str> {
        indexed.iter().map(|db| db.book.title.as_str()).collect()
    }

    #[test]
    fn sorts_by_start_date_not_id() {
        let books = vec![
            make_book(1, "Late", Some(date(1, 6, 2021))),
            make_book(2, "Early", Some(date(1, 1, 2020))),
            make_book(3, "Middle", Some(date(15, 3, 2021))),
        ];
        let indexed = index_books(books);

        assert_eq!(titles(&indexed), vec!["Early", "Middle", "Late"]);
        assert_eq!(indexed[0].index, DisplayIndex(1));
        assert_eq!(indexed[0].book.id, 2);
        assert_eq!(indexed[2].index, DisplayIndex(3));
    }

    #[test]
    fn unspecified_start_sorts_first() {
        let books = vec![
            make_book(1, "Dated", Some(date(1, 1, 1990))),
            make_book(2, "Undated", None),
        ];
        let indexed = index_books(books);
        assert_eq!(titles(&indexed), vec!["Undated", "Dated"]);
    }

    #[test]
    fn ties_keep_id_order() {
        let day = Some(date(2, 2, 2022));
        let books = vec![
            make_book(9, "Nine", day),
            make_book(4, "Four", day),
            make_book(7, "Seven", None),
            make_book(5, "Five", None),
        ];
        let indexed = index_books(books);
        assert_eq!(titles(&indexed), vec!["Five", "Seven", "Four", "Nine"]);
    }

    #[test]
    fn resolves_to_internal_id() {
        let fixture = StoreFixture::new()
            .with_book("Second", Some(date(2, 1, 2020)))
            .with_book("First", Some(date(1, 1, 2020)));

        let resolved = resolve_display_index(&fixture.store, DisplayIndex(1)).unwrap();
        assert_eq!(resolved.book.title, "First");
        assert_eq!(resolved.book.id, 2);
        assert_eq!(resolved.index, DisplayIndex(1));
    }

    #[test]
    fn out_of_range_indexes() {
        let fixture = StoreFixture::new().with_books(3);

        assert!(resolve_display_index(&fixture.store, DisplayIndex(3)).is_ok());
        for bad in [0, 4, 99] {
            match resolve_display_index(&fixture.store, DisplayIndex(bad)) {
                Err(KeeperError::InvalidIndex { index, len }) => {
                    assert_eq!(index, bad);
                    assert_eq!(len, 3);
                }
                other => panic!("expected InvalidIndex for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_store_has_no_valid_index() {
        let fixture = StoreFixture::new();
        assert!(matches!(
            resolve_display_index(&fixture.store, DisplayIndex(1)),
            Err(KeeperError::InvalidIndex { index: 1, len: 0 })
        ));
    }

    #[test]
    fn indexes_shift_after_delete() {
        let mut fixture = StoreFixture::new().with_books(3);
        let first = resolve_display_index(&fixture.store, DisplayIndex(1)).unwrap();
        let third = resolve_display_index(&fixture.store, DisplayIndex(3)).unwrap();

        let second = resolve_display_index(&fixture.store, DisplayIndex(2)).unwrap();
        fixture.store.delete_by_id(second.book.id).unwrap();

        let new_first = resolve_display_index(&fixture.store, DisplayIndex(1)).unwrap();
        let new_second = resolve_display_index(&fixture.store, DisplayIndex(2)).unwrap();
        assert_eq!(new_first.book, first.book);
        assert_eq!(new_second.book, third.book);
        assert!(resolve_display_index(&fixture.store, DisplayIndex(3)).is_err());
    }

    #[test]
    fn parsing() {
        assert_eq!(DisplayIndex::from_str("1").unwrap(), DisplayIndex(1));
        assert_eq!(DisplayIndex::from_str(" 42 ").unwrap(), DisplayIndex(42));
        assert_eq!(DisplayIndex::from_str("0").unwrap(), DisplayIndex(0));

        for bad in ["", "abc", "-1", "1.5", "p1"] {
            assert!(matches!(
                DisplayIndex::from_str(bad),
                Err(KeeperError::InvalidInput(_))
            ));
        }
    }
}
