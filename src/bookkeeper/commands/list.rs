use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::indexed_books;
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &S) -> Result<CmdResult> {
    let books = indexed_books(store)?;
    let mut result = CmdResult::default();
    if books.is_empty() {
        result.add_message(CmdMessage::info("No books found."));
    }
    // `count` includes entries that could not be decoded
    let unreadable = store.count().saturating_sub(books.len());
    if unreadable > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} unreadable entr{} skipped",
            unreadable,
            if unreadable == 1 { "y was" } else { "ies were" }
        )));
    }
    Ok(result.with_listed_books(books))
}
