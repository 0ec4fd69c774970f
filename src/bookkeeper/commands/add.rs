use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookEntry;
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &mut S, entry: BookEntry) -> Result<CmdResult> {
    let id = store.add(&entry)?;
    let book = BookEntry { id, ..entry };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book added: {} by {}",
        book.title, book.author
    )));
    result.affected_books.push(book);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::model::BookState;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn adds_book_with_store_id() {
        let mut store = InMemoryStore::new();
        let mut entry = BookEntry::new("Dune", "Herbert", BookState::Reading);
        entry.id = 500;

        let result = run(&mut store, entry).unwrap();
        assert_eq!(result.affected_books[0].id, 1);

        let listed = list::run(&store).unwrap().listed_books;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].book.id, 1);
        assert_eq!(listed[0].book.title, "Dune");
    }

    #[test]
    fn ids_strictly_increase() {
        let mut store = InMemoryStore::new();
        let mut last = 0;
        for title in ["A", "B", "C"] {
            let result = run(&mut store, BookEntry::new(title, "X", BookState::Finished)).unwrap();
            let id = result.affected_books[0].id;
            assert!(id > last);
            last = id;
        }
    }
}
