use crate::commands::{BookChange, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::BookStore;

/// Applies one change to the book stored under `id`.
pub fn run<S: BookStore>(store: &mut S, id: u64, change: &BookChange) -> Result<CmdResult> {
    let mut book = store.get(id)?;
    change.apply(&mut book);
    store.update(&book)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book updated ({}): {}",
        change.field(),
        book.title
    )));
    Ok(result.with_affected_books(vec![book]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeeperError;
    use crate::index::{resolve_display_index, DisplayIndex};
    use crate::model::BookState;
    use crate::store::memory::fixtures::{date, StoreFixture};

    #[test]
    fn updates_one_field_and_keeps_id() {
        let mut fixture = StoreFixture::new().with_books(2);
        let target = resolve_display_index(&fixture.store, DisplayIndex(2)).unwrap();

        run(
            &mut fixture.store,
            target.book.id,
            &BookChange::State(BookState::Finished),
        )
        .unwrap();

        let stored = fixture.store.get(target.book.id).unwrap();
        assert_eq!(stored.state, BookState::Finished);
        assert_eq!(stored.title, target.book.title);
        assert_eq!(stored.date_start, target.book.date_start);
    }

    #[test]
    fn changing_start_date_reorders_listing() {
        let mut fixture = StoreFixture::new().with_books(3);
        let last = resolve_display_index(&fixture.store, DisplayIndex(3)).unwrap();

        run(
            &mut fixture.store,
            last.book.id,
            &BookChange::StartDate(Some(date(1, 1, 1999))),
        )
        .unwrap();

        let first = resolve_display_index(&fixture.store, DisplayIndex(1)).unwrap();
        assert_eq!(first.book.id, last.book.id);
    }

    #[test]
    fn missing_id_is_not_found() {
        let mut fixture = StoreFixture::new();
        assert!(matches!(
            run(&mut fixture.store, 3, &BookChange::Title("X".into())),
            Err(KeeperError::NotFound(3))
        ));
    }
}
