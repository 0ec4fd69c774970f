use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{resolve_display_index, DisplayIndex};
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &mut S, index: DisplayIndex) -> Result<CmdResult> {
    let resolved = resolve_display_index(store, index)?;
    store.delete_by_id(resolved.book.id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book deleted ({}): {}",
        index, resolved.book.title
    )));
    Ok(result.with_affected_books(vec![resolved.book]))
}
