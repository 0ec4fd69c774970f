//! # Storage Layer
//!
//! The [`BookStore`] trait is the only thing the rest of the crate knows about
//! persistence.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: Production storage in a single database file
//!   - Used as an ordered key-value map split into named buckets
//!   - Keys are 8-byte big-endian ids, so key order is id order
//!   - Values are JSON-serialized [`BookEntry`]s
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!
//! ## Ids
//!
//! Each bucket carries its own sequence. `add` takes the next value, which is
//! strictly greater than every id handed out before, including ids of entries
//! that have since been deleted.

use crate::error::Result;
use crate::model::BookEntry;

pub mod memory;
pub mod sqlite;

/// Abstract interface for book storage.
pub trait BookStore {
    /// Append an entry, returning the id the store assigned to it.
    /// Whatever `entry.id` holds is ignored.
    fn add(&mut self, entry: &BookEntry) -> Result<u64>;

    /// Replace the entry stored under `entry.id`
    fn update(&mut self, entry: &BookEntry) -> Result<()>;

    /// Delete an entry permanently
    fn delete_by_id(&mut self, id: u64) -> Result<()>;

    /// Get an entry by id
    fn get(&self, id: u64) -> Result<BookEntry>;

    /// All entries in key (id) order. Entries that fail to decode are skipped.
    fn get_all(&self) -> Result<Vec<BookEntry>>;

    /// Number of live entries, or 0 if the store cannot be read.
    fn count(&self) -> usize;

    /// Release the underlying resources.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Encodes an id as a store key. Big-endian keeps byte order equal to numeric order.
pub fn id_to_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

pub fn key_to_id(key: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = key.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}
