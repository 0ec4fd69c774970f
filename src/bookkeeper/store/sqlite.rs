use super::{id_to_key, key_to_id, BookStore};
use crate::config::KeeperConfig;
use crate::error::{KeeperError, Result};
use crate::model::BookEntry;
use rusqlite::{params, Connection, OptionalExtension};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// `entries` is the ordered map: SQLite compares BLOB keys bytewise.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS buckets (
    name     TEXT PRIMARY KEY,
    sequence INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS entries (
    bucket TEXT NOT NULL,
    key    BLOB NOT NULL,
    value  BLOB NOT NULL,
    PRIMARY KEY (bucket, key)
) WITHOUT ROWID;
";

/// Book storage in a single SQLite file.
///
/// The database is treated as a bucketed, ordered key-value store. This store
/// reads and writes only the bucket named in its [`KeeperConfig`].
pub struct SqliteStore {
    conn: Connection,
    bucket: String,
    path: PathBuf,
}

/// Raw contents of one bucket, for diagnostics.
#[derive(Debug, Clone)]
pub struct BucketDump {
    pub name: String,
    pub sequence: u64,
    pub entries: Vec<RawEntry>,
}

#[derive(Debug, Clone)]
pub struct RawEntry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl fmt::Display for RawEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match key_to_id(&self.key) {
            Some(id) => writeln!(f, "Key: {}", id)?,
            None => {
                write!(f, "Key: 0x")?;
                for byte in &self.key {
                    write!(f, "{:02x}", byte)?;
                }
                writeln!(f)?;
            }
        }
        write!(f, "Value: {}", String::from_utf8_lossy(&self.value))
    }
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and makes sure the configured
    /// bucket exists. Opening the same file again is harmless.
    pub fn open<P: AsRef<Path>>(path: P, config: &KeeperConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let open_err = |source| KeeperError::Open {
            path: path.clone(),
            source,
        };

        let conn = Connection::open(&path).map_err(open_err)?;
        conn.execute_batch(SCHEMA).map_err(open_err)?;
        conn.execute(
            "INSERT OR IGNORE INTO buckets (name, sequence) VALUES (?1, 0)",
            params![config.bucket],
        )
        .map_err(open_err)?;

        debug!(path = %path.display(), bucket = %config.bucket, "opened store");
        Ok(Self {
            conn,
            bucket: config.bucket.clone(),
            path,
        })
    }

    /// Every bucket in the file with its raw keys and values.
    pub fn dump(&self) -> Result<Vec<BucketDump>> {
        let mut buckets = Vec::new();
        let mut stmt = self
            .conn
            .prepare("SELECT name, sequence FROM buckets ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (name, sequence) = row?;
            let entries = self.raw_entries(&name)?;
            buckets.push(BucketDump {
                name,
                sequence: u64::try_from(sequence).unwrap_or_default(),
                entries,
            });
        }
        Ok(buckets)
    }

    fn raw_entries(&self, bucket: &str) -> Result<Vec<RawEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM entries WHERE bucket = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![bucket], |row| {
            Ok(RawEntry {
                key: row.get(0)?,
                value: row.get(1)?,
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

fn require_bucket(conn: &Connection, bucket: &str) -> Result<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM buckets WHERE name = ?1)",
        params![bucket],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(KeeperError::BucketMissing(bucket.to_string()));
    }
    Ok(())
}

fn next_sequence(conn: &Connection, bucket: &str) -> Result<u64> {
    let current: i64 = conn
        .query_row(
            "SELECT sequence FROM buckets WHERE name = ?1",
            params![bucket],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| KeeperError::BucketMissing(bucket.to_string()))?;

    let next = current
        .checked_add(1)
        .ok_or_else(|| KeeperError::Store(format!("sequence exhausted for {}", bucket)))?;
    conn.execute(
        "UPDATE buckets SET sequence = ?1 WHERE name = ?2",
        params![next, bucket],
    )?;

    u64::try_from(next).map_err(|_| KeeperError::Store(format!("corrupt sequence: {}", next)))
}

fn decode(key: &[u8], value: &[u8]) -> Result<BookEntry> {
    let id = key_to_id(key)
        .ok_or_else(|| KeeperError::Store(format!("malformed key of {} bytes", key.len())))?;
    let mut book: BookEntry = serde_json::from_slice(value)?;
    // The key is authoritative
    book.id = id;
    Ok(book)
}

impl BookStore for SqliteStore {
    fn add(&mut self, entry: &BookEntry) -> Result<u64> {
        let tx = self.conn.transaction()?;
        let id = next_sequence(&tx, &self.bucket)?;

        let mut book = entry.clone();
        book.id = id;
        let value = serde_json::to_vec(&book)?;
        let key = id_to_key(id);
        tx.execute(
            "INSERT INTO entries (bucket, key, value) VALUES (?1, ?2, ?3)",
            params![self.bucket, &key[..], value],
        )?;
        tx.commit()?;

        debug!(id, title = %book.title, "added book");
        Ok(id)
    }

    fn update(&mut self, entry: &BookEntry) -> Result<()> {
        let tx = self.conn.transaction()?;
        require_bucket(&tx, &self.bucket)?;

        let value = serde_json::to_vec(entry)?;
        let key = id_to_key(entry.id);
        let changed = tx.execute(
            "UPDATE entries SET value = ?1 WHERE bucket = ?2 AND key = ?3",
            params![value, self.bucket, &key[..]],
        )?;
        if changed == 0 {
            return Err(KeeperError::NotFound(entry.id));
        }
        tx.commit()?;

        debug!(id = entry.id, "updated book");
        Ok(())
    }

    fn delete_by_id(&mut self, id: u64) -> Result<()> {
        let tx = self.conn.transaction()?;
        require_bucket(&tx, &self.bucket)?;

        let key = id_to_key(id);
        let changed = tx.execute(
            "DELETE FROM entries WHERE bucket = ?1 AND key = ?2",
            params![self.bucket, &key[..]],
        )?;
        if changed == 0 {
            return Err(KeeperError::NotFound(id));
        }
        tx.commit()?;

        debug!(id, "deleted book");
        Ok(())
    }

    fn get(&self, id: u64) -> Result<BookEntry> {
        require_bucket(&self.conn, &self.bucket)?;

        let key = id_to_key(id);
        let value: Vec<u8> = self
            .conn
            .query_row(
                "SELECT value FROM entries WHERE bucket = ?1 AND key = ?2",
                params![self.bucket, &key[..]],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(KeeperError::NotFound(id))?;
        decode(&key, &value)
    }

    fn get_all(&self) -> Result<Vec<BookEntry>> {
        require_bucket(&self.conn, &self.bucket)?;

        let mut books = Vec::new();
        for raw in self.raw_entries(&self.bucket)? {
            match decode(&raw.key, &raw.value) {
                Ok(book) => books.push(book),
                Err(e) => warn!(key = ?raw.key, error = %e, "skipping unreadable entry"),
            }
        }
        Ok(books)
    }

    fn count(&self) -> usize {
        let counted = self.conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE bucket = ?1",
            params![self.bucket],
            |row| row.get::<_, i64>(0),
        );
        match counted {
            Ok(n) => usize::try_from(n).unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "failed to count books");
                0
            }
        }
    }

    fn close(self) -> Result<()> {
        debug!(path = %self.path.display(), "closing store");
        self.conn.close().map_err(|(_, e)| KeeperError::Database(e))
    }
}
