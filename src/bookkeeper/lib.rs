//! # Bookkeeper Architecture
//!
//! Bookkeeper is a small reading log: it records which books you are reading, when you
//! started and finished them, and what state they are in. Everything lives in a single
//! embedded database file.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Binary (main.rs, args.rs)                                  │
//! │  - Parses arguments, picks the database file, sets logging  │
//! │  - The ONLY place that knows about exit codes               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (shell.rs, prompt.rs, render.rs)                     │
//! │  - Line-oriented command loop over any BufRead / Write      │
//! │  - Per-field retry loops with typed parsers                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Command Layer (commands/*.rs)         │
//! │  - Thin facade, display indexes → internal ids              │
//! │  - Pure business logic returning `CmdResult`                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - `BookStore` trait                                        │
//! │  - SqliteStore (production), InMemoryStore (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two kinds of ids
//!
//! Every book gets a permanent internal id from the store when it is added. Those ids are
//! what the store is keyed by, and they are never reused. Users never see them: listings
//! are sorted by start date and numbered from 1, and that number (the display index) is
//! what `delete` and `update` ask for. The display index is recomputed on every command,
//! so it shifts when books are added or removed. See [`index`] for the translation.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `BookEntry`, `BookState` and input parsers
//! - [`index`]: Display ordering and index resolution
//! - [`config`]: Bucket name, date formats and the unspecified-date token
//! - [`shell`]: The interactive command loop
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod prompt;
pub mod render;
pub mod shell;
pub mod store;
