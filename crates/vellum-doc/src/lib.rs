#![forbid(unsafe_code)]

//! Document content core for Vellum's rich-text widgets.
//!
//! This crate is the character-storage and position-tracking engine beneath
//! the document model: a growable character store, a sorted index of marks
//! that keeps externally held offsets valid across arbitrary edits, and
//! undo tokens that reverse an edit exactly — text and mark offsets both.
//!
//! - [`DocumentContent`] - the facade: insert/remove/read, positions, undo
//! - [`ArrayContent`] / [`GapContent`] - contiguous and gap-buffer backends
//! - [`Position`] - a tracked offset that survives edits, released on drop
//! - [`EditToken`] - reversible record of one edit
//! - [`UndoHistory`] - optional bounded undo/redo stack over tokens
//!
//! Layout, rendering, element trees, and attribute storage live above this
//! crate and consume it only through the facade.
//!
//! # Example
//! ```
//! use vellum_doc::{ArrayContent, UndoHistory};
//!
//! let mut content = ArrayContent::new();
//! let mut history = UndoHistory::new();
//!
//! history.record(content.insert(0, "hello world")?);
//! let pos = content.create_position(6); // start of "world"
//!
//! history.record(content.remove(0, 6)?);
//! assert_eq!(content.text(0, content.len())?, "world\n");
//! assert_eq!(pos.offset(), 0);
//!
//! history.undo(&mut content)?;
//! assert_eq!(content.text(0, content.len())?, "hello world\n");
//! assert_eq!(pos.offset(), 6);
//! # Ok::<(), vellum_doc::ContentError>(())
//! ```

pub mod array;
pub mod content;
pub mod error;
pub mod gap;
pub mod position;
pub mod store;
pub mod undo;

mod marks;

pub use array::ArrayStore;
pub use content::{ArrayContent, DocumentContent, GapContent};
pub use error::ContentError;
pub use gap::GapStore;
pub use position::Position;
pub use store::{StoreView, TextStore};
pub use undo::{DEFAULT_MAX_HISTORY, EditKind, EditToken, UndoHistory};
