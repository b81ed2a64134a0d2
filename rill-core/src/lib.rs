// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every rill crate.
//!
//! - [`StreamItem`]: the item type flowing through rill streams, either a
//!   value or an error. Completion is the end of the stream itself, so a
//!   `Stream<Item = StreamItem<T>>` carries the full Rx notification grammar.
//! - [`RillError`]: the root error type, with dedicated variants for errors
//!   originating on a source sequence and on an inner sequence.

pub mod error;
pub mod stream_item;

pub use self::error::{Result, RillError};
pub use self::stream_item::StreamItem;
