// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Higher-order stream flattening operators.
//!
//! Each operator maps every value of a source `Stream<Item = StreamItem<T>>`
//! to an inner stream through a projection function and flattens the inner
//! emissions into one combined stream, under one of four policies:
//!
//! - [`ConcatMapExt::concat_map`]: one inner at a time; source values
//!   arriving while an inner is active are buffered and their projection is
//!   deferred until the inner starts.
//! - [`SwitchMapExt::switch_map`]: only the newest inner; a new source
//!   value drops the previous inner stream, cancelling it.
//! - [`MergeMapExt::merge_map`]: all inners run concurrently; same-tick
//!   emissions are delivered in subscription order.
//! - [`ExhaustMapExt::exhaust_map`]: ignores source values entirely while
//!   an inner is active; dropped values are never projected.
//!
//! [`FlattenMapExt::flatten_map`] selects a policy at runtime through the
//! [`FlattenPolicy`] enum.
//!
//! The combined stream completes once the source and every inner the policy
//! still cares about have completed; it never completes if one of those
//! never does. Any error on the source or on an active inner terminates
//! the combined stream immediately, wrapped as
//! [`RillError::SourceSequence`](rill_core::RillError::SourceSequence) or
//! [`RillError::InnerSequence`](rill_core::RillError::InnerSequence), and
//! drops every other active inner without further emission.
//!
//! # Example
//!
//! ```
//! use futures::{executor::block_on, stream, StreamExt};
//! use rill_core::StreamItem;
//! use rill_flatten::ConcatMapExt;
//!
//! let source = stream::iter([1, 3].map(StreamItem::Value));
//! let combined = source.concat_map(|v| stream::iter([v * 10, v * 11].map(StreamItem::Value)));
//!
//! let values: Vec<_> = block_on(combined.map(StreamItem::unwrap).collect());
//! assert_eq!(values, vec![10, 11, 30, 33]);
//! ```

pub mod concat_map;
pub mod exhaust_map;
pub mod merge_map;
pub mod policy;
pub mod switch_map;

pub use self::concat_map::{ConcatMap, ConcatMapExt};
pub use self::exhaust_map::{ExhaustMap, ExhaustMapExt};
pub use self::merge_map::{MergeMap, MergeMapExt};
pub use self::policy::{FlattenMapExt, FlattenPolicy};
pub use self::switch_map::{SwitchMap, SwitchMapExt};
