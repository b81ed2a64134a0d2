// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Channel-backed test streams.

use futures::channel::mpsc;
use futures::stream::Map;
use futures::{Stream, StreamExt};
use rill_core::StreamItem;

/// Creates an unbounded channel whose receiving side is a
/// `Stream<Item = StreamItem<T>>`.
///
/// Values sent through the sender arrive wrapped in `StreamItem::Value`;
/// dropping the sender completes the stream.
pub fn test_channel<T>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Unpin,
) {
    let (tx, rx) = mpsc::unbounded();
    let stream: Map<_, fn(T) -> StreamItem<T>> = rx.map(StreamItem::Value);
    (tx, stream)
}
