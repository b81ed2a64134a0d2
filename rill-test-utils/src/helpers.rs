// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timeout-guarded stream assertions for executor-driven tests.

use std::fmt::Debug;
use std::time::Duration;

use futures::{Stream, StreamExt};
use rill_core::StreamItem;
use tokio::time::sleep;

/// Asserts that `stream` emits nothing within `timeout_ms` milliseconds.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("unexpected element emitted, expected no output");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Awaits the next item and asserts it is `StreamItem::Value(expected)`.
pub async fn expect_next_value<S, T>(stream: &mut S, expected: T)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: PartialEq + Debug,
{
    let item = stream.next().await.expect("expected next item");
    match item {
        StreamItem::Value(value) => assert_eq!(value, expected),
        StreamItem::Error(error) => panic!("expected value {expected:?}, got error {error:?}"),
    }
}

/// Awaits the next item with a timeout, returning `None` on stream end.
///
/// # Panics
///
/// Panics if nothing arrives within `timeout_ms` milliseconds.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> Option<T>
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        item = stream.next() => item,
        _ = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("no item emitted within {timeout_ms}ms");
        }
    }
}
