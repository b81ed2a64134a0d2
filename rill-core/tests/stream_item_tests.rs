// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{RillError, StreamItem};

#[test]
fn test_map_transforms_value_and_keeps_error() {
    let value: StreamItem<i32> = StreamItem::Value(3);
    let mapped = value.map(|v| v * 10);
    assert_eq!(mapped, StreamItem::Value(30));

    let error: StreamItem<i32> = StreamItem::Error(RillError::stream_error("boom"));
    let mapped = error.map(|v| v * 10);
    assert!(mapped.is_error());
}

#[test]
fn test_and_then_chains_and_short_circuits() {
    let value: StreamItem<i32> = StreamItem::Value(2);
    let chained = value.and_then(|v| StreamItem::Value(v + 1));
    assert_eq!(chained, StreamItem::Value(3));

    let failed: StreamItem<i32> =
        StreamItem::Value(2).and_then(|_| StreamItem::Error(RillError::stream_error("boom")));
    assert!(failed.is_error());
}

#[test]
fn test_ok_and_err_split_the_variants() {
    assert_eq!(StreamItem::Value(7).ok(), Some(7));
    assert_eq!(
        StreamItem::<i32>::Error(RillError::stream_error("boom")).ok(),
        None
    );

    assert!(StreamItem::Value(7).err().is_none());
    assert!(StreamItem::<i32>::Error(RillError::stream_error("boom"))
        .err()
        .is_some());
}

#[test]
fn test_errors_are_never_equal() {
    let a: StreamItem<i32> = StreamItem::Error(RillError::stream_error("same"));
    let b: StreamItem<i32> = StreamItem::Error(RillError::stream_error("same"));
    assert_ne!(a, b);
}

#[test]
fn test_result_round_trip() {
    let item: StreamItem<i32> = Ok(5).into();
    assert_eq!(item, StreamItem::Value(5));

    let back: Result<i32, RillError> = StreamItem::Value(5).into();
    assert_eq!(back.unwrap(), 5);

    let err: Result<i32, RillError> =
        StreamItem::<i32>::Error(RillError::stream_error("boom")).into();
    assert!(err.is_err());
}

#[test]
#[should_panic(expected = "called `StreamItem::unwrap()` on an `Error` value")]
fn test_unwrap_panics_on_error() {
    let item: StreamItem<i32> = StreamItem::Error(RillError::stream_error("boom"));
    let _ = item.unwrap();
}

#[test]
fn test_is_value_and_is_error_are_exclusive() {
    let value: StreamItem<i32> = StreamItem::Value(7);
    assert!(value.is_value());
    assert!(!value.is_error());

    let error: StreamItem<i32> = StreamItem::Error(RillError::stream_error("boom"));
    assert!(error.is_error());
    assert!(!error.is_value());
}

#[test]
fn test_expect_returns_the_value() {
    let item: StreamItem<i32> = StreamItem::Value(7);
    assert_eq!(item.expect("a value"), 7);
}

#[test]
#[should_panic(expected = "stream must carry a value")]
fn test_expect_panics_with_the_given_message_on_error() {
    let item: StreamItem<i32> = StreamItem::Error(RillError::stream_error("boom"));
    let _ = item.expect("stream must carry a value");
}
