// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::RillError;
use std::error::Error;

#[test]
fn test_stream_error_display() {
    let err = RillError::stream_error("channel closed");
    assert_eq!(err.to_string(), "stream processing error: channel closed");
}

#[test]
fn test_source_error_wraps_cause() {
    let err = RillError::source_error(RillError::stream_error("boom"));
    assert!(matches!(err, RillError::SourceSequence { .. }));
    let cause = err.source().expect("source error keeps its cause");
    assert_eq!(cause.to_string(), "stream processing error: boom");
}

#[test]
fn test_inner_error_carries_source_ordinal() {
    let err = RillError::inner_error(2, RillError::stream_error("boom"));
    match &err {
        RillError::InnerSequence { index, .. } => assert_eq!(*index, 2),
        other => panic!("expected InnerSequence, got {other:?}"),
    }
    assert!(err.to_string().starts_with("inner sequence 2 error"));
}

#[test]
fn test_errors_are_cloneable() {
    let err = RillError::inner_error(0, RillError::user_error("projection failed"));
    let clone = err.clone();
    assert_eq!(err.to_string(), clone.to_string());
}
