// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for error injection in streams.
//!
//! [`ErrorInjectingStream`] wraps a stream of plain values into a stream of
//! `StreamItem`s and injects a `StreamItem::Error` at a chosen position, for
//! testing how operators propagate errors.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use rill_core::{RillError, StreamItem};

/// A stream wrapper that injects an error at a specified position.
pub struct ErrorInjectingStream<S> {
    inner: S,
    inject_error_at: Option<usize>,
    count: usize,
}

impl<S> ErrorInjectingStream<S> {
    /// Wraps `inner`, injecting a `StreamItem::Error` once at the 0-indexed
    /// `inject_error_at` position.
    pub fn new(inner: S, inject_error_at: usize) -> Self {
        Self {
            inner,
            inject_error_at: Some(inject_error_at),
            count: 0,
        }
    }
}

impl<S> Stream for ErrorInjectingStream<S>
where
    S: Stream + Unpin,
{
    type Item = StreamItem<S::Item>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(error_pos) = self.inject_error_at {
            if self.count == error_pos {
                self.inject_error_at = None; // only inject once
                self.count += 1;
                return Poll::Ready(Some(StreamItem::Error(RillError::stream_error(
                    "injected test error",
                ))));
            }
        }

        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                self.count += 1;
                Poll::Ready(Some(StreamItem::Value(item)))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
