// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `exhaust_map` operator for streams.
//!
//! `exhaust_map` runs at most one inner stream. A source value arriving
//! while an inner is active is dropped entirely: it is not queued, and its
//! projection function is never invoked. Once the active inner completes,
//! the next source value starts a new inner. The combined stream completes
//! after the source has completed and the active inner, if any, has
//! completed.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use pin_project::pin_project;
use rill_core::{RillError, StreamItem};

/// Extension trait providing the `exhaust_map` operator.
pub trait ExhaustMapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Maps source values to inner streams, ignoring source values that
    /// arrive while an inner stream is still active.
    ///
    /// Dropped source values produce no inner stream at all. Errors on the
    /// source or on the active inner terminate the combined stream
    /// immediately.
    fn exhaust_map<F, R, U>(self, project: F) -> ExhaustMap<Self, F, R>
    where
        F: FnMut(T) -> R,
        R: Stream<Item = StreamItem<U>>,
    {
        ExhaustMap {
            source: self,
            project,
            active: None,
            active_index: 0,
            next_index: 0,
            source_done: false,
            done: false,
        }
    }
}

impl<T, S> ExhaustMapExt<T> for S where S: Stream<Item = StreamItem<T>> {}

/// Stream returned by [`ExhaustMapExt::exhaust_map`].
#[pin_project]
pub struct ExhaustMap<S, F, R> {
    #[pin]
    source: S,
    project: F,
    #[pin]
    active: Option<R>,
    active_index: usize,
    next_index: usize,
    source_done: bool,
    done: bool,
}

impl<S, F, T, U, R> Stream for ExhaustMap<S, F, R>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> R,
    R: Stream<Item = StreamItem<U>>,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        loop {
            if !*this.source_done {
                loop {
                    match this.source.as_mut().poll_next(cx) {
                        Poll::Ready(Some(StreamItem::Value(value))) => {
                            let index = *this.next_index;
                            *this.next_index += 1;
                            if this.active.is_none() {
                                this.active.set(Some((this.project)(value)));
                                *this.active_index = index;
                            } else {
                                tracing::trace!(index, "exhaust_map: dropping source value");
                            }
                        }
                        Poll::Ready(Some(StreamItem::Error(error))) => {
                            tracing::debug!(%error, "exhaust_map: source errored");
                            *this.done = true;
                            this.active.set(None);
                            return Poll::Ready(Some(StreamItem::Error(RillError::source_error(
                                error,
                            ))));
                        }
                        Poll::Ready(None) => {
                            *this.source_done = true;
                            break;
                        }
                        Poll::Pending => break,
                    }
                }
            }

            if let Some(inner) = this.active.as_mut().as_pin_mut() {
                match inner.poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(value))) => {
                        return Poll::Ready(Some(StreamItem::Value(value)));
                    }
                    Poll::Ready(Some(StreamItem::Error(error))) => {
                        tracing::debug!(%error, index = *this.active_index, "exhaust_map: inner errored");
                        *this.done = true;
                        this.active.set(None);
                        return Poll::Ready(Some(StreamItem::Error(RillError::inner_error(
                            *this.active_index,
                            error,
                        ))));
                    }
                    Poll::Ready(None) => {
                        this.active.set(None);
                        if *this.source_done {
                            *this.done = true;
                            return Poll::Ready(None);
                        }
                        // A source value may already be waiting; poll the
                        // source again before yielding.
                        continue;
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if *this.source_done {
                *this.done = true;
                return Poll::Ready(None);
            }
            return Poll::Pending;
        }
    }
}
