// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `merge_map` operator for streams.
//!
//! `merge_map` subscribes an inner stream for every source value immediately
//! and lets all of them run concurrently. Inner emissions are forwarded as
//! they become ready; when several inners are ready at the same tick they
//! are drained in subscription order, so the interleaving is deterministic.
//! The combined stream completes after the source has completed and every
//! started inner has completed.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use pin_project::pin_project;
use rill_core::{RillError, StreamItem};

/// Extension trait providing the `merge_map` operator.
pub trait MergeMapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Maps each source value to an inner stream and merges all inner
    /// streams concurrently.
    ///
    /// No inner emission is dropped or delayed on account of another inner
    /// stream. An error on the source or on any active inner terminates the
    /// combined stream immediately and drops every other inner.
    fn merge_map<F, R, U>(self, project: F) -> MergeMap<Self, F, R>
    where
        F: FnMut(T) -> R,
        R: Stream<Item = StreamItem<U>>,
    {
        MergeMap {
            source: self,
            project,
            inners: Vec::new(),
            next_index: 0,
            source_done: false,
            done: false,
        }
    }
}

impl<T, S> MergeMapExt<T> for S where S: Stream<Item = StreamItem<T>> {}

/// Stream returned by [`MergeMapExt::merge_map`].
#[pin_project]
pub struct MergeMap<S, F, R> {
    #[pin]
    source: S,
    project: F,
    // Active inners in subscription order, tagged with the ordinal of the
    // source value that spawned them.
    inners: Vec<(usize, Pin<Box<R>>)>,
    next_index: usize,
    source_done: bool,
    done: bool,
}

impl<S, F, T, U, R> Stream for MergeMap<S, F, R>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> R,
    R: Stream<Item = StreamItem<U>>,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.done {
            return Poll::Ready(None);
        }

        let mut source = this.source;
        if !*this.source_done {
            loop {
                match source.as_mut().poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(value))) => {
                        let index = *this.next_index;
                        *this.next_index += 1;
                        this.inners.push((index, Box::pin((this.project)(value))));
                    }
                    Poll::Ready(Some(StreamItem::Error(error))) => {
                        tracing::debug!(%error, "merge_map: source errored");
                        *this.done = true;
                        this.inners.clear();
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

        let mut i = 0;
        while i < this.inners.len() {
            let (index, inner) = &mut this.inners[i];
            match inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    return Poll::Ready(Some(StreamItem::Value(value)));
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    let index = *index;
                    tracing::debug!(%error, index, "merge_map: inner errored");
                    *this.done = true;
                    this.inners.clear();
                    return Poll::Ready(Some(StreamItem::Error(RillError::inner_error(
                        index, error,
                    ))));
                }
                Poll::Ready(None) => {
                    this.inners.remove(i);
                }
                Poll::Pending => i += 1,
            }
        }

        if *this.source_done && this.inners.is_empty() {
            *this.done = true;
            return Poll::Ready(None);
        }
        Poll::Pending
    }
}
