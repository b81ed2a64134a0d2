// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `concat_map` operator for streams.
//!
//! `concat_map` runs exactly one inner stream at a time. Source values
//! arriving while an inner is active are buffered in arrival order, and each
//! buffered value is projected only when its inner stream actually starts,
//! so a queued value never consumes resources early. The combined stream
//! completes after the source has completed and the last queued inner has
//! completed.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use pin_project::pin_project;
use rill_core::{RillError, StreamItem};

/// Extension trait providing the `concat_map` operator.
pub trait ConcatMapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Maps each source value to an inner stream and concatenates the inner
    /// streams, preserving source order.
    ///
    /// While an inner stream is active, new source values are queued; the
    /// next inner starts the moment the current one completes. Inner
    /// emissions never interleave across inners.
    ///
    /// Errors on the source or on the active inner terminate the combined
    /// stream immediately and discard the queue.
    fn concat_map<F, R, U>(self, project: F) -> ConcatMap<Self, F, T, R>
    where
        F: FnMut(T) -> R,
        R: Stream<Item = StreamItem<U>>,
    {
        ConcatMap {
            source: self,
            project,
            active: None,
            queued: VecDeque::new(),
            active_index: 0,
            next_index: 0,
            source_done: false,
            done: false,
        }
    }
}

impl<T, S> ConcatMapExt<T> for S where S: Stream<Item = StreamItem<T>> {}

/// Stream returned by [`ConcatMapExt::concat_map`].
#[pin_project]
pub struct ConcatMap<S, F, T, R> {
    #[pin]
    source: S,
    project: F,
    #[pin]
    active: Option<R>,
    queued: VecDeque<(usize, T)>,
    active_index: usize,
    next_index: usize,
    source_done: bool,
    done: bool,
}

impl<S, F, T, U, R> Stream for ConcatMap<S, F, T, R>
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
            // Drain the source first so that a value and a same-tick inner
            // emission resolve in source-before-inner order.
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
                                this.queued.push_back((index, value));
                            }
                        }
                        Poll::Ready(Some(StreamItem::Error(error))) => {
                            tracing::debug!(%error, "concat_map: source errored");
                            *this.done = true;
                            this.active.set(None);
                            this.queued.clear();
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
                        tracing::debug!(%error, index = *this.active_index, "concat_map: inner errored");
                        *this.done = true;
                        this.active.set(None);
                        this.queued.clear();
                        return Poll::Ready(Some(StreamItem::Error(RillError::inner_error(
                            *this.active_index,
                            error,
                        ))));
                    }
                    Poll::Ready(None) => {
                        this.active.set(None);
                        if let Some((index, value)) = this.queued.pop_front() {
                            this.active.set(Some((this.project)(value)));
                            *this.active_index = index;
                            // The next inner may emit immediately.
                            continue;
                        }
                        if *this.source_done {
                            *this.done = true;
                            return Poll::Ready(None);
                        }
                        return Poll::Pending;
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
