// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `switch_map` operator for streams.
//!
//! `switch_map` keeps exactly one inner stream alive: the one projected from
//! the newest source value. When a new source value arrives, the previous
//! inner stream is dropped, not merely ignored, so any emissions or errors
//! it would still have produced are suppressed. The
//! combined stream completes after the source has completed and the
//! currently active inner has completed.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use pin_project::pin_project;
use rill_core::{RillError, StreamItem};

/// Extension trait providing the `switch_map` operator.
pub trait SwitchMapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Maps each source value to an inner stream and switches to it,
    /// cancelling the previously active inner stream.
    ///
    /// Errors on the source or on the *currently active* inner terminate the
    /// combined stream immediately; errors of an already-discarded inner can
    /// never surface because the inner has been dropped.
    fn switch_map<F, R, U>(self, project: F) -> SwitchMap<Self, F, R>
    where
        F: FnMut(T) -> R,
        R: Stream<Item = StreamItem<U>>,
    {
        SwitchMap {
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

impl<T, S> SwitchMapExt<T> for S where S: Stream<Item = StreamItem<T>> {}

/// Stream returned by [`SwitchMapExt::switch_map`].
#[pin_project]
pub struct SwitchMap<S, F, R> {
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

impl<S, F, T, U, R> Stream for SwitchMap<S, F, R>
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

        // Drain the source to its pending point; if several values arrived,
        // only the newest inner survives.
        if !*this.source_done {
            loop {
                match this.source.as_mut().poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(value))) => {
                        let index = *this.next_index;
                        *this.next_index += 1;
                        if this.active.is_some() {
                            tracing::trace!(
                                discarded = *this.active_index,
                                "switch_map: discarding inner"
                            );
                        }
                        this.active.set(Some((this.project)(value)));
                        *this.active_index = index;
                    }
                    Poll::Ready(Some(StreamItem::Error(error))) => {
                        tracing::debug!(%error, "switch_map: source errored");
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
                    tracing::debug!(%error, index = *this.active_index, "switch_map: inner errored");
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
                    return Poll::Pending;
                }
                Poll::Pending => return Poll::Pending,
            }
        }

        if *this.source_done {
            *this.done = true;
            return Poll::Ready(None);
        }
        Poll::Pending
    }
}
