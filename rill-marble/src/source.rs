// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Channel-backed streams for marble sequences.

use std::cell::RefCell;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::mpsc;
use futures::Stream;
use rill_core::StreamItem;

use crate::notification::{Notification, Recorded};
use crate::scheduler::{SchedulerState, SequenceFeed};

/// Timing interpretation of a marble sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SequenceKind {
    /// Frames relative to the subscription frame.
    Cold,
    /// Absolute frames; late subscribers miss earlier events.
    Hot,
}

/// A marble sequence as a `Stream<Item = StreamItem<T>>`.
///
/// Subscription happens lazily at the first poll: that is when the sequence
/// registers its event feed with the scheduler, stamped with the current
/// virtual frame. Cloning yields an independent, not-yet-subscribed sequence
/// with the same diagram: cold Rx observables can be subscribed many times,
/// and each subscription of a hot sequence observes the shared timeline from
/// its own subscription frame.
pub struct MarbleStream<T> {
    state: Rc<RefCell<SchedulerState>>,
    kind: SequenceKind,
    events: Vec<Recorded<T>>,
    rx: Option<mpsc::UnboundedReceiver<StreamItem<T>>>,
}

impl<T> MarbleStream<T> {
    pub(crate) fn new(
        state: Rc<RefCell<SchedulerState>>,
        kind: SequenceKind,
        events: Vec<Recorded<T>>,
    ) -> Self {
        Self {
            state,
            kind,
            events,
            rx: None,
        }
    }
}

impl<T: Clone> Clone for MarbleStream<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            kind: self.kind,
            events: self.events.clone(),
            rx: None,
        }
    }
}

impl<T: Clone + Unpin + 'static> Stream for MarbleStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.rx.is_none() {
            let (tx, rx) = mpsc::unbounded();
            let now = this.state.borrow().now;
            let events: Vec<Recorded<T>> = match this.kind {
                SequenceKind::Cold => this
                    .events
                    .iter()
                    .map(|event| Recorded {
                        frame: now + event.frame,
                        notification: event.notification.clone(),
                    })
                    .collect(),
                SequenceKind::Hot => this
                    .events
                    .iter()
                    .filter(|event| {
                        // Values strictly before subscription are missed; a
                        // past terminal is replayed at the subscription
                        // frame.
                        !matches!(event.notification, Notification::Value(_))
                            || event.frame >= now
                    })
                    .map(|event| Recorded {
                        frame: event.frame.max(now),
                        notification: event.notification.clone(),
                    })
                    .collect(),
            };
            this.state
                .borrow_mut()
                .feeds
                .push(Box::new(SequenceFeed::new(events, tx)));
            this.rx = Some(rx);
        }

        match this.rx.as_mut() {
            Some(rx) => Pin::new(rx).poll_next(cx),
            None => Poll::Ready(None),
        }
    }
}
