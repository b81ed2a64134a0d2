// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The virtual clock driving marble tests.
//!
//! The scheduler keeps a single logical timeline (one `now` frame) and a set
//! of event feeds, one per subscribed marble sequence. Each feed pushes its
//! due notifications into the channel backing that sequence's stream. The
//! clock jumps from event frame to event frame; real time never passes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::pin::pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::mpsc;
use futures::task::noop_waker;
use futures::Stream;
use rill_core::{RillError, StreamItem};

use crate::diagram::parse_diagram;
use crate::expect::assert_recorded_eq;
use crate::notification::{Frame, Notification, Recorded};
use crate::source::{MarbleStream, SequenceKind};

// Guard against a combined stream that emits synchronously forever; a
// well-formed marble test never comes close.
const MAX_EMISSIONS_PER_FRAME: usize = 10_000;

/// A registered sequence delivering its notifications into a channel.
pub(crate) trait EventFeed {
    /// Delivers every notification due at or before `frame`; returns how
    /// many were delivered.
    fn deliver_due(&mut self, frame: Frame) -> usize;
    /// Frame of the next pending notification, if any.
    fn next_due(&self) -> Option<Frame>;
    /// True once the feed has delivered a terminal marker.
    fn is_finished(&self) -> bool;
}

/// Feed backing one subscription of a marble sequence.
pub(crate) struct SequenceFeed<T> {
    events: VecDeque<Recorded<T>>,
    tx: Option<mpsc::UnboundedSender<StreamItem<T>>>,
}

impl<T> SequenceFeed<T> {
    pub(crate) fn new(
        events: Vec<Recorded<T>>,
        tx: mpsc::UnboundedSender<StreamItem<T>>,
    ) -> Self {
        Self {
            events: events.into(),
            tx: Some(tx),
        }
    }
}

impl<T> EventFeed for SequenceFeed<T> {
    fn deliver_due(&mut self, frame: Frame) -> usize {
        let mut delivered = 0;
        while self
            .events
            .front()
            .is_some_and(|event| event.frame <= frame)
        {
            let Some(event) = self.events.pop_front() else {
                break;
            };
            delivered += 1;
            match event.notification {
                Notification::Value(value) => {
                    if let Some(tx) = &self.tx {
                        // A send error means the subscriber was dropped
                        // (e.g. an inner discarded by switch); the value is
                        // suppressed, which is exactly unsubscription.
                        let _ = tx.unbounded_send(StreamItem::Value(value));
                    }
                }
                Notification::Error => {
                    if let Some(tx) = self.tx.take() {
                        let _ = tx
                            .unbounded_send(StreamItem::Error(RillError::stream_error(
                                "marble error marker",
                            )));
                    }
                }
                Notification::Complete => {
                    // Dropping the sender closes the channel.
                    self.tx = None;
                }
            }
        }
        delivered
    }

    fn next_due(&self) -> Option<Frame> {
        if self.tx.is_none() {
            return None;
        }
        self.events.front().map(|event| event.frame)
    }

    fn is_finished(&self) -> bool {
        self.tx.is_none() && self.events.is_empty()
    }
}

pub(crate) struct SchedulerState {
    pub(crate) now: Frame,
    pub(crate) feeds: Vec<Box<dyn EventFeed>>,
}

/// A virtual-clock scheduler for marble tests.
///
/// Create sequences with [`cold`](Self::cold) / [`hot`](Self::hot), combine
/// them with stream operators, then [`run`](Self::run) or
/// [`expect`](Self::expect) the combined stream. All bookkeeping lives on
/// one thread behind `Rc<RefCell<…>>`; "concurrent" sequences are
/// interleaved deterministically by frame.
#[derive(Clone)]
pub struct MarbleScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl Default for MarbleScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl MarbleScheduler {
    /// Creates a scheduler with its clock at frame 0.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SchedulerState {
                now: 0,
                feeds: Vec::new(),
            })),
        }
    }

    /// A cold sequence: frames are relative to the subscription frame, and
    /// every subscription (clone) replays the diagram from its own
    /// subscription time.
    ///
    /// # Panics
    ///
    /// Panics if the diagram does not parse; use
    /// [`try_cold`](Self::try_cold) to handle the error instead.
    pub fn cold<T: Clone>(&self, diagram: &str, values: &HashMap<char, T>) -> MarbleStream<T> {
        match self.try_cold(diagram, values) {
            Ok(stream) => stream,
            Err(error) => panic!("invalid cold marble diagram `{diagram}`: {error}"),
        }
    }

    /// Fallible variant of [`cold`](Self::cold).
    pub fn try_cold<T: Clone>(
        &self,
        diagram: &str,
        values: &HashMap<char, T>,
    ) -> Result<MarbleStream<T>, crate::MarbleError> {
        let events = parse_diagram(diagram, values)?;
        Ok(MarbleStream::new(
            Rc::clone(&self.state),
            SequenceKind::Cold,
            events,
        ))
    }

    /// A hot sequence: frames are absolute. A subscriber observes events
    /// from its subscription frame on; earlier values are missed, and a
    /// terminal marker already in the past is observed immediately at the
    /// subscription frame.
    ///
    /// # Panics
    ///
    /// Panics if the diagram does not parse; use [`try_hot`](Self::try_hot)
    /// to handle the error instead.
    pub fn hot<T: Clone>(&self, diagram: &str, values: &HashMap<char, T>) -> MarbleStream<T> {
        match self.try_hot(diagram, values) {
            Ok(stream) => stream,
            Err(error) => panic!("invalid hot marble diagram `{diagram}`: {error}"),
        }
    }

    /// Fallible variant of [`hot`](Self::hot).
    pub fn try_hot<T: Clone>(
        &self,
        diagram: &str,
        values: &HashMap<char, T>,
    ) -> Result<MarbleStream<T>, crate::MarbleError> {
        let events = parse_diagram(diagram, values)?;
        Ok(MarbleStream::new(
            Rc::clone(&self.state),
            SequenceKind::Hot,
            events,
        ))
    }

    /// Drives `stream` on the virtual clock until it terminates or can make
    /// no further progress, recording every emission with the frame it
    /// occurred in.
    ///
    /// Termination records [`Notification::Complete`] /
    /// [`Notification::Error`]; a stream that merely runs out of scheduled
    /// events ends the recording without a terminal entry.
    pub fn run<S, T>(&self, stream: S) -> Vec<Recorded<T>>
    where
        S: Stream<Item = StreamItem<T>>,
    {
        let mut stream = pin!(stream);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        let mut recorded = Vec::new();
        let mut frame: Frame = 0;

        loop {
            self.state.borrow_mut().now = frame;

            // Within one frame, alternate delivery and polling until no feed
            // has anything left for this frame. A poll may subscribe new
            // sequences whose first events are due immediately.
            let mut first_pass = true;
            loop {
                let delivered = self.deliver_due(frame);
                if delivered == 0 && !first_pass {
                    break;
                }
                first_pass = false;

                let mut emissions = 0;
                loop {
                    match stream.as_mut().poll_next(&mut cx) {
                        Poll::Ready(Some(StreamItem::Value(value))) => {
                            recorded.push(Recorded::value(frame, value));
                            emissions += 1;
                            assert!(
                                emissions <= MAX_EMISSIONS_PER_FRAME,
                                "combined stream emitted more than {MAX_EMISSIONS_PER_FRAME} \
                                 items within frame {frame}"
                            );
                        }
                        Poll::Ready(Some(StreamItem::Error(error))) => {
                            tracing::debug!(%error, frame, "combined sequence errored");
                            recorded.push(Recorded::error(frame));
                            return recorded;
                        }
                        Poll::Ready(None) => {
                            tracing::debug!(frame, "combined sequence completed");
                            recorded.push(Recorded::complete(frame));
                            return recorded;
                        }
                        Poll::Pending => break,
                    }
                }
            }

            match self.next_due() {
                Some(next) => {
                    debug_assert!(next > frame, "feed left a past event undelivered");
                    frame = next;
                }
                None => break,
            }
        }

        recorded
    }

    /// Runs `stream` and asserts its recording equals `diagram`.
    ///
    /// # Panics
    ///
    /// Panics if the expected diagram does not parse, or if the recorded
    /// sequence differs, with a frame-by-frame message.
    pub fn expect<S, T>(&self, stream: S, diagram: &str, values: &HashMap<char, T>)
    where
        S: Stream<Item = StreamItem<T>>,
        T: Clone + PartialEq + std::fmt::Debug,
    {
        let expected = match parse_diagram(diagram, values) {
            Ok(expected) => expected,
            Err(error) => panic!("invalid expected marble diagram `{diagram}`: {error}"),
        };
        let actual = self.run(stream);
        assert_recorded_eq(&actual, &expected);
    }

    fn deliver_due(&self, frame: Frame) -> usize {
        let mut state = self.state.borrow_mut();
        let mut delivered = 0;
        for feed in state.feeds.iter_mut() {
            delivered += feed.deliver_due(frame);
        }
        state.feeds.retain(|feed| !feed.is_finished());
        delivered
    }

    fn next_due(&self) -> Option<Frame> {
        self.state
            .borrow()
            .feeds
            .iter()
            .filter_map(|feed| feed.next_due())
            .min()
    }
}
