// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Marble-notation virtual clock for deterministic stream tests.
//!
//! A marble diagram is a string where every character is one virtual time
//! frame:
//!
//! - `-`: one frame with no emission
//! - a letter or digit: a value, resolved through a caller-supplied map
//! - `|`: completion; `#`: error
//! - `( … )`: all notifications in the group share the frame of `(`, while
//!   the group still consumes one frame per character
//! - ASCII whitespace is ignored, so diagrams can be aligned in test source
//!
//! [`MarbleScheduler`] turns diagrams into [`MarbleStream`]s, *cold*
//! (frames relative to subscription) or *hot* (absolute frames, late
//! subscribers miss earlier events), and drives any
//! `Stream<Item = StreamItem<T>>` built from them on a virtual clock,
//! recording every emission with the frame it occurred in. Time advances
//! from event frame to event frame; within one frame, delivery and polling
//! iterate to a fixpoint so an inner stream subscribed mid-frame still gets
//! to emit in that frame.
//!
//! A stream that can no longer make progress ends the run without a
//! completion record: a never-completing combined sequence is a valid
//! outcome, not a harness fault.

pub mod diagram;
pub mod expect;
pub mod notification;
pub mod scheduler;
pub mod source;

pub use self::diagram::{parse_diagram, MarbleError};
pub use self::expect::assert_recorded_eq;
pub use self::notification::{Frame, Notification, Recorded};
pub use self::scheduler::MarbleScheduler;
pub use self::source::MarbleStream;
