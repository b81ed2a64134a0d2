// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timed-value model for marble sequences.

/// Virtual time, counted in marble frames.
pub type Frame = u64;

/// One notification of a timed sequence.
///
/// `Error` carries no payload: the marble `#` marker has none, and recorded
/// sequences are compared structurally. Error kinds are asserted at the
/// operator level, not through marble diagrams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<T> {
    /// A value emission
    Value(T),
    /// Successful completion of the sequence
    Complete,
    /// Error termination of the sequence
    Error,
}

/// A notification stamped with the frame it occurs in.
///
/// Frames are monotonically non-decreasing within one sequence; several
/// notifications may share a frame (marble groups).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded<T> {
    /// Frame the notification occurs in
    pub frame: Frame,
    /// The notification itself
    pub notification: Notification<T>,
}

impl<T> Recorded<T> {
    /// A value emission at the given frame.
    pub fn value(frame: Frame, value: T) -> Self {
        Self {
            frame,
            notification: Notification::Value(value),
        }
    }

    /// A completion marker at the given frame.
    pub fn complete(frame: Frame) -> Self {
        Self {
            frame,
            notification: Notification::Complete,
        }
    }

    /// An error marker at the given frame.
    pub fn error(frame: Frame) -> Self {
        Self {
            frame,
            notification: Notification::Error,
        }
    }
}
