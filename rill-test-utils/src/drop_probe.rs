// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Drop instrumentation for cancellation tests.
//!
//! Dropping an inner stream is how flattening operators cancel it, so
//! cancellation tests wrap an inner stream in a [`DropProbe`] and assert its
//! [`DropFlag`] after the operator should have let go of it.

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;

/// Shared flag recording whether the probed stream was dropped.
#[derive(Debug, Clone, Default)]
pub struct DropFlag(Arc<AtomicBool>);

impl DropFlag {
    /// Creates a flag that is initially unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once the probed stream has been dropped.
    pub fn is_dropped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A transparent stream wrapper that sets a [`DropFlag`] when dropped.
pub struct DropProbe<S> {
    inner: S,
    flag: DropFlag,
}

impl<S> DropProbe<S> {
    /// Wraps `inner`, returning the probe and the flag to observe.
    pub fn new(inner: S) -> (Self, DropFlag) {
        let flag = DropFlag::new();
        (
            Self {
                inner,
                flag: flag.clone(),
            },
            flag,
        )
    }
}

impl<S> Drop for DropProbe<S> {
    fn drop(&mut self) {
        self.flag.0.store(true, Ordering::Release);
    }
}

impl<S> Stream for DropProbe<S>
where
    S: Stream + Unpin,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
