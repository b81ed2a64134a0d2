// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-selected flattening policy.
//!
//! The four flattening strategies live behind one interface: a
//! [`FlattenPolicy`] value picks the scheduling strategy, and
//! [`FlattenMapExt::flatten_map`] dispatches to the matching operator. This
//! is plain enum dispatch; every policy is still the same statically-typed
//! adapter underneath.

use std::pin::Pin;

use futures::Stream;
use rill_core::StreamItem;

use crate::concat_map::ConcatMapExt;
use crate::exhaust_map::ExhaustMapExt;
use crate::merge_map::MergeMapExt;
use crate::switch_map::SwitchMapExt;

/// Strategy for flattening a stream of streams into one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenPolicy {
    /// Exactly one inner at a time; new source values are queued.
    Concat,
    /// Exactly one inner, always the latest; the previous inner is cancelled.
    Switch,
    /// All inners run concurrently.
    Merge,
    /// Exactly one inner; source values arriving while busy are dropped.
    Exhaust,
}

/// Extension trait providing policy-driven flattening.
pub trait FlattenMapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Maps each source value to an inner stream and flattens under the
    /// given [`FlattenPolicy`].
    ///
    /// Equivalent to calling the matching concrete operator
    /// (`concat_map`, `switch_map`, `merge_map`, `exhaust_map`); the return
    /// type is boxed because the four adapters are distinct types.
    fn flatten_map<F, R, U>(
        self,
        policy: FlattenPolicy,
        project: F,
    ) -> Pin<Box<dyn Stream<Item = StreamItem<U>>>>
    where
        Self: 'static,
        T: 'static,
        U: 'static,
        F: FnMut(T) -> R + 'static,
        R: Stream<Item = StreamItem<U>> + 'static,
    {
        match policy {
            FlattenPolicy::Concat => Box::pin(self.concat_map(project)),
            FlattenPolicy::Switch => Box::pin(self.switch_map(project)),
            FlattenPolicy::Merge => Box::pin(self.merge_map(project)),
            FlattenPolicy::Exhaust => Box::pin(self.exhaust_map(project)),
        }
    }
}

impl<T, S> FlattenMapExt<T> for S where S: Stream<Item = StreamItem<T>> {}
