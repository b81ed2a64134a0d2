// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and infrastructure for the rill workspace.

pub mod drop_probe;
pub mod error_injection;
pub mod helpers;
pub mod test_channel;

pub use self::drop_probe::{DropFlag, DropProbe};
pub use self::error_injection::ErrorInjectingStream;
pub use self::helpers::{assert_no_element_emitted, expect_next_value, unwrap_stream};
pub use self::test_channel::test_channel;
