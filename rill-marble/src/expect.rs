// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Frame-by-frame assertions over recorded sequences.

use std::fmt::Debug;

use crate::notification::{Notification, Recorded};

/// Asserts that two recorded sequences are equal, panicking with a
/// frame-by-frame listing of both sides on mismatch.
pub fn assert_recorded_eq<T: PartialEq + Debug>(actual: &[Recorded<T>], expected: &[Recorded<T>]) {
    if actual == expected {
        return;
    }
    panic!(
        "recorded sequence mismatch\n  expected:\n{}\n  actual:\n{}",
        format_recorded(expected),
        format_recorded(actual),
    );
}

fn format_recorded<T: Debug>(recorded: &[Recorded<T>]) -> String {
    if recorded.is_empty() {
        return "    (no notifications)".to_string();
    }
    recorded
        .iter()
        .map(|entry| {
            let rendered = match &entry.notification {
                Notification::Value(value) => format!("value {value:?}"),
                Notification::Complete => "complete".to_string(),
                Notification::Error => "error".to_string(),
            };
            format!("    frame {:>4}: {rendered}", entry.frame)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
