// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Marble diagram parser.

use std::collections::HashMap;

use crate::notification::{Frame, Recorded};

/// Errors raised while parsing a marble diagram.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarbleError {
    /// A value character has no entry in the value map.
    #[error("unknown value character `{0}` in marble diagram")]
    UnknownValue(char),
    /// A `(` group was opened inside another group.
    #[error("nested group in marble diagram")]
    NestedGroup,
    /// A group was opened but never closed, or closed without being open.
    #[error("unbalanced group in marble diagram")]
    UnbalancedGroup,
    /// A value or terminal marker appeared after `|` or `#`.
    #[error("notification after terminal marker in marble diagram")]
    AfterTerminal,
}

/// Parses a marble diagram into frame-stamped notifications.
///
/// Every character advances virtual time by one frame, except ASCII
/// whitespace (ignored entirely). Inside a `( … )` group all notifications
/// are stamped with the frame of the `(`, while each character of the group
/// still consumes a frame. Value characters are resolved through `values`.
///
/// A diagram without `|` or `#` describes an open sequence that never
/// terminates.
pub fn parse_diagram<T: Clone>(
    diagram: &str,
    values: &HashMap<char, T>,
) -> Result<Vec<Recorded<T>>, MarbleError> {
    let mut recorded = Vec::new();
    let mut frame: Frame = 0;
    let mut group_start: Option<Frame> = None;
    let mut terminated = false;

    for ch in diagram.chars() {
        if ch.is_ascii_whitespace() {
            continue;
        }

        match ch {
            '(' => {
                if terminated {
                    return Err(MarbleError::AfterTerminal);
                }
                if group_start.is_some() {
                    return Err(MarbleError::NestedGroup);
                }
                group_start = Some(frame);
                frame += 1;
            }
            ')' => {
                if group_start.take().is_none() {
                    return Err(MarbleError::UnbalancedGroup);
                }
                frame += 1;
            }
            '-' => {
                frame += 1;
            }
            '|' | '#' => {
                if terminated {
                    return Err(MarbleError::AfterTerminal);
                }
                let at = group_start.unwrap_or(frame);
                recorded.push(if ch == '|' {
                    Recorded::complete(at)
                } else {
                    Recorded::error(at)
                });
                terminated = true;
                frame += 1;
            }
            value_char => {
                if terminated {
                    return Err(MarbleError::AfterTerminal);
                }
                let value = values
                    .get(&value_char)
                    .cloned()
                    .ok_or(MarbleError::UnknownValue(value_char))?;
                let at = group_start.unwrap_or(frame);
                recorded.push(Recorded::value(at, value));
                frame += 1;
            }
        }
    }

    if group_start.is_some() {
        return Err(MarbleError::UnbalancedGroup);
    }
    Ok(recorded)
}
