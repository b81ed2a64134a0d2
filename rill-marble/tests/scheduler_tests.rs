// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::HashMap;

use futures::StreamExt;
use rill_marble::{MarbleScheduler, Notification, Recorded};

fn values() -> HashMap<char, i32> {
    HashMap::from([('a', 1), ('b', 3), ('c', 5)])
}

#[test]
fn test_cold_sequence_replays_its_diagram() {
    // Arrange
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a--b-|", &values());

    // Act
    let recorded = scheduler.run(source);

    // Assert
    assert_eq!(
        recorded,
        vec![
            Recorded::value(1, 1),
            Recorded::value(4, 3),
            Recorded::complete(6),
        ]
    );
}

#[test]
fn test_group_notifications_share_a_frame() {
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("--(ab)|", &values());

    let recorded = scheduler.run(source);

    assert_eq!(
        recorded,
        vec![
            Recorded::value(2, 1),
            Recorded::value(2, 3),
            Recorded::complete(6),
        ]
    );
}

#[test]
fn test_error_marker_terminates_the_run() {
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a-#", &values());

    let recorded = scheduler.run(source);

    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[1], Recorded::error(3));
}

#[test]
fn test_open_sequence_never_completes() {
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a---", &values());

    let recorded = scheduler.run(source);

    assert_eq!(recorded, vec![Recorded::value(1, 1)]);
    assert!(recorded
        .iter()
        .all(|entry| entry.notification != Notification::Complete));
}

#[test]
fn test_mapped_stream_keeps_its_frames() {
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a--b|", &values());
    let mapped = source.map(|item| item.map(|v| v * 10));

    let recorded = scheduler.run(mapped);

    assert_eq!(
        recorded,
        vec![
            Recorded::value(1, 10),
            Recorded::value(4, 30),
            Recorded::complete(5),
        ]
    );
}

#[test]
fn test_cold_clone_subscribes_relative_to_its_own_subscription() {
    // The second cold starts when the first completes, so its frames are
    // offset by the chain point.
    let scheduler = MarbleScheduler::new();
    let first = scheduler.cold("a-b|", &values());
    let second = first.clone();

    let recorded = scheduler.run(first.chain(second));

    assert_eq!(
        recorded,
        vec![
            Recorded::value(0, 1),
            Recorded::value(2, 3),
            // chained sequence subscribed at frame 3
            Recorded::value(3, 1),
            Recorded::value(5, 3),
            Recorded::complete(6),
        ]
    );
}

#[test]
fn test_late_hot_subscriber_misses_earlier_values() {
    // A cold prefix completing at frame 4 delays the hot subscription.
    let scheduler = MarbleScheduler::new();
    let prefix = scheduler.cold("---c|", &values());
    let hot = scheduler.hot("a-a-a-a|", &values());

    let recorded = scheduler.run(prefix.chain(hot));

    assert_eq!(
        recorded,
        vec![
            Recorded::value(3, 5),
            // hot values at frames 0 and 2 are missed
            Recorded::value(4, 1),
            Recorded::value(6, 1),
            Recorded::complete(7),
        ]
    );
}

#[test]
fn test_hot_terminal_in_the_past_is_observed_at_subscription() {
    let scheduler = MarbleScheduler::new();
    let prefix = scheduler.cold("-----c|", &values());
    let hot = scheduler.hot("a|", &values());

    let recorded = scheduler.run(prefix.chain(hot));

    assert_eq!(
        recorded,
        vec![Recorded::value(5, 5), Recorded::complete(6)]
    );
}

#[test]
fn test_expect_accepts_a_matching_diagram() {
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a--b-|", &values());
    let mapped = source.map(|item| item.map(|v| v * 10));

    scheduler.expect(mapped, "-x--y-|", &HashMap::from([('x', 10), ('y', 30)]));
}

#[test]
#[should_panic(expected = "recorded sequence mismatch")]
fn test_expect_rejects_a_diverging_diagram() {
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a|", &values());

    scheduler.expect(source, "--a|", &values());
}
