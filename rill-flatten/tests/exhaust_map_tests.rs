// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::StreamExt;
use rill_flatten::ExhaustMapExt;
use rill_marble::MarbleScheduler;

fn source_values() -> HashMap<char, i32> {
    HashMap::from([('a', 1), ('b', 3), ('c', 5)])
}

fn inner_values() -> HashMap<char, i32> {
    HashMap::from([('a', 10), ('b', 10), ('c', 10)])
}

#[test]
fn test_exhaust_map_ignores_source_values_while_an_inner_is_active() {
    // Arrange
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a---b-----c----|", &source_values());
    let inner = scheduler.cold("a-b-c-|", &inner_values());

    // Act
    let exhausted =
        source.exhaust_map(move |value| inner.clone().map(move |item| item.map(|iv| value * iv)));

    // Assert: `b` arrives at frame 5 while the first inner is active and is
    // dropped; `c` arrives at frame 11 after the inner completed at frame 7
    // and starts a new one.
    scheduler.expect(
        exhausted,
        "-a-a-a-----c-c-c-|",
        &HashMap::from([('a', 10), ('c', 50)]),
    );
}

#[test]
fn test_exhaust_map_never_projects_a_dropped_value() {
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a---b-----c----|", &source_values());
    let inner = scheduler.cold("a-b-c-|", &inner_values());
    let projections = Rc::new(Cell::new(0));
    let counter = Rc::clone(&projections);

    let exhausted = source.exhaust_map(move |value| {
        counter.set(counter.get() + 1);
        inner.clone().map(move |item| item.map(|iv| value * iv))
    });

    let _ = scheduler.run(exhausted);

    // `a` and `c` spawn inners; `b` is dropped without a projection.
    assert_eq!(projections.get(), 2);
}

#[test]
fn test_exhaust_map_with_a_never_completing_inner_drops_everything_else() {
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a--b--c|", &source_values());
    let inner = scheduler.cold("a-", &inner_values());

    let exhausted =
        source.exhaust_map(move |value| inner.clone().map(move |item| item.map(|iv| value * iv)));

    // The first inner never completes, so every later source value is
    // dropped and the output never completes.
    scheduler.expect(exhausted, "-a", &HashMap::from([('a', 10)]));
}

#[test]
fn test_exhaust_map_source_error_short_circuits() {
    let scheduler = MarbleScheduler::new();
    let source = scheduler.cold("-a#", &source_values());
    let inner = scheduler.cold("a---|", &inner_values());

    let exhausted =
        source.exhaust_map(move |value| inner.clone().map(move |item| item.map(|iv| value * iv)));

    scheduler.expect(exhausted, "-a#", &HashMap::from([('a', 10)]));
}
