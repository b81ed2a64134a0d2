// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};
use futures::stream::{self, StreamExt};
use rill_core::StreamItem;
use rill_flatten::{ConcatMapExt, MergeMapExt};
use tokio::runtime::Builder;

fn make_source(size: usize) -> impl futures::Stream<Item = StreamItem<usize>> {
    stream::iter((0..size).map(StreamItem::Value))
}

pub fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_overhead");
    let sizes = [1_000usize, 10_000usize];
    let inner_len = 4usize;

    for &size in &sizes {
        group.throughput(Throughput::Elements((size * inner_len) as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("concat_map_{size}")),
            &size,
            |bencher, &size| {
                let rt = Builder::new_current_thread().build().unwrap();
                bencher.iter(|| {
                    rt.block_on(async {
                        let combined = make_source(size).concat_map(|value| {
                            stream::iter((0..inner_len).map(move |i| StreamItem::Value(value + i)))
                        });
                        let count = combined.count().await;
                        black_box(count);
                    });
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("merge_map_{size}")),
            &size,
            |bencher, &size| {
                let rt = Builder::new_current_thread().build().unwrap();
                bencher.iter(|| {
                    rt.block_on(async {
                        let combined = make_source(size).merge_map(|value| {
                            stream::iter((0..inner_len).map(move |i| StreamItem::Value(value + i)))
                        });
                        let count = combined.count().await;
                        black_box(count);
                    });
                });
            },
        );
    }

    group.finish();
}
