// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod flatten;

use criterion::{criterion_group, criterion_main};
use flatten::bench_flatten;

criterion_group!(flatten_benches, bench_flatten);
criterion_main!(flatten_benches);
