use bucket_table::Table;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::thread;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_add_serial(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(40_000).map(key).collect();
    c.bench_function("table_add_entry_serial_40k", |b| {
        b.iter_batched(
            Table::new,
            |t| {
                for (i, k) in keys.iter().enumerate() {
                    t.add_entry(k, i as u32);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_add_parallel(c: &mut Criterion) {
    const THREADS: usize = 4;
    let keys: Vec<_> = lcg(3).take(40_000).map(key).collect();
    c.bench_function("table_add_entry_4_threads_40k", |b| {
        b.iter_batched(
            Table::new,
            |t| {
                thread::scope(|s| {
                    for chunk in keys.chunks(keys.len() / THREADS) {
                        let t = &t;
                        s.spawn(move || {
                            for (i, k) in chunk.iter().enumerate() {
                                t.add_entry(k, i as u32);
                            }
                        });
                    }
                });
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("table_get_hit", |b| {
        let t = Table::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.add_entry(k, i as u32);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("table_get_miss", |b| {
        let t = Table::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            t.add_entry(&key(x), i as u32);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in the table
            let k = key(miss.next().unwrap());
            black_box(t.get(&k));
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_add_serial, bench_add_parallel, bench_get_hit, bench_get_miss
}
criterion_main!(benches);
