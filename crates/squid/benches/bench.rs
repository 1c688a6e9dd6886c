use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use squid::{OsRandom, RandSource, Squid, SquidGenerator, SystemClock, ThreadRandom, TimeSource};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource<u64> for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (split across threads for
// the contended benchmarks).
const TOTAL_IDS: usize = 4096;

fn bench_generator<T, R>(
    c: &mut Criterion,
    group_name: &str,
    generator_fn: impl Fn() -> SquidGenerator<T, R>,
) where
    T: TimeSource<u64>,
    R: RandSource,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_fn();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

fn bench_generator_contended<T, R>(
    c: &mut Criterion,
    group_name: &str,
    generator_fn: impl Fn() -> SquidGenerator<T, R>,
) where
    T: TimeSource<u64> + Send + Sync,
    R: RandSource + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);

    let max_threads = num_cpus::get().max(1);
    for thread_count in [1, 2, 4, 8, 16].into_iter().filter(|&n| n <= max_threads) {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(format!("elems/{TOTAL_IDS}/threads/{thread_count}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();

                for _ in 0..iters {
                    let generator = generator_fn();
                    let barrier = Arc::new(Barrier::new(thread_count + 1));
                    scope(|s| {
                        for _ in 0..thread_count {
                            let generator = &generator;
                            let barrier = Arc::clone(&barrier);
                            s.spawn(move || {
                                barrier.wait();
                                for _ in 0..ids_per_thread {
                                    black_box(generator.next_id());
                                }
                            });
                        }
                        barrier.wait();
                    });
                }

                start.elapsed()
            });
        });
    }

    group.finish();
}

// --- MOCK CLOCK ---

/// Single-threaded generation with a frozen clock, so every ID advances the
/// watermark.
fn benchmark_mock_sequential(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/thread_random", || {
        SquidGenerator::with_sources(FixedMockTime { millis: 1 }, ThreadRandom).unwrap()
    });
}

/// Shared generator across threads with a frozen clock. Threads compete on
/// the watermark CAS.
fn benchmark_mock_contended(c: &mut Criterion) {
    bench_generator_contended(c, "mock/contended/thread_random", || {
        SquidGenerator::with_sources(FixedMockTime { millis: 1 }, ThreadRandom).unwrap()
    });
}

// --- SYSTEM CLOCK ---

fn benchmark_system_sequential_os(c: &mut Criterion) {
    bench_generator(c, "system/sequential/os_random", || {
        SquidGenerator::with_sources(SystemClock, OsRandom).unwrap()
    });
}

fn benchmark_system_sequential_thread(c: &mut Criterion) {
    bench_generator(c, "system/sequential/thread_random", || {
        SquidGenerator::with_sources(SystemClock, ThreadRandom).unwrap()
    });
}

fn benchmark_system_contended_os(c: &mut Criterion) {
    bench_generator_contended(c, "system/contended/os_random", || {
        SquidGenerator::with_sources(SystemClock, OsRandom).unwrap()
    });
}

// --- TEXT FORM ---

fn benchmark_encode(c: &mut Criterion) {
    let generator = SquidGenerator::with_sources(SystemClock, ThreadRandom).unwrap();
    let ids: Vec<Squid> = generator.iter().take(TOTAL_IDS).collect();

    let mut group = c.benchmark_group("base32");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("encode/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for id in &ids {
                black_box(id.encode());
            }
        });
    });
    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let generator = SquidGenerator::with_sources(SystemClock, ThreadRandom).unwrap();
    let texts: Vec<String> = (0..TOTAL_IDS).map(|_| generator.new_squid()).collect();

    let mut group = c.benchmark_group("base32");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("decode/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for text in &texts {
                black_box(Squid::decode(black_box(text)).unwrap());
            }
        });
    });
    group.bench_function(format!("parse/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for text in &texts {
                black_box(generator.parse(black_box(text)).unwrap());
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential,
    benchmark_mock_contended, // CAS contention on the watermark
    // System clock
    benchmark_system_sequential_os,
    benchmark_system_sequential_thread,
    benchmark_system_contended_os,
    // Text form
    benchmark_encode,
    benchmark_decode,
);
criterion_main!(benches);
