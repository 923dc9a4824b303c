use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use wr_phaser::WriterReaderPhaser;

// Benchmark 1: Single-threaded writer enter/exit overhead
fn bench_single_thread_enter_exit(c: &mut Criterion) {
    c.bench_function("wr_phaser_single_thread_enter_exit", |b| {
        let phaser = WriterReaderPhaser::new();

        b.iter(|| {
            let token = phaser.writer_enter();
            black_box(token);
            phaser.writer_exit(token);
        });
    });

    c.bench_function("wr_phaser_single_thread_section", |b| {
        let phaser = WriterReaderPhaser::new();

        b.iter(|| {
            let _section = phaser.writer_critical_section();
            black_box(());
        });
    });

    c.bench_function("crossbeam_epoch_single_thread_pin_unpin", |b| {
        b.iter(|| {
            let _guard = crossbeam_epoch::pin();
            black_box(());
        });
    });

    c.bench_function("antidote_mutex_single_thread_lock_unlock", |b| {
        let mutex = antidote::Mutex::new(0u64);

        b.iter(|| {
            let mut guard = mutex.lock();
            *guard += 1;
            black_box(&*guard);
        });
    });
}

// Benchmark 2: Contended writers recording into a shared counter
fn bench_concurrent_writers(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_writers");
    group.sample_size(10);

    for num_threads in [2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("wr_phaser", num_threads),
            num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let phaser = Arc::new(WriterReaderPhaser::new());
                    let counter = Arc::new(AtomicU64::new(0));

                    let handles: Vec<_> = (0..num_threads)
                        .map(|_| {
                            let p = phaser.clone();
                            let c = counter.clone();

                            thread::spawn(move || {
                                for _ in 0..1000 {
                                    let _section = p.writer_critical_section();
                                    c.fetch_add(1, Ordering::Relaxed);
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        let _ = handle.join();
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("crossbeam_epoch", num_threads),
            num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let counter = Arc::new(AtomicU64::new(0));

                    let handles: Vec<_> = (0..num_threads)
                        .map(|_| {
                            let c = counter.clone();

                            thread::spawn(move || {
                                for _ in 0..1000 {
                                    let _guard = crossbeam_epoch::pin();
                                    c.fetch_add(1, Ordering::Relaxed);
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        let _ = handle.join();
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("antidote_mutex", num_threads),
            num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let mutex = Arc::new(antidote::Mutex::new(0u64));

                    let handles: Vec<_> = (0..num_threads)
                        .map(|_| {
                            let m = mutex.clone();

                            thread::spawn(move || {
                                for _ in 0..1000 {
                                    *m.lock() += 1;
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        let _ = handle.join();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_thread_enter_exit,
    bench_concurrent_writers
);
criterion_main!(benches);
