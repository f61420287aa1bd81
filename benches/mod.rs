use criterion::{criterion_group, criterion_main};


use art_ops::register_benchmarks as register_art_benchmarks;
use book_ops::register_benchmarks as register_book_benchmarks;

// Define the benchmark groups
criterion_group!(benches, register_art_benchmarks, register_book_benchmarks);

criterion_main!(benches);
