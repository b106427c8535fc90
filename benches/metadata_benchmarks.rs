//! Benchmarking for metadata methods -- XML extraction from `.emi`
//! bytes of various sizes, and stem matching of large selections.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use criterion::BenchmarkId;
use feimeta;

/// An `.emi`-like blob: `junk_bytes` of binary before the XML block,
/// `n_entries` `Data` elements inside it.
fn synthetic_emi(junk_bytes : usize, n_entries : usize) -> Vec<u8> {
    let mut bytes : Vec<u8> = (0..junk_bytes).map(|i| (i % 251) as u8).collect();
    bytes.extend_from_slice(b"<ObjectInfo><ExperimentalDescription>");
    for i in 0..n_entries {
        bytes.extend_from_slice(
            format!("<Data><Label>Field {}</Label><Value>{}</Value></Data>", i, i * 3).as_bytes()
        );
    }
    bytes.extend_from_slice(b"</ExperimentalDescription></ObjectInfo>");
    bytes
}

fn criterion_benchmark_emi_extraction(c: &mut Criterion) {
    let mut read_bench = c.benchmark_group("EMI extraction benchmarks");

    for (junk, entries) in [(1 << 10, 40), (1 << 20, 40), (1 << 20, 4000)] {
        let bytes = synthetic_emi(junk, entries);
        read_bench.bench_with_input(
            BenchmarkId::new(format!("Parse {} entries", entries), junk),
            &bytes.as_slice(),
            |bench, bytes| {
                bench.iter(|| black_box(feimeta::parse_emi_bytes(bytes).unwrap()))
            },
        );
    }

    read_bench.bench_with_input(
        BenchmarkId::new("Search 1 MB without markers", 1 << 20),
        &synthetic_emi(1 << 20, 0)[..1 << 20],
        |bench, bytes| {
            bench.iter(|| black_box(feimeta::parse_emi_bytes(bytes).is_err()))
        },
    );
}

fn criterion_benchmark_matching(c: &mut Criterion) {
    let mut match_bench = c.benchmark_group("Matching benchmarks");
    match_bench.sample_size(20);

    for n in [10usize, 1000] {
        let emis : Vec<String> = (0..n).map(|i| format!("/data/Acq_{:04}.emi", i)).collect();
        // Reverse order, so every emi has to scan
        let sers : Vec<String> = (0..n).rev().map(|i| format!("/data/Acq_{:04}_1.ser", i)).collect();
        match_bench.bench_with_input(
            BenchmarkId::new("Match pairs", n),
            &(emis, sers),
            |bench, (emis, sers)| {
                bench.iter(|| black_box(feimeta::match_files(emis, sers).unwrap()))
            },
        );
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark_emi_extraction, criterion_benchmark_matching,
);
criterion_main!(benches);
