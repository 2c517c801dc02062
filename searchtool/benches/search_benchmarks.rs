use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use searchtool::search::scanner::{find_byte, find_either};
use searchtool::{search, SearchConfig, SearchTerm};
use std::fs;
use tempfile::tempdir;

fn create_haystack(len: usize) -> Vec<u8> {
    let line = b"Line TODO: fix bug FIXME: optimize line NOTE: important task\n";
    line.iter().copied().cycle().take(len).collect()
}

fn bench_scanner(c: &mut Criterion) {
    let mut haystack = vec![b'.'; 1 << 20];
    let last = haystack.len() - 1;
    haystack[last] = b'Z';

    let mut group = c.benchmark_group("Scanner");
    group.throughput(Throughput::Bytes(haystack.len() as u64));
    group.bench_function("find_byte", |b| {
        b.iter(|| black_box(find_byte(black_box(&haystack), b'Z')))
    });
    group.bench_function("find_either", |b| {
        b.iter(|| black_box(find_either(black_box(&haystack), b'z', b'Z')))
    });
    group.bench_function("naive_either", |b| {
        b.iter(|| {
            black_box(
                black_box(&haystack)
                    .iter()
                    .position(|&x| x == b'z' || x == b'Z'),
            )
        })
    });
    group.finish();
}

fn bench_matcher(c: &mut Criterion) {
    let haystack = create_haystack(1 << 20);
    let terms = ["TODO", "important task", "optimize line NOTE"];

    let mut group = c.benchmark_group("Matcher");
    group.throughput(Throughput::Bytes(haystack.len() as u64));
    for term in terms {
        for case_insensitive in [false, true] {
            let prepared = SearchTerm::new(term, case_insensitive).unwrap();
            let id = format!("{}/{}", term, if case_insensitive { "i" } else { "s" });
            group.bench_with_input(BenchmarkId::from_parameter(id), &prepared, |b, t| {
                b.iter(|| black_box(t.find_iter(&haystack).count()))
            });
        }
    }
    group.finish();
}

fn bench_mapped_search(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("haystack.txt");
    fs::write(&file_path, create_haystack(8 << 20)).unwrap();

    let config = SearchConfig::new("FIXME", &file_path);
    c.bench_function("mapped_search", |b| {
        b.iter(|| black_box(search(&config, &mut std::io::sink()).unwrap()))
    });
}

criterion_group!(benches, bench_scanner, bench_matcher, bench_mapped_search);
criterion_main!(benches);
