use aggregation_engine::aggregate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dataset::Row;

fn sales_rows(count: usize) -> Vec<Row> {
    let regions = ["North", "South", "East", "West"];
    let products = ["Apples", "Oranges", "Pears", "Plums", "Figs"];
    (0..count)
        .map(|i| {
            Row::new()
                .with_text("region", regions[i % regions.len()])
                .with_text("product", products[i % products.len()])
                .with_number("sales", (i % 97) as f64 * 1.5)
                .with_text("note", "ok")
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for &size in &[1_000usize, 100_000] {
        let rows = sales_rows(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("one_key_sum", size), &rows, |b, rows| {
            b.iter(|| aggregate(black_box(rows), &["region"], &["sales"]))
        });

        group.bench_with_input(BenchmarkId::new("two_keys_sum_count", size), &rows, |b, rows| {
            b.iter(|| aggregate(black_box(rows), &["region", "product"], &["sales", "note"]))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
