use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use csv_intake::preview::{PreviewOptions, build_preview};
use csv_intake::sniff::{SniffConfig, sniff_delimiter};

fn synthetic_upload(rows: usize) -> Vec<u8> {
    let mut data = String::from("order_id,customer_id,product,quantity,unit_price,order_date\n");
    for idx in 0..rows {
        data.push_str(&format!(
            "{},{},item-{},{},{}.50,2024-07-{:02}\n",
            1000 + idx,
            idx % 97,
            idx,
            idx % 12 + 1,
            idx % 900 + 100,
            idx % 28 + 1
        ));
    }
    data.into_bytes()
}

fn bench_sniff(c: &mut Criterion) {
    let upload = synthetic_upload(200);
    let config = SniffConfig::default();
    c.bench_function("sniff_delimiter_1kb_prefix", |b| {
        b.iter(|| sniff_delimiter(black_box(&upload), &config));
    });
}

fn bench_preview(c: &mut Criterion) {
    let upload = synthetic_upload(5000);
    let options = PreviewOptions::default();
    c.bench_function("build_preview_bounded", |b| {
        b.iter(|| build_preview(black_box(&upload), &options).expect("preview"));
    });
}

criterion_group!(benches, bench_sniff, bench_preview);
criterion_main!(benches);
