use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use dec128::{div_precision_scale, Decimal128};

fn bench_parsing(c: &mut Criterion) {
    c.bench_function("dec128_parsing", |b| {
        b.iter(|| black_box(Decimal128::parse(black_box("-12345678901234.9876543")).unwrap()));
    });
}

fn bench_formatting(c: &mut Criterion) {
    c.bench_function("dec128_formatting", |b| {
        let v = Decimal128::parse("-12345678901234.9876543").unwrap().value;
        b.iter(|| black_box(black_box(v).to_string_with_scale(7)));
    });
}

fn bench_multiplication(c: &mut Criterion) {
    c.bench_function("dec128_multiplication", |b| {
        let x = Decimal128::from_i64(123_456_789);
        let y = Decimal128::from_i64(9_876_543);
        b.iter(|| black_box(black_box(x).wrapping_mul(black_box(y))));
    });
}

fn bench_division_single_limb(c: &mut Criterion) {
    c.bench_function("dec128_division_single_limb", |b| {
        let x = Decimal128::from_i128(10i128.pow(30) + 7);
        let y = Decimal128::from_i64(9_876_543);
        b.iter(|| black_box(black_box(x).divide(black_box(y)).unwrap()));
    });
}

fn bench_division_multi_limb(c: &mut Criterion) {
    c.bench_function("dec128_division_multi_limb", |b| {
        let x = Decimal128::from_i128(10i128.pow(37) + 123_456_789);
        let y = Decimal128::from_i128(10i128.pow(19) + 3);
        b.iter(|| black_box(black_box(x).divide(black_box(y)).unwrap()));
    });
}

fn bench_rescale(c: &mut Criterion) {
    c.bench_function("dec128_rescale", |b| {
        let x = Decimal128::from_i64(-12345678);
        b.iter(|| black_box(black_box(x).rescale(3, 12).unwrap()));
    });
}

fn bench_divide_exact(c: &mut Criterion) {
    c.bench_function("dec128_divide_exact", |b| {
        let x = Decimal128::from_i64(123);
        let y = Decimal128::from_i64(235_579);
        let (precision, scale) = div_precision_scale(3, 3, 6, 3);
        b.iter(|| {
            black_box(
                black_box(x)
                    .divide_exact(3, black_box(y), 3, precision, scale)
                    .unwrap(),
            )
        });
    });
}

fn bench_from_f64(c: &mut Criterion) {
    c.bench_function("dec128_from_f64", |b| {
        b.iter(|| black_box(Decimal128::from_f64(black_box(12345678.456789), 16, 6).unwrap()));
    });
}

fn bench_to_f64(c: &mut Criterion) {
    c.bench_function("dec128_to_f64", |b| {
        let v = Decimal128::from_i128(12_345_678_456_789);
        b.iter(|| black_box(black_box(v).to_f64(6)));
    });
}

criterion_group!(
    benches,
    bench_parsing,
    bench_formatting,
    bench_multiplication,
    bench_division_single_limb,
    bench_division_multi_limb,
    bench_rescale,
    bench_divide_exact,
    bench_from_f64,
    bench_to_f64,
);
criterion_main!(benches);
