use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pglit::{
    parse_array, parse_composite, serialize_array, serialize_composite, Array, Dim, FromStrCodec,
    IntSubtype, RangeType, TextCodec,
};

fn benchmark_parse_flat_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_flat_array");
    let codec = FromStrCodec::<i64>::new();

    for size in [10, 100, 1000].iter() {
        let text = {
            let items: Vec<String> = (0..*size).map(|i| i.to_string()).collect();
            format!("{{{}}}", items.join(","))
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_array(black_box(text), &codec).unwrap())
        });
    }
    group.finish();
}

fn benchmark_parse_quoted_array(c: &mut Criterion) {
    let items: Vec<String> = (0..100).map(|i| format!("\"item, {i}\"")).collect();
    let text = format!("{{{}}}", items.join(","));

    c.bench_function("parse_quoted_array", |b| {
        b.iter(|| parse_array(black_box(&text), &TextCodec).unwrap())
    });
}

fn benchmark_serialize_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_matrix");
    let codec = FromStrCodec::<i64>::new();

    for size in [4, 16, 64].iter() {
        let dims = vec![Dim::new(*size), Dim::new(*size)];
        let elements = (0..(size * size) as i64).map(Some).collect();
        let array = Array::new(dims, elements).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &array, |b, array| {
            b.iter(|| serialize_array(black_box(array), &codec).unwrap())
        });
    }
    group.finish();
}

fn benchmark_composite_roundtrip(c: &mut Criterion) {
    let text = "(12345,\"a field, with commas\",,NULL,\"quoted \\\"inner\\\"\",plain)";

    c.bench_function("composite_roundtrip", |b| {
        b.iter(|| {
            let row = parse_composite(black_box(text)).unwrap();
            serialize_composite(black_box(&row)).unwrap()
        })
    });
}

fn benchmark_range_parse(c: &mut Criterion) {
    let ty = RangeType::new(IntSubtype);
    let codec = FromStrCodec::<i64>::new();

    c.bench_function("range_parse", |b| {
        b.iter(|| ty.parse(black_box("(1,100000]"), &codec).unwrap())
    });
}

fn benchmark_range_algebra(c: &mut Criterion) {
    let ty = RangeType::new(IntSubtype);
    let codec = FromStrCodec::<i64>::new();
    let a = ty.parse("[1,5000)", &codec).unwrap();
    let b_range = ty.parse("[2500,9000)", &codec).unwrap();

    c.bench_function("range_overlap_and_intersect", |b| {
        b.iter(|| {
            let overlaps = ty.overlaps(black_box(&a), black_box(&b_range));
            let both = ty.intersect(black_box(&a), black_box(&b_range));
            (overlaps, both)
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_flat_array,
    benchmark_parse_quoted_array,
    benchmark_serialize_matrix,
    benchmark_composite_roundtrip,
    benchmark_range_parse,
    benchmark_range_algebra
);
criterion_main!(benches);
