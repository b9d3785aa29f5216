use arithmetic_evaluator::interpreter::analyze;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let programs = [
        "x = 3 + 4 * 2;".to_string(),
        "int a = 5;\nint b = 10;\nint sum = a + b * (a - b) / 2 ^ 3;".to_string(),
        "double r = ((1 + 2) * (3 + 4)) % 5 - 6 / (7 + 8) ^ 2;".to_string(),
        "/* comment */ float f = 2.5; // trailing\nstring s = \"Hello\";\nfloat p = f * f * f;"
            .to_string(),
    ];
    for program in programs {
        group.throughput(Throughput::Bytes(program.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(&program),
            &program,
            |bencher, program| {
                bencher.iter(|| analyze(program));
            },
        );
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
