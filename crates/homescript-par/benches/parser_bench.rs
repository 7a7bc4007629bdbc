//! Parser benchmarks. Run with `cargo bench --package homescript-par`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use homescript_par::parse;

fn parse_source(source: &str) {
    let (_program, _soft_errors, _hard_error) = parse(black_box(source), "bench.hms");
}

fn bench_parser_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_simple");

    let source = "let x = 42;";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("let_statement", |b| b.iter(|| parse_source(source)));

    group.finish();
}

fn bench_parser_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_functions");

    let source = r#"
        fn main() {
            let x = 42;
            let y = x + 1;
            return y;
        }

        fn fib(n: int) -> int {
            if n <= 1 {
                return n;
            }
            return fib(n - 1) + fib(n - 2);
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("functions", |b| b.iter(|| parse_source(source)));

    group.finish();
}

fn bench_parser_singletons_and_impls(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_singletons_impls");

    let source = r#"
        $Light = {
            on: bool,
            brightness: int,
        };

        impl Dimmable with { brightness } for $Light {
            fn setBrightness(level: int) {
                self.brightness = level;
            }

            fn turnOn() {
                self.on = true;
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("singletons_impls", |b| b.iter(|| parse_source(source)));

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = r#"
        fn classify(n: int) -> str {
            if n < 0 {
                "negative"
            } else if n == 0 {
                "zero"
            } else {
                match n {
                    1 => "one",
                    2 | 3 => "few",
                    _ => {
                        let sum = 0;
                        for i in 0..n {
                            sum = sum + i;
                        }
                        "many"
                    },
                }
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("control_flow", |b| b.iter(|| parse_source(source)));

    group.finish();
}

fn bench_parser_imports_and_triggers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_imports_triggers");

    let source = r#"
        import { type Light, templ Dimmable, turnOn } from lights;

        #[trigger on motion("hallway")]
        fn onHallwayMotion() {
            trigger turnOnLight in motion("hallway", 5);
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("imports_triggers", |b| b.iter(|| parse_source(source)));

    group.finish();
}

fn bench_parser_large_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_large_program");

    let mut source = String::new();
    for i in 0..500 {
        source.push_str(&format!("fn f{i}(a: int, b: int) -> int {{ a + b * {i} }}\n"));
    }

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("five_hundred_functions", |b| b.iter(|| parse_source(&source)));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_simple,
    bench_parser_functions,
    bench_parser_singletons_and_impls,
    bench_parser_control_flow,
    bench_parser_imports_and_triggers,
    bench_parser_large_program
);
criterion_main!(benches);
