//! Lexer benchmarks. Run with `cargo bench --package homescript-lex`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use homescript_lex::{Lexer, TokenKind};

fn lexer_token_count(source: &str) -> usize {
    let mut lexer = Lexer::new(source, "bench.hms");
    let mut count = 0;
    loop {
        let (tok, _) = lexer.next_token();
        count += 1;
        if tok.kind == TokenKind::Eof {
            break;
        }
    }
    count
}

fn bench_lexer_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "let x = 42; fn main() { let y = x + 1; return y; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_let", |b| b.iter(|| lexer_token_count(black_box("let x = 42;"))));

    group.bench_function("function_with_body", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_strings_and_comments(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings_comments");

    let source = concat!(
        "// header comment\n",
        "fn greet(name: str) -> str {\n",
        "    /* pick a greeting */\n",
        "    \"hello, \\u0041\" + name\n",
        "}\n",
    );
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("comment_and_string_heavy", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_large_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_large_program");

    let mut source = String::new();
    for i in 0..500 {
        source.push_str(&format!("let x{i} = {i} + {i} * 2;\n"));
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("five_hundred_lets", |b| {
        b.iter(|| lexer_token_count(black_box(&source)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_simple,
    bench_lexer_strings_and_comments,
    bench_lexer_large_program
);
criterion_main!(benches);
