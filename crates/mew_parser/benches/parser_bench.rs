use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mew_parser::SyntaxTree;

// A medium-size Mew source with every statement form
const MEW_SOURCE: &str = r#"
// External functions provided by the host
extern fn print(value: string);
extern fn print(value: int);
extern fn read() -> string;

fn fib(n: int) -> int {
    if n < 2 {
        return n;
    }
    return fib(n - 1) + fib(n - 2);
}

fn sum(limit: int) -> int {
    let total = 0;
    let i = 0;
    while i < limit {
        total = total + i;
        i = i + 1;
    }
    return total;
}

fn classify(value: int) -> string {
    if value % 15 == 0 {
        return "fizzbuzz";
    } else if value % 5 == 0 {
        return "buzz";
    } else if value % 3 == 0 {
        return "fizz";
    }
    return "none";
}

fn search(limit: int, target: int) -> bool {
    let i = 0;
    loop {
        if i >= limit or i == target {
            break;
        }
        if !(i % 2 == 0) and i > 3 {
            i = i + 1;
            continue;
        }
        i = i + 1;
    }
    return i == target;
}

let count = sum(100);
print(count);
print(fib(10));
print(classify(count));
"#;

// The same source with a sprinkling of syntax errors
const BROKEN_SOURCE: &str = r#"
fn fib(n: int -> int {
    if n < 2 {
        return n
    }
    return fib(n - 1) + fib(n - 2;
}

fn sum(limit: ) -> int {
    let = 0;
    while i < limit {
        total = total + ;
    }
}

let count = sum(100)
print(count);
"#;

fn bench_lex(c: &mut Criterion) {
    c.bench_function("lex_medium", |b| {
        b.iter(|| mew_lexer::scan("bench.mew", black_box(MEW_SOURCE)))
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_medium", |b| {
        b.iter(|| SyntaxTree::parse("bench.mew", black_box(MEW_SOURCE)))
    });
}

fn bench_parse_with_errors(c: &mut Criterion) {
    c.bench_function("parse_recovery", |b| {
        b.iter(|| SyntaxTree::parse("bench.mew", black_box(BROKEN_SOURCE)))
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let large = MEW_SOURCE.repeat(50);
    c.bench_function("parse_large", |b| {
        b.iter(|| SyntaxTree::parse("bench.mew", black_box(large.as_str())))
    });
}

criterion_group!(benches, bench_lex, bench_parse, bench_parse_with_errors, bench_parse_large);
criterion_main!(benches);
