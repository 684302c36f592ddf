//! Interpreter benchmarks for Dotling.

use std::fs;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dotling::interpreter::{Interpreter, Output};
use dotling::lexer::Scanner;
use dotling::parser::Parser;
use tempfile::TempDir;

/// Run a Dotling program from source code with a throwaway interpreter.
fn run_program(source: &str, search_root: &Path) {
    let tokens = Scanner::new(source).scan_tokens().expect("lexer error");
    let program = Parser::new(tokens).parse().expect("parser error");

    let (output, _buffer) = Output::buffer();
    let mut interpreter = Interpreter::with_output(vec![search_root.to_path_buf()], output);
    interpreter.interpret(&program).expect("runtime error");
}

/// Build a module tree of `width` sibling modules under one package, each
/// defining a function the importing script calls.
fn module_tree(width: usize) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("pkg")).expect("mkdir");
    fs::write(dir.path().join("pkg/mod.dtl"), "").expect("write init");
    for i in 0..width {
        fs::write(
            dir.path().join(format!("pkg/m{}.dtl", i)),
            format!("fn f{}() {{ return {}; }}\n", i, i),
        )
        .expect("write module");
    }
    dir
}

fn import_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("imports");

    let wide = module_tree(20);
    let mut wide_script = String::new();
    for i in 0..20 {
        wide_script.push_str(&format!("import pkg.m{};\n", i));
    }

    group.bench_function("load_20_siblings", |b| {
        b.iter(|| run_program(black_box(&wide_script), wide.path()))
    });

    let single = module_tree(1);
    let repeat_script = "import pkg.m0;\n".repeat(100);

    group.bench_function("reimport_100_times", |b| {
        b.iter(|| run_program(black_box(&repeat_script), single.path()))
    });

    group.finish();
}

fn evaluation_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    let concat = "let s = \"a\";\nlet t = s + s + s + s + s + s + s + s;\n";
    group.bench_function("string_concat", |b| {
        b.iter(|| run_program(black_box(concat), Path::new(".")))
    });

    let calls = "fn add(a, b) { return a + b; }\nlet total = add(add(1, 2), add(3, 4));\n";
    group.bench_function("nested_calls", |b| {
        b.iter(|| run_program(black_box(calls), Path::new(".")))
    });

    group.finish();
}

criterion_group!(benches, import_benchmarks, evaluation_benchmarks);
criterion_main!(benches);
