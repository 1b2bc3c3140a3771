use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::{build_operator_tree, DefaultNumericTypes};
use scicalc_rs::ast::{AstBuilder, ShuntingYard, Tokenizer};
use scicalc_rs::{calc_fn, Calculator, Context};

#[calc_fn]
fn square(x: f64) -> Result<f64, String> {
    Ok(x * x)
}

/// Benchmark simple arithmetic expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let _ = pretty_env_logger::try_init();
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let mut calculator = Calculator::new();

    let expr = "2 + 3";
    let parsed = calculator.parse(expr).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("pipeline_arithmetic", |b| {
        b.iter(|| calculator.evaluate(black_box(expr)).unwrap())
    });

    group.bench_function("pre_parsed_arithmetic", |b| {
        b.iter(|| calculator.evaluate_ast(black_box(&parsed)).unwrap())
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0) + black_box(3.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark complex arithmetic expressions
fn benchmark_complex_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Complex arithmetic Expression Evaluation");

    let mut calculator = Calculator::new();

    let expr = "(10 + 20) * 3 / (4 - 1) + 5 ^ 2 % 7";
    let parsed = calculator.parse(expr).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("pipeline_complex_arithmetic", |b| {
        b.iter(|| calculator.evaluate(black_box(expr)).unwrap())
    });

    group.bench_function("pre_parsed_complex_arithmetic", |b| {
        b.iter(|| calculator.evaluate_ast(black_box(&parsed)).unwrap())
    });

    group.bench_function("native_rust_complex_arithmetic", |b| {
        b.iter(|| black_box((10.0 + 20.0) * 3.0 / (4.0 - 1.0) + 25.0f64 % 7.0))
    });

    group.bench_function("meval_complex_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_complex_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_complex_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark built-in and registered function calls
fn benchmark_function_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("Function Call Evaluation");
    let mut calculator = Calculator::new();
    calculator.register_function("square", 1, square).unwrap();

    group.bench_function("builtin_function_call", |b| {
        b.iter(|| calculator.evaluate(black_box("sqrt(16) + abs(-4)")).unwrap())
    });

    group.bench_function("two_argument_function_call", |b| {
        b.iter(|| calculator.evaluate(black_box("logbase(2, 1024)")).unwrap())
    });

    group.bench_function("registered_function_call", |b| {
        b.iter(|| calculator.evaluate(black_box("square(4)")).unwrap())
    });

    group.bench_function("meval_function_call", |b| {
        b.iter(|| meval::eval_str(black_box("sqrt(16) + abs(-4)")).unwrap())
    });

    group.bench_function("native_rust_function_call", |b| {
        b.iter(|| black_box(16.0f64).sqrt() + black_box(-4.0f64).abs())
    });
}

/// Benchmark the individual stages
fn benchmark_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline Stages");
    let mut context = Context::new();

    let expr = "x = sin(30) * 2 ^ 3 ^ 2 - logbase(2, 8) / (1 + -pi)";
    let tokens = Tokenizer::tokenize(expr, &mut context).unwrap();
    let postfix = ShuntingYard::to_postfix(&tokens, &context.functions).unwrap();

    group.bench_function("tokenize", |b| {
        b.iter(|| Tokenizer::tokenize(black_box(expr), &mut context).unwrap())
    });

    group.bench_function("to_postfix", |b| {
        b.iter(|| ShuntingYard::to_postfix(black_box(&tokens), &context.functions).unwrap())
    });

    group.bench_function("build", |b| {
        b.iter(|| AstBuilder::build(black_box(&postfix), &context.functions).unwrap())
    });
}

/// Grouping benchmarks
criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_complex_arithmetic,
    benchmark_function_calls,
    benchmark_stages,
);
criterion_main!(benches);
