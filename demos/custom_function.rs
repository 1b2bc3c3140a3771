use scicalc_rs::{calc_fn, Calculator};

#[calc_fn]
fn hypot(a: f64, b: f64) -> Result<f64, String> {
    Ok(a.hypot(b))
}

#[calc_fn]
fn inverse(x: f64) -> Result<f64, String> {
    if x == 0.0 {
        return Err("zero has no inverse".to_string());
    }
    Ok(1.0 / x)
}

fn main() {
    pretty_env_logger::init();

    let mut calculator = Calculator::new();
    calculator
        .register_function("hypot", 2, hypot)
        .expect("Failed to register hypot");
    calculator
        .register_function("inverse", 1, inverse)
        .expect("Failed to register inverse");
    calculator
        .register_function("clamp01", 1, |args| Ok(args[0].clamp(0.0, 1.0)))
        .expect("Failed to register clamp01");

    for expression in ["hypot(3, 4)", "inverse(8) * 2", "clamp01(-3) + 1", "inverse(0)"] {
        match calculator.evaluate(expression) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) => println!("{}: {}", expression, err),
        }
    }
}
