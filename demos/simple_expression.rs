use scicalc_rs::{evaluate_expression, Context, EvaluationOutcome};

fn main() {
    pretty_env_logger::init();

    let mut context = Context::new();
    println!("Functions: {}", context.functions.names().join(", "));

    let expressions = [
        "3 + 4 * 2",
        "radius = 2.5",
        "pi * radius ^ 2",
        "sin(30) + logbase(2, 8)",
        "1 / 0",
        "2 $ 3",
    ];

    for expression in expressions {
        match evaluate_expression(expression, &mut context) {
            EvaluationOutcome::Value { value } => println!("{} = {}", expression, value),
            EvaluationOutcome::Error { kind, message } => {
                println!("{} -> {:?}: {}", expression, kind, message)
            }
        }
    }

    for (name, value) in context.symbols.variables() {
        println!("{} = {}", name, value);
    }
}
