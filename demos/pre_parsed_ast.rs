use scicalc_rs::ast::format_tokens;
use scicalc_rs::Calculator;

fn main() {
    pretty_env_logger::init();

    let mut calculator = Calculator::new();

    let expression = "2 * x ^ 2 - 3 * x + 1";
    let postfix = calculator
        .to_postfix(expression)
        .expect("Failed to convert");
    println!("Postfix: {}", format_tokens(&postfix));

    let ast = calculator.parse(expression).expect("Failed to parse");
    println!("Tree holds {} nodes", ast.size());

    for x in [-1.0, 0.0, 0.5, 2.0] {
        calculator
            .context_mut()
            .symbols
            .assign("x", x)
            .expect("x is not a constant");
        match calculator.evaluate_ast(&ast) {
            Ok(result) => println!("f({}) = {}", x, result),
            Err(err) => println!("Error: {}", err),
        }
    }
}
