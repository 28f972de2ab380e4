use joc_interpreter::Interpreter;
use std::env;
use std::time::Instant;

static FIBONACCI: &str = ": fibonacci ~ x (
    ? (= x 0) 0 (= x 1) 1 + (fibonacci - x 1) (fibonacci - x 2)
)
";

fn main() {
    let n = env::args().nth(1).unwrap_or_else(|| "25".to_owned());
    let mut interpreter = Interpreter::new();
    interpreter.run(FIBONACCI);

    let input = format!("fibonacci {}", n);
    let start = Instant::now();
    let outcome = interpreter.run(&input);
    let duration = start.elapsed();

    for message in outcome.messages() {
        eprintln!("{}", message);
    }
    println!(
        "n={}, result={}, duration={}",
        n,
        outcome.value,
        duration.as_secs_f64(),
    );
}
