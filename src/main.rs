use joc_interpreter::repl;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // RUST_LOG controls the level, warn by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    println!("Hello! This is the joc programming language!");
    println!("Feel free to type in commands");
    repl::start()
}
