use crate::config::Config;
use crate::Interpreter;
use std::io::{self, Write};

static PROMPT: &str = ">> ";

pub fn start() {
    let mut interpreter = Interpreter::with_config(Config::from_env());
    loop {
        print!("{}", PROMPT);
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let outcome = interpreter.run(&line);
        for text in outcome.output.iter() {
            println!("{}", text);
        }
        for message in outcome.messages() {
            println!("\t{}", message);
        }
        println!("--> {}", outcome.value);
    }
}
