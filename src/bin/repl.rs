use rpgdice::{parse_and_evaluate, parse_and_run_script, parse_script, Outcome};
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let average = std::env::args().any(|arg| arg == "--average");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut buf = String::new();
    print!("> ");
    io::stdout().flush()?;
    while let Some(line) = lines.next() {
        let line = line?;
        if line.is_empty() {
            if !buf.trim().is_empty() {
                run(&buf, average);
            }
            buf.clear();
            print!("> ");
        } else {
            buf.push_str(&line);
            buf.push('\n');
            print!("... ");
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn run(input: &str, average: bool) {
    if matches!(parse_script(input), Ok(script) if !script.is_empty()) {
        match parse_and_run_script(input, average) {
            Ok(Outcome::Value(env)) => {
                for (name, value) in env.iter() {
                    println!("{} = {}", name, value);
                }
            }
            Ok(Outcome::TooManyDice { requested, limit }) => {
                println!("too many dice! ({} requested, limit is {})", requested, limit);
            }
            Err(why) => eprintln!("Error: {}", why),
        }
    } else {
        match parse_and_evaluate(input, average) {
            Ok(Outcome::Value(rolled)) => println!("{} = {}", rolled.narration, rolled.total),
            Ok(Outcome::TooManyDice { requested, limit }) => {
                println!("too many dice! ({} requested, limit is {})", requested, limit);
            }
            Err(why) => eprintln!("Error: {}", why),
        }
    }
}
