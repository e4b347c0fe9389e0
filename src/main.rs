use std::{fs, io, path::PathBuf, process};

use clap::Parser;
use sprola::{
    error::Error,
    interpreter::{evaluator::core::Interpreter, lexer::render_tokens, parser::core::parse_program},
    tokenize_source,
};

/// sprola reads a SPROLA source file, prints its tokens and its parsed
/// program, and can run it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Executes the program after printing it, reading `input` from stdin,
    /// and prints the value returned by `entry` (or `null`).
    #[arg(short, long)]
    run: bool,

    /// Path to the SPROLA source file.
    input_file: PathBuf,
}

fn main() {
    // Usage errors exit 1, `--help` and `--version` exit 0.
    let args = Args::try_parse().unwrap_or_else(|e| {
                                    if let Err(io_err) = e.print() {
                                        eprintln!("Error: {io_err}");
                                        process::exit(1);
                                    }
                                    process::exit(i32::from(e.use_stderr()));
                                });

    if let Err(e) = execute(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn execute(args: &Args) -> Result<(), Error> {
    let source = fs::read_to_string(&args.input_file).map_err(|source| Error::Io {
        path: args.input_file.display().to_string(),
        source,
    })?;

    let tokens = tokenize_source(&source);
    println!("{}", render_tokens(&tokens));

    let program = parse_program(tokens)?;
    println!("{program}");

    if args.run {
        let result = Interpreter::new(io::stdin().lock(), io::stdout().lock()).run(&program)?;
        match result {
            Some(value) => println!("{value}"),
            None => println!("null"),
        }
    }

    Ok(())
}
