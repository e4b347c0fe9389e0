use std::{fs, path::Path};

use sprola::{
    ast::{BinaryOperator, Expr, Program, Statement},
    error::{Error, ParseError, RuntimeError},
    parse_source, run_source, tokenize_source,
};
use walkdir::WalkDir;

#[test]
fn demo_programs_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "sprola"))
    {
        count += 1;
        let path = entry.path();
        let source = read(path);
        let input = fs::read_to_string(path.with_extension("in")).unwrap_or_default();
        let expected = read(&path.with_extension("out"));

        let mut output = Vec::new();
        if let Err(e) = run_source(&source, input.as_bytes(), &mut output) {
            panic!("Demo {path:?} failed:\n{source}\nError: {e}");
        }
        assert_eq!(String::from_utf8(output).unwrap(), expected, "output of {path:?}");

        assert_round_trip(&source);
    }

    assert!(count > 0, "No demo programs found in demos");
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn run(src: &str, input: &str) -> (Result<Option<i64>, Error>, String) {
    let mut output = Vec::new();
    let result = run_source(src, input.as_bytes(), &mut output);
    (result, String::from_utf8(output).unwrap())
}

fn assert_output(src: &str, expected: &str) {
    match run(src, "") {
        (Ok(_), output) => assert_eq!(output, expected, "program:\n{src}"),
        (Err(e), _) => panic!("Program failed: {e}\n{src}"),
    }
}

fn assert_result(src: &str, expected: Option<i64>) {
    match run(src, "") {
        (Ok(value), _) => assert_eq!(value, expected, "program:\n{src}"),
        (Err(e), _) => panic!("Program failed: {e}\n{src}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match run(src, "") {
        (Ok(_), _) => panic!("Program succeeded but was expected to fail:\n{src}"),
        (Err(e), _) => e,
    }
}

fn assert_round_trip(src: &str) {
    let program = parse_source(src).unwrap();
    let rendered = program.to_string();
    let reparsed = parse_source(&rendered).unwrap_or_else(|e| {
                                               panic!("Rendering does not parse: {e}\n{rendered}")
                                           });

    assert_eq!(reparsed, program, "rendering:\n{rendered}");
    assert_eq!(shape(&reparsed), shape(&program));
}

/// Function names, parameter lists and the statement kinds of each body.
fn shape(program: &Program) -> Vec<(String, Vec<String>, Vec<&'static str>)> {
    program.functions
           .iter()
           .map(|f| {
               (f.name.clone(),
                f.params.clone(),
                f.body.statements.iter().map(Statement::kind_name).collect())
           })
           .collect()
}

#[test]
fn every_token_stream_ends_with_one_eof() {
    for src in ["", "function", "-- only a comment", "var x <- 1;\n\n", "?!"] {
        let tokens = tokenize_source(src);
        let last = tokens.last().map(|t| t.kind.name());
        assert_eq!(last, Some("EOF"));
        assert_eq!(tokens.iter().filter(|t| t.kind.name() == "EOF").count(), 1);
    }
}

#[test]
fn subtraction_is_the_outermost_operator() {
    let program = parse_source("function entry() { var x <- 1 + 2 * 3 - 4 / 2; }").unwrap();

    let Statement::VarDecl { initializer, .. } = &program.functions[0].body.statements[0] else {
        panic!("expected a declaration");
    };
    assert!(matches!(initializer, Expr::Binary { op: BinaryOperator::Sub, .. }));
    assert_eq!(initializer.to_string(), "((1 + (2 * 3)) - (4 / 2))");
}

#[test]
fn print_and_return() {
    assert_output("function entry() { var x <- 1 + 2; print x; }", "3\n");
    assert_result("function entry() { var x <- 1 + 2; print x; }", None);
    assert_result("function entry() { return 42; }", Some(42));
}

#[test]
fn conditionals() {
    assert_output("function entry() {
                       if (0) { print 100; } elif (0) { print 200; } else { print 300; }
                   }",
                  "300\n");
    assert_output("function entry() {
                       if (2 > 1) { print 1; } else { print 2; }
                       if (1 > 2) { print 3; }
                   }",
                  "1\n");
}

#[test]
fn user_defined_functions() {
    assert_output("function double(n) { return n + n; }
                   function entry() { print double(5); }",
                  "10\n");
    assert_result("function fib(n) { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); }
                   function entry() { return fib(15); }",
                  Some(610));
}

#[test]
fn last_function_declaration_wins() {
    assert_result("function f() { return 1; } function f() { return 2; } function entry() { return f(); }",
                  Some(2));
    assert_output("function show(x) { print x; }
                   function entry() { var ignored <- show(1, 2); }
                   function show(a, b) { print a + b; }",
                  "3\n");
}

#[test]
fn loops() {
    assert_output("function entry() {
                       var i <- 3;
                       while (i > 0) { print i; i <- i - 1; }
                   }",
                  "3\n2\n1\n");
    assert_output("function entry() {
                       var i <- 0;
                       run { print i; } while (i)
                   }",
                  "0\n");
    assert_result("function entry() {
                       var i <- 0;
                       while (1) { i <- i + 1; if (i * i > 50) { return i; } }
                   }",
                  Some(8));
}

#[test]
fn comparisons_are_integers() {
    assert_output("function entry() {
                       print (1 < 2) + (2 <= 2) + (3 > 4) + (4 >= 4) + (5 = 5) + (5 ~ 5);
                   }",
                  "4\n");
}

#[test]
fn negation_and_truncating_division() {
    assert_output("function entry() { print -7 / 2; print -7 % 2; print -(2 - 5); }",
                  "-3\n-1\n3\n");
}

#[test]
fn comments_are_ignored() {
    assert_output("-- leading comment
                   function entry() { -- after the brace
                       print 1; -- trailing
                       -- on its own line
                       print 2;
                   }",
                  "1\n2\n");
}

#[test]
fn input_is_read_token_by_token() {
    let (result, output) = run("function entry() { print input + input; return input; }",
                               "2 3\n\n5\n");
    assert_eq!(result.unwrap(), Some(5));
    assert_eq!(output, "5\n");

    let (result, _) = run("function entry() { return input; }", "");
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::InputExhausted))));
}

#[test]
fn runtime_errors() {
    let e = assert_failure("function entry() { y <- 1; }");
    assert_eq!(e.to_string(), "Undefined variable 'y'");

    let e = assert_failure("function main() { print 1; }");
    assert_eq!(e.to_string(), "No entry() function found.");

    let e = assert_failure("function entry() { print 1 % 0; }");
    assert_eq!(e.to_string(), "Division by zero.");

    let e = assert_failure("function entry() { return f(); }");
    assert_eq!(e.to_string(), "Undefined function 'f'");

    let e = assert_failure("function f(a, b) { return a; } function entry() { return f(1); }");
    assert!(matches!(e, Error::Runtime(RuntimeError::ArgumentCountMismatch { .. })));

    let e = assert_failure("function entry() { return 9223372036854775807 + 1; }");
    assert!(matches!(e, Error::Runtime(RuntimeError::Overflow { .. })));
}

#[test]
fn parse_errors() {
    let e = assert_failure("function entry() {\n    print 1\n}");
    assert!(matches!(e, Error::Parse(_)));
    assert_eq!(e.to_string(),
               "Error on line 3: Parse error: Expected ';' after print statement. at token '}'");

    let e = assert_failure("function entry() { var x <- ; }");
    assert!(e.to_string().contains("Unexpected token"));

    assert!(matches!(assert_failure("entry() { }"), Error::Parse(_)));
    assert!(matches!(assert_failure("function entry() { return 99999999999999999999; }"),
                     Error::Parse(_)));
}

#[test]
fn nesting_limit() {
    let negated = |n: usize| format!("function entry() {{ print {}7; }}", "- ".repeat(n));
    assert_output(&negated(256), "7\n");
    assert!(matches!(assert_failure(&negated(257)),
                     Error::Parse(ParseError::NestingTooDeep { limit: 256, .. })));
}

#[test]
fn rendering_round_trips() {
    assert_round_trip("function entry() { return 0; }");
    assert_round_trip("function add(a, b) { return a + b * (a - b); }
                       function entry() {
                           var x <- -3, y <- input;
                           if (x < y) { print add(x, y); }
                           elif (x = y) { print 0; }
                           elif (x ~ y) { print 1; }
                           else { x <- x % 2; }
                           while (x >= 0) { x <- x - 1; }
                           run { } while (0)
                           return x;
                       }");
}
