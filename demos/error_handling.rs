//! Demonstrate error handling for invalid requirements.txt input.

fn main() {
    // Unterminated marker string
    match requirements_txt::parse_str("numpy; python_version >= \"3.6\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(requirements_txt::Error::Lex(e)) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
        Err(requirements_txt::Error::Syntax(e)) => {
            println!("Syntax error: {e}");
        }
    }

    println!();

    // Unclosed extras list
    match requirements_txt::parse_str("numpy\nscipy[all\n") {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(requirements_txt::Error::Lex(e)) => {
            println!("Lex error: {e}");
        }
        Err(requirements_txt::Error::Syntax(e)) => {
            println!("Syntax error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
    }
}
