//! # normboard-parser
//!
//! Text front end for the normative board: ground facts in first-order atom
//! notation and norm programs.
//!
//! ```text
//! np bib {
//!     norm n1: busy(X) -> obligation(X, n1, finish(X), `1000 milliseconds`).
//!     norm n2: busy(X) & blocked(X) -> fail(conflict(X)).
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! let fact = normboard_parser::parse_fact("busy(bob)").unwrap();
//! assert_eq!(fact.signature().to_string(), "busy/1");
//!
//! assert!(normboard_parser::parse_fact("busy(X)").is_err());
//! ```

mod duration;
mod lexer;
mod parser;

use normboard_core::errors::ParseError;
use normboard_core::models::{Literal, NormativeProgram};

pub use duration::parse_duration;

/// Parse a literal, variables allowed.
pub fn parse_literal(text: &str) -> Result<Literal, ParseError> {
    parser::Parser::new(text)
        .and_then(|mut p| p.literal_only())
        .map_err(|f| ParseError::malformed_fact(text, f.describe()))
}

/// Parse a ground fact. Fails with `MalformedFact` on syntax errors and on
/// any variable.
pub fn parse_fact(text: &str) -> Result<Literal, ParseError> {
    let literal = parse_literal(text)?;
    if !literal.is_ground() {
        let vars: Vec<_> = literal.vars().into_iter().collect();
        return Err(ParseError::malformed_fact(
            text,
            format!("free variables not permitted: {}", vars.join(", ")),
        ));
    }
    Ok(literal)
}

/// Parse a norm program. Fails with `NormParse`.
pub fn parse_program(source: &str) -> Result<NormativeProgram, ParseError> {
    let program = parser::Parser::new(source)
        .and_then(|mut p| p.program())
        .map_err(|f| ParseError::NormParse {
            line: f.line,
            column: f.column,
            message: f.message,
        })?;
    tracing::debug!(
        program = %program.name,
        norms = program.norms.len(),
        "parsed normative program"
    );
    Ok(program)
}
