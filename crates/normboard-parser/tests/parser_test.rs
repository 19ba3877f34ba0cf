use normboard_core::errors::ParseError;
use normboard_core::models::{ConditionGoal, Consequence, DeadlineSpec, Term};
use normboard_parser::{parse_fact, parse_literal, parse_program};

const BIB: &str = r#"
// library norms
np bib {
    norm n1: busy(X) -> obligation(X, n1, finish(X), `1000 milliseconds`).
    norm n2: busy(X) & blocked(X) -> fail(conflict(X)).
    /* unconditional */
    norm n3: true -> obligation(alice, n3, report, 500).
    norm n4: task(A, D) & not done(A) -> obligation(A, n4, done(A), D).
}
"#;

#[test]
fn parses_ground_facts() {
    let fact = parse_fact("committed(ag2, mBib, s1)").unwrap();
    assert_eq!(fact.name, "committed");
    assert_eq!(fact.arity(), 3);
    assert_eq!(fact.args[1], Term::atom("mBib"));
}

#[test]
fn parses_numbers_strings_and_nested_terms() {
    let fact = parse_fact(r#"order(-12, "two words", item(book, 3))."#).unwrap();
    assert_eq!(fact.args[0], Term::Int(-12));
    assert_eq!(fact.args[1], Term::string("two words"));
    assert_eq!(fact.to_string(), r#"order(-12, "two words", item(book, 3))"#);
}

#[test]
fn zero_arity_fact_is_an_atom() {
    let fact = parse_fact("  sunny ").unwrap();
    assert_eq!(fact.arity(), 0);
    assert_eq!(fact.to_string(), "sunny");
}

#[test]
fn fact_with_variables_is_malformed() {
    let err = parse_fact("busy(X, _Y)").unwrap_err();
    match err {
        ParseError::MalformedFact { text, reason } => {
            assert_eq!(text, "busy(X, _Y)");
            assert!(reason.contains('X'));
            assert!(reason.contains("_Y"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn literal_may_contain_variables() {
    let lit = parse_literal("busy(X)").unwrap();
    assert!(!lit.is_ground());
}

#[test]
fn syntax_errors_are_malformed_facts() {
    for text in ["", "busy(", "busy()", "Busy(bob)", "42", "busy(bob) extra", "busy(bob,,)", "a(-)"] {
        let err = parse_fact(text).unwrap_err();
        assert!(
            matches!(err, ParseError::MalformedFact { .. }),
            "{text:?} gave {err:?}"
        );
    }
}

#[test]
fn parses_wrapped_program() {
    let program = parse_program(BIB).unwrap();
    assert_eq!(program.name, "bib");
    assert_eq!(program.len(), 4);

    let n1 = program.norm("n1").unwrap();
    assert_eq!(n1.condition.len(), 1);
    match &n1.consequence {
        Consequence::Obligation { deadline, goal, .. } => {
            assert_eq!(*deadline, DeadlineSpec::Relative { millis: 1000 });
            assert_eq!(goal.to_string(), "finish(X)");
        }
        other => panic!("unexpected consequence {other:?}"),
    }

    assert!(matches!(program.norm("n2").unwrap().consequence, Consequence::Fail { .. }));
    assert!(program.norm("n3").unwrap().condition.is_empty());

    let n4 = program.norm("n4").unwrap();
    assert!(matches!(n4.condition[1], ConditionGoal::NotHolds(_)));
    assert!(matches!(
        n4.consequence,
        Consequence::Obligation { deadline: DeadlineSpec::Absolute(Term::Var(_)), .. }
    ));
}

#[test]
fn bare_norms_form_the_main_program() {
    let program = parse_program("norm a: p -> obligation(bob, a, q, `2 s`).").unwrap();
    assert_eq!(program.name, "main");
    assert_eq!(program.len(), 1);
}

#[test]
fn empty_source_is_an_empty_program() {
    let program = parse_program("  // nothing here\n").unwrap();
    assert!(program.is_empty());
}

#[test]
fn rendered_program_parses_to_the_same_program() {
    let program = parse_program(BIB).unwrap();
    let again = parse_program(&program.to_string()).unwrap();
    assert_eq!(program, again);
}

#[test]
fn norm_parse_errors_carry_position() {
    let err = parse_program("np p {\n    norm n1: busy(X) obligation(X, n1, f, 1).\n}").unwrap_err();
    match err {
        ParseError::NormParse { line, column, message } => {
            assert_eq!(line, 2);
            assert_eq!(column, 22);
            assert!(message.contains("`->`"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn rejects_bad_programs() {
    let cases = [
        "np p { norm n1: a -> obligation(b, n1, c, 1). ",
        "norm n1: a -> obligation(b, n1, c, 1). norm n1: a -> fail(x).",
        "norm n1: a -> obligation(b, n1, 7, 1).",
        "norm n1: a -> obligation(b, n1, c, -1).",
        "norm n1: a -> obligation(b, n1, c, `3 fortnights`).",
        "norm n1: a -> permission(b).",
        "norm n1: a -> fail(x)",
        "np p { } trailing",
        "/* open comment",
    ];
    for src in cases {
        let err = parse_program(src).unwrap_err();
        assert!(matches!(err, ParseError::NormParse { .. }), "{src:?} gave {err:?}");
    }
}
