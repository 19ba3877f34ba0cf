use normboard_core::models::{Literal, Substitution, Term};
use normboard_engine::FactStore;
use normboard_parser::{parse_fact, parse_literal};

fn fact(text: &str) -> Literal {
    parse_fact(text).unwrap()
}

#[test]
fn add_fact_is_idempotent() {
    let mut store = FactStore::new();
    assert!(store.add_fact(fact("busy(bob)")).unwrap());
    assert!(!store.add_fact(fact("busy(bob)")).unwrap());
    assert_eq!(store.len(), 1);
    assert!(store.contains(&fact("busy(bob)")));
}

#[test]
fn removing_absent_fact_is_a_noop() {
    let mut store = FactStore::new();
    store.add_fact(fact("busy(bob)")).unwrap();
    assert!(!store.remove_fact(&fact("busy(alice)")).unwrap());
    assert!(!store.remove_fact(&fact("idle(bob)")).unwrap());
    assert_eq!(store.len(), 1);

    assert!(store.remove_fact(&fact("busy(bob)")).unwrap());
    assert!(store.is_empty());
}

#[test]
fn non_ground_literals_are_rejected() {
    let mut store = FactStore::new();
    let pattern = parse_literal("busy(X)").unwrap();
    let err = store.add_fact(pattern.clone()).unwrap_err();
    assert!(err.to_string().contains("free variables not permitted: X"));
    assert!(store.remove_fact(&pattern).is_err());
    assert!(store.is_empty());
}

#[test]
fn facts_are_listed_in_deterministic_order() {
    let mut store = FactStore::new();
    for text in ["busy(carol)", "available", "busy(alice)", "busy(bob)"] {
        store.add_fact(fact(text)).unwrap();
    }
    let listed: Vec<String> = store.facts().map(ToString::to_string).collect();
    assert_eq!(listed, vec!["available", "busy(alice)", "busy(bob)", "busy(carol)"]);
}

#[test]
fn matching_extends_the_given_substitution() {
    let mut store = FactStore::new();
    for text in ["task(a, 10)", "task(b, 20)", "task(c, 10)"] {
        store.add_fact(fact(text)).unwrap();
    }
    let pattern = parse_literal("task(T, D)").unwrap();

    let all: Vec<Substitution> = store.matching(&pattern, &Substitution::new()).collect();
    assert_eq!(all.len(), 3);

    let fixed = Substitution::new().with("D", Term::Int(10));
    let tens: Vec<Term> = store
        .matching(&pattern, &fixed)
        .map(|s| s.get("T").cloned().unwrap())
        .collect();
    assert_eq!(tens, vec![Term::atom("a"), Term::atom("c")]);
}

#[test]
fn matching_only_sees_the_same_signature() {
    let mut store = FactStore::new();
    store.add_fact(fact("busy(bob)")).unwrap();
    store.add_fact(fact("busy(bob, today)")).unwrap();
    let pattern = parse_literal("busy(X)").unwrap();
    assert_eq!(store.matching(&pattern, &Substitution::new()).count(), 1);
}
