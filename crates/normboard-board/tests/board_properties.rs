use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use normboard_board::{NormativeBoard, NullBridge};
use normboard_core::config::NormBoardConfig;
use normboard_core::traits::ManualClock;
use test_fixtures::fixture_text;

fn board() -> NormativeBoard {
    let board = NormativeBoard::init_with_clock(
        NormBoardConfig::default(),
        Arc::new(NullBridge),
        Arc::new(ManualClock::new(0)),
    )
    .unwrap();
    board.load(&fixture_text("norms/bib.npl")).unwrap();
    board
}

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Remove(String),
}

fn op() -> impl Strategy<Value = Op> {
    let agent = prop::sample::select(vec!["ann", "bob", "carol", "dave"]);
    (any::<bool>(), agent).prop_map(|(add, agent)| {
        if add {
            Op::Add(agent.to_string())
        } else {
            Op::Remove(agent.to_string())
        }
    })
}

proptest! {
    #[test]
    fn rejected_text_never_mutates_or_verifies(text in "\\PC{0,24}") {
        let board = board();
        board.add_fact("busy(bob)").unwrap();
        let count = board.verification_count().unwrap();
        let before = board.state().unwrap();

        if let Err(err) = board.add_fact(&text) {
            prop_assert!(err.is_malformed_fact() || err.is_verification_failure());
            if err.is_malformed_fact() {
                prop_assert_eq!(board.verification_count().unwrap(), count);
            }
            prop_assert_eq!(board.state().unwrap().facts, before.facts);
            prop_assert_eq!(board.state().unwrap().obligations, before.obligations);
        }
    }

    #[test]
    fn obligations_track_the_busy_set(ops in prop::collection::vec(op(), 0..24)) {
        let board = board();
        let mut busy = BTreeSet::new();
        for op in &ops {
            match op {
                Op::Add(agent) => {
                    board.add_fact(&format!("busy({agent})")).unwrap();
                    busy.insert(agent.clone());
                }
                Op::Remove(agent) => {
                    board.remove_fact(&format!("busy({agent})")).unwrap();
                    busy.remove(agent);
                }
            }
        }
        let bearers: BTreeSet<String> = board
            .obligations()
            .unwrap()
            .iter()
            .map(|o| o.bearer.to_string())
            .collect();
        prop_assert_eq!(bearers, busy);
        prop_assert_eq!(board.verification_count().unwrap(), ops.len() as u64 + 1);
    }
}
