use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use normboard_board::{BoardStatus, NormativeBoard, NullBridge, RecordingBridge, TracingBridge};
use normboard_core::config::NormBoardConfig;
use normboard_core::errors::{BridgeError, ProviderError, VerificationError};
use normboard_core::models::{
    Literal, NormativeState, ObligationState, PredicateSignature, Substitution, Term,
};
use normboard_core::traits::{
    Clock, DynamicFactProvider, ManualClock, SignalBridge, SubstitutionStream,
};
use normboard_core::BoardError;
use normboard_engine::StaticFactProvider;
use normboard_parser::parse_fact;
use test_fixtures::fixture_text;

struct Harness {
    board: NormativeBoard,
    bridge: Arc<RecordingBridge>,
    clock: Arc<ManualClock>,
}

fn harness_with(config: NormBoardConfig) -> Harness {
    let bridge = Arc::new(RecordingBridge::new());
    let clock = Arc::new(ManualClock::new(1_000));
    let board = NormativeBoard::init_with_clock(config, bridge.clone(), clock.clone()).unwrap();
    board.load(&fixture_text("norms/bib.npl")).unwrap();
    Harness {
        board,
        bridge,
        clock,
    }
}

fn harness() -> Harness {
    harness_with(NormBoardConfig::default())
}

fn provider(facts: &[&str]) -> Arc<StaticFactProvider> {
    Arc::new(StaticFactProvider::from_facts(
        facts.iter().map(|f| parse_fact(f).unwrap()).collect(),
    ))
}

/// Claims `busy/1` and always fails.
struct FailingProvider {
    calls: AtomicUsize,
}

impl DynamicFactProvider for FailingProvider {
    fn is_relevant(&self, signature: &PredicateSignature) -> bool {
        *signature == PredicateSignature::new("busy", 1)
    }

    fn consult(
        &self,
        literal: &Literal,
        _substitution: &Substitution,
    ) -> Result<SubstitutionStream, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Unavailable {
            reason: format!("cannot resolve {literal}"),
        })
    }
}

/// Claims `agent/1` and binds the variable to itself.
struct SelfBindingProvider;

impl DynamicFactProvider for SelfBindingProvider {
    fn is_relevant(&self, signature: &PredicateSignature) -> bool {
        *signature == PredicateSignature::new("agent", 1)
    }

    fn consult(
        &self,
        _literal: &Literal,
        substitution: &Substitution,
    ) -> Result<SubstitutionStream, ProviderError> {
        let looped = substitution.clone().with("X", Term::var("X"));
        Ok(Box::new(std::iter::once(looped)))
    }
}

/// Records like `RecordingBridge` but stalls while publishing a snapshot
/// with exactly one fact.
struct SlowBridge {
    inner: RecordingBridge,
    stall: Duration,
}

impl SignalBridge for SlowBridge {
    fn publish(&self, snapshot: &NormativeState) -> Result<(), BridgeError> {
        if snapshot.facts.len() == 1 {
            thread::sleep(self.stall);
        }
        self.inner.publish(snapshot)
    }

    fn publish_debug_view(&self, text: &str) -> Result<(), BridgeError> {
        self.inner.publish_debug_view(text)
    }
}

// ── Lifecycle ───────────────────────────────────────────────────────────

#[test]
fn init_produces_a_ready_board() {
    let board = NormativeBoard::init(NormBoardConfig::default(), Arc::new(NullBridge)).unwrap();
    assert_eq!(board.status().unwrap(), BoardStatus::Ready);
    assert!(!board.id().is_empty());
    assert_eq!(board.verification_count().unwrap(), 0);
}

#[test]
fn board_id_comes_from_config() {
    let config = NormBoardConfig::from_toml("[board]\nboard_id = \"nb-1\"\n").unwrap();
    let board = NormativeBoard::init(config, Arc::new(NullBridge)).unwrap();
    assert_eq!(board.id(), "nb-1");
}

#[test]
fn uninitialized_board_rejects_operations() {
    let board = NormativeBoard::new(NormBoardConfig::default(), Arc::new(NullBridge));
    assert_eq!(board.status().unwrap(), BoardStatus::Uninitialized);
    assert!(board.add_fact("busy(bob)").unwrap_err().is_not_initialized());
    assert!(board.state().unwrap_err().is_not_initialized());

    board.initialize().unwrap();
    board.initialize().unwrap();
    assert!(board.add_fact("busy(bob)").is_ok());
}

#[test]
fn teardown_is_final() {
    let h = harness();
    h.board.add_fact("busy(bob)").unwrap();
    h.board.teardown().unwrap();
    assert_eq!(h.board.status().unwrap(), BoardStatus::TornDown);

    let published = h.bridge.snapshots().len();
    assert!(h.board.add_fact("busy(ann)").unwrap_err().is_not_initialized());
    assert!(h.board.remove_fact("busy(bob)").unwrap_err().is_not_initialized());
    assert!(h.board.load("norm x: true -> fail(x).").unwrap_err().is_not_initialized());
    assert!(h
        .board
        .update_provider("p", provider(&["busy(carol)"]))
        .unwrap_err()
        .is_not_initialized());
    assert!(h.board.verify_norms().unwrap_err().is_not_initialized());
    assert!(h.board.debug_snapshot().unwrap_err().is_not_initialized());
    assert!(h.board.export_markup().unwrap_err().is_not_initialized());
    assert!(h.board.teardown().unwrap_err().is_not_initialized());
    assert!(h.board.initialize().unwrap_err().is_not_initialized());
    assert_eq!(h.bridge.snapshots().len(), published);
}

#[test]
fn malformed_text_after_teardown_still_reports_not_initialized() {
    let h = harness();
    h.board.teardown().unwrap();
    assert!(h.board.add_fact("busy(").unwrap_err().is_not_initialized());
}

// ── Facts and obligations ───────────────────────────────────────────────

#[test]
fn unconditional_norm_obliges_on_load() {
    let h = harness();
    let report = h.board.load(&fixture_text("norms/unconditional.npl")).unwrap();
    assert_eq!(report.created.len(), 1);

    let obligations = h.board.obligations().unwrap();
    assert_eq!(obligations.len(), 1);
    let obligation = &obligations[0];
    assert_eq!(obligation.norm_id, "report");
    assert_eq!(obligation.bearer.as_str(), "alice");
    assert_eq!(obligation.goal.to_string(), "report_sent");
    assert_eq!(obligation.deadline, 1_000 + 2 * 60 * 60 * 1_000);
    assert_eq!(obligation.state, ObligationState::Active);
}

#[test]
fn busy_fact_derives_and_removal_retracts() {
    let h = harness();
    let t0 = h.clock.now_millis();
    let report = h.board.add_fact("busy(bob)").unwrap();
    assert_eq!(report.created.len(), 1);

    let obligations = h.board.obligations().unwrap();
    assert_eq!(obligations.len(), 1);
    let obligation = &obligations[0];
    assert_eq!(obligation.bearer.as_str(), "bob");
    assert_eq!(obligation.goal.to_string(), "finish(bob)");
    assert!(obligation.deadline >= t0 && obligation.deadline <= t0 + 1_000);

    h.board.remove_fact("busy(bob)").unwrap();
    assert!(h.board.obligations().unwrap().is_empty());
    assert!(h.board.facts().unwrap().is_empty());
}

#[test]
fn malformed_fact_changes_nothing_and_skips_verification() {
    let h = harness();
    h.board.add_fact("busy(bob)").unwrap();
    let count = h.board.verification_count().unwrap();
    let facts = h.board.facts().unwrap();
    let published = h.bridge.snapshots().len();

    for bad in ["busy(", "busy(X)", "", "Busy(bob)", "busy(bob) extra"] {
        let err = h.board.add_fact(bad).unwrap_err();
        assert!(err.is_malformed_fact(), "{bad}: {err}");
        let err = h.board.remove_fact(bad).unwrap_err();
        assert!(err.is_malformed_fact(), "{bad}: {err}");
    }

    assert_eq!(h.board.verification_count().unwrap(), count);
    assert_eq!(h.board.facts().unwrap(), facts);
    assert_eq!(h.bridge.snapshots().len(), published);
}

#[test]
fn removing_an_absent_fact_still_verifies() {
    let h = harness();
    let count = h.board.verification_count().unwrap();
    let report = h.board.remove_fact("busy(nobody)").unwrap();
    assert!(report.is_quiet());
    assert_eq!(h.board.verification_count().unwrap(), count + 1);
}

#[test]
fn reverification_at_a_fixed_clock_is_idempotent() {
    let h = harness();
    h.board.add_fact("busy(bob)").unwrap();
    h.board.add_fact("task(ann, 9000)").unwrap();
    let before = h.board.obligations().unwrap();

    let report = h.board.verify_norms().unwrap();
    assert!(report.is_quiet());
    assert_eq!(h.board.obligations().unwrap(), before);
}

#[test]
fn deadlines_follow_the_injected_clock() {
    let h = harness();
    h.board.add_fact("busy(bob)").unwrap();
    h.clock.advance(1_001);
    let report = h.board.verify_norms().unwrap();
    assert_eq!(report.unfulfilled.len(), 1);
    assert_eq!(
        h.board.obligations().unwrap()[0].state,
        ObligationState::Unfulfilled
    );
    assert!(h.board.observable_properties().unwrap().is_empty());
}

// ── Rollback ────────────────────────────────────────────────────────────

#[test]
fn regimentation_rolls_back_the_fact() {
    let h = harness();
    h.board.add_fact("busy(bob)").unwrap();
    let before = h.board.state().unwrap();

    let err = h.board.add_fact("blocked(bob)").unwrap_err();
    match err {
        BoardError::Verification(VerificationError::Regimented { ref norm_id, .. }) => {
            assert_eq!(norm_id, "n2")
        }
        other => panic!("expected regimentation, got {other}"),
    }
    assert!(!h
        .board
        .facts()
        .unwrap()
        .contains(&parse_fact("blocked(bob)").unwrap()));
    assert_eq!(h.board.state().unwrap(), before);
}

#[test]
fn failed_load_keeps_the_previous_program() {
    let h = harness();
    h.board.add_fact("busy(bob)").unwrap();
    let source = h.board.norms_source().unwrap();

    let err = h.board.load("np broken { norm n1: busy(X) -> }").unwrap_err();
    assert!(err.is_norm_parse());
    let err = h
        .board
        .load("norm forbid_busy: busy(X) -> fail(busy(X)).")
        .unwrap_err();
    assert!(err.is_verification_failure());

    assert_eq!(h.board.norms_source().unwrap(), source);
    assert_eq!(h.board.obligations().unwrap().len(), 1);
}

#[test]
fn load_replaces_the_rules() {
    let h = harness();
    h.board.add_fact("busy(bob)").unwrap();
    let report = h
        .board
        .load("np rest { norm r1: busy(X) -> obligation(X, r1, rest(X), `1 minute`). }")
        .unwrap();
    assert_eq!(report.retracted.len(), 1);
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.created[0].deadline, 1_000 + 60_000);
    let source = h.board.norms_source().unwrap().unwrap();
    assert!(source.starts_with("np rest {"));
    assert!(!source.contains("n1"));
}

#[test]
fn provider_update_that_regiments_is_rolled_back() {
    let h = harness();
    h.board.add_fact("busy(bob)").unwrap();
    let err = h
        .board
        .update_provider("blocks", provider(&["blocked(bob)"]))
        .unwrap_err();
    assert!(err.is_verification_failure());
    assert!(h.board.provider_ids().unwrap().is_empty());
}

// ── Providers ───────────────────────────────────────────────────────────

#[test]
fn provider_facts_drive_obligations() {
    let h = harness();
    let presence = Arc::new(StaticFactProvider::new([PredicateSignature::new("busy", 1)]));
    h.board.update_provider("presence", presence.clone()).unwrap();
    h.board.add_fact("busy(bob)").unwrap();
    assert!(h.board.obligations().unwrap().is_empty());

    presence.set_facts(vec![parse_fact("busy(carol)").unwrap()]).unwrap();
    let report = h.board.verify_norms().unwrap();
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.created[0].bearer.as_str(), "carol");

    h.board.remove_provider("presence").unwrap();
    let bearers: Vec<String> = h
        .board
        .obligations()
        .unwrap()
        .iter()
        .map(|o| o.bearer.to_string())
        .collect();
    assert_eq!(bearers, vec!["bob"]);
}

#[test]
fn first_registered_provider_wins() {
    let h = harness();
    h.board.update_provider("first", provider(&["busy(ann)"])).unwrap();
    h.board.update_provider("second", provider(&["busy(bob)"])).unwrap();
    let bearers: Vec<String> = h
        .board
        .obligations()
        .unwrap()
        .iter()
        .map(|o| o.bearer.to_string())
        .collect();
    assert_eq!(bearers, vec!["ann"]);
    assert_eq!(h.board.provider_ids().unwrap(), vec!["first", "second"]);
}

#[test]
fn provider_error_degrades_to_the_store() {
    let h = harness();
    let failing = Arc::new(FailingProvider {
        calls: AtomicUsize::new(0),
    });
    h.board.add_fact("busy(bob)").unwrap();
    h.board.update_provider("flaky", failing.clone()).unwrap();

    assert!(failing.calls.load(Ordering::SeqCst) >= 1);
    assert_eq!(h.board.obligations().unwrap().len(), 1);
    let degradations = h.board.degradations().unwrap();
    assert!(!degradations.is_empty());
    assert_eq!(degradations[0].event.component, "provider:flaky");
}

#[test]
fn provider_that_stays_down_keeps_one_record() {
    let h = harness();
    h.board
        .update_provider(
            "flaky",
            Arc::new(FailingProvider {
                calls: AtomicUsize::new(0),
            }),
        )
        .unwrap();
    h.board.add_fact("busy(bob)").unwrap();
    for _ in 0..200 {
        h.board.verify_norms().unwrap();
    }

    let degradations = h.board.degradations().unwrap();
    assert_eq!(degradations.len(), 1);
    assert!(degradations[0].occurrences >= 200);

    let text = h.board.debug_snapshot().unwrap();
    assert!(text.contains("** degraded providers:"));
    assert!(text.contains("provider:flaky"));
}

#[test]
fn self_binding_provider_is_ignored() {
    let h = harness();
    h.board
        .load("norm n5: agent(X) & busy(X) -> obligation(X, n5, report(X), `1 minute`).")
        .unwrap();
    h.board.add_fact("busy(bob)").unwrap();

    let report = h.board.update_provider("echo", Arc::new(SelfBindingProvider)).unwrap();
    assert!(report.created.is_empty());
    assert!(h.board.obligations().unwrap().is_empty());
    assert_eq!(h.board.degradations().unwrap()[0].event.component, "provider:echo");
    assert_eq!(h.board.provider_ids().unwrap(), vec!["echo"]);
}

// ── Bridge ──────────────────────────────────────────────────────────────

#[test]
fn every_successful_operation_publishes() {
    let h = harness();
    let before = h.bridge.snapshots().len();
    h.board.add_fact("busy(bob)").unwrap();
    h.board.verify_norms().unwrap();
    assert_eq!(h.bridge.snapshots().len(), before + 2);
    assert_eq!(h.bridge.debug_views().len(), before + 2);

    let last = h.bridge.last_snapshot().unwrap();
    assert_eq!(
        last.observable_properties()[0].to_string(),
        "obligation(bob, n1, finish(bob), 2000)"
    );
    assert_eq!(h.bridge.signal_names(), vec!["oblCreated"]);
}

#[test]
fn debug_view_publishing_can_be_disabled() {
    let mut config = NormBoardConfig::default();
    config.board.publish_debug_view = false;
    let h = harness_with(config);
    h.board.add_fact("busy(bob)").unwrap();
    assert!(h.bridge.debug_views().is_empty());
    assert!(!h.bridge.snapshots().is_empty());
}

#[test]
fn bridge_failure_does_not_roll_back() {
    let h = harness();
    h.bridge.fail_with(Some(BridgeError::Disconnected));
    let report = h.board.add_fact("busy(bob)").unwrap();
    assert_eq!(report.created.len(), 1);
    assert_eq!(h.board.obligations().unwrap().len(), 1);

    h.bridge.fail_with(None);
    h.board.verify_norms().unwrap();
    assert_eq!(h.bridge.last_snapshot().unwrap().obligations.len(), 1);
}

#[test]
fn tracing_bridge_accepts_every_publication() {
    let board = NormativeBoard::init(NormBoardConfig::default(), Arc::new(TracingBridge)).unwrap();
    board.load(&fixture_text("norms/bib.npl")).unwrap();
    board.add_fact("busy(bob)").unwrap();
    board.remove_fact("busy(bob)").unwrap();

    let bridge = TracingBridge;
    let state = board.state().unwrap();
    bridge.publish(&state).unwrap();
    bridge.publish_debug_view(&board.debug_snapshot().unwrap()).unwrap();
}

// ── Concurrency ─────────────────────────────────────────────────────────

#[test]
fn concurrent_mutations_are_serialized() {
    let h = harness();
    let board = Arc::new(h.board);
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let board = Arc::clone(&board);
            thread::spawn(move || {
                for j in 0..10 {
                    board.add_fact(&format!("busy(agent_{i}_{j})")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(board.facts().unwrap().len(), 80);
    assert_eq!(board.obligations().unwrap().len(), 80);
    // One pass for the load plus one per fact.
    assert_eq!(board.verification_count().unwrap(), 81);
}

#[test]
fn publications_follow_commit_order() {
    let bridge = Arc::new(SlowBridge {
        inner: RecordingBridge::new(),
        stall: Duration::from_millis(300),
    });
    let board = Arc::new(
        NormativeBoard::init_with_clock(
            NormBoardConfig::default(),
            bridge.clone(),
            Arc::new(ManualClock::new(1_000)),
        )
        .unwrap(),
    );
    board.load(&fixture_text("norms/bib.npl")).unwrap();

    let first = {
        let board = Arc::clone(&board);
        thread::spawn(move || board.add_fact("busy(a)").unwrap())
    };
    thread::sleep(Duration::from_millis(100));
    let second = {
        let board = Arc::clone(&board);
        thread::spawn(move || board.add_fact("busy(b)").unwrap())
    };
    first.join().unwrap();
    second.join().unwrap();

    assert_eq!(board.facts().unwrap().len(), 2);
    let published: Vec<usize> = bridge
        .inner
        .snapshots()
        .iter()
        .map(|s| s.facts.len())
        .collect();
    assert_eq!(published, vec![0, 1, 2]);
}
