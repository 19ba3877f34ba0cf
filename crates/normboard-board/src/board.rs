//! NormativeBoard: the serialized entry point for every mutation.
//!
//! One `Mutex` guards the interpreter and the provider registry together.
//! Each mutating operation checks readiness, parses its input, applies the
//! mutation, runs one verification pass and, if the pass fails, restores the
//! checkpoint taken before the mutation. Publishing to the bridge happens
//! after the state lock is released, but in the order the mutations
//! committed: an operation takes its publishing turn before letting go of
//! the state. Bridges must not call back into the board.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use normboard_core::config::NormBoardConfig;
use normboard_core::constants::VERSION;
use normboard_core::errors::{BoardError, BoardResult, VerificationError};
use normboard_core::models::{Literal, NormativeState, Obligation, VerificationReport};
use normboard_core::traits::{Clock, DynamicFactProvider, SignalBridge, SystemClock};
use normboard_engine::{NormInterpreter, ProviderRegistry};
use normboard_observability::tracing_setup::events;
use normboard_observability::TrackedDegradation;
use normboard_parser::{parse_fact, parse_program};

use crate::export::{render_debug_text, MarkupDocument};

/// Lifecycle phase of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
    Uninitialized,
    Ready,
    /// Terminal. Every operation fails with `NotInitialized`.
    TornDown,
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::TornDown => "torn_down",
        })
    }
}

/// Everything a failed verification must roll back.
#[derive(Debug, Clone)]
struct BoardState {
    interpreter: NormInterpreter,
    registry: ProviderRegistry,
}

impl BoardState {
    fn verify(&mut self, now: i64) -> Result<VerificationReport, VerificationError> {
        self.interpreter.verify_norms(&self.registry, now)
    }
}

enum Phase {
    Uninitialized,
    Ready(Box<BoardState>),
    TornDown,
}

impl Phase {
    fn status(&self) -> BoardStatus {
        match self {
            Self::Uninitialized => BoardStatus::Uninitialized,
            Self::Ready(_) => BoardStatus::Ready,
            Self::TornDown => BoardStatus::TornDown,
        }
    }
}

/// What a successful mutation hands to the bridge.
struct Publication {
    report: VerificationReport,
    snapshot: NormativeState,
    debug_view: Option<String>,
}

/// A normative board handle. `Send + Sync`; share it in an `Arc`.
pub struct NormativeBoard {
    id: String,
    config: NormBoardConfig,
    bridge: Arc<dyn SignalBridge>,
    clock: Arc<dyn Clock>,
    phase: Mutex<Phase>,
    /// Held while publishing; acquired under `phase`.
    publish_turn: Mutex<()>,
}

impl NormativeBoard {
    /// Build an uninitialized board using the wall clock.
    pub fn new(config: NormBoardConfig, bridge: Arc<dyn SignalBridge>) -> Self {
        Self::with_clock(config, bridge, Arc::new(SystemClock))
    }

    /// Build an uninitialized board reading time from `clock`.
    pub fn with_clock(
        config: NormBoardConfig,
        bridge: Arc<dyn SignalBridge>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let id = config
            .board
            .board_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self {
            id,
            config,
            bridge,
            clock,
            phase: Mutex::new(Phase::Uninitialized),
            publish_turn: Mutex::new(()),
        }
    }

    /// Build a board and move it to `Ready`.
    pub fn init(config: NormBoardConfig, bridge: Arc<dyn SignalBridge>) -> BoardResult<Self> {
        let board = Self::new(config, bridge);
        board.initialize()?;
        Ok(board)
    }

    /// Build a board reading time from `clock` and move it to `Ready`.
    pub fn init_with_clock(
        config: NormBoardConfig,
        bridge: Arc<dyn SignalBridge>,
        clock: Arc<dyn Clock>,
    ) -> BoardResult<Self> {
        let board = Self::with_clock(config, bridge, clock);
        board.initialize()?;
        Ok(board)
    }

    /// Create the fact store, registry and interpreter.
    ///
    /// A no-op on a ready board. A torn-down board cannot come back.
    pub fn initialize(&self) -> BoardResult<()> {
        let mut phase = self.lock()?;
        match *phase {
            Phase::Ready(_) => Ok(()),
            Phase::TornDown => Err(self.not_initialized()),
            Phase::Uninitialized => {
                *phase = Phase::Ready(Box::new(BoardState {
                    interpreter: NormInterpreter::new(self.config.verification.clone()),
                    registry: ProviderRegistry::new(self.config.provider.clone()),
                }));
                info!(board = %self.id, version = VERSION, "normative board initialized");
                Ok(())
            }
        }
    }

    /// Discard all state. Irreversible.
    pub fn teardown(&self) -> BoardResult<()> {
        let mut phase = self.lock()?;
        if matches!(*phase, Phase::TornDown) {
            return Err(self.not_initialized());
        }
        *phase = Phase::TornDown;
        info!(board = %self.id, "normative board torn down");
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &NormBoardConfig {
        &self.config
    }

    pub fn status(&self) -> BoardResult<BoardStatus> {
        Ok(self.lock()?.status())
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Parse and install a normative program, replacing the active one.
    pub fn load(&self, source: &str) -> BoardResult<VerificationReport> {
        let _span = normboard_observability::load_span!(self.id).entered();
        self.ensure_ready()?;
        let program = parse_program(source)?;
        info!(program = %program.name, norms = program.len(), "loading normative program");
        self.mutate(move |state| {
            state.interpreter.load_program(program);
            Ok(())
        })
    }

    /// Parse `text` as a ground literal and add it to the fact base.
    pub fn add_fact(&self, text: &str) -> BoardResult<VerificationReport> {
        let _span = normboard_observability::fact_span!(self.id, "add", text).entered();
        self.ensure_ready()?;
        let fact = parse_fact(text)?;
        self.mutate(move |state| {
            state.interpreter.add_fact(fact)?;
            Ok(())
        })
    }

    /// Parse `text` as a ground literal and remove it from the fact base.
    pub fn remove_fact(&self, text: &str) -> BoardResult<VerificationReport> {
        let _span = normboard_observability::fact_span!(self.id, "remove", text).entered();
        self.ensure_ready()?;
        let fact = parse_fact(text)?;
        self.mutate(move |state| {
            state.interpreter.remove_fact(&fact)?;
            Ok(())
        })
    }

    /// Register or replace the provider under `id`.
    pub fn update_provider(
        &self,
        id: &str,
        provider: Arc<dyn DynamicFactProvider>,
    ) -> BoardResult<VerificationReport> {
        let _span = normboard_observability::provider_span!(self.id, id).entered();
        self.mutate(|state| {
            state.registry.register(id, provider);
            Ok(())
        })
    }

    /// Unregister the provider under `id`, if any.
    pub fn remove_provider(&self, id: &str) -> BoardResult<VerificationReport> {
        let _span = normboard_observability::provider_span!(self.id, id).entered();
        self.mutate(|state| {
            if state.registry.unregister(id).is_none() {
                warn!(provider = %id, "no provider registered under this id");
            }
            Ok(())
        })
    }

    /// Run a verification pass without mutating anything first.
    pub fn verify_norms(&self) -> BoardResult<VerificationReport> {
        self.mutate(|_| Ok(()))
    }

    // ── Views ────────────────────────────────────────────────────────────

    pub fn debug_snapshot(&self) -> BoardResult<String> {
        self.read(|state| self.debug_text(state))
    }

    pub fn export_markup(&self) -> BoardResult<MarkupDocument> {
        self.read(|state| MarkupDocument::from_state(&self.id, &state.interpreter.export_state()))
    }

    pub fn state(&self) -> BoardResult<NormativeState> {
        self.read(|state| state.interpreter.export_state())
    }

    pub fn obligations(&self) -> BoardResult<Vec<Obligation>> {
        self.read(|state| state.interpreter.obligations().cloned().collect())
    }

    /// Active `obligation(bearer, reason, goal, deadline)` properties.
    pub fn observable_properties(&self) -> BoardResult<Vec<Literal>> {
        self.read(|state| state.interpreter.export_state().observable_properties())
    }

    pub fn facts(&self) -> BoardResult<Vec<Literal>> {
        self.read(|state| state.interpreter.store().facts().cloned().collect())
    }

    pub fn norms_source(&self) -> BoardResult<Option<String>> {
        self.read(|state| state.interpreter.norms_source())
    }

    pub fn verification_count(&self) -> BoardResult<u64> {
        self.read(|state| state.interpreter.verification_count())
    }

    pub fn provider_ids(&self) -> BoardResult<Vec<String>> {
        self.read(|state| state.registry.ids().into_iter().map(String::from).collect())
    }

    /// Recorded provider degradations, including those of rolled-back operations.
    pub fn degradations(&self) -> BoardResult<Vec<TrackedDegradation>> {
        self.read(|state| state.registry.degradations())
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn lock(&self) -> BoardResult<MutexGuard<'_, Phase>> {
        self.phase
            .lock()
            .map_err(|e| BoardError::Concurrency(format!("board lock poisoned: {e}")))
    }

    fn not_initialized(&self) -> BoardError {
        BoardError::NotInitialized {
            board_id: self.id.clone(),
        }
    }

    fn ensure_ready(&self) -> BoardResult<()> {
        match *self.lock()? {
            Phase::Ready(_) => Ok(()),
            _ => Err(self.not_initialized()),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&BoardState) -> T) -> BoardResult<T> {
        match &*self.lock()? {
            Phase::Ready(state) => Ok(f(&**state)),
            _ => Err(self.not_initialized()),
        }
    }

    fn debug_text(&self, state: &BoardState) -> String {
        render_debug_text(
            &self.id,
            &state.interpreter.export_state(),
            &state.registry.dynamic_facts(),
            &state.registry.active_degradations(Utc::now()),
        )
    }

    /// Apply `change`, verify, and roll back both on failure.
    fn mutate<F>(&self, change: F) -> BoardResult<VerificationReport>
    where
        F: FnOnce(&mut BoardState) -> BoardResult<()>,
    {
        let (publication, _turn) = {
            let mut phase = self.lock()?;
            let Phase::Ready(state) = &mut *phase else {
                return Err(self.not_initialized());
            };
            let checkpoint = (**state).clone();
            let now = self.clock.now_millis();
            let _span = normboard_observability::verify_span!(self.id).entered();

            let outcome =
                change(&mut **state).and_then(|()| state.verify(now).map_err(BoardError::from));
            let publication = match outcome {
                Ok(report) => Publication {
                    report,
                    snapshot: state.interpreter.export_state(),
                    debug_view: self
                        .config
                        .board
                        .publish_debug_view
                        .then(|| self.debug_text(state)),
                },
                Err(err) => {
                    **state = checkpoint;
                    warn!(board = %self.id, error = %err, "operation rolled back");
                    return Err(err);
                }
            };
            let turn = self
                .publish_turn
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            (publication, turn)
        };

        self.publish(&publication);
        Ok(publication.report)
    }

    /// Push a successful operation's results to the bridge. Failures are logged only.
    fn publish(&self, publication: &Publication) {
        let Publication {
            report,
            snapshot,
            debug_view,
        } = publication;

        events::verification_finished(&self.id, report);
        for event in report.events() {
            events::obligation_signal(&self.id, &event);
            if let Err(e) = self.bridge.signal(&event) {
                warn!(board = %self.id, error = %e, signal = event.signal_name(), "bridge signal failed");
            }
        }
        if let Err(e) = self.bridge.publish(snapshot) {
            warn!(board = %self.id, error = %e, "bridge publish failed");
        }
        if let Some(text) = debug_view {
            if let Err(e) = self.bridge.publish_debug_view(text) {
                warn!(board = %self.id, error = %e, "bridge debug view failed");
            }
        }
    }
}

impl fmt::Debug for NormativeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormativeBoard")
            .field("id", &self.id)
            .field("status", &self.status().ok())
            .finish()
    }
}
