//! ProviderRegistry: dynamic fact providers keyed by id.
//!
//! Providers are consulted in registration order. The first provider that
//! claims a literal's signature is authoritative for it; results are never
//! merged across providers. A provider whose `consult` fails is treated as
//! not relevant for that literal and the failure is recorded as a
//! degradation. So is a provider that hands back a substitution binding a
//! variable to itself.

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use normboard_core::config::ProviderConfig;
use normboard_core::constants::PROVIDER_COMPONENT_PREFIX;
use normboard_core::errors::ProviderError;
use normboard_core::models::{DegradationEvent, Literal, PredicateSignature, Substitution};
use normboard_core::traits::{DynamicFactProvider, SubstitutionStream};
use normboard_observability::{DegradationTracker, TrackedDegradation};

/// Ordered map from provider id to provider.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<(String, Arc<dyn DynamicFactProvider>)>,
    config: ProviderConfig,
    degradation: Arc<Mutex<DegradationTracker>>,
}

impl ProviderRegistry {
    pub fn new(config: ProviderConfig) -> Self {
        let tracker = DegradationTracker::with_capacity(config.degradation_history);
        Self {
            providers: Vec::new(),
            config,
            degradation: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Insert or replace the provider under `id`. A replaced provider keeps
    /// its position in the consultation order.
    pub fn register(&mut self, id: impl Into<String>, provider: Arc<dyn DynamicFactProvider>) {
        let id = id.into();
        match self.providers.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => {
                debug!(provider = %id, "replacing dynamic fact provider");
                slot.1 = provider;
            }
            None => {
                debug!(provider = %id, "registering dynamic fact provider");
                self.providers.push((id, provider));
            }
        }
    }

    /// Remove the provider under `id`.
    pub fn unregister(&mut self, id: &str) -> Option<Arc<dyn DynamicFactProvider>> {
        let idx = self.providers.iter().position(|(existing, _)| existing == id)?;
        Some(self.providers.remove(idx).1)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn DynamicFactProvider>> {
        self.providers
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, p)| p)
    }

    /// Provider ids in consultation order.
    pub fn ids(&self) -> Vec<&str> {
        self.providers.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// What each provider currently computes, in consultation order.
    pub fn dynamic_facts(&self) -> Vec<(String, Vec<Literal>)> {
        self.providers
            .iter()
            .map(|(id, p)| (id.clone(), p.dynamic_facts()))
            .collect()
    }

    /// True iff some provider claims `signature`.
    pub fn is_relevant(&self, signature: &PredicateSignature) -> bool {
        self.providers.iter().any(|(_, p)| p.is_relevant(signature))
    }

    /// Results from the first provider claiming the literal's signature.
    ///
    /// `None` means no provider claims it, which is distinct from a provider
    /// answering with an empty stream. A provider's answer is taken up to
    /// `max_results_per_consult` and rejected whole if any substitution in it
    /// binds a variable cyclically.
    pub fn consult(
        &self,
        literal: &Literal,
        substitution: &Substitution,
    ) -> Option<SubstitutionStream> {
        let signature = literal.signature();
        let limit = self.config.max_results_per_consult;
        for (id, provider) in &self.providers {
            if !provider.is_relevant(&signature) {
                continue;
            }
            let answer = provider
                .consult(literal, substitution)
                .and_then(|stream| Self::checked(literal, stream.take(limit).collect()));
            match answer {
                Ok(results) => {
                    self.mark_recovered(id);
                    return Some(Box::new(results.into_iter()));
                }
                Err(err) => self.record_degradation(id, literal, &err),
            }
        }
        None
    }

    fn checked(
        literal: &Literal,
        results: Vec<Substitution>,
    ) -> Result<Vec<Substitution>, ProviderError> {
        match results.iter().find(|s| s.has_cycle()) {
            Some(cyclic) => Err(ProviderError::CyclicBinding {
                literal: literal.to_string(),
                binding: cyclic.to_string(),
            }),
            None => Ok(results),
        }
    }

    fn component(id: &str) -> String {
        format!("{PROVIDER_COMPONENT_PREFIX}{id}")
    }

    fn record_degradation(&self, id: &str, literal: &Literal, err: &ProviderError) {
        warn!(provider = %id, literal = %literal, error = %err, "provider consult failed, treating as not relevant");
        let event = DegradationEvent {
            component: Self::component(id),
            failure: err.to_string(),
            fallback_used: "not relevant".to_string(),
            timestamp: Utc::now(),
        };
        match self.degradation.lock() {
            Ok(mut tracker) => {
                tracker.record(event);
            }
            Err(e) => warn!(error = %e, "degradation tracker lock poisoned"),
        }
    }

    fn mark_recovered(&self, id: &str) {
        if let Ok(mut tracker) = self.degradation.lock() {
            tracker.mark_recovered(&Self::component(id));
        }
    }

    /// Snapshot of all recorded provider degradations.
    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.degradation
            .lock()
            .map(|t| t.events().to_vec())
            .unwrap_or_default()
    }

    /// Active degradations with how long each has lasted as of `now`.
    pub fn active_degradations(
        &self,
        now: DateTime<Utc>,
    ) -> Vec<(TrackedDegradation, Duration)> {
        let Ok(tracker) = self.degradation.lock() else {
            return Vec::new();
        };
        tracker
            .active_degradations()
            .into_iter()
            .map(|t| {
                let lasted = tracker
                    .degraded_duration(&t.event.component, now)
                    .unwrap_or_else(Duration::zero);
                (t.clone(), lasted)
            })
            .collect()
    }

    /// Whether the provider under `id` is currently degraded.
    pub fn is_degraded(&self, id: &str) -> bool {
        self.degradation
            .lock()
            .map(|t| t.is_degraded(&Self::component(id)))
            .unwrap_or(false)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.ids())
            .field("config", &self.config)
            .finish()
    }
}
