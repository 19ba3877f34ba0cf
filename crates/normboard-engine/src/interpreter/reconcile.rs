//! Turn norm consequences into obligations and reconcile them with the
//! obligations of the previous pass.

use std::collections::BTreeMap;

use normboard_core::errors::VerificationError;
use normboard_core::models::{
    AgentId, Consequence, Literal, Norm, Obligation, ObligationKey, ObligationState, Substitution,
    VerificationReport,
};

use super::solver::Solver;

/// An obligation instance derived in the current pass.
#[derive(Debug, Clone)]
pub(crate) struct Derived {
    pub key: ObligationKey,
    pub deadline: i64,
}

fn malformed(norm: &Norm, reason: String) -> VerificationError {
    VerificationError::MalformedNorm {
        norm_id: norm.id.clone(),
        reason,
    }
}

/// Instantiate the consequence of `norm` under `substitution`.
///
/// A `fail(...)` consequence is a regimentation and always errors.
pub(crate) fn instantiate(
    norm: &Norm,
    substitution: &Substitution,
    now: i64,
) -> Result<Derived, VerificationError> {
    match &norm.consequence {
        Consequence::Fail { reason } => Err(VerificationError::Regimented {
            norm_id: norm.id.clone(),
            reason: substitution.apply(reason).to_string(),
        }),
        Consequence::Obligation {
            bearer,
            reason,
            goal,
            deadline,
        } => {
            let bearer_term = substitution.apply(bearer);
            let bearer = AgentId::from_term(&bearer_term).ok_or_else(|| {
                malformed(norm, format!("bearer {bearer_term} is not bound to an agent"))
            })?;

            let reason = substitution.apply(reason);
            if !reason.is_ground() {
                return Err(malformed(norm, format!("reason {reason} is not ground")));
            }

            let goal_term = substitution.apply(goal);
            let goal = Literal::from_term(&goal_term)
                .ok_or_else(|| malformed(norm, format!("goal {goal_term} is not a literal")))?;

            let deadline = deadline.resolve(substitution, now).ok_or_else(|| {
                malformed(norm, format!("deadline {deadline} is not bound to an integer"))
            })?;

            Ok(Derived {
                key: ObligationKey {
                    norm_id: norm.id.clone(),
                    bearer,
                    reason,
                    goal,
                },
                deadline,
            })
        }
    }
}

/// Compute the next obligation set and the report of what changed.
///
/// Obligations already present keep their deadline and state; only active
/// ones are re-checked for fulfilment and expiry.
pub(crate) fn reconcile(
    previous: &BTreeMap<ObligationKey, Obligation>,
    derived: Vec<Derived>,
    solver: &Solver<'_>,
    now: i64,
) -> (BTreeMap<ObligationKey, Obligation>, VerificationReport) {
    let mut report = VerificationReport {
        verified_at: now,
        ..VerificationReport::default()
    };
    let mut next = BTreeMap::new();

    for Derived { key, deadline } in derived {
        if next.contains_key(&key) {
            continue;
        }
        let obligation = match previous.get(&key) {
            Some(existing) => existing.clone(),
            None => {
                let created = Obligation {
                    norm_id: key.norm_id.clone(),
                    bearer: key.bearer.clone(),
                    reason: key.reason.clone(),
                    goal: key.goal.clone(),
                    deadline,
                    created_at: now,
                    state: ObligationState::Active,
                };
                report.created.push(created.clone());
                created
            }
        };
        next.insert(key, obligation);
    }

    for obligation in next.values_mut() {
        if !obligation.is_active() {
            continue;
        }
        if solver.holds(&obligation.goal, &Substitution::new()) {
            obligation.state = ObligationState::Fulfilled;
            report.fulfilled.push(obligation.clone());
        } else if obligation.deadline < now {
            obligation.state = ObligationState::Unfulfilled;
            report.unfulfilled.push(obligation.clone());
        }
    }

    report.retracted = previous
        .iter()
        .filter(|(key, _)| !next.contains_key(*key))
        .map(|(_, obligation)| obligation.clone())
        .collect();

    (next, report)
}
