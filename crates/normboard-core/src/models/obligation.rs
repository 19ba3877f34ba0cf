//! Obligations derived by verification.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::term::{Literal, Term};
use crate::constants::OBLIGATION_FUNCTOR;

/// Identifier of the agent bearing an obligation.
///
/// Remembers whether it was bound from a string term so the observable
/// property renders it the way it was written. `Display` shows the bare name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId {
    name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    quoted: bool,
}

impl AgentId {
    /// Interpret a bound term as an agent id. Only atoms and strings qualify.
    pub fn from_term(term: &Term) -> Option<Self> {
        match term {
            Term::Atom(name) => Some(Self {
                name: name.clone(),
                quoted: false,
            }),
            Term::Str(name) => Some(Self {
                name: name.clone(),
                quoted: true,
            }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The term this id was bound from.
    pub fn to_term(&self) -> Term {
        if self.quoted {
            Term::Str(self.name.clone())
        } else {
            Term::Atom(self.name.clone())
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self {
            name: s.to_string(),
            quoted: false,
        }
    }
}

/// Lifecycle state of an obligation while its condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationState {
    Active,
    /// The goal was observed in the fact base.
    Fulfilled,
    /// The deadline passed while the obligation was active.
    Unfulfilled,
}

impl fmt::Display for ObligationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Fulfilled => "fulfilled",
            Self::Unfulfilled => "unfulfilled",
        })
    }
}

/// Identity of an obligation across verification passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObligationKey {
    pub norm_id: String,
    pub bearer: AgentId,
    pub reason: Term,
    pub goal: Literal,
}

/// A duty assigned to an agent, with a goal and a deadline in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    pub norm_id: String,
    pub bearer: AgentId,
    pub reason: Term,
    pub goal: Literal,
    pub deadline: i64,
    pub created_at: i64,
    pub state: ObligationState,
}

impl Obligation {
    pub fn key(&self) -> ObligationKey {
        ObligationKey {
            norm_id: self.norm_id.clone(),
            bearer: self.bearer.clone(),
            reason: self.reason.clone(),
            goal: self.goal.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == ObligationState::Active
    }

    /// The observable property `obligation(bearer, reason, goal, deadline)`.
    pub fn to_literal(&self) -> Literal {
        Literal::new(
            OBLIGATION_FUNCTOR,
            vec![
                self.bearer.to_term(),
                self.reason.clone(),
                Term::from(self.goal.clone()),
                Term::Int(self.deadline),
            ],
        )
    }
}

impl fmt::Display for Obligation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.to_literal(), self.state)
    }
}
