//! Parsed normative programs.
//!
//! A program renders back to source with `Display`, which is also the
//! input of its fingerprint.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::substitution::Substitution;
use super::term::{Literal, Term};

/// A named set of norms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormativeProgram {
    pub name: String,
    pub norms: Vec<Norm>,
}

impl NormativeProgram {
    pub fn new(name: impl Into<String>, norms: Vec<Norm>) -> Self {
        Self {
            name: name.into(),
            norms,
        }
    }

    pub fn norm(&self, id: &str) -> Option<&Norm> {
        self.norms.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.norms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.norms.is_empty()
    }

    /// blake3 hash of the rendered source, hex encoded.
    pub fn fingerprint(&self) -> String {
        blake3::hash(self.to_string().as_bytes()).to_hex().to_string()
    }
}

impl fmt::Display for NormativeProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "np {} {{", self.name)?;
        for norm in &self.norms {
            writeln!(f, "    {norm}")?;
        }
        writeln!(f, "}}")
    }
}

/// `norm ID: CONDITION -> CONSEQUENCE.`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Norm {
    pub id: String,
    /// Conjunction; empty means `true`.
    pub condition: Vec<ConditionGoal>,
    pub consequence: Consequence,
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "norm {}: ", self.id)?;
        if self.condition.is_empty() {
            f.write_str("true")?;
        }
        for (i, goal) in self.condition.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{goal}")?;
        }
        write!(f, " -> {}.", self.consequence)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionGoal {
    Holds(Literal),
    /// Negation as failure.
    NotHolds(Literal),
}

impl fmt::Display for ConditionGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Holds(lit) => write!(f, "{lit}"),
            Self::NotHolds(lit) => write!(f, "not {lit}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consequence {
    Obligation {
        bearer: Term,
        reason: Term,
        goal: Term,
        deadline: DeadlineSpec,
    },
    /// Regimentation: the condition must never hold.
    Fail { reason: Term },
}

impl fmt::Display for Consequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Obligation {
                bearer,
                reason,
                goal,
                deadline,
            } => write!(f, "obligation({bearer}, {reason}, {goal}, {deadline})"),
            Self::Fail { reason } => write!(f, "fail({reason})"),
        }
    }
}

/// When an obligation expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlineSpec {
    /// Milliseconds after the obligation is created.
    Relative { millis: i64 },
    /// A term that must be bound to an epoch-millisecond integer.
    Absolute(Term),
}

impl DeadlineSpec {
    /// Resolve against the creation time. `None` when an absolute term is
    /// not bound to an integer.
    pub fn resolve(&self, substitution: &Substitution, now: i64) -> Option<i64> {
        match self {
            Self::Relative { millis } => Some(now.saturating_add(*millis)),
            Self::Absolute(term) => substitution.apply(term).as_int(),
        }
    }
}

const UNITS: [(i64, &str); 4] = [
    (86_400_000, "day"),
    (3_600_000, "hour"),
    (60_000, "minute"),
    (1_000, "second"),
];

impl fmt::Display for DeadlineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(term) => write!(f, "{term}"),
            Self::Relative { millis } => {
                let (amount, unit) = UNITS
                    .iter()
                    .find(|(size, _)| *millis != 0 && millis % size == 0)
                    .map(|(size, name)| (millis / size, *name))
                    .unwrap_or((*millis, "millisecond"));
                let plural = if amount == 1 { "" } else { "s" };
                write!(f, "`{amount} {unit}{plural}`")
            }
        }
    }
}
