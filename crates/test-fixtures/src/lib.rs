//! Test fixture loader for normative programs and board scenarios.
//!
//! Norm programs live under `fixtures/norms/*.npl`; scenarios are JSON files
//! under `fixtures/scenarios/` describing a sequence of board operations and
//! the expected observable state after each one.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = fixture_text(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {relative_path}: {e}"))
}

/// Read a fixture file as text, e.g. a norm program.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn fixture_text(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).exists()
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List fixture files in `subdir` with the given extension, sorted by name.
pub fn list_fixtures(subdir: &str, extension: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension()
                .is_some_and(|ext| ext == extension)
                .then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Every scenario under `fixtures/scenarios/`.
pub fn load_scenarios() -> Vec<Scenario> {
    list_fixtures("scenarios", "json")
        .into_iter()
        .map(|path| {
            let content = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
            serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
        })
        .collect()
}

/// A scripted run against a freshly initialized board.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Norm program fixture, relative to the fixtures root.
    pub program: String,
    /// Manual clock reading when the board is created.
    #[serde(default)]
    pub clock_start: i64,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn program_source(&self) -> String {
        fixture_text(&self.program)
    }
}

/// One board operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScenarioStep {
    AddFact {
        fact: String,
        #[serde(default)]
        expect: Expectation,
    },
    RemoveFact {
        fact: String,
        #[serde(default)]
        expect: Expectation,
    },
    Verify {
        #[serde(default)]
        expect: Expectation,
    },
    /// Move the manual clock forward.
    Advance { millis: i64 },
}

/// What must hold after a step. Absent fields are not checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Expectation {
    /// Error kind: `malformed_fact`, `norm_parse`, `regimented`,
    /// `malformed_norm`, `solution_limit` or `not_initialized`.
    pub error: Option<String>,
    /// Active obligations as displayed literals, in any order.
    pub active: Option<Vec<String>>,
    /// Signal names emitted by this step, in order.
    pub signals: Option<Vec<String>>,
}
