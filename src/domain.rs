//! Domain models: practice problems, reference solutions, and submissions.

use serde::{Deserialize, Serialize};

/// Difficulty tier a problem is filed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Beginner,
  Intermediate,
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Beginner => "beginner",
      Difficulty::Intermediate => "intermediate",
    }
  }

  /// Strict parse of the wire value ("beginner" / "intermediate").
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "beginner" => Some(Difficulty::Beginner),
      "intermediate" => Some(Difficulty::Intermediate),
      _ => None,
    }
  }
}

impl std::fmt::Display for Difficulty {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A system-design practice problem. `expectations` is the ordered list of
/// natural-language requirements the evaluator scores design choices against.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
  pub id: String,
  pub title: String,
  #[serde(default)] pub description: String,
  pub difficulty: Difficulty,
  #[serde(default)] pub tags: Vec<String>,
  #[serde(default)] pub expectations: Vec<String>,
}

/// Reference solution for a problem: the component list and design choices a
/// submission is graded against, plus free-text scalability/extension notes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpectedSolution {
  pub problem_id: String,
  #[serde(default)] pub approach_name: String,
  #[serde(default)] pub architecture_components: Vec<String>,
  #[serde(default)] pub design_choices: Vec<String>,
  #[serde(default)] pub scalability: String,
  #[serde(default)] pub extensions: String,
}

/// What a user submits for verification. Component labels are free text;
/// design choices are full sentences; the explanation is optional prose.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmittedSolution {
  pub architecture_components: Vec<String>,
  #[serde(default)] pub design_choices: Vec<String>,
  #[serde(default)] pub explanation: String,
}
