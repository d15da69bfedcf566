//! Problem/solution catalog: the store the verification engine reads from.
//!
//! `SolutionCatalog` is the lookup seam (the engine and tests only need the
//! two getters); `InMemoryCatalog` is the one real implementation, built from
//! JSON files, raw JSON strings, or already-constructed values (seed bank,
//! tests). Listing order follows the problems document.

use std::collections::{BTreeMap, HashMap};
use std::fs;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Difficulty, ExpectedSolution, Problem};

/// Lookup interface the verification engine depends on.
pub trait SolutionCatalog {
  fn get_problem(&self, problem_id: &str) -> Option<&Problem>;
  fn get_expected_solution(&self, problem_id: &str) -> Option<&ExpectedSolution>;
}

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("failed to read {0}: {1}")]
  Read(String, #[source] std::io::Error),
  #[error("invalid {0} JSON: {1}")]
  Parse(&'static str, #[source] serde_json::Error),
}

/// Aggregate counts over the problem inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProblemStats {
  pub total_problems: usize,
  pub difficulty_breakdown: BTreeMap<String, usize>,
  pub tag_breakdown: BTreeMap<String, usize>,
}

#[derive(Deserialize)]
struct ProblemsDoc {
  problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct SolutionsDoc {
  solutions: Vec<ExpectedSolution>,
}

#[derive(Debug)]
pub struct InMemoryCatalog {
  problems: Vec<Problem>,
  solutions: HashMap<String, ExpectedSolution>,
}

impl InMemoryCatalog {
  pub fn from_parts(problems: Vec<Problem>, solutions: Vec<ExpectedSolution>) -> Self {
    let solutions = solutions
      .into_iter()
      .map(|s| (s.problem_id.clone(), s))
      .collect();
    Self { problems, solutions }
  }

  /// Parse the two catalog documents: `{"problems": [...]}` and
  /// `{"solutions": [...]}`.
  pub fn from_json(problems_json: &str, solutions_json: &str) -> Result<Self, CatalogError> {
    let problems: ProblemsDoc =
      serde_json::from_str(problems_json).map_err(|e| CatalogError::Parse("problems", e))?;
    let solutions: SolutionsDoc =
      serde_json::from_str(solutions_json).map_err(|e| CatalogError::Parse("solutions", e))?;
    Ok(Self::from_parts(problems.problems, solutions.solutions))
  }

  pub fn from_files(problems_path: &str, solutions_path: &str) -> Result<Self, CatalogError> {
    let problems_json = fs::read_to_string(problems_path)
      .map_err(|e| CatalogError::Read(problems_path.to_string(), e))?;
    let solutions_json = fs::read_to_string(solutions_path)
      .map_err(|e| CatalogError::Read(solutions_path.to_string(), e))?;
    Self::from_json(&problems_json, &solutions_json)
  }

  /// Problems in catalog order.
  pub fn all_problems(&self) -> &[Problem] {
    &self.problems
  }

  pub fn problems_by_difficulty(&self, difficulty: Difficulty) -> Vec<&Problem> {
    self
      .problems
      .iter()
      .filter(|p| p.difficulty == difficulty)
      .collect()
  }

  /// Uniform pick from the difficulty pool; `None` when the pool is empty.
  pub fn random_by_difficulty(&self, difficulty: Difficulty) -> Option<&Problem> {
    let pool = self.problems_by_difficulty(difficulty);
    pool.choose(&mut rand::thread_rng()).copied()
  }

  pub fn stats(&self) -> ProblemStats {
    let mut difficulty_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut tag_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    for problem in &self.problems {
      *difficulty_breakdown
        .entry(problem.difficulty.as_str().to_string())
        .or_insert(0) += 1;
      for tag in &problem.tags {
        *tag_breakdown.entry(tag.clone()).or_insert(0) += 1;
      }
    }
    ProblemStats {
      total_problems: self.problems.len(),
      difficulty_breakdown,
      tag_breakdown,
    }
  }
}

impl SolutionCatalog for InMemoryCatalog {
  fn get_problem(&self, problem_id: &str) -> Option<&Problem> {
    self.problems.iter().find(|p| p.id == problem_id)
  }

  fn get_expected_solution(&self, problem_id: &str) -> Option<&ExpectedSolution> {
    self.solutions.get(problem_id)
  }
}
