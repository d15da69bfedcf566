//! Deterministic verification & scoring for submitted system designs.
//!
//! Flow:
//! 1) The component matcher reconciles submitted labels against the reference
//!    list: an exact pass on canonical keys, then a fuzzy Jaccard pass.
//! 2) The design-choice evaluator measures requirement coverage and rationale
//!    depth over the submitted choice sentences.
//! 3) The two sub-scores combine 40/60 into the overall score.
//! 4) Recommendation rules derive next steps from the diagnostics.
//!
//! Everything here is pure: no I/O, no randomness, no shared mutable state.
//! Repeated calls with identical inputs produce identical reports.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::SolutionCatalog;
use crate::domain::{ExpectedSolution, SubmittedSolution};
use crate::util::truncate_chars;

const COMPONENT_WEIGHT: f64 = 0.4;
const DESIGN_WEIGHT: f64 = 0.6;

const EXACT_MATCH_POINTS: f64 = 80.0;
const PARTIAL_MATCH_POINTS: f64 = 20.0;
const PARTIAL_THRESHOLD: f64 = 0.6;

const COVERAGE_WEIGHT: f64 = 0.7;
const RATIONALE_WEIGHT: f64 = 0.3;
const DETAIL_BONUS_CAP: f64 = 20.0;
const MIN_MEANINGFUL_OVERLAP: usize = 2;

const MAX_RECOMMENDATIONS: usize = 5;

const STOP_WORDS: &[&str] = &[
  "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Concept vocabulary for the rationale-depth heuristic. Matched by substring
/// against the lowercased concatenation of all submitted choices.
const DESIGN_CONCEPTS: &[&str] = &[
  "scalability", "availability", "consistency", "partition", "cache",
  "database", "load", "performance", "fault", "redundancy", "replication",
];

/// The only failure the engine produces: the id has no catalog entry.
/// Degenerate submissions (empty lists, empty strings) score, they never fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NotFoundError {
  #[error("No solution found for problem: {0}")]
  Solution(String),
  #[error("Problem not found: {0}")]
  Problem(String),
}

/// Outcome of reconciling submitted component labels against the reference
/// list. `matched` holds (expected, submitted) pairs in their original
/// spelling; `partial` holds (expected, submitted, similarity) triples.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchResult {
  pub matched: Vec<(String, String)>,
  pub missing: Vec<String>,
  pub extra: Vec<String>,
  pub partial: Vec<(String, String, f64)>,
  pub score: f64,
}

/// Outcome of checking submitted design choices against the problem's
/// requirement list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationResult {
  pub addressed: Vec<String>,
  pub missing: Vec<String>,
  pub rationale_score: f64,
  pub score: f64,
}

/// Final verification output returned to the caller. Immutable value;
/// construct once, never mutate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerificationReport {
  pub problem_id: String,
  pub overall_score: f64,
  pub component_result: MatchResult,
  pub evaluation_result: EvaluationResult,
  pub recommendations: Vec<String>,
}

/// Verify a submission against the catalog's reference solution and the
/// problem's requirements. Fails only when the id has no expected solution
/// (checked first) or no problem record.
pub fn verify_solution(
  catalog: &dyn SolutionCatalog,
  problem_id: &str,
  submitted: &SubmittedSolution,
) -> Result<VerificationReport, NotFoundError> {
  let expected = catalog
    .get_expected_solution(problem_id)
    .ok_or_else(|| NotFoundError::Solution(problem_id.to_string()))?;
  let problem = catalog
    .get_problem(problem_id)
    .ok_or_else(|| NotFoundError::Problem(problem_id.to_string()))?;

  let (component_score, component_result) = match_components(
    &submitted.architecture_components,
    &expected.architecture_components,
  );
  let (evaluation_score, evaluation_result) = evaluate_design_choices(
    &submitted.design_choices,
    &expected.design_choices,
    &problem.expectations,
  );

  // Sub-scores combine unrounded; rounding happens once per record field.
  let overall_score = round1(component_score * COMPONENT_WEIGHT + evaluation_score * DESIGN_WEIGHT);
  let recommendations =
    build_recommendations(&component_result, &evaluation_result, overall_score, expected);

  Ok(VerificationReport {
    problem_id: problem_id.to_string(),
    overall_score,
    component_result,
    evaluation_result,
    recommendations,
  })
}

/// Canonical key for a component label: lowercase with spaces, hyphens and
/// underscores removed. Two labels name the same component iff their keys are
/// equal. Empty input yields the empty key.
pub fn canonical_key(label: &str) -> String {
  label
    .to_lowercase()
    .chars()
    .filter(|c| !matches!(c, ' ' | '-' | '_'))
    .collect()
}

/// Jaccard similarity over lowercase whitespace-token sets, in [0, 1].
/// Returns 0.0 when either side has no tokens.
pub fn label_similarity(a: &str, b: &str) -> f64 {
  let a = a.to_lowercase();
  let b = b.to_lowercase();
  let tokens_a: HashSet<&str> = a.split_whitespace().collect();
  let tokens_b: HashSet<&str> = b.split_whitespace().collect();
  if tokens_a.is_empty() || tokens_b.is_empty() {
    return 0.0;
  }
  let intersection = tokens_a.intersection(&tokens_b).count();
  let union = tokens_a.union(&tokens_b).count();
  intersection as f64 / union as f64
}

/// Whether a design choice addresses a requirement: the two meaningful-token
/// sets (stop words removed, naive plurals folded) share at least two tokens.
pub fn choice_addresses_requirement(choice: &str, requirement: &str) -> bool {
  let choice_tokens = meaningful_tokens(choice);
  let requirement_tokens = meaningful_tokens(requirement);
  choice_tokens.intersection(&requirement_tokens).count() >= MIN_MEANINGFUL_OVERLAP
}

/// Reconcile submitted component labels against the expected list.
///
/// Exact pass first: occurrence-level first-fit on canonical keys, scanning
/// submitted labels in order; no occurrence matches twice. Partial pass next:
/// every still-unmatched (expected, submitted) pair with Jaccard similarity
/// above 0.6, with no consumption — one submitted label may appear in several
/// partial pairs.
///
/// Exact matches carry up to 80 points and partials up to 20, except that
/// exact-matching every expected label scores the full 100. Empty expected
/// list is vacuously 100. Returns the unrounded score alongside the result
/// record (whose `score` field is rounded to one decimal).
pub fn match_components(submitted: &[String], expected: &[String]) -> (f64, MatchResult) {
  let expected_keys: Vec<String> = expected.iter().map(|l| canonical_key(l)).collect();
  let submitted_keys: Vec<String> = submitted.iter().map(|l| canonical_key(l)).collect();

  let mut expected_matched = vec![false; expected.len()];
  let mut submitted_used = vec![false; submitted.len()];
  let mut matched: Vec<(String, String)> = Vec::new();

  for (i, ekey) in expected_keys.iter().enumerate() {
    for (j, skey) in submitted_keys.iter().enumerate() {
      if !submitted_used[j] && skey == ekey {
        expected_matched[i] = true;
        submitted_used[j] = true;
        matched.push((expected[i].clone(), submitted[j].clone()));
        break;
      }
    }
  }

  let mut partial: Vec<(String, String, f64)> = Vec::new();
  for (i, expected_label) in expected.iter().enumerate() {
    if expected_matched[i] {
      continue;
    }
    for (j, submitted_label) in submitted.iter().enumerate() {
      if submitted_used[j] {
        continue;
      }
      let similarity = label_similarity(expected_label, submitted_label);
      if similarity > PARTIAL_THRESHOLD {
        partial.push((expected_label.clone(), submitted_label.clone(), similarity));
      }
    }
  }

  let score = if expected.is_empty() || matched.len() == expected.len() {
    100.0
  } else {
    let exact = matched.len() as f64 / expected.len() as f64 * EXACT_MATCH_POINTS;
    let partial_sum: f64 = partial.iter().map(|(_, _, s)| s).sum();
    let partial_points = partial_sum / expected.len() as f64 * PARTIAL_MATCH_POINTS;
    (exact + partial_points).min(100.0)
  };

  let missing: Vec<String> = expected
    .iter()
    .enumerate()
    .filter(|(i, _)| !expected_matched[*i])
    .map(|(_, label)| label.clone())
    .collect();
  let extra: Vec<String> = submitted
    .iter()
    .enumerate()
    .filter(|(j, _)| !submitted_used[*j])
    .map(|(_, label)| label.clone())
    .collect();

  let result = MatchResult { matched, missing, extra, partial, score: round1(score) };
  (score, result)
}

/// Score submitted design choices: requirement coverage (70%) plus rationale
/// depth (30%). `expected` gates the vacuous case only — when both it and
/// `requirements` are empty there is nothing to check and the score is 100.
/// Returns the unrounded score alongside the result record.
pub fn evaluate_design_choices(
  submitted: &[String],
  expected: &[String],
  requirements: &[String],
) -> (f64, EvaluationResult) {
  if expected.is_empty() && requirements.is_empty() {
    let result = EvaluationResult {
      addressed: Vec::new(),
      missing: Vec::new(),
      rationale_score: 0.0,
      score: 100.0,
    };
    return (100.0, result);
  }

  let mut addressed: Vec<String> = Vec::new();
  for requirement in requirements {
    if submitted.iter().any(|choice| choice_addresses_requirement(choice, requirement)) {
      addressed.push(requirement.clone());
    }
  }

  let coverage_pct = if requirements.is_empty() {
    100.0
  } else {
    addressed.len() as f64 / requirements.len() as f64 * 100.0
  };

  let rationale = rationale_score(submitted);
  let score = coverage_pct * COVERAGE_WEIGHT + rationale * RATIONALE_WEIGHT;

  let missing: Vec<String> = requirements
    .iter()
    .filter(|r| !addressed.contains(*r))
    .cloned()
    .collect();

  let result = EvaluationResult {
    addressed,
    missing,
    rationale_score: round1(rationale),
    score: round1(score),
  };
  (score, result)
}

/// Rationale-depth heuristic: concept breadth (distinct vocabulary concepts
/// mentioned, by substring) plus a detail bonus of two points per average
/// word, capped at 20. Empty input scores zero.
fn rationale_score(choices: &[String]) -> f64 {
  if choices.is_empty() {
    return 0.0;
  }

  let text = choices.join(" ").to_lowercase();
  let mentions = DESIGN_CONCEPTS.iter().filter(|c| text.contains(*c)).count();
  let concept_coverage = mentions as f64 / DESIGN_CONCEPTS.len() as f64 * 100.0;

  let total_words: usize = choices.iter().map(|c| c.split_whitespace().count()).sum();
  let avg_words = total_words as f64 / choices.len() as f64;
  let detail_bonus = (avg_words * 2.0).min(DETAIL_BONUS_CAP);

  (concept_coverage + detail_bonus).min(100.0)
}

/// Recommendation rules in priority order, appended while capacity remains:
/// missing components (up to 3 named), first missing requirement, one
/// score-banded message keyed on the rounded overall, extension ideas.
fn build_recommendations(
  component: &MatchResult,
  evaluation: &EvaluationResult,
  overall_score: f64,
  expected: &ExpectedSolution,
) -> Vec<String> {
  let mut recommendations: Vec<String> = Vec::new();

  if recommendations.len() < MAX_RECOMMENDATIONS && !component.missing.is_empty() {
    let named: Vec<&str> = component.missing.iter().take(3).map(String::as_str).collect();
    recommendations.push(format!(
      "Consider adding these missing components: {}",
      named.join(", ")
    ));
  }

  if recommendations.len() < MAX_RECOMMENDATIONS && !evaluation.missing.is_empty() {
    recommendations.push(format!("Address these requirements: {}", evaluation.missing[0]));
  }

  if recommendations.len() < MAX_RECOMMENDATIONS {
    let banded = if overall_score < 60.0 {
      "Focus on covering the core system requirements first"
    } else if overall_score < 80.0 {
      "Good foundation! Consider adding more scalability and fault tolerance details"
    } else {
      "Excellent design! Consider edge cases and performance optimizations"
    };
    recommendations.push(banded.to_string());
  }

  if recommendations.len() < MAX_RECOMMENDATIONS && !expected.extensions.is_empty() {
    recommendations.push(format!(
      "Extension ideas: {}...",
      truncate_chars(&expected.extensions, 100)
    ));
  }

  recommendations
}

fn meaningful_tokens(text: &str) -> HashSet<String> {
  text
    .to_lowercase()
    .split_whitespace()
    .filter(|t| !STOP_WORDS.contains(t))
    .map(fold_plural)
    .collect()
}

// Naive plural fold so "reads" and "read" compare equal. Applied uniformly to
// both sides, so identical tokens always stay equal.
fn fold_plural(token: &str) -> String {
  match token.strip_suffix('s') {
    Some(stem) if token.chars().count() > 3 => stem.to_string(),
    _ => token.to_string(),
  }
}

fn round1(x: f64) -> f64 {
  (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::InMemoryCatalog;
  use crate::domain::{Difficulty, Problem};

  fn labels(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
  }

  fn fixture_catalog() -> InMemoryCatalog {
    let problem = Problem {
      id: "url-shortener".into(),
      title: "Design a URL Shortener".into(),
      description: "Shorten long URLs and redirect with minimal latency.".into(),
      difficulty: Difficulty::Beginner,
      tags: labels(&["web", "storage"]),
      expectations: labels(&["handle high read traffic", "ensure low latency reads"]),
    };
    let solution = ExpectedSolution {
      problem_id: "url-shortener".into(),
      approach_name: "Cached redirect tier".into(),
      architecture_components: labels(&["Load Balancer", "Cache", "Database"]),
      design_choices: labels(&[
        "Cache hot redirects in Redis",
        "Index short codes in the database",
      ]),
      scalability: "Scale reads with cache nodes and database replicas".into(),
      extensions: "Custom aliases, expiring links, QR codes, per-link analytics".into(),
    };
    InMemoryCatalog::from_parts(vec![problem], vec![solution])
  }

  #[test]
  fn canonical_key_collapses_case_and_separators() {
    assert_eq!(canonical_key("Load Balancer"), "loadbalancer");
    assert_eq!(canonical_key("load-balancer"), "loadbalancer");
    assert_eq!(canonical_key("LOAD_BALANCER"), "loadbalancer");
    assert_eq!(canonical_key(""), "");
  }

  #[test]
  fn label_similarity_is_token_jaccard() {
    assert_eq!(label_similarity("User Database", "user database"), 1.0);
    let sim = label_similarity("User Database", "User Cache");
    assert!((sim - 1.0 / 3.0).abs() < 1e-9, "sim={sim}");
    assert_eq!(label_similarity("Cache", "Queue"), 0.0);
    assert_eq!(label_similarity("", "Cache"), 0.0);
  }

  #[test]
  fn equivalent_spellings_exact_match_everything() {
    let (_, result) = match_components(
      &labels(&["load-balancer", "Database"]),
      &labels(&["Load Balancer", "Database"]),
    );
    assert_eq!(result.score, 100.0);
    assert!(result.missing.is_empty());
    assert!(result.extra.is_empty());
    assert_eq!(
      result.matched,
      vec![
        ("Load Balancer".to_string(), "load-balancer".to_string()),
        ("Database".to_string(), "Database".to_string()),
      ]
    );
  }

  #[test]
  fn single_exact_match_of_three_scores_one_third_of_exact_points() {
    let (_, result) = match_components(
      &labels(&["Database"]),
      &labels(&["Load Balancer", "Cache", "Database"]),
    );
    assert_eq!(result.score, 26.7);
    assert_eq!(result.missing, labels(&["Load Balancer", "Cache"]));
    assert!(result.extra.is_empty());
    assert!(result.partial.is_empty());
  }

  #[test]
  fn near_label_counts_as_partial_not_exact() {
    let (_, result) = match_components(
      &labels(&["Message Queue"]),
      &labels(&["Message Queue Service"]),
    );
    assert!(result.matched.is_empty());
    assert_eq!(result.partial.len(), 1);
    let (_, _, sim) = &result.partial[0];
    assert!((sim - 2.0 / 3.0).abs() < 1e-9, "sim={sim}");
    // partials do not clear the diagnostic lists
    assert_eq!(result.missing, labels(&["Message Queue Service"]));
    assert_eq!(result.extra, labels(&["Message Queue"]));
    assert_eq!(result.score, 13.3);
  }

  #[test]
  fn partial_pass_may_reuse_one_submitted_label() {
    let (_, result) = match_components(
      &labels(&["Message Queue"]),
      &labels(&["Primary Message Queue", "Backup Message Queue"]),
    );
    assert_eq!(result.partial.len(), 2, "one submitted label, two partial pairs");
    for (_, submitted, sim) in &result.partial {
      assert_eq!(submitted, "Message Queue");
      assert!((sim - 2.0 / 3.0).abs() < 1e-9);
    }
    assert_eq!(result.score, 13.3);
  }

  #[test]
  fn empty_expected_components_score_vacuous_hundred() {
    let (_, result) = match_components(&labels(&["Anything", "At All"]), &labels(&[]));
    assert_eq!(result.score, 100.0);
    assert!(result.matched.is_empty());
    assert!(result.missing.is_empty());
    assert_eq!(result.extra, labels(&["Anything", "At All"]));
  }

  #[test]
  fn duplicate_labels_match_once_each() {
    let (_, result) = match_components(
      &labels(&["database"]),
      &labels(&["Database", "Database"]),
    );
    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.missing, labels(&["Database"]));
    assert_eq!(result.score, 40.0);
  }

  #[test]
  fn component_score_never_drops_when_exact_match_added() {
    let expected = labels(&["Load Balancer", "Cache", "Database", "Message Queue"]);
    let mut submitted: Vec<String> = Vec::new();
    let mut previous = match_components(&submitted, &expected).1.score;
    for label in &expected {
      submitted.push(label.clone());
      let score = match_components(&submitted, &expected).1.score;
      assert!(score >= previous, "score dropped from {previous} to {score}");
      previous = score;
    }
    assert_eq!(previous, 100.0);
  }

  #[test]
  fn component_scores_stay_in_bounds() {
    let cases: Vec<(Vec<String>, Vec<String>)> = vec![
      (labels(&[]), labels(&[])),
      (labels(&[""]), labels(&[""])),
      (labels(&["a b c d e", "a b c d"]), labels(&["a b c d e f"])),
      (vec!["Cache".to_string(); 40], vec!["Cache Layer".to_string(); 7]),
    ];
    for (submitted, expected) in cases {
      let (raw, result) = match_components(&submitted, &expected);
      assert!((0.0..=100.0).contains(&raw), "raw={raw}");
      assert!((0.0..=100.0).contains(&result.score), "score={}", result.score);
    }
  }

  #[test]
  fn redis_cache_choice_addresses_read_requirements() {
    let requirements = labels(&["handle high read traffic", "ensure low latency reads"]);
    let choices = labels(&["Use Redis cache to reduce read latency and traffic"]);
    let (_, result) = evaluate_design_choices(&choices, &labels(&["any"]), &requirements);
    assert_eq!(result.addressed, requirements);
    assert!(result.missing.is_empty());
    // coverage 100; rationale = 1/11 concepts (9.09) + 18 word bonus = 27.1
    assert_eq!(result.rationale_score, 27.1);
    assert_eq!(result.score, 78.1);
  }

  #[test]
  fn coverage_needs_two_meaningful_tokens() {
    assert!(!choice_addresses_requirement("low overhead", "ensure low latency reads"));
    assert!(!choice_addresses_requirement("for the of to", "the a an for"));
    assert!(choice_addresses_requirement(
      "replicate the database for high read traffic",
      "handle high read traffic"
    ));
  }

  #[test]
  fn plural_tokens_overlap_their_singular() {
    assert!(choice_addresses_requirement(
      "shard user record storage",
      "index user records"
    ));
  }

  #[test]
  fn no_choices_scores_zero_coverage_and_rationale() {
    let (_, result) = evaluate_design_choices(&labels(&[]), &labels(&[]), &labels(&["scale horizontally"]));
    assert!(result.addressed.is_empty());
    assert_eq!(result.missing, labels(&["scale horizontally"]));
    assert_eq!(result.rationale_score, 0.0);
    assert_eq!(result.score, 0.0);
  }

  #[test]
  fn nothing_to_evaluate_is_a_full_score() {
    let (_, result) = evaluate_design_choices(&labels(&[]), &labels(&[]), &labels(&[]));
    assert_eq!(result.score, 100.0);
    assert_eq!(result.rationale_score, 0.0);
  }

  #[test]
  fn absent_requirements_score_full_coverage() {
    let choices = labels(&["Shard the database by user id"]);
    let (_, result) = evaluate_design_choices(&choices, &labels(&["reference"]), &labels(&[]));
    // coverage 100; rationale = 1/11 concepts (9.09) + 12 word bonus = 21.1
    assert_eq!(result.rationale_score, 21.1);
    assert_eq!(result.score, 76.3);
  }

  #[test]
  fn concept_mentions_count_substrings() {
    // "download" and "workload" both contain "load"; the concept counts once.
    let choices = labels(&["Heavy download workload expected"]);
    let (_, result) = evaluate_design_choices(&choices, &labels(&["reference"]), &labels(&[]));
    assert_eq!(result.rationale_score, 17.1);
    assert_eq!(result.score, 75.1);
  }

  #[test]
  fn full_verification_report_pins_known_scores() {
    let catalog = fixture_catalog();
    let submitted = SubmittedSolution {
      architecture_components: labels(&["Database"]),
      design_choices: labels(&["Use Redis cache to reduce read latency and traffic"]),
      explanation: String::new(),
    };

    let report = verify_solution(&catalog, "url-shortener", &submitted).expect("report");
    assert_eq!(report.component_result.score, 26.7);
    assert_eq!(report.evaluation_result.score, 78.1);
    // overall combines the unrounded sub-scores: 26.667*0.4 + 78.127*0.6
    assert_eq!(report.overall_score, 57.5);

    assert_eq!(report.recommendations.len(), 3);
    assert_eq!(
      report.recommendations[0],
      "Consider adding these missing components: Load Balancer, Cache"
    );
    assert_eq!(
      report.recommendations[1],
      "Focus on covering the core system requirements first"
    );
    assert!(report.recommendations[2].starts_with("Extension ideas: Custom aliases"));
    assert!(report.recommendations[2].ends_with("..."));
  }

  #[test]
  fn strong_submission_lands_in_the_excellent_band() {
    let catalog = fixture_catalog();
    let submitted = SubmittedSolution {
      architecture_components: labels(&["load balancer", "CACHE", "data-base"]),
      design_choices: labels(&[
        "Use Redis cache to reduce read latency and traffic",
        "Partition the database for load distribution and replication across replicas for fault tolerance and availability",
      ]),
      explanation: "Reads dominate writes by far.".into(),
    };

    let report = verify_solution(&catalog, "url-shortener", &submitted).expect("report");
    assert_eq!(report.component_result.score, 100.0);
    // coverage 100; rationale = 7/11 concepts (63.64) + 20 bonus = 83.6
    assert_eq!(report.evaluation_result.rationale_score, 83.6);
    assert_eq!(report.evaluation_result.score, 95.1);
    assert_eq!(report.overall_score, 97.1);
    assert_eq!(
      report.recommendations[0],
      "Excellent design! Consider edge cases and performance optimizations"
    );
  }

  #[test]
  fn verification_is_deterministic() {
    let catalog = fixture_catalog();
    let submitted = SubmittedSolution {
      architecture_components: labels(&["Database", "CDN"]),
      design_choices: labels(&["Cache aggressively for performance"]),
      explanation: String::new(),
    };
    let first = verify_solution(&catalog, "url-shortener", &submitted).expect("report");
    let second = verify_solution(&catalog, "url-shortener", &submitted).expect("report");
    assert_eq!(first, second);
  }

  #[test]
  fn unknown_problem_is_a_not_found_error() {
    let catalog = fixture_catalog();
    let err = verify_solution(&catalog, "nonexistent-id", &SubmittedSolution::default())
      .expect_err("must fail");
    assert_eq!(err, NotFoundError::Solution("nonexistent-id".into()));
  }

  #[test]
  fn solution_without_problem_record_is_a_not_found_error() {
    let solution = ExpectedSolution {
      problem_id: "orphan".into(),
      approach_name: String::new(),
      architecture_components: labels(&["Cache"]),
      design_choices: Vec::new(),
      scalability: String::new(),
      extensions: String::new(),
    };
    let catalog = InMemoryCatalog::from_parts(Vec::new(), vec![solution]);
    let err = verify_solution(&catalog, "orphan", &SubmittedSolution::default())
      .expect_err("must fail");
    assert_eq!(err, NotFoundError::Problem("orphan".into()));
  }

  #[test]
  fn reports_never_exceed_five_recommendations() {
    let catalog = fixture_catalog();
    let submissions = vec![
      SubmittedSolution::default(),
      SubmittedSolution {
        architecture_components: labels(&["Database"]),
        design_choices: labels(&["Use Redis cache to reduce read latency and traffic"]),
        explanation: String::new(),
      },
      SubmittedSolution {
        architecture_components: labels(&["Load Balancer", "Cache", "Database"]),
        design_choices: labels(&["Cache for performance and database replication for fault tolerance"]),
        explanation: String::new(),
      },
    ];
    for submitted in &submissions {
      let report = verify_solution(&catalog, "url-shortener", submitted).expect("report");
      assert!(report.recommendations.len() <= 5);
      assert!(!report.recommendations.is_empty());
    }
  }

  #[test]
  fn extension_excerpt_caps_at_100_chars() {
    let expected = ExpectedSolution {
      problem_id: "p".into(),
      approach_name: String::new(),
      architecture_components: Vec::new(),
      design_choices: Vec::new(),
      scalability: String::new(),
      extensions: "x".repeat(150),
    };
    let component = MatchResult {
      matched: Vec::new(),
      missing: Vec::new(),
      extra: Vec::new(),
      partial: Vec::new(),
      score: 100.0,
    };
    let evaluation = EvaluationResult {
      addressed: Vec::new(),
      missing: Vec::new(),
      rationale_score: 0.0,
      score: 100.0,
    };
    let recommendations = build_recommendations(&component, &evaluation, 100.0, &expected);
    assert_eq!(recommendations.len(), 2);
    let excerpt = format!("Extension ideas: {}...", "x".repeat(100));
    assert_eq!(recommendations[1], excerpt);
  }
}
