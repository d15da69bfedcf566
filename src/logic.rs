//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Verifying submissions (deterministic engine + LLM enhancement layer)
//!   - Hint generation with deterministic fallback
//!   - The study assistant reply with concept extraction
//!
//! Every LLM path degrades to a local fallback; none of these functions fail
//! because OpenAI is missing or down.

use tracing::{error, info, instrument};

use crate::catalog::SolutionCatalog;
use crate::domain::{ExpectedSolution, Problem, SubmittedSolution};
use crate::protocol::{AssistantOut, LlmEnhancement, VerifyOut};
use crate::state::AppState;
use crate::util::truncate_chars;
use crate::verify::{self, NotFoundError};

/// Needle/display pairs for concept extraction from assistant answers.
const RELATED_CONCEPTS: &[(&str, &str)] = &[
  ("load balancing", "Load Balancing"),
  ("caching", "Caching"),
  ("database sharding", "Database Sharding"),
  ("microservices", "Microservices"),
  ("cdn", "CDN"),
  ("api gateway", "API Gateway"),
  ("message queues", "Message Queues"),
  ("pub/sub", "Pub/Sub"),
  ("eventual consistency", "Eventual Consistency"),
  ("cap theorem", "CAP Theorem"),
  ("horizontal scaling", "Horizontal Scaling"),
  ("vertical scaling", "Vertical Scaling"),
  ("rate limiting", "Rate Limiting"),
];

/// Verify a submission and attach the LLM layer (enhancement + follow-up
/// questions). The deterministic report is authoritative; the LLM layer
/// degrades gracefully.
#[instrument(
  level = "info",
  skip(state, submitted),
  fields(%problem_id, component_count = submitted.architecture_components.len(), choice_count = submitted.design_choices.len())
)]
pub async fn verify_submission(
  state: &AppState,
  problem_id: &str,
  submitted: &SubmittedSolution,
) -> Result<VerifyOut, NotFoundError> {
  let expected = state
    .catalog
    .get_expected_solution(problem_id)
    .ok_or_else(|| NotFoundError::Solution(problem_id.to_string()))?;
  let problem = state
    .catalog
    .get_problem(problem_id)
    .ok_or_else(|| NotFoundError::Problem(problem_id.to_string()))?;

  let report = verify::verify_solution(state.catalog.as_ref(), problem_id, submitted)?;
  info!(target: "verify", %problem_id, overall = %format!("{:.1}", report.overall_score), "Submission verified");

  let llm_enhancement =
    enhance_report(state, problem, expected, submitted, report.overall_score).await;
  let follow_up_questions = follow_ups(state, problem, submitted).await;

  Ok(VerifyOut { report, llm_enhancement, follow_up_questions })
}

/// Hints for a problem: LLM-generated when possible, deterministic otherwise.
#[instrument(level = "info", skip(state), fields(%problem_id))]
pub async fn problem_hints(
  state: &AppState,
  problem_id: &str,
) -> Result<Vec<String>, NotFoundError> {
  let problem = state
    .catalog
    .get_problem(problem_id)
    .ok_or_else(|| NotFoundError::Problem(problem_id.to_string()))?;

  if let Some(oa) = &state.openai {
    match oa.generate_hints(&state.prompts, problem).await {
      Ok(hints) => return Ok(hints),
      Err(e) => {
        error!(target: "verify", %problem_id, error = %e, "OpenAI generate_hints failed; using fallback hints.");
      }
    }
  }
  Ok(fallback_hints())
}

/// Answer a study question, optionally in the context of a catalog problem.
#[instrument(level = "info", skip(state, question), fields(question_len = question.len(), has_problem = problem_id.is_some()))]
pub async fn assistant_reply(
  state: &AppState,
  question: &str,
  problem_id: Option<&str>,
) -> AssistantOut {
  let context: Option<String> = problem_id
    .and_then(|id| state.catalog.get_problem(id))
    .map(|p| {
      format!(
        "The user is working on '{}' - {}...",
        p.title,
        truncate_chars(&p.description, 200)
      )
    });

  let Some(oa) = &state.openai else {
    return AssistantOut {
      answer: "I'm sorry, the AI assistant is not available right now. Please check that the OpenAI API key is configured.".into(),
      related_concepts: Vec::new(),
      confidence: "low",
      error: Some("LLM service unavailable".into()),
    };
  };

  match oa.assistant_answer(&state.prompts, question, context.as_deref()).await {
    Ok(answer) => {
      let related_concepts = related_concepts(&answer);
      AssistantOut { answer, related_concepts, confidence: "medium", error: None }
    }
    Err(e) => {
      error!(target: "verify", error = %e, "OpenAI assistant_answer failed.");
      AssistantOut {
        answer: "I'm sorry, I couldn't process your question right now. Please try again later.".into(),
        related_concepts: Vec::new(),
        confidence: "low",
        error: Some(e),
      }
    }
  }
}

async fn enhance_report(
  state: &AppState,
  problem: &Problem,
  expected: &ExpectedSolution,
  submitted: &SubmittedSolution,
  basic_score: f64,
) -> LlmEnhancement {
  let Some(oa) = &state.openai else {
    return enhancement_unavailable(
      basic_score,
      "LLM service not available - API key required",
      "OpenAI API key not configured",
    );
  };

  match oa.enhance_evaluation(&state.prompts, problem, expected, submitted, basic_score).await {
    Ok(insights) => LlmEnhancement {
      basic_score,
      llm_enhanced_score: insights.adjusted_score.unwrap_or(basic_score),
      llm_feedback: insights.feedback,
      strengths: insights.strengths,
      improvements: insights.improvements,
      advanced_concepts: insights.advanced_concepts,
      industry_relevance: insights.industry_relevance,
      error: None,
    },
    Err(e) => {
      error!(target: "verify", problem_id = %problem.id, error = %e, "OpenAI enhance_evaluation failed; keeping basic score.");
      enhancement_unavailable(basic_score, "LLM evaluation unavailable", &e)
    }
  }
}

async fn follow_ups(
  state: &AppState,
  problem: &Problem,
  submitted: &SubmittedSolution,
) -> Vec<String> {
  let Some(oa) = &state.openai else {
    return fallback_follow_ups();
  };
  match oa.follow_up_questions(&state.prompts, problem, submitted).await {
    Ok(questions) => questions,
    Err(e) => {
      error!(target: "verify", problem_id = %problem.id, error = %e, "OpenAI follow_up_questions failed; returning none.");
      Vec::new()
    }
  }
}

fn related_concepts(text: &str) -> Vec<String> {
  let lowered = text.to_lowercase();
  RELATED_CONCEPTS
    .iter()
    .filter(|(needle, _)| lowered.contains(needle))
    .map(|(_, display)| display.to_string())
    .take(5)
    .collect()
}

// -------- Local fallbacks --------

fn fallback_hints() -> Vec<String> {
  vec![
    "Consider the core components needed for this system".into(),
    "Think about scalability and performance requirements".into(),
    "Don't forget about data storage and retrieval patterns".into(),
  ]
}

fn fallback_follow_ups() -> Vec<String> {
  vec![
    "How would you handle this system at 10x scale?".into(),
    "What happens if one of your components fails?".into(),
    "How would you monitor this system in production?".into(),
  ]
}

fn enhancement_unavailable(basic_score: f64, feedback: &str, error: &str) -> LlmEnhancement {
  LlmEnhancement {
    basic_score,
    llm_enhanced_score: basic_score,
    llm_feedback: feedback.into(),
    strengths: Vec::new(),
    improvements: Vec::new(),
    advanced_concepts: Vec::new(),
    industry_relevance: String::new(),
    error: Some(error.into()),
  }
}
