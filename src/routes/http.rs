//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{debug, info, instrument};

use crate::agent;
use crate::catalog::SolutionCatalog;
use crate::domain::{Difficulty, Problem, SubmittedSolution};
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorOut>);

fn not_found(detail: String) -> ApiError {
  (StatusCode::NOT_FOUND, Json(ErrorOut { detail }))
}

fn bad_request(detail: String) -> ApiError {
  (StatusCode::BAD_REQUEST, Json(ErrorOut { detail }))
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, ApiError> {
  Difficulty::parse(raw)
    .ok_or_else(|| bad_request("Difficulty must be 'beginner' or 'intermediate'".into()))
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { status: "healthy", service: "sda-api" })
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_problems(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let problems = state.catalog.all_problems().to_vec();
  let stats = state.catalog.stats();
  info!(target: "sda_backend", count = problems.len(), "HTTP problem list served");
  Json(ProblemsOut { problems, stats })
}

#[instrument(level = "info", skip(state), fields(difficulty = %q.difficulty))]
pub async fn http_generate_problem(
  State(state): State<Arc<AppState>>,
  Query(q): Query<GenerateQuery>,
) -> Result<Json<Problem>, ApiError> {
  let difficulty = parse_difficulty(&q.difficulty)?;
  let problem = state
    .catalog
    .random_by_difficulty(difficulty)
    .cloned()
    .ok_or_else(|| not_found(format!("No problems found for difficulty: {}", q.difficulty)))?;
  info!(target: "sda_backend", difficulty = %q.difficulty, id = %problem.id, "HTTP random problem served");
  Ok(Json(problem))
}

#[instrument(level = "info", skip(state), fields(%problem_id))]
pub async fn http_get_problem(
  State(state): State<Arc<AppState>>,
  Path(problem_id): Path<String>,
) -> Result<Json<Problem>, ApiError> {
  let problem = state
    .catalog
    .get_problem(&problem_id)
    .cloned()
    .ok_or_else(|| not_found(format!("Problem with ID '{problem_id}' not found")))?;
  Ok(Json(problem))
}

#[instrument(level = "info", skip(state), fields(%difficulty))]
pub async fn http_problems_by_difficulty(
  State(state): State<Arc<AppState>>,
  Path(difficulty): Path<String>,
) -> Result<Json<DifficultyOut>, ApiError> {
  let parsed = parse_difficulty(&difficulty)?;
  let problems: Vec<Problem> = state
    .catalog
    .problems_by_difficulty(parsed)
    .into_iter()
    .cloned()
    .collect();
  info!(target: "sda_backend", %difficulty, count = problems.len(), "HTTP difficulty listing served");
  Ok(Json(DifficultyOut { difficulty, count: problems.len(), problems }))
}

#[instrument(level = "info", skip(state), fields(%problem_id))]
pub async fn http_problem_hints(
  State(state): State<Arc<AppState>>,
  Path(problem_id): Path<String>,
) -> Result<Json<HintsOut>, ApiError> {
  let hints = logic::problem_hints(&state, &problem_id)
    .await
    .map_err(|e| not_found(e.to_string()))?;
  info!(target: "sda_backend", %problem_id, count = hints.len(), "HTTP hints served");
  Ok(Json(HintsOut { problem_id, count: hints.len(), hints }))
}

#[instrument(level = "info", skip(state, body), fields(%problem_id, component_count = body.architecture_components.len()))]
pub async fn http_verify_solution(
  State(state): State<Arc<AppState>>,
  Path(problem_id): Path<String>,
  Json(body): Json<SubmittedSolution>,
) -> Result<Json<VerifyOut>, ApiError> {
  let out = logic::verify_submission(&state, &problem_id, &body)
    .await
    .map_err(|e| not_found(e.to_string()))?;
  info!(target: "verify", %problem_id, score = %format!("{:.1}", out.report.overall_score), "HTTP verification served");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(statement_len = body.problem_statement.len(), requirement_count = body.requirements.len()))]
pub async fn http_submit_design(
  State(state): State<Arc<AppState>>,
  Json(body): Json<DesignRequest>,
) -> impl IntoResponse {
  let agent::DesignAnalysis { session, analysis, suggestions, estimated_complexity } =
    agent::analyze_design(&body.problem_statement, &body.requirements);
  let design_id = session.id.clone();
  let components = session.components.clone();
  state.insert_design(session).await;
  info!(target: "sda_backend", %design_id, component_count = components.len(), "HTTP design submitted");
  Json(DesignResponse {
    design_id,
    analysis,
    suggestions,
    components,
    estimated_complexity: estimated_complexity.to_string(),
  })
}

#[instrument(level = "info", skip(state, body), fields(%design_id, component_type = body.component_type.as_str(), has_rationale = !body.user_rationale.is_empty()))]
pub async fn http_design_feedback(
  State(state): State<Arc<AppState>>,
  Path(design_id): Path<String>,
  Json(body): Json<FeedbackRequest>,
) -> Result<Json<FeedbackOut>, ApiError> {
  let session = state
    .get_design(&design_id)
    .await
    .ok_or_else(|| not_found(format!("Design not found: {design_id}")))?;
  debug!(
    target: "sda_backend",
    %design_id,
    statement_len = session.problem_statement.len(),
    requirement_count = session.requirements.len(),
    age_s = session.created_at.elapsed().as_secs(),
    has_details = !body.component_details.is_null(),
    "Feedback session context"
  );
  let fb = agent::evaluate_component(body.component_type);
  info!(target: "sda_backend", %design_id, score = %format!("{:.1}", fb.score), "HTTP component feedback served");
  Ok(Json(FeedbackOut {
    feedback: fb.feedback,
    score: fb.score,
    recommendations: fb.recommendations,
  }))
}

#[instrument(level = "info", skip(state, body), fields(question_len = body.question.len()))]
pub async fn http_assistant_ask(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AskIn>,
) -> impl IntoResponse {
  let out = logic::assistant_reply(&state, &body.question, body.problem_id.as_deref()).await;
  Json(out)
}

#[instrument(level = "info", skip(state))]
pub async fn http_assistant_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let llm_available = state.openai.is_some();
  Json(StatusOut {
    llm_available,
    capabilities: Capabilities {
      question_answering: llm_available,
      solution_evaluation: llm_available,
      hint_generation: llm_available,
      follow_up_questions: llm_available,
    },
  })
}
