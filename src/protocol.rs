//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::catalog::ProblemStats;
use crate::domain::Problem;
use crate::verify::VerificationReport;

/// Error payload for every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub detail: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub status: &'static str,
    pub service: &'static str,
}

//
// Problem listing
//

#[derive(Serialize)]
pub struct ProblemsOut {
    pub problems: Vec<Problem>,
    pub stats: ProblemStats,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub difficulty: String,
}

#[derive(Serialize)]
pub struct DifficultyOut {
    pub difficulty: String,
    pub count: usize,
    pub problems: Vec<Problem>,
}

#[derive(Serialize)]
pub struct HintsOut {
    pub problem_id: String,
    pub hints: Vec<String>,
    pub count: usize,
}

//
// Solution verification
//

/// LLM layer on top of the deterministic verification. Always present; when
/// the model is unavailable the enhanced score equals the basic score and
/// `error` explains why.
#[derive(Debug, Serialize)]
pub struct LlmEnhancement {
    pub basic_score: f64,
    pub llm_enhanced_score: f64,
    pub llm_feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub advanced_concepts: Vec<String>,
    pub industry_relevance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyOut {
    #[serde(flatten)]
    pub report: VerificationReport,
    pub llm_enhancement: LlmEnhancement,
    pub follow_up_questions: Vec<String>,
}

//
// Design sessions
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Database,
    Cache,
    LoadBalancer,
    ApiGateway,
    Microservice,
    MessageQueue,
    Cdn,
    SearchEngine,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Database => "database",
            ComponentType::Cache => "cache",
            ComponentType::LoadBalancer => "load_balancer",
            ComponentType::ApiGateway => "api_gateway",
            ComponentType::Microservice => "microservice",
            ComponentType::MessageQueue => "message_queue",
            ComponentType::Cdn => "cdn",
            ComponentType::SearchEngine => "search_engine",
        }
    }
}

/// One suggested building block with the reasoning behind it.
#[derive(Clone, Debug, Serialize)]
pub struct DesignComponent {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub name: String,
    pub description: String,
    pub rationale: String,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DesignRequest {
    pub problem_statement: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

#[derive(Serialize)]
pub struct DesignResponse {
    pub design_id: String,
    pub analysis: String,
    pub suggestions: Vec<String>,
    pub components: Vec<DesignComponent>,
    pub estimated_complexity: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub component_type: ComponentType,
    #[serde(default)]
    pub component_details: serde_json::Value,
    #[serde(default)]
    pub user_rationale: String,
}

#[derive(Serialize)]
pub struct FeedbackOut {
    pub feedback: String,
    pub score: f64,
    pub recommendations: Vec<String>,
}

//
// Study assistant
//

#[derive(Debug, Deserialize)]
pub struct AskIn {
    pub question: String,
    #[serde(default)]
    pub problem_id: Option<String>,
}

#[derive(Serialize)]
pub struct AssistantOut {
    pub answer: String,
    pub related_concepts: Vec<String>,
    pub confidence: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct Capabilities {
    pub question_answering: bool,
    pub solution_evaluation: bool,
    pub hint_generation: bool,
    pub follow_up_questions: bool,
}

#[derive(Serialize)]
pub struct StatusOut {
    pub llm_available: bool,
    pub capabilities: Capabilities,
}
