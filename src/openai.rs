//! Minimal OpenAI client for our use-cases.
//!
//! We only call chat.completions and request either plain text or a strict
//! JSON object. Calls are instrumented and log model names, latencies, and
//! response sizes (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short to
//! avoid PII leaks.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::Prompts;
use crate::domain::{ExpectedSolution, Problem, SubmittedSolution};
use crate::util::fill_template;

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub fast_model: String,
  pub strong_model: String,
}

/// LLM verdict on a verified solution. Every field is optional on the wire;
/// whatever the model omits stays at its default.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EvalInsights {
  #[serde(default)]
  pub adjusted_score: Option<f64>,
  #[serde(default)]
  pub feedback: String,
  #[serde(default)]
  pub strengths: Vec<String>,
  #[serde(default)]
  pub improvements: Vec<String>,
  #[serde(default)]
  pub advanced_concepts: Vec<String>,
  #[serde(default)]
  pub industry_relevance: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let fast_model =
      std::env::var("OPENAI_FAST_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let strong_model =
      std::env::var("OPENAI_STRONG_MODEL").unwrap_or_else(|_| "gpt-4o".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, fast_model, strong_model })
  }

  /// Plain-text chat completion. Used for hints, follow-ups, and assistant replies.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_plain(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
    max_tokens: Option<u32>,
  ) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format: None,
      max_tokens,
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "sda-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| body);
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.get(0)
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default().trim().to_string();

    Ok(text)
  }

  /// JSON-object chat completion. Generic over the target type T.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_json<T: for<'a> Deserialize<'a>>(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
    max_tokens: Option<u32>,
  ) -> Result<T, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format: Some(ResponseFormat { r#type: "json_object".into() }),
      max_tokens,
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "sda-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| body);
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.get(0)
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default();

    serde_json::from_str::<T>(&text).map_err(|e| format!("JSON parse error: {}", e))
  }

  // --- High-level helpers (domain-specialized) ---

  /// Ask the strong model to re-grade a verified solution with nuance.
  #[instrument(
    level = "info",
    skip(self, prompts, problem, expected, submitted),
    fields(problem_id = %problem.id, model = %self.strong_model, basic_score = %format!("{:.1}", basic_score))
  )]
  pub async fn enhance_evaluation(
    &self,
    prompts: &Prompts,
    problem: &Problem,
    expected: &ExpectedSolution,
    submitted: &SubmittedSolution,
    basic_score: f64,
  ) -> Result<EvalInsights, String> {
    let basic = format!("{basic_score}");
    let user = fill_template(
      &prompts.evaluation_user_template,
      &[
        ("title", &problem.title),
        ("description", &problem.description),
        ("requirements", &problem.expectations.join(", ")),
        ("components", &submitted.architecture_components.join(", ")),
        ("choices", &submitted.design_choices.join(", ")),
        ("explanation", &submitted.explanation),
        ("approach", &expected.approach_name),
        ("expected_components", &expected.architecture_components.join(", ")),
        ("basic_score", &basic),
      ],
    );
    self
      .chat_json::<EvalInsights>(&self.strong_model, &prompts.evaluation_system, &user, 0.3, Some(1500))
      .await
  }

  /// Progressive hints for a problem, parsed from a numbered list. At most 5.
  #[instrument(level = "info", skip(self, prompts, problem), fields(problem_id = %problem.id, model = %self.fast_model))]
  pub async fn generate_hints(
    &self,
    prompts: &Prompts,
    problem: &Problem,
  ) -> Result<Vec<String>, String> {
    let user = fill_template(
      &prompts.hints_user_template,
      &[
        ("title", &problem.title),
        ("description", &problem.description),
        ("difficulty", problem.difficulty.as_str()),
      ],
    );
    let text = self
      .chat_plain(&self.fast_model, &prompts.hints_system, &user, 0.7, Some(800))
      .await?;
    let mut hints = parse_numbered_list(&text);
    hints.truncate(5);
    Ok(hints)
  }

  /// Follow-up questions about a submitted solution. Lines without a question
  /// mark are dropped.
  #[instrument(level = "info", skip(self, prompts, problem, submitted), fields(problem_id = %problem.id, model = %self.fast_model))]
  pub async fn follow_up_questions(
    &self,
    prompts: &Prompts,
    problem: &Problem,
    submitted: &SubmittedSolution,
  ) -> Result<Vec<String>, String> {
    let user = fill_template(
      &prompts.followup_user_template,
      &[
        ("title", &problem.title),
        ("components", &submitted.architecture_components.join(", ")),
        ("choices", &submitted.design_choices.join(", ")),
      ],
    );
    let text = self
      .chat_plain(&self.fast_model, &prompts.followup_system, &user, 0.6, Some(600))
      .await?;
    Ok(parse_questions(&text))
  }

  /// Free-form educational answer, optionally grounded in a problem context.
  #[instrument(level = "info", skip(self, prompts, question, context), fields(question_len = question.len(), has_context = context.is_some(), model = %self.strong_model))]
  pub async fn assistant_answer(
    &self,
    prompts: &Prompts,
    question: &str,
    context: Option<&str>,
  ) -> Result<String, String> {
    let context_block = match context {
      Some(c) => format!("Context: {c}\n\n"),
      None => String::new(),
    };
    let user = fill_template(
      &prompts.assistant_user_template,
      &[("context", &context_block), ("question", question)],
    );
    self
      .chat_plain(&self.strong_model, &prompts.assistant_system, &user, 0.4, Some(1200))
      .await
  }
}

/// Pull list items out of an LLM reply: lines that start with a number, `-`,
/// or `•`, with the numbering stripped.
fn parse_numbered_list(content: &str) -> Vec<String> {
  let mut items = Vec::new();
  for raw in content.lines() {
    let line = raw.trim();
    if line.is_empty() {
      continue;
    }
    let listish = line.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false)
      || line.starts_with('-')
      || line.starts_with('•');
    if !listish {
      continue;
    }
    let cleaned = match line.split_once('.') {
      Some((_, rest)) => rest,
      None => line,
    };
    let cleaned = cleaned.trim_start_matches(['-', '•', ' ']).trim();
    if !cleaned.is_empty() {
      items.push(cleaned.to_string());
    }
  }
  items
}

/// Pull questions out of an LLM reply: any line containing `?`, with the
/// numbering stripped.
fn parse_questions(content: &str) -> Vec<String> {
  let mut questions = Vec::new();
  for raw in content.lines() {
    let line = raw.trim();
    if line.is_empty() || !line.contains('?') {
      continue;
    }
    let cleaned = match line.split_once('.') {
      Some((_, rest)) => rest,
      None => line,
    };
    let cleaned = cleaned.trim_start_matches(['-', '•', ' ']).trim();
    if !cleaned.is_empty() {
      questions.push(cleaned.to_string());
    }
  }
  questions
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
