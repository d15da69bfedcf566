//! Loading assistant configuration (LLM prompt templates) from TOML.
//!
//! See `AssistantConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AssistantConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts used by the OpenAI client. Defaults cover solution evaluation,
/// hint generation, follow-up questions and the study assistant; override
/// any subset in TOML to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  // Solution evaluation (JSON verdict)
  pub evaluation_system: String,
  pub evaluation_user_template: String,
  // Hint generation
  pub hints_system: String,
  pub hints_user_template: String,
  // Follow-up questions after a verification
  pub followup_system: String,
  pub followup_user_template: String,
  // Study assistant Q&A
  pub assistant_system: String,
  pub assistant_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      evaluation_system: "You are an expert system design interviewer. Provide detailed, constructive feedback on system design solutions. Respond ONLY with strict JSON.".into(),
      evaluation_user_template: "Evaluate this system design solution as an expert interviewer:\n\nPROBLEM: {title}\nDescription: {description}\nRequirements: {requirements}\n\nUSER'S SOLUTION:\nComponents: {components}\nDesign Choices: {choices}\nExplanation: {explanation}\n\nEXPECTED SOLUTION (for reference):\nApproach: {approach}\nComponents: {expected_components}\n\nCurrent basic score: {basic_score}/100\n\nReturn JSON: {\"adjusted_score\": number, \"feedback\": string, \"strengths\": [string], \"improvements\": [string], \"advanced_concepts\": [string], \"industry_relevance\": string}".into(),
      hints_system: "You are a helpful system design mentor. Provide gentle hints that guide learning without giving away the solution.".into(),
      hints_user_template: "Generate helpful hints for this system design problem:\n\nProblem: {title}\nDescription: {description}\nDifficulty: {difficulty}\n\nProvide 3-5 progressive hints that start with high-level architectural thinking, guide toward key components without revealing exact solutions, and are appropriate for {difficulty} level.\n\nFormat as a numbered list.".into(),
      followup_system: "Generate insightful follow-up questions for system design learning.".into(),
      followup_user_template: "Based on this system design problem and user solution, generate 3-5 thoughtful follow-up questions about edge cases, scalability, alternative approaches, and real-world implementation challenges:\n\nProblem: {title}\nUser's Components: {components}\nUser's Choices: {choices}\n\nFormat as a numbered list.".into(),
      assistant_system: "You are an expert system design educator. Provide clear, practical explanations with real-world examples. Focus on helping users understand concepts deeply.".into(),
      assistant_user_template: "{context}Question: {question}\n\nPlease provide a clear, educational answer that explains concepts with real-world examples, mentions relevant trade-offs, and includes practical implementation considerations.".into(),
    }
  }
}

/// Attempt to load `AssistantConfig` from ASSISTANT_CONFIG_PATH. On any
/// parsing/IO error, returns None.
pub fn load_assistant_config_from_env() -> Option<AssistantConfig> {
  let path = std::env::var("ASSISTANT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AssistantConfig>(&s) {
      Ok(cfg) => {
        info!(target: "sda_backend", %path, "Loaded assistant config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "sda_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "sda_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_override_keeps_other_defaults() {
    let toml_src = r#"
      [prompts]
      hints_system = "Short hints only."
    "#;
    let cfg: AssistantConfig = toml::from_str(toml_src).expect("valid TOML");
    assert_eq!(cfg.prompts.hints_system, "Short hints only.");
    assert_eq!(cfg.prompts.assistant_system, Prompts::default().assistant_system);
  }

  #[test]
  fn default_templates_carry_their_placeholders() {
    let p = Prompts::default();
    assert!(p.evaluation_user_template.contains("{basic_score}"));
    assert!(p.hints_user_template.contains("{difficulty}"));
    assert!(p.followup_user_template.contains("{components}"));
    assert!(p.assistant_user_template.contains("{question}"));
  }
}
