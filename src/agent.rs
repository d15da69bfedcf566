//! Deterministic design-session helper: initial analysis, component
//! suggestions keyed on requirement keywords, and canned component feedback.
//!
//! Nothing here calls the LLM; sessions are cheap local state so the design
//! endpoints work identically with or without an API key.

use std::time::Instant;

use tracing::instrument;
use uuid::Uuid;

use crate::protocol::{ComponentType, DesignComponent};

const COMPONENT_SCORE: f64 = 85.0;

#[derive(Clone, Debug)]
pub struct DesignSession {
  pub id: String,
  pub problem_statement: String,
  pub requirements: Vec<String>,
  pub components: Vec<DesignComponent>,
  pub created_at: Instant,
}

pub struct DesignAnalysis {
  pub session: DesignSession,
  pub analysis: String,
  pub suggestions: Vec<String>,
  pub estimated_complexity: &'static str,
}

pub struct ComponentFeedback {
  pub feedback: String,
  pub score: f64,
  pub recommendations: Vec<String>,
}

/// Analyze a design problem statement: build a session with suggested
/// components and return the initial guidance.
#[instrument(level = "info", skip(problem_statement, requirements), fields(requirement_count = requirements.len()))]
pub fn analyze_design(problem_statement: &str, requirements: &[String]) -> DesignAnalysis {
  let analysis = generate_analysis(problem_statement, requirements);
  let components = suggest_components(requirements);
  let session = DesignSession {
    id: Uuid::new_v4().to_string(),
    problem_statement: problem_statement.to_string(),
    requirements: requirements.to_vec(),
    components,
    created_at: Instant::now(),
  };
  DesignAnalysis {
    session,
    analysis,
    suggestions: generate_suggestions(),
    estimated_complexity: estimate_complexity(requirements),
  }
}

/// Canned evaluation of a single component choice.
pub fn evaluate_component(component_type: ComponentType) -> ComponentFeedback {
  ComponentFeedback {
    feedback: format!(
      "Good choice for {}. Consider these optimizations: caching strategy, connection pooling, and monitoring setup.",
      component_type.as_str()
    ),
    score: COMPONENT_SCORE,
    recommendations: vec![
      "Add health checks".into(),
      "Implement proper logging".into(),
      "Configure auto-scaling".into(),
    ],
  }
}

fn generate_analysis(problem: &str, requirements: &[String]) -> String {
  format!(
    "Based on your problem statement \"{}\", I can see this requires:\n\n\
     1. **Scale Considerations**: We need to think about read/write patterns and data consistency\n\
     2. **Key Components**: This system will likely need databases, caching, and API services\n\
     3. **Critical Paths**: Identify the most performance-sensitive operations\n\
     4. **Trade-offs**: Consider CAP theorem implications and consistency vs availability\n\n\
     Let's start by breaking down your requirements: {}",
    problem,
    requirements.join(", ")
  )
}

/// Suggest building blocks from requirement keywords. A load balancer and an
/// API gateway are always present; the rest key on substrings of the
/// lowercased requirements. Each type appears at most once.
pub fn suggest_components(requirements: &[String]) -> Vec<DesignComponent> {
  let lowered: Vec<String> = requirements.iter().map(|r| r.to_lowercase()).collect();
  let mentions =
    |keys: &[&str]| lowered.iter().any(|r| keys.iter().any(|k| r.contains(k)));

  let mut components = vec![
    DesignComponent {
      kind: ComponentType::LoadBalancer,
      name: "Load Balancer".into(),
      description: "Distributes incoming requests across multiple servers".into(),
      rationale: "Ensures high availability and handles traffic spikes".into(),
      alternatives: vec!["NGINX".into(), "AWS ALB".into(), "HAProxy".into()],
    },
    DesignComponent {
      kind: ComponentType::ApiGateway,
      name: "API Gateway".into(),
      description: "Single entry point for all client requests".into(),
      rationale: "Handles authentication, rate limiting, and request routing".into(),
      alternatives: vec!["AWS API Gateway".into(), "Kong".into(), "Zuul".into()],
    },
  ];

  if mentions(&["real-time", "store", "history", "data", "transaction"]) {
    components.push(DesignComponent {
      kind: ComponentType::Database,
      name: "Primary Database".into(),
      description: "Main data store optimized for OLTP operations".into(),
      rationale: "Handles transactional data with ACID properties".into(),
      alternatives: vec!["PostgreSQL".into(), "MySQL".into(), "MongoDB".into()],
    });
  }
  if mentions(&["real-time", "cache", "latency", "read"]) {
    components.push(DesignComponent {
      kind: ComponentType::Cache,
      name: "Redis Cache".into(),
      description: "In-memory data store for fast access".into(),
      rationale: "Reduces database load and improves response times".into(),
      alternatives: vec!["Redis".into(), "Memcached".into(), "Hazelcast".into()],
    });
  }
  if mentions(&["queue", "notification", "async", "event"]) {
    components.push(DesignComponent {
      kind: ComponentType::MessageQueue,
      name: "Message Queue".into(),
      description: "Buffers work between producers and consumers".into(),
      rationale: "Decouples services and absorbs traffic bursts".into(),
      alternatives: vec!["Kafka".into(), "RabbitMQ".into(), "SQS".into()],
    });
  }
  if mentions(&["media", "upload", "static", "image", "video"]) {
    components.push(DesignComponent {
      kind: ComponentType::Cdn,
      name: "CDN".into(),
      description: "Edge network for static and media content".into(),
      rationale: "Moves bytes close to users and offloads origin servers".into(),
      alternatives: vec!["CloudFront".into(), "Cloudflare".into(), "Fastly".into()],
    });
  }
  if mentions(&["search", "full-text"]) {
    components.push(DesignComponent {
      kind: ComponentType::SearchEngine,
      name: "Search Engine".into(),
      description: "Inverted index for text and faceted queries".into(),
      rationale: "Relational stores handle full-text search poorly at scale".into(),
      alternatives: vec!["Elasticsearch".into(), "OpenSearch".into(), "Meilisearch".into()],
    });
  }

  components
}

fn generate_suggestions() -> Vec<String> {
  vec![
    "Consider data partitioning strategies for scale".into(),
    "Implement proper monitoring and alerting".into(),
    "Plan for disaster recovery and backups".into(),
    "Think about security at every layer".into(),
    "Design for horizontal scaling from the start".into(),
  ]
}

fn estimate_complexity(requirements: &[String]) -> &'static str {
  match requirements.len() {
    0..=2 => "Low",
    3..=4 => "Medium",
    _ => "High",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn reqs(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn baseline_components_are_always_suggested() {
    let components = suggest_components(&[]);
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].kind, ComponentType::LoadBalancer);
    assert_eq!(components[1].kind, ComponentType::ApiGateway);
  }

  #[test]
  fn real_time_requirements_add_database_and_cache() {
    let components = suggest_components(&reqs(&["Real-time messaging"]));
    let kinds: Vec<ComponentType> = components.iter().map(|c| c.kind).collect();
    assert!(kinds.contains(&ComponentType::Database));
    assert!(kinds.contains(&ComponentType::Cache));
  }

  #[test]
  fn keyword_rules_add_their_components_once() {
    let components = suggest_components(&reqs(&[
      "Push notifications to devices",
      "Media uploads for posts",
      "Full-text search over messages",
      "Cache read-heavy endpoints",
    ]));
    let kinds: Vec<ComponentType> = components.iter().map(|c| c.kind).collect();
    assert!(kinds.contains(&ComponentType::MessageQueue));
    assert!(kinds.contains(&ComponentType::Cdn));
    assert!(kinds.contains(&ComponentType::SearchEngine));
    let caches = kinds.iter().filter(|k| **k == ComponentType::Cache).count();
    assert_eq!(caches, 1, "overlapping keywords must not duplicate a type");
  }

  #[test]
  fn sessions_get_unique_ids_and_keep_their_input() {
    let requirements = reqs(&["Real-time messaging", "Message history"]);
    let first = analyze_design("Design a chat app", &requirements);
    let second = analyze_design("Design a chat app", &requirements);
    assert_ne!(first.session.id, second.session.id);
    assert_eq!(first.session.problem_statement, "Design a chat app");
    assert_eq!(first.session.requirements, requirements);
    assert_eq!(first.suggestions.len(), 5);
    assert!(first.analysis.contains("Design a chat app"));
    assert!(first.analysis.contains("Real-time messaging, Message history"));
  }

  #[test]
  fn complexity_tracks_requirement_count() {
    assert_eq!(analyze_design("p", &reqs(&[])).estimated_complexity, "Low");
    assert_eq!(analyze_design("p", &reqs(&["a", "b", "c"])).estimated_complexity, "Medium");
    assert_eq!(
      analyze_design("p", &reqs(&["a", "b", "c", "d", "e"])).estimated_complexity,
      "High"
    );
  }

  #[test]
  fn component_feedback_names_the_type() {
    let feedback = evaluate_component(ComponentType::MessageQueue);
    assert!(feedback.feedback.contains("message_queue"));
    assert_eq!(feedback.score, 85.0);
    assert_eq!(feedback.recommendations.len(), 3);
  }
}
