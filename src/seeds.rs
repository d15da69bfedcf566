//! Seed data: the built-in problem bank with reference solutions.

use crate::catalog::InMemoryCatalog;
use crate::domain::{Difficulty, ExpectedSolution, Problem};

/// Minimal set of built-in problems that guarantee the app is useful even
/// without catalog files or OpenAI.
pub fn seed_problems() -> Vec<Problem> {
  vec![
    Problem {
      id: "url-shortener".into(),
      title: "Design a URL Shortener like bit.ly".into(),
      description: "Design a service that shortens long URLs, redirects with minimal latency, and tracks click analytics.".into(),
      difficulty: Difficulty::Beginner,
      tags: vec!["web".into(), "storage".into(), "caching".into()],
      expectations: vec![
        "handle high read traffic".into(),
        "generate unique short codes".into(),
        "ensure low latency redirects".into(),
      ],
    },
    Problem {
      id: "chat-app".into(),
      title: "Design a Chat Application like WhatsApp".into(),
      description: "Design a real-time messaging system that supports 1-on-1 and group chats with message history.".into(),
      difficulty: Difficulty::Intermediate,
      tags: vec!["realtime".into(), "messaging".into(), "storage".into()],
      expectations: vec![
        "deliver messages in real-time".into(),
        "store message history durably".into(),
        "track user presence status".into(),
        "send push notifications".into(),
      ],
    },
    Problem {
      id: "social-feed".into(),
      title: "Design a Social Media Feed".into(),
      description: "Design a timeline/newsfeed system that serves personalized post rankings to a large user base.".into(),
      difficulty: Difficulty::Intermediate,
      tags: vec!["feed".into(), "ranking".into(), "caching".into()],
      expectations: vec![
        "build personalized timeline for users".into(),
        "handle celebrity fan-out of posts".into(),
        "serve media uploads at scale".into(),
        "rank feed content by relevance".into(),
      ],
    },
  ]
}

/// Reference solutions for every seeded problem id.
pub fn seed_solutions() -> Vec<ExpectedSolution> {
  vec![
    ExpectedSolution {
      problem_id: "url-shortener".into(),
      approach_name: "Cached redirect tier over a keyed store".into(),
      architecture_components: vec![
        "Load Balancer".into(),
        "API Gateway".into(),
        "Cache".into(),
        "Database".into(),
      ],
      design_choices: vec![
        "Cache hot redirects in Redis to absorb read traffic".into(),
        "Generate short codes with base62 encoding of a sequence".into(),
        "Index short codes in the database for low latency lookups".into(),
      ],
      scalability: "Scale reads with cache nodes and database read replicas; partition the code space when a single database saturates.".into(),
      extensions: "Custom aliases, expiring links, QR codes, per-link click analytics, abuse detection".into(),
    },
    ExpectedSolution {
      problem_id: "chat-app".into(),
      approach_name: "Connection gateways with a fan-out queue".into(),
      architecture_components: vec![
        "Load Balancer".into(),
        "WebSocket Gateway".into(),
        "Message Queue".into(),
        "Database".into(),
        "Push Notification Service".into(),
      ],
      design_choices: vec![
        "Hold client connections on stateless WebSocket gateways for real-time delivery".into(),
        "Fan out messages through a queue so delivery survives consumer restarts".into(),
        "Store message history in a wide-column database partitioned by conversation".into(),
        "Track presence status in an in-memory store with timeouts".into(),
      ],
      scalability: "Shard gateways by connection count and partition the queue by conversation id; history storage scales with partition count.".into(),
      extensions: "End-to-end encryption, read receipts, media messages, typing indicators, multi-device sync".into(),
    },
    ExpectedSolution {
      problem_id: "social-feed".into(),
      approach_name: "Hybrid push/pull fan-out".into(),
      architecture_components: vec![
        "Load Balancer".into(),
        "Feed Service".into(),
        "Cache".into(),
        "Message Queue".into(),
        "Database".into(),
        "CDN".into(),
      ],
      design_choices: vec![
        "Push posts to follower timelines on write for ordinary users".into(),
        "Pull celebrity posts at read time to avoid fan-out storms".into(),
        "Cache materialized timelines for active users".into(),
        "Serve media uploads through a CDN".into(),
        "Rank feed content with a relevance score computed offline".into(),
      ],
      scalability: "Partition timelines by user id; the hybrid fan-out keeps write amplification bounded as the follower graph grows.".into(),
      extensions: "Stories, trending topics, ad injection, engagement analytics, abuse moderation".into(),
    },
  ]
}

/// The catalog the app falls back to when no catalog files are configured.
pub fn seed_catalog() -> InMemoryCatalog {
  InMemoryCatalog::from_parts(seed_problems(), seed_solutions())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::SolutionCatalog;

  #[test]
  fn every_seeded_problem_has_a_solution() {
    let catalog = seed_catalog();
    for problem in seed_problems() {
      let expected = catalog.get_expected_solution(&problem.id);
      assert!(expected.is_some(), "no solution seeded for {}", problem.id);
    }
  }

  #[test]
  fn seeded_records_are_fully_populated() {
    for problem in seed_problems() {
      assert!(!problem.title.is_empty());
      assert!(!problem.description.is_empty());
      assert!(!problem.tags.is_empty());
      assert!(!problem.expectations.is_empty(), "{} lacks expectations", problem.id);
    }
    for solution in seed_solutions() {
      assert!(!solution.approach_name.is_empty());
      assert!(!solution.architecture_components.is_empty());
      assert!(!solution.design_choices.is_empty());
      assert!(!solution.scalability.is_empty());
      assert!(!solution.extensions.is_empty());
    }
  }

  #[test]
  fn seed_bank_covers_both_difficulties() {
    let catalog = seed_catalog();
    assert!(!catalog.problems_by_difficulty(Difficulty::Beginner).is_empty());
    assert!(!catalog.problems_by_difficulty(Difficulty::Intermediate).is_empty());
  }
}
