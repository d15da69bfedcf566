//! Application state: the problem catalog, design sessions, prompts, and OpenAI client.
//!
//! This module owns:
//!   - the problem/solution catalog (from JSON files or built-in seeds)
//!   - in-flight design sessions from the interactive design endpoints
//!   - the prompts struct (from TOML or defaults)
//!   - optional OpenAI client
//!
//! If OpenAI is unavailable, every feature that uses it degrades to local logic.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::agent::DesignSession;
use crate::catalog::InMemoryCatalog;
use crate::config::{load_assistant_config_from_env, Prompts};
use crate::openai::OpenAI;
use crate::seeds::seed_catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<InMemoryCatalog>,
    pub designs: Arc<RwLock<HashMap<String, DesignSession>>>,
    pub openai: Option<OpenAI>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, load or seed the catalog, init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        // Load TOML config if provided (prompt overrides).
        let prompts = load_assistant_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        // Prefer catalog files when both paths are set; otherwise built-in seeds.
        let catalog = match (std::env::var("PROBLEMS_PATH"), std::env::var("SOLUTIONS_PATH")) {
            (Ok(problems_path), Ok(solutions_path)) => {
                match InMemoryCatalog::from_files(&problems_path, &solutions_path) {
                    Ok(catalog) => {
                        info!(target: "sda_backend", %problems_path, %solutions_path, "Loaded problem catalog from files.");
                        catalog
                    }
                    Err(e) => {
                        error!(target: "sda_backend", error = %e, "Failed to load catalog files; using built-in seeds.");
                        seed_catalog()
                    }
                }
            }
            _ => seed_catalog(),
        };

        // Inventory summary by difficulty.
        let stats = catalog.stats();
        for (difficulty, count) in &stats.difficulty_breakdown {
            info!(target: "sda_backend", %difficulty, count = *count, "Startup problem inventory");
        }
        info!(target: "sda_backend", total = stats.total_problems, "Problem catalog ready.");

        // Build optional OpenAI client (if API key present).
        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "sda_backend", base_url = %oa.base_url, fast_model = %oa.fast_model, strong_model = %oa.strong_model, "OpenAI enabled.");
        } else {
            info!(target: "sda_backend", "OpenAI disabled (no OPENAI_API_KEY). Using local scoring only.");
        }

        Self::from_parts(catalog, openai, prompts)
    }

    /// Assemble state from already-built pieces. Tests use this directly.
    pub fn from_parts(catalog: InMemoryCatalog, openai: Option<OpenAI>, prompts: Prompts) -> Self {
        Self {
            catalog: Arc::new(catalog),
            designs: Arc::new(RwLock::new(HashMap::new())),
            openai,
            prompts,
        }
    }

    /// Store a design session under its id.
    #[instrument(level = "debug", skip(self, session), fields(id = %session.id))]
    pub async fn insert_design(&self, session: DesignSession) {
        let mut designs = self.designs.write().await;
        designs.insert(session.id.clone(), session);
    }

    /// Read-only access to a design session by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_design(&self, id: &str) -> Option<DesignSession> {
        let designs = self.designs.read().await;
        designs.get(id).cloned()
    }
}
