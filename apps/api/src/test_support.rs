//! Fixtures shared by unit tests across modules.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{Config, OwnerProfile};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::{AiToolData, CategoryData, ExperienceData, ProjectData, SkillData};
use crate::state::AppState;
use crate::store::MemoryStore;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub fn project(title: &str, category_id: &str, order: i64, featured: bool) -> ProjectData {
    ProjectData {
        title: title.to_string(),
        description: format!("{title} description"),
        image: String::new(),
        tech: vec!["Rust".to_string(), "Postgres".to_string()],
        github: String::new(),
        live: String::new(),
        featured,
        order,
        category_id: category_id.to_string(),
        presentation_url: None,
        documentation_url: None,
        readme_content: None,
        presentation_passkey: None,
    }
}

pub fn category(name: &str, order: i64) -> CategoryData {
    CategoryData {
        name: name.to_string(),
        order,
    }
}

pub fn skill(name: &str, category_id: &str, level: u8) -> SkillData {
    SkillData {
        name: name.to_string(),
        icon: String::new(),
        level,
        category_id: category_id.to_string(),
        order: 0,
    }
}

pub fn experience(title: &str, order: i64) -> ExperienceData {
    ExperienceData {
        title: title.to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        period: "2022 - Present".to_string(),
        description: vec!["Shipped things".to_string()],
        tech: vec!["Rust".to_string()],
        order,
    }
}

pub fn ai_tool(name: &str, order: i64) -> AiToolData {
    AiToolData {
        name: name.to_string(),
        description: String::new(),
        tagline: format!("{name} tagline"),
        icon: None,
        image: None,
        category: "Coding".to_string(),
        url: String::new(),
        featured: false,
        order,
    }
}

/// Canned `TextGenerator` that records every prompt it receives.
pub struct StubGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Api {
                status: 503,
                message: "The model is overloaded".to_string(),
            }),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        gemini_api_key: "test-key".to_string(),
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        llm_timeout: std::time::Duration::from_secs(1),
        context_cache_ttl: None,
        owner: OwnerProfile::default(),
    }
}

/// Fully wired state over an in-memory store.
pub fn test_state(store: Arc<MemoryStore>, generator: Arc<StubGenerator>) -> AppState {
    AppState::new(test_config(), store, generator)
}
