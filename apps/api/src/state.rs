use std::sync::Arc;

use crate::admin::AdminGate;
use crate::chat::{ChatRelay, ContextCache};
use crate::config::Config;
use crate::content::{AdminContent, PublicContent};
use crate::llm_client::TextGenerator;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Admin CRUD access. Only reachable behind `require_admin`.
    pub content: AdminContent,
    pub public: PublicContent,
    pub chat: ChatRelay,
    pub admin_gate: AdminGate,
    pub config: Config,
}

impl AppState {
    /// Wires the content façades, chat relay and admin gate over one store.
    pub fn new(
        config: Config,
        store: Arc<dyn DocumentStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let content = AdminContent::new(store);
        let cache = Arc::new(ContextCache::new(config.context_cache_ttl));

        Self {
            public: PublicContent::new(content.clone()),
            chat: ChatRelay::new(content.clone(), generator, cache, config.owner.clone()),
            admin_gate: AdminGate::new(config.admin_email.clone(), config.admin_password.clone()),
            content,
            config,
        }
    }
}
