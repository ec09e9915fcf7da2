use std::sync::Arc;

use tracing::{error, info};

use super::prompts::{build_prompt, fallback_reply};
use super::ContextCache;
use crate::config::OwnerProfile;
use crate::content::AdminContent;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;

/// Turns a visitor question into a grounded answer.
///
/// Provider failures never surface as errors: the visitor gets a fixed apology
/// pointing at the contact form instead. Only an empty message is rejected.
#[derive(Clone)]
pub struct ChatRelay {
    content: AdminContent,
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ContextCache>,
    owner: OwnerProfile,
}

impl ChatRelay {
    pub fn new(
        content: AdminContent,
        generator: Arc<dyn TextGenerator>,
        cache: Arc<ContextCache>,
        owner: OwnerProfile,
    ) -> Self {
        Self {
            content,
            generator,
            cache,
            owner,
        }
    }

    pub fn cache(&self) -> &ContextCache {
        &self.cache
    }

    pub async fn respond(&self, message: &str) -> Result<String, AppError> {
        if message.trim().is_empty() {
            return Err(AppError::Validation("Message is required".to_string()));
        }

        let context = self.cache.get_or_build(&self.content, &self.owner).await;
        let prompt = build_prompt(&context, message);

        match self.generator.generate(&prompt).await {
            Ok(text) => {
                info!("Chat reply generated ({} chars)", text.len());
                Ok(text)
            }
            Err(e) => {
                error!("Chat provider error: {e}");
                Ok(fallback_reply(&self.owner))
            }
        }
    }
}
