//! Process-wide cache of the chat context block.
//!
//! The block is rendered from projects, skills and categories on first use and
//! then reused. Without a TTL it is never refreshed: content edited after the
//! first chat request only shows up after a restart (or an explicit
//! `invalidate`). With a TTL the block is rebuilt on the first request after it
//! expires. The owner-only fallback used when the store is unreachable is never
//! cached, so the next request retries the fetch.
//!
//! Concurrent first requests may both build the block; the last write wins and
//! the contents are equivalent.

use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{error, info};

use super::prompts::{fallback_context, render_context};
use crate::config::OwnerProfile;
use crate::content::AdminContent;
use crate::models::{CategoryData, ProjectData, SkillData};

struct CachedContext {
    text: String,
    built_at: Instant,
}

pub struct ContextCache {
    ttl: Option<Duration>,
    slot: RwLock<Option<CachedContext>>,
}

impl ContextCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached block, building it if absent or expired.
    pub async fn get_or_build(&self, content: &AdminContent, owner: &OwnerProfile) -> String {
        if let Some(text) = self.fresh().await {
            return text;
        }

        let fetched = tokio::try_join!(
            content.get_all::<ProjectData>(),
            content.get_all::<SkillData>(),
            content.get_all::<CategoryData>(),
        );

        match fetched {
            Ok((projects, skills, categories)) => {
                let text = render_context(owner, &projects, &skills, &categories);
                *self.slot.write().await = Some(CachedContext {
                    text: text.clone(),
                    built_at: Instant::now(),
                });
                info!(
                    "Chat context cached ({} projects, {} skills)",
                    projects.len(),
                    skills.len()
                );
                text
            }
            Err(e) => {
                error!("Error building chat context: {e}");
                fallback_context(owner)
            }
        }
    }

    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
        info!("Chat context cache invalidated");
    }

    pub async fn is_populated(&self) -> bool {
        self.fresh().await.is_some()
    }

    async fn fresh(&self) -> Option<String> {
        let guard = self.slot.read().await;
        let cached = guard.as_ref()?;
        match self.ttl {
            Some(ttl) if cached.built_at.elapsed() >= ttl => None,
            _ => Some(cached.text.clone()),
        }
    }
}
