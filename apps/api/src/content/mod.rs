//! Content access layer.
//!
//! Two façades over the document store:
//! - `AdminContent`: full CRUD for every collection. Read failures propagate so
//!   the operator sees them.
//! - `PublicContent`: read-only views for the public site. Read failures are
//!   logged and degrade to empty results; the site keeps rendering.

use serde::Serialize;

use crate::models::{AiTool, Category, Experience, Project, Skill};

pub mod admin;
pub mod filter;
pub mod handlers;
pub mod presentation;
pub mod public;

pub use admin::AdminContent;
pub use filter::{CategoryFilter, ProjectFilter};
pub use public::PublicContent;

/// Every collection the admin panel works with, as of the last full load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingSet {
    pub projects: Vec<Project>,
    pub categories: Vec<Category>,
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub ai_tools: Vec<AiTool>,
}
