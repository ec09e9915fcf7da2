//! Passkey gate for project presentations.
//!
//! This is best-effort obscurity, not access control: the passkey is stored and
//! compared in plaintext, there is no rate limiting, and anyone with admin
//! read access sees it. Public project views never carry the passkey and hide
//! the presentation link while a passkey is set.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::Project;

/// A project as exposed to the public site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProject {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tech: Vec<String>,
    pub github: String,
    pub live: String,
    pub featured: bool,
    pub order: i64,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_url: Option<String>,
    pub presentation_locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme_content: Option<String>,
}

impl From<Project> for PublicProject {
    fn from(project: Project) -> Self {
        let locked = project.data.passkey().is_some() && project.data.presentation().is_some();
        let presentation_url = if locked {
            None
        } else {
            project.data.presentation().map(str::to_string)
        };
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Self {
            id: project.id,
            title: project.data.title,
            description: project.data.description,
            image: project.data.image,
            tech: project.data.tech,
            github: project.data.github,
            live: project.data.live,
            featured: project.data.featured,
            order: project.data.order,
            category_id: project.data.category_id,
            presentation_url,
            presentation_locked: locked,
            documentation_url: non_blank(project.data.documentation_url),
            readme_content: non_blank(project.data.readme_content),
        }
    }
}

/// Returns the presentation link when `attempt` matches the project's passkey
/// (or the presentation is not protected at all).
pub fn unlock_presentation(project: &Project, attempt: &str) -> Result<String, AppError> {
    let url = project.data.presentation().ok_or_else(|| {
        AppError::NotFound(format!("Project {} has no presentation", project.id))
    })?;

    match project.data.passkey() {
        Some(passkey) if passkey != attempt => Err(AppError::Forbidden("Invalid passkey".to_string())),
        _ => Ok(url.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::test_support::project;

    fn protected() -> Project {
        let mut data = project("Deck", "talks", 0, true);
        data.presentation_url = Some("https://slides.example/deck".to_string());
        data.presentation_passkey = Some("letmein".to_string());
        Record {
            id: "p1".to_string(),
            data,
        }
    }

    #[test]
    fn test_public_view_hides_locked_presentation() {
        let view = PublicProject::from(protected());
        assert!(view.presentation_locked);
        assert_eq!(view.presentation_url, None);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("presentationPasskey").is_none());
    }

    #[test]
    fn test_public_view_shows_unprotected_presentation() {
        let mut project = protected();
        project.data.presentation_passkey = Some(String::new());
        let view = PublicProject::from(project);
        assert!(!view.presentation_locked);
        assert_eq!(
            view.presentation_url.as_deref(),
            Some("https://slides.example/deck")
        );
    }

    #[test]
    fn test_unlock_with_correct_passkey() {
        assert_eq!(
            unlock_presentation(&protected(), "letmein").unwrap(),
            "https://slides.example/deck"
        );
    }

    #[test]
    fn test_unlock_with_wrong_passkey_is_forbidden() {
        let err = unlock_presentation(&protected(), "guess").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_unlock_without_presentation_is_not_found() {
        let mut project = protected();
        project.data.presentation_url = None;
        assert!(matches!(
            unlock_presentation(&project, "letmein"),
            Err(AppError::NotFound(_))
        ));
    }
}
