use crate::models::Project;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parses the query-string form, where `all` or a blank value means no filter.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(id) => CategoryFilter::Only(id.to_string()),
        }
    }
}

/// Narrows a project list by free-text search and category without touching
/// the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl ProjectFilter {
    /// Search matches title or description, case-insensitively.
    pub fn matches(&self, project: &Project) -> bool {
        let needle = self.search_term.to_lowercase();
        let matches_search = project.data.title.to_lowercase().contains(&needle)
            || project.data.description.to_lowercase().contains(&needle);

        let matches_category = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => &project.data.category_id == id,
        };

        matches_search && matches_category
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::test_support::project;

    fn projects() -> Vec<Project> {
        let mut chat = project("Chat Widget", "ai", 0, true);
        chat.description = "Gemini powered ASSISTANT".to_string();
        vec![
            Record {
                id: "1".to_string(),
                data: chat,
            },
            Record {
                id: "2".to_string(),
                data: project("Inventory", "web", 1, false),
            },
        ]
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let projects = projects();
        assert_eq!(ProjectFilter::default().apply(&projects).len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let projects = projects();
        let filter = ProjectFilter {
            search_term: "assistant".to_string(),
            ..Default::default()
        };
        let hits = filter.apply(&projects);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");

        let filter = ProjectFilter {
            search_term: "INVENT".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&projects)[0].id, "2");
    }

    #[test]
    fn test_category_filter_combines_with_search() {
        let projects = projects();
        let filter = ProjectFilter {
            search_term: "chat".to_string(),
            category: CategoryFilter::Only("web".to_string()),
        };
        assert!(filter.apply(&projects).is_empty());
    }

    #[test]
    fn test_parse_category_filter() {
        assert_eq!(CategoryFilter::parse(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("all")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(Some("web")),
            CategoryFilter::Only("web".to_string())
        );
    }
}
