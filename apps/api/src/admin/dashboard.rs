//! Admin dashboard state machine.
//!
//! Drives the CRUD workflows of the admin panel: which tab is active, which
//! form is open for which entity, the project search/category filter, and the
//! working set shown in the lists.
//!
//! Every entity has an independent form state:
//!
//! ```text
//!            begin_add               submit ok / cancel
//!   Idle ─────────────────► Adding ─────────────────────► Idle
//!     │      begin_edit(R)           submit ok / cancel
//!     └───────────────────► Editing(R) ─────────────────► Idle
//! ```
//!
//! A successful submit or delete always reloads the whole working set (every
//! collection, not only the mutated one) before returning to `Idle`; nothing
//! is patched locally. A failed submit leaves the form open with an alert so
//! the operator can retry or cancel.

use tracing::{error, info, warn};

use super::AdminSession;
use crate::content::{AdminContent, CategoryFilter, ProjectFilter, WorkingSet};
use crate::errors::AppError;
use crate::models::skill::{group_by_category, SkillGroup};
use crate::models::{
    AiToolData, CategoryData, Entity, ExperienceData, Project, ProjectData, Record, SkillData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Projects,
    Experience,
    Skills,
    AiTools,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState<E: Entity> {
    Idle,
    /// Create form open, optionally pre-seeded with a category.
    Adding { preset_category: Option<String> },
    /// Edit form open on a snapshot of one record.
    Editing(Record<E>),
}

impl<E: Entity> Default for FormState<E> {
    fn default() -> Self {
        FormState::Idle
    }
}

impl<E: Entity> FormState<E> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FormState::Idle)
    }
}

/// Operator-facing message from the last mutation. Alerts must be
/// acknowledged (`acknowledge_notice`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Alert(String),
}

#[derive(Debug, Clone, Default)]
pub struct Forms {
    projects: FormState<ProjectData>,
    experience: FormState<ExperienceData>,
    skills: FormState<SkillData>,
    ai_tools: FormState<AiToolData>,
    categories: FormState<CategoryData>,
}

/// Binds an entity type to its slot in the dashboard.
pub trait DashboardEntity: Entity {
    const LABEL: &'static str;
    /// Categories are managed inside the Projects and Skills tabs.
    const TAB: Option<Tab>;

    fn form(forms: &Forms) -> &FormState<Self>;
    fn form_mut(forms: &mut Forms) -> &mut FormState<Self>;
    fn rows(data: &WorkingSet) -> &[Record<Self>];

    /// Applies the category chosen when the add form was opened.
    fn apply_preset_category(&mut self, _category_id: &str) {}
}

impl DashboardEntity for ProjectData {
    const LABEL: &'static str = "project";
    const TAB: Option<Tab> = Some(Tab::Projects);

    fn form(forms: &Forms) -> &FormState<Self> {
        &forms.projects
    }
    fn form_mut(forms: &mut Forms) -> &mut FormState<Self> {
        &mut forms.projects
    }
    fn rows(data: &WorkingSet) -> &[Record<Self>] {
        &data.projects
    }
    fn apply_preset_category(&mut self, category_id: &str) {
        if self.category_id.trim().is_empty() {
            self.category_id = category_id.to_string();
        }
    }
}

impl DashboardEntity for ExperienceData {
    const LABEL: &'static str = "experience";
    const TAB: Option<Tab> = Some(Tab::Experience);

    fn form(forms: &Forms) -> &FormState<Self> {
        &forms.experience
    }
    fn form_mut(forms: &mut Forms) -> &mut FormState<Self> {
        &mut forms.experience
    }
    fn rows(data: &WorkingSet) -> &[Record<Self>] {
        &data.experience
    }
}

impl DashboardEntity for SkillData {
    const LABEL: &'static str = "skill";
    const TAB: Option<Tab> = Some(Tab::Skills);

    fn form(forms: &Forms) -> &FormState<Self> {
        &forms.skills
    }
    fn form_mut(forms: &mut Forms) -> &mut FormState<Self> {
        &mut forms.skills
    }
    fn rows(data: &WorkingSet) -> &[Record<Self>] {
        &data.skills
    }
    fn apply_preset_category(&mut self, category_id: &str) {
        // Skills are always added from inside a category
        self.category_id = category_id.to_string();
    }
}

impl DashboardEntity for AiToolData {
    const LABEL: &'static str = "AI tool";
    const TAB: Option<Tab> = Some(Tab::AiTools);

    fn form(forms: &Forms) -> &FormState<Self> {
        &forms.ai_tools
    }
    fn form_mut(forms: &mut Forms) -> &mut FormState<Self> {
        &mut forms.ai_tools
    }
    fn rows(data: &WorkingSet) -> &[Record<Self>] {
        &data.ai_tools
    }
}

impl DashboardEntity for CategoryData {
    const LABEL: &'static str = "category";
    const TAB: Option<Tab> = None;

    fn form(forms: &Forms) -> &FormState<Self> {
        &forms.categories
    }
    fn form_mut(forms: &mut Forms) -> &mut FormState<Self> {
        &mut forms.categories
    }
    fn rows(data: &WorkingSet) -> &[Record<Self>] {
        &data.categories
    }
}

#[derive(Debug, Clone, Copy)]
enum Mutation {
    Add,
    Update,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Mutation::Add => "add",
            Mutation::Update => "update",
            Mutation::Delete => "delete",
        }
    }

    fn progressive(self) -> &'static str {
        match self {
            Mutation::Add => "adding",
            Mutation::Update => "updating",
            Mutation::Delete => "deleting",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Mutation::Add => "added",
            Mutation::Update => "updated",
            Mutation::Delete => "deleted",
        }
    }
}

enum Pending {
    Add(Option<String>),
    Edit(String),
}

pub struct AdminDashboard {
    content: AdminContent,
    session: AdminSession,
    active_tab: Tab,
    forms: Forms,
    filter: ProjectFilter,
    data: WorkingSet,
    loading: bool,
    load_error: Option<String>,
    notice: Option<Notice>,
}

impl AdminDashboard {
    /// Opens the dashboard for a logged-in admin. Starts in the loading state
    /// until the first `load`.
    pub fn new(content: AdminContent, session: AdminSession) -> Self {
        Self {
            content,
            session,
            active_tab: Tab::default(),
            forms: Forms::default(),
            filter: ProjectFilter::default(),
            data: WorkingSet::default(),
            loading: true,
            load_error: None,
            notice: None,
        }
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    /// Reloads every collection. On failure the previous working set stays
    /// visible and a load-error banner is raised.
    pub async fn load(&mut self) -> Result<(), AppError> {
        self.loading = true;
        let result = self.content.load_working_set().await;
        self.loading = false;

        match result {
            Ok(data) => {
                info!(
                    "Dashboard loaded: {} projects, {} categories, {} skills, {} experience, {} AI tools",
                    data.projects.len(),
                    data.categories.len(),
                    data.skills.len(),
                    data.experience.len(),
                    data.ai_tools.len()
                );
                self.data = data;
                self.load_error = None;
                Ok(())
            }
            Err(e) => {
                error!("Error loading dashboard data: {e}");
                self.load_error = Some(format!("Failed to load content: {e}"));
                Err(e)
            }
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn form<E: DashboardEntity>(&self) -> &FormState<E> {
        E::form(&self.forms)
    }

    pub fn begin_add<E: DashboardEntity>(&mut self, preset_category: Option<String>) {
        if let Some(tab) = E::TAB {
            self.active_tab = tab;
        }
        *E::form_mut(&mut self.forms) = FormState::Adding { preset_category };
    }

    /// Opens the edit form on the current copy of record `id`.
    pub fn begin_edit<E: DashboardEntity>(&mut self, id: &str) -> Result<(), AppError> {
        let record = E::rows(&self.data)
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("{} {id} is not loaded", E::LABEL)))?;

        if let Some(tab) = E::TAB {
            self.active_tab = tab;
        }
        *E::form_mut(&mut self.forms) = FormState::Editing(record);
        Ok(())
    }

    pub fn cancel<E: DashboardEntity>(&mut self) {
        *E::form_mut(&mut self.forms) = FormState::Idle;
    }

    /// Submits the open form for `E`: adds in `Adding`, updates in `Editing`.
    pub async fn submit<E: DashboardEntity>(&mut self, mut draft: E) -> Result<(), AppError> {
        let pending = match E::form(&self.forms) {
            FormState::Idle => {
                return Err(AppError::Validation(format!("No {} form is open", E::LABEL)))
            }
            FormState::Adding { preset_category } => Pending::Add(preset_category.clone()),
            FormState::Editing(record) => Pending::Edit(record.id.clone()),
        };

        let (mutation, result) = match pending {
            Pending::Add(preset) => {
                if let Some(category_id) = preset.as_deref() {
                    draft.apply_preset_category(category_id);
                }
                (Mutation::Add, self.content.add(&draft).await.map(|_| ()))
            }
            Pending::Edit(id) => (
                Mutation::Update,
                self.content.update::<E>(&id, &E::Patch::from(draft)).await,
            ),
        };

        if let Err(e) = result {
            self.alert::<E>(mutation, &e);
            return Err(e);
        }

        self.reload_after_mutation::<E>(mutation).await;
        *E::form_mut(&mut self.forms) = FormState::Idle;
        Ok(())
    }

    /// Deletes record `id` (after the operator confirmed).
    pub async fn delete<E: DashboardEntity>(&mut self, id: &str) -> Result<(), AppError> {
        if let Err(e) = self.content.delete::<E>(id).await {
            self.alert::<E>(Mutation::Delete, &e);
            return Err(e);
        }

        if matches!(E::form(&self.forms), FormState::Editing(r) if r.id == id) {
            *E::form_mut(&mut self.forms) = FormState::Idle;
        }
        self.reload_after_mutation::<E>(Mutation::Delete).await;
        Ok(())
    }

    fn alert<E: DashboardEntity>(&mut self, mutation: Mutation, e: &AppError) {
        let message = format!("Error {} {}: {e}", mutation.progressive(), E::LABEL);
        error!("{message}");
        self.notice = Some(Notice::Alert(message));
    }

    async fn reload_after_mutation<E: DashboardEntity>(&mut self, mutation: Mutation) {
        if self.load().await.is_err() {
            warn!(
                "Reload after {} {} failed; lists may be stale",
                E::LABEL,
                mutation.verb()
            );
        }
        self.notice = Some(Notice::Success(format!(
            "{} {} successfully!",
            capitalize(E::LABEL),
            mutation.past()
        )));
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn filter(&self) -> &ProjectFilter {
        &self.filter
    }

    /// Projects tab list after search and category filtering.
    pub fn visible_projects(&self) -> Vec<&Project> {
        self.filter.apply(&self.data.projects)
    }

    /// Skills tab view: skills grouped under their categories.
    pub fn skill_groups(&self) -> Vec<SkillGroup> {
        group_by_category(&self.data.categories, &self.data.skills)
    }

    pub fn data(&self) -> &WorkingSet {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn acknowledge_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
