// Chat prompt templates and the context block renderer.
// All text sent to the model is assembled here.

use crate::config::OwnerProfile;
use crate::models::{Category, Project, Skill};

const INSTRUCTIONS: &str = "\
Instructions:
- Be helpful and professional
- Answer questions about the owner's skills, projects, and experience
- For contact requests, direct them to the contact form or email
- Keep responses concise and relevant";

const UNKNOWN_INSTRUCTION: &str =
    "- If you don't know something, suggest they get in touch directly";

fn owner_header(owner: &OwnerProfile) -> String {
    format!(
        "You are {name}'s AI assistant for their portfolio website. \
         Here's information about {name}:\n\n\
         Personal Info:\n\
         - Name: {name}\n\
         - Title: {title}\n\
         - Location: {location}\n\
         - Email: {email}\n\
         - GitHub: {github}",
        name = owner.name,
        title = owner.title,
        location = owner.location,
        email = owner.email,
        github = owner.github,
    )
}

/// One line per project: title, description and comma-joined tech list.
pub fn render_projects(projects: &[Project]) -> String {
    projects
        .iter()
        .map(|p| {
            format!(
                "- {}: {} (Tech: {})",
                p.data.title,
                p.data.description,
                p.data.tech.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per category listing its skills with proficiency percentages.
pub fn render_skills(categories: &[Category], skills: &[Skill]) -> String {
    categories
        .iter()
        .map(|cat| {
            let listed = skills
                .iter()
                .filter(|s| s.data.category_id == cat.id)
                .map(|s| format!("{} ({}%)", s.data.name, s.data.level))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", cat.data.name, listed)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full context block built from live store content.
pub fn render_context(
    owner: &OwnerProfile,
    projects: &[Project],
    skills: &[Skill],
    categories: &[Category],
) -> String {
    format!(
        "{header}\n\nSkills by Category:\n{skills}\n\nProjects:\n{projects}\n\n{INSTRUCTIONS}\n{UNKNOWN_INSTRUCTION}\n",
        header = owner_header(owner),
        skills = render_skills(categories, skills),
        projects = render_projects(projects),
    )
}

/// Owner-only context used when the store cannot be read.
pub fn fallback_context(owner: &OwnerProfile) -> String {
    format!("{}\n\n{INSTRUCTIONS}\n", owner_header(owner))
}

pub fn build_prompt(context: &str, message: &str) -> String {
    format!("{context}\n\nUser question: {message}\n\nResponse:")
}

/// Reply sent in place of a model answer when the provider call fails.
pub fn fallback_reply(owner: &OwnerProfile) -> String {
    format!(
        "Sorry, I'm having trouble right now. Please use the contact form to reach {} directly!",
        owner.name
    )
}
