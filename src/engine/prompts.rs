//! Prompt construction for the remote content source. Each prompt requests
//! a single JSON object matching one of the structured types in
//! `crate::types`.

use crate::types::Idea;

pub const GENERATE_SYSTEM_PROMPT: &str = "You are an expert product strategist and startup advisor who generates innovative, high-value product ideas.";

pub const ITERATE_SYSTEM_PROMPT: &str = "You are an expert product strategist who helps evolve product ideas through thoughtful iteration.";

pub const SCAFFOLD_SYSTEM_PROMPT: &str = "You are an expert full-stack engineer who scaffolds minimal, runnable web applications.";

pub const GENERATE_IDEA_PROMPT: &str = r#"Generate ONE innovative, high-value website or application idea that:
- Solves a real, specific problem for a defined audience
- Has clear monetization potential
- Is technically feasible but non-trivial
- Avoids generic concepts (no to-do lists, recipe sites, weather apps, basic CRUD apps)
- Focuses on B2B SaaS, developer tools, niche marketplaces, fintech, AI/ML platforms, or infrastructure

Respond with a JSON object containing:
{
  "title": "Concise, descriptive title",
  "description": "2-3 sentences explaining the idea, target market, and value proposition",
  "category": "One of: Developer Tools, SaaS & Productivity, Niche Marketplaces, Infrastructure & DevOps, AI & Machine Learning, Fintech & Business",
  "target_audience": "Who would use this",
  "key_features": ["feature1", "feature2", "feature3"],
  "monetization": "How it makes money",
  "technical_approach": "Brief technical overview"
}"#;

pub fn build_iteration_prompt(idea: &Idea) -> String {
    format!(
        r#"You are helping evolve and improve a product idea through iteration. Here's the current idea:

Title: {title}
Description: {description}
Category: {category}
Current Iteration: {iteration}

Target Audience: {audience}
Key Features: {features}
Monetization: {monetization}
Technical Approach: {technical}

Generate the NEXT iteration of this idea by:
1. Identifying a specific way to evolve, expand, or improve it
2. Keeping the core concept but making it more valuable, feasible, or differentiated
3. Being specific and actionable (not generic)

Respond with a JSON object containing:
{{
  "iteration_type": "What kind of iteration (e.g., Feature Expansion, Market Expansion, etc.)",
  "changes_summary": "Brief summary of what's changing",
  "updated_description": "Updated 2-3 sentence description incorporating the changes",
  "new_features": ["Any new features being added"],
  "rationale": "Why this iteration makes the product more valuable"
}}"#,
        title = idea.title,
        description = idea.description,
        category = idea.category,
        iteration = idea.iteration,
        audience = idea.target_audience,
        features = idea.key_features.join(", "),
        monetization = idea.monetization,
        technical = idea.technical_approach,
    )
}

pub fn build_scaffold_prompt(idea: &Idea, updating_existing: bool) -> String {
    let mode = if updating_existing {
        "An earlier scaffold already exists in the project directory; produce an UPDATED version of the files (they will overwrite the old ones)."
    } else {
        "This is a fresh scaffold; produce the initial version of the files."
    };
    format!(
        r#"Scaffold a minimal viable web application for this product idea:

Title: {title}
Description: {description}
Category: {category}
Key Features: {features}
Technical Approach: {technical}

{mode}

Requirements:
- One runnable entry-point file exposing a minimal HTTP interface
- One static HTML page that consumes that interface
- One README.md summarizing the idea
- All file paths relative to the project root, no parent-directory references

Respond with a JSON object containing:
{{
  "description": "One sentence describing the generated app",
  "entry_point": "Relative path of the runnable entry point",
  "files": [{{"path": "relative/path", "content": "full file content"}}],
  "next_steps": ["suggested follow-up 1", "suggested follow-up 2"]
}}"#,
        title = idea.title,
        description = idea.description,
        category = idea.category,
        features = idea.key_features.join(", "),
        technical = idea.technical_approach,
        mode = mode,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generator::new_idea;
    use crate::types::{Category, IdeaContent};

    #[test]
    fn iteration_prompt_includes_idea_fields() {
        let idea = new_idea(
            IdeaContent {
                title: "Ledger Copilot".into(),
                description: "Automated close".into(),
                category: Category::FintechBusiness,
                target_audience: "Controllers".into(),
                key_features: vec!["Reconciliation".into(), "Alerts".into()],
                monetization: "Per-seat".into(),
                technical_approach: "Event-driven".into(),
            },
            1,
        );
        let prompt = build_iteration_prompt(&idea);
        assert!(prompt.contains("Ledger Copilot"));
        assert!(prompt.contains("Fintech & Business"));
        assert!(prompt.contains("Reconciliation, Alerts"));
        assert!(prompt.contains("Current Iteration: 0"));
    }
}
