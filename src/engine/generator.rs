//! Idea generation: remote content source first when configured, seeded
//! deterministic template filling otherwise.

use chrono::Utc;

use crate::engine::choice::choose;
use crate::engine::fill::fill_template;
use crate::engine::registry::Registry;
use crate::engine::remote::RemoteClient;
use crate::types::{Idea, IdeaContent};

/// Words kept lowercase when title-casing, unless they lead the title.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "for", "in", "on", "at", "to", "by", "with", "and", "or", "that", "of",
];

/// Produce the content for a new idea. The remote source gets exactly one
/// attempt; any failure falls through to the deterministic path.
pub fn generate_idea(
    registry: &Registry,
    remote: Option<&RemoteClient>,
    existing_count: usize,
    run_index: u64,
) -> Idea {
    let content = match remote {
        Some(client) => match client.generate_content() {
            Ok(content) => {
                tracing::info!("generated idea content via remote API");
                content
            }
            Err(err) => {
                tracing::warn!(error = %err, "remote generation failed, using deterministic fallback");
                fallback_content(registry, run_index)
            }
        },
        None => fallback_content(registry, run_index),
    };
    new_idea(content, existing_count as u64 + 1)
}

/// Deterministic generation path, a pure function of `run_index`.
pub fn fallback_content(registry: &Registry, run_index: u64) -> IdeaContent {
    let seed = format!("idea_gen_{run_index}");

    let category_data = choose(&format!("{seed}_category"), &registry.categories);
    let template = choose(&format!("{seed}_template"), category_data.templates);
    let description = fill_template(template, &seed, &registry.variables);
    let title = derive_title(&description);
    let key_features = pick_features(&seed, category_data.features);

    let monetization = choose(&format!("{seed}_monetization"), registry.monetization).to_string();
    let target_audience = choose(&format!("{seed}_audience"), registry.audiences).to_string();
    let technical_approach = choose(&format!("{seed}_tech"), registry.technical).to_string();

    IdeaContent {
        title,
        description,
        category: category_data.category,
        target_audience,
        key_features,
        monetization,
        technical_approach,
    }
}

/// Wrap generated content into a fresh record. Identifiers are assigned from
/// the current collection length; persistence is the caller's job.
pub fn new_idea(content: IdeaContent, id: u64) -> Idea {
    let now = Utc::now().to_rfc3339();
    Idea {
        id,
        created_at: now.clone(),
        updated_at: now,
        iteration: 0,
        title: content.title,
        description: content.description,
        category: content.category,
        target_audience: content.target_audience,
        key_features: content.key_features,
        monetization: content.monetization,
        technical_approach: content.technical_approach,
        history: Vec::new(),
        project_path: None,
    }
}

/// Derive a short title from a description: drop a leading article, keep at
/// most the next 10 words, title-case everything except stop words, and
/// always capitalize the first character.
pub fn derive_title(description: &str) -> String {
    let words: Vec<&str> = description
        .split_whitespace()
        .map(|w| w.trim_matches(|c| ".,;:()".contains(c)))
        .filter(|w| !w.is_empty())
        .collect();

    let start = match words.first() {
        Some(first) => {
            let lower = first.to_lowercase();
            usize::from(lower == "a" || lower == "an" || lower == "the")
        }
        None => 0,
    };

    let title = words[start..]
        .iter()
        .take(10)
        .map(|word| {
            let lower = word.to_lowercase();
            if STOP_WORDS.contains(&lower.as_str()) {
                lower
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => title,
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
        }
        None => String::new(),
    }
}

/// Select up to 3 distinct features with a bounded attempt budget. Fewer
/// than 3 are returned if the budget runs out before 3 distinct values turn
/// up; the loop never runs unbounded.
fn pick_features(seed: &str, pool: &[&str]) -> Vec<String> {
    let mut features: Vec<String> = Vec::new();
    let mut attempt = 0;
    while features.len() < 3 && attempt < 10 {
        let feature = choose(&format!("{seed}_feature_{attempt}"), pool).to_string();
        if !features.contains(&feature) {
            features.push(feature);
        }
        attempt += 1;
    }
    features
}
