use serde::{Deserialize, Serialize};

/// The closed set of idea categories. Dispatch on this is always an
/// exhaustive `match`; serialized names are the human-readable labels
/// stored in the state document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Developer Tools")]
    DeveloperTools,
    #[serde(rename = "SaaS & Productivity")]
    SaasProductivity,
    #[serde(rename = "Niche Marketplaces")]
    NicheMarketplaces,
    #[serde(rename = "Infrastructure & DevOps")]
    InfrastructureDevops,
    #[serde(rename = "AI & Machine Learning")]
    AiMachineLearning,
    #[serde(rename = "Fintech & Business")]
    FintechBusiness,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::DeveloperTools,
        Category::SaasProductivity,
        Category::NicheMarketplaces,
        Category::InfrastructureDevops,
        Category::AiMachineLearning,
        Category::FintechBusiness,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::DeveloperTools => "Developer Tools",
            Category::SaasProductivity => "SaaS & Productivity",
            Category::NicheMarketplaces => "Niche Marketplaces",
            Category::InfrastructureDevops => "Infrastructure & DevOps",
            Category::AiMachineLearning => "AI & Machine Learning",
            Category::FintechBusiness => "Fintech & Business",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Content of an idea, independent of its persisted envelope. This is also
/// the structured shape requested from the remote content source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdeaContent {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub target_audience: String,
    pub key_features: Vec<String>,
    pub monetization: String,
    pub technical_approach: String,
}

/// One evolution step computed for an idea, before it is folded in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IterationDelta {
    pub iteration_type: String,
    pub changes_summary: String,
    pub updated_description: String,
    pub new_features: Vec<String>,
    pub rationale: String,
}

/// One file of a scaffold plan; `path` is relative to the project directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannedFile {
    pub path: String,
    pub content: String,
}

/// A full scaffold description: the files to write plus the entry point the
/// run configuration should name. This is also the structured shape
/// requested from the remote content source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScaffoldPlan {
    pub description: String,
    pub entry_point: String,
    pub files: Vec<PlannedFile>,
    pub next_steps: Vec<String>,
}

/// Immutable record of an idea's state immediately before one iteration,
/// plus metadata about the change that was applied. Entries are appended
/// once and never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub iteration: u32,
    pub timestamp: String,
    pub description: String,
    pub key_features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_generated: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Idea {
    pub id: u64,
    pub created_at: String,
    pub updated_at: String,
    /// Number of iterations applied so far; equals `history.len()`.
    pub iteration: u32,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub target_audience: String,
    pub key_features: Vec<String>,
    pub monetization: String,
    pub technical_approach: String,
    pub history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Metadata {
    pub created: String,
    pub total_runs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_generate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_iterate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scaffold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_iterations: Option<u64>,
}

/// The whole state document: ordered ideas plus run metadata. Idea order is
/// creation order and defines identifier assignment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateData {
    pub ideas: Vec<Idea>,
    pub metadata: Metadata,
}

impl StateData {
    pub fn empty(created: String) -> Self {
        Self {
            ideas: Vec::new(),
            metadata: Metadata {
                created,
                total_runs: 0,
                last_generate: None,
                last_iterate: None,
                last_scaffold: None,
                total_iterations: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_round_trip() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        let err = serde_json::from_str::<Category>("\"Quantum Widgets\"");
        assert!(err.is_err());
    }
}
