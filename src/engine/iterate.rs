//! Iteration engine: computes one evolution step for an idea and folds it
//! in, snapshotting the pre-iteration state into the history log first.

use chrono::Utc;

use crate::engine::choice::choose;
use crate::engine::registry::Registry;
use crate::engine::remote::RemoteClient;
use crate::error::{ServiceError, ServiceResult};
use crate::types::{HistoryEntry, Idea, IterationDelta};

/// Weighted feature-count pool: 2 is twice as likely as 1 or 3.
const FEATURE_COUNTS: [usize; 4] = [1, 2, 2, 3];

/// Iterate one idea in place and return the applied delta for reporting.
///
/// If delta content cannot be obtained at all, `iteration` still advances
/// and a failure entry is appended, so the failure is part of the permanent
/// record and the next run's seed diverges anyway.
pub fn iterate_idea(
    registry: &Registry,
    remote: Option<&RemoteClient>,
    idea: &mut Idea,
) -> ServiceResult<IterationDelta> {
    match obtain_delta(registry, remote, idea) {
        Ok(delta) => Ok(apply_delta(idea, delta)),
        Err(err) => {
            record_failure(idea, &err);
            Err(err)
        }
    }
}

fn obtain_delta(
    registry: &Registry,
    remote: Option<&RemoteClient>,
    idea: &Idea,
) -> ServiceResult<IterationDelta> {
    if let Some(client) = remote {
        match client.iterate_content(idea) {
            Ok(delta) => {
                tracing::info!(id = idea.id, "iterated via remote API");
                return Ok(delta);
            }
            Err(err) => {
                tracing::warn!(id = idea.id, error = %err, "remote iteration failed, using deterministic fallback");
            }
        }
    }
    Ok(fallback_delta(registry, idea))
}

/// Deterministic iteration path. The seed includes the current iteration
/// number, so every successive iteration of the same idea explores a
/// different branch.
pub fn fallback_delta(registry: &Registry, idea: &Idea) -> IterationDelta {
    let seed = format!("iterate_{}_{}", idea.id, idea.iteration);

    let strategy = choose(&format!("{seed}_strategy"), registry.strategies);
    let change = choose(&format!("{seed}_change"), strategy.examples);
    let changes_summary = format!("{}: {}", strategy.name, change);

    let updated_description = format!(
        "{} In this iteration, we're implementing {} to {}.",
        idea.description,
        change.to_lowercase(),
        strategy.description.to_lowercase()
    );

    let feature_count = *choose(&format!("{seed}_count"), &FEATURE_COUNTS);
    let mut new_features: Vec<String> = Vec::new();
    for i in 0..feature_count {
        let feature = choose(&format!("{seed}_newfeature_{i}"), strategy.features).to_string();
        if !new_features.contains(&feature) {
            new_features.push(feature);
        }
    }

    let rationale = choose(&format!("{seed}_rationale"), registry.rationales)
        .replace("{change}", &change.to_lowercase());

    IterationDelta {
        iteration_type: strategy.name.to_string(),
        changes_summary,
        updated_description,
        new_features,
        rationale,
    }
}

/// Fold a delta into the idea. The pre-iteration state is snapshotted into a
/// history entry before any field changes; the entry then carries the change
/// metadata of this same call.
pub fn apply_delta(idea: &mut Idea, delta: IterationDelta) -> IterationDelta {
    let mut entry = snapshot(idea);

    idea.iteration += 1;
    idea.updated_at = Utc::now().to_rfc3339();
    idea.description = delta.updated_description.clone();
    for feature in &delta.new_features {
        if !idea.key_features.contains(feature) {
            idea.key_features.push(feature.clone());
        }
    }

    entry.iteration_type = Some(delta.iteration_type.clone());
    entry.changes_summary = Some(delta.changes_summary.clone());
    entry.rationale = Some(delta.rationale.clone());
    idea.history.push(entry);

    delta
}

/// Advance the iteration counter and log the failure itself.
pub fn record_failure(idea: &mut Idea, err: &ServiceError) {
    let mut entry = snapshot(idea);
    idea.iteration += 1;
    idea.updated_at = Utc::now().to_rfc3339();
    entry.iteration_type = Some("Failed".to_string());
    entry.error = Some(err.to_string());
    idea.history.push(entry);
}

/// Snapshot of the current (pre-mutation) state of an idea.
pub(crate) fn snapshot(idea: &Idea) -> HistoryEntry {
    HistoryEntry {
        iteration: idea.iteration,
        timestamp: idea.updated_at.clone(),
        description: idea.description.clone(),
        key_features: idea.key_features.clone(),
        iteration_type: None,
        changes_summary: None,
        rationale: None,
        files_generated: None,
        next_steps: None,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generator::{fallback_content, new_idea};

    fn test_idea(registry: &Registry) -> Idea {
        new_idea(fallback_content(registry, 0), 1)
    }

    #[test]
    fn iteration_advances_counter_and_history_in_lockstep() {
        let registry = Registry::builtin();
        let mut idea = test_idea(&registry);
        assert_eq!(idea.id, 1);
        assert_eq!(idea.iteration, 0);
        assert!(idea.history.is_empty());

        iterate_idea(&registry, None, &mut idea).unwrap();
        assert_eq!(idea.iteration, 1);
        assert_eq!(idea.history.len(), 1);
        assert_eq!(idea.history[0].iteration, 0);

        let after_first = idea.description.clone();
        iterate_idea(&registry, None, &mut idea).unwrap();
        assert_eq!(idea.iteration, 2);
        assert_eq!(idea.history.len(), 2);
        assert_eq!(idea.history[1].iteration, 1);
        // The second entry snapshots the state the first iteration produced.
        assert_eq!(idea.history[1].description, after_first);
    }

    #[test]
    fn descriptions_grow_under_the_fallback_path() {
        let registry = Registry::builtin();
        let mut idea = test_idea(&registry);
        let mut previous_len = idea.description.len();
        for _ in 0..4 {
            iterate_idea(&registry, None, &mut idea).unwrap();
            assert!(idea.description.len() > previous_len);
            assert!(idea.description.contains("In this iteration, we're implementing"));
            previous_len = idea.description.len();
        }
    }

    #[test]
    fn fallback_delta_is_deterministic() {
        let registry = Registry::builtin();
        let idea = test_idea(&registry);
        let a = fallback_delta(&registry, &idea);
        let b = fallback_delta(&registry, &idea);
        assert_eq!(a.changes_summary, b.changes_summary);
        assert_eq!(a.updated_description, b.updated_description);
        assert_eq!(a.new_features, b.new_features);
        assert_eq!(a.rationale, b.rationale);
    }

    #[test]
    fn successive_iterations_diverge() {
        let registry = Registry::builtin();
        let mut idea = test_idea(&registry);
        for _ in 0..6 {
            iterate_idea(&registry, None, &mut idea).unwrap();
        }
        let summaries: std::collections::HashSet<_> = idea
            .history
            .iter()
            .filter_map(|e| e.changes_summary.clone())
            .collect();
        assert!(
            summaries.len() > 1,
            "six seed-distinct iterations all chose the same change"
        );
    }

    #[test]
    fn key_features_never_duplicate() {
        let registry = Registry::builtin();
        let mut idea = test_idea(&registry);
        for _ in 0..10 {
            iterate_idea(&registry, None, &mut idea).unwrap();
        }
        let mut sorted = idea.key_features.clone();
        sorted.sort();
        let before = sorted.len();
        sorted.dedup();
        assert_eq!(sorted.len(), before);
    }

    #[test]
    fn delta_metadata_lands_on_the_new_history_entry() {
        let registry = Registry::builtin();
        let mut idea = test_idea(&registry);
        let delta = iterate_idea(&registry, None, &mut idea).unwrap();
        let entry = idea.history.last().unwrap();
        assert_eq!(entry.iteration_type.as_deref(), Some(delta.iteration_type.as_str()));
        assert_eq!(entry.changes_summary.as_deref(), Some(delta.changes_summary.as_str()));
        assert_eq!(entry.rationale.as_deref(), Some(delta.rationale.as_str()));
        assert!(entry.error.is_none());
        assert!(delta.changes_summary.starts_with(&format!("{}: ", delta.iteration_type)));
    }

    #[test]
    fn failure_still_advances_iteration() {
        let registry = Registry::builtin();
        let mut idea = test_idea(&registry);
        record_failure(&mut idea, &ServiceError::Other("boom".into()));
        assert_eq!(idea.iteration, 1);
        assert_eq!(idea.history.len(), 1);
        let entry = &idea.history[0];
        assert_eq!(entry.iteration, 0);
        assert_eq!(entry.iteration_type.as_deref(), Some("Failed"));
        assert_eq!(entry.error.as_deref(), Some("boom"));
    }
}
