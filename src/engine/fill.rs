use std::collections::HashMap;

use regex::Regex;

use crate::engine::choice::choose;

/// Substitute every `{placeholder}` in `template` with a seeded choice from
/// its value pool.
///
/// Placeholders are scanned left to right; occurrence `i` of placeholder `p`
/// is resolved with the per-occurrence seed `"{base_seed}_{i}_{p}"` and only
/// the first remaining occurrence of that token is replaced, so repeated
/// placeholders each get their own choice. A placeholder with no pool entry
/// is left unresolved rather than failing the whole template.
pub fn fill_template(
    template: &str,
    base_seed: &str,
    variables: &HashMap<&str, &[&str]>,
) -> String {
    let placeholder = Regex::new(r"\{(\w+)\}").unwrap();
    let mut filled = template.to_string();
    for (i, cap) in placeholder.captures_iter(template).enumerate() {
        let name = &cap[1];
        if let Some(pool) = variables.get(name) {
            let value = choose(&format!("{base_seed}_{i}_{name}"), pool);
            filled = filled.replacen(&format!("{{{name}}}"), value, 1);
        }
    }
    filled
}
