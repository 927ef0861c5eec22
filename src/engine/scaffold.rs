//! Scaffold generator: turns an idea into a small runnable project on disk.
//!
//! The deterministic path dispatches on the idea's category to one of two
//! template families (a minimal processing tool or a metrics dashboard) and
//! fills the idea's fields into a fixed file skeleton. Scaffolding is best
//! effort per idea: a failure is recorded on that idea's history and the
//! batch moves on.

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;

use crate::engine::iterate::snapshot;
use crate::engine::remote::RemoteClient;
use crate::error::{ServiceError, ServiceResult};
use crate::types::{Idea, PlannedFile, ScaffoldPlan};

/// Directory entries that do not count as project content when deciding
/// between a fresh scaffold and an update.
const IGNORED_ENTRIES: &[&str] = &[".git", "node_modules", "__pycache__", "target"];

const SLUG_MAX_LEN: usize = 50;

/// UI chrome family a category maps to. Closed set; the dispatch below is
/// an exhaustive match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    Tool,
    Dashboard,
}

fn family_for(category: crate::types::Category) -> Family {
    use crate::types::Category::*;
    match category {
        DeveloperTools | AiMachineLearning | NicheMarketplaces => Family::Tool,
        SaasProductivity | InfrastructureDevops | FintechBusiness => Family::Dashboard,
    }
}

#[derive(Clone, Debug)]
pub struct ScaffoldOutcome {
    pub project_dir: PathBuf,
    pub files_written: usize,
    pub entry_point: String,
    pub next_steps: Vec<String>,
    pub updated_existing: bool,
}

/// Scaffold one idea under `projects_dir`, mutating the idea's envelope on
/// both success and failure. Never aborts the surrounding batch.
pub fn scaffold_idea(
    idea: &mut Idea,
    remote: Option<&RemoteClient>,
    projects_dir: &Path,
) -> ServiceResult<ScaffoldOutcome> {
    let project_dir = projects_dir.join(project_dir_name(idea));
    match build_and_write(idea, remote, &project_dir) {
        Ok(outcome) => {
            let mut entry = snapshot(idea);
            idea.iteration += 1;
            idea.updated_at = Utc::now().to_rfc3339();
            idea.project_path = Some(project_dir.to_string_lossy().to_string());
            entry.iteration_type = Some("Code Generation".to_string());
            entry.changes_summary =
                Some(format!("Generated {} project files", outcome.files_written));
            entry.files_generated = Some(outcome.files_written);
            entry.next_steps = Some(outcome.next_steps.clone());
            idea.history.push(entry);
            Ok(outcome)
        }
        Err(err) => {
            let mut entry = snapshot(idea);
            idea.iteration += 1;
            idea.updated_at = Utc::now().to_rfc3339();
            entry.iteration_type = Some("Code Generation".to_string());
            entry.error = Some(err.to_string());
            idea.history.push(entry);
            Err(err)
        }
    }
}

fn build_and_write(
    idea: &Idea,
    remote: Option<&RemoteClient>,
    project_dir: &Path,
) -> ServiceResult<ScaffoldOutcome> {
    let updated_existing = has_existing_content(project_dir);

    let plan = match remote {
        Some(client) => match client.scaffold_plan(idea, updated_existing) {
            Ok(plan) => {
                tracing::info!(id = idea.id, "scaffold plan obtained via remote API");
                plan
            }
            Err(err) => {
                tracing::warn!(id = idea.id, error = %err, "remote scaffold failed, using deterministic fallback");
                fallback_plan(idea)
            }
        },
        None => fallback_plan(idea),
    };

    for file in &plan.files {
        if !is_safe_relative(&file.path) {
            return Err(ServiceError::Other(format!(
                "scaffold file path escapes the project directory: {}",
                file.path
            )));
        }
    }

    fs::create_dir_all(project_dir)?;
    let mut files_written = 0;
    for file in &plan.files {
        let target = project_dir.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &file.content)?;
        if file.path == plan.entry_point || file.path.ends_with(".py") {
            mark_executable(&target)?;
        }
        files_written += 1;
    }

    // The platform run configuration is always written alongside.
    let run_config = format!(
        "run = \"python3 {entry}\"\nentrypoint = \"{entry}\"\n",
        entry = plan.entry_point
    );
    fs::write(project_dir.join(".replit"), run_config)?;
    files_written += 1;

    tracing::debug!(
        id = idea.id,
        files = files_written,
        dir = %project_dir.display(),
        "scaffold written"
    );

    Ok(ScaffoldOutcome {
        project_dir: project_dir.to_path_buf(),
        files_written,
        entry_point: plan.entry_point,
        next_steps: plan.next_steps,
        updated_existing,
    })
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// `idea-{id}-{slug}`: stable per idea, readable in a directory listing.
pub fn project_dir_name(idea: &Idea) -> String {
    format!("idea-{}-{}", idea.id, slugify(&idea.title))
}

/// Lowercase, strip non-alphanumerics (hyphens survive), collapse
/// whitespace to single hyphens, cap the length.
pub fn slugify(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    let slug: String = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(SLUG_MAX_LEN)
        .collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}

fn has_existing_content(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        let name = entry.file_name();
        !IGNORED_ENTRIES.contains(&name.to_string_lossy().as_ref())
    })
}

fn is_safe_relative(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    let path = Path::new(path);
    !path.is_absolute()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Deterministic scaffold: the same file skeleton for every category, with
/// family-specific UI chrome.
pub fn fallback_plan(idea: &Idea) -> ScaffoldPlan {
    let family = family_for(idea.category);
    let files = vec![
        PlannedFile {
            path: "main.py".to_string(),
            content: match family {
                Family::Tool => tool_server(idea),
                Family::Dashboard => dashboard_server(idea),
            },
        },
        PlannedFile {
            path: "index.html".to_string(),
            content: match family {
                Family::Tool => tool_page(idea),
                Family::Dashboard => dashboard_page(idea),
            },
        },
        PlannedFile {
            path: "README.md".to_string(),
            content: readme(idea),
        },
    ];
    let next_steps = vec![
        "Run python3 main.py and open http://localhost:8080".to_string(),
        "Replace the stub API handlers in main.py with real logic".to_string(),
        "Refine the interface in index.html".to_string(),
    ];
    ScaffoldPlan {
        description: format!("Minimal {} scaffold for \"{}\"", idea.category, idea.title),
        entry_point: "main.py".to_string(),
        files,
        next_steps,
    }
}

fn tool_server(idea: &Idea) -> String {
    format!(
        r#"#!/usr/bin/env python3
"""
{title}

{description}
"""

from http.server import HTTPServer, SimpleHTTPRequestHandler
import json
from pathlib import Path

PORT = 8080

class AppHandler(SimpleHTTPRequestHandler):
    def do_GET(self):
        if self.path in ('/', '/index.html'):
            self.send_response(200)
            self.send_header('Content-type', 'text/html')
            self.end_headers()
            self.wfile.write(Path('index.html').read_text().encode())
        else:
            super().do_GET()

    def do_POST(self):
        if self.path == '/api/analyze':
            length = int(self.headers['Content-Length'])
            data = json.loads(self.rfile.read(length).decode('utf-8'))
            result = {{
                "status": "success",
                "message": f"Processed: {{data.get('input', '')}}",
                "results": [
                    "Analysis result 1",
                    "Analysis result 2",
                    "Recommendation 3"
                ]
            }}
            self.send_response(200)
            self.send_header('Content-type', 'application/json')
            self.end_headers()
            self.wfile.write(json.dumps(result).encode())

if __name__ == '__main__':
    server = HTTPServer(('0.0.0.0', PORT), AppHandler)
    print(f"🚀 {title}")
    print(f"📡 Server running at http://0.0.0.0:{{PORT}}")
    server.serve_forever()
"#,
        title = idea.title,
        description = idea.description,
    )
}

fn dashboard_server(idea: &Idea) -> String {
    let labels = idea
        .key_features
        .iter()
        .map(|f| format!("\"{}\"", f.replace('"', "'")))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"#!/usr/bin/env python3
"""
{title}

{description}
"""

from http.server import HTTPServer, SimpleHTTPRequestHandler
import json
from pathlib import Path

PORT = 8080
METRIC_LABELS = [{labels}]

class AppHandler(SimpleHTTPRequestHandler):
    def do_GET(self):
        if self.path in ('/', '/index.html'):
            self.send_response(200)
            self.send_header('Content-type', 'text/html')
            self.end_headers()
            self.wfile.write(Path('index.html').read_text().encode())
        elif self.path == '/api/metrics':
            metrics = [
                {{"label": label, "value": 64 + (i * 7) % 36}}
                for i, label in enumerate(METRIC_LABELS)
            ]
            self.send_response(200)
            self.send_header('Content-type', 'application/json')
            self.end_headers()
            self.wfile.write(json.dumps({{"metrics": metrics}}).encode())
        else:
            super().do_GET()

if __name__ == '__main__':
    server = HTTPServer(('0.0.0.0', PORT), AppHandler)
    print(f"🚀 {title}")
    print(f"📡 Dashboard running at http://0.0.0.0:{{PORT}}")
    server.serve_forever()
"#,
        title = idea.title,
        description = idea.description,
        labels = labels,
    )
}

fn tool_page(idea: &Idea) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }}
    textarea {{ width: 100%; min-height: 6rem; }}
    button {{ margin-top: 0.5rem; padding: 0.5rem 1.5rem; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p>{description}</p>
  <textarea id="input" placeholder="Paste input to analyze"></textarea>
  <button onclick="analyze()">Analyze</button>
  <ul id="results"></ul>
  <script>
    async function analyze() {{
      const res = await fetch('/api/analyze', {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify({{ input: document.getElementById('input').value }})
      }});
      const data = await res.json();
      const list = document.getElementById('results');
      list.innerHTML = '';
      for (const item of data.results) {{
        const li = document.createElement('li');
        li.textContent = item;
        list.appendChild(li);
      }}
    }}
  </script>
</body>
</html>
"#,
        title = idea.title,
        description = idea.description,
    )
}

fn dashboard_page(idea: &Idea) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }}
    .cards {{ display: flex; flex-wrap: wrap; gap: 1rem; }}
    .card {{ border: 1px solid #ddd; border-radius: 6px; padding: 1rem; min-width: 180px; }}
    .card .value {{ font-size: 2rem; font-weight: bold; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p>{description}</p>
  <div class="cards" id="cards"></div>
  <script>
    async function refresh() {{
      const res = await fetch('/api/metrics');
      const data = await res.json();
      const cards = document.getElementById('cards');
      cards.innerHTML = '';
      for (const metric of data.metrics) {{
        const card = document.createElement('div');
        card.className = 'card';
        card.innerHTML = '<div class="value">' + metric.value + '</div>' + metric.label;
        cards.appendChild(card);
      }}
    }}
    refresh();
    setInterval(refresh, 5000);
  </script>
</body>
</html>
"#,
        title = idea.title,
        description = idea.description,
    )
}

fn readme(idea: &Idea) -> String {
    let features = idea
        .key_features
        .iter()
        .map(|f| format!("- {f}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "# {title}\n\n{description}\n\n**Category:** {category}\n**Target audience:** {audience}\n\n## Key Features\n\n{features}\n\n## Technical Approach\n\n{tech}\n\n## Getting Started\n\n```\npython3 main.py\n```\n\nThen open http://localhost:8080.\n",
        title = idea.title,
        description = idea.description,
        category = idea.category,
        audience = idea.target_audience,
        features = features,
        tech = idea.technical_approach,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generator::new_idea;
    use crate::types::{Category, IdeaContent};

    fn idea_with(category: Category, title: &str) -> Idea {
        new_idea(
            IdeaContent {
                title: title.to_string(),
                description: format!("{title} description"),
                category,
                target_audience: "Testers".into(),
                key_features: vec!["Fast".into(), "Safe".into(), "Simple".into()],
                monetization: "Free".into(),
                technical_approach: "Python stdlib".into(),
            },
            2,
        )
    }

    #[test]
    fn slug_is_lowercased_hyphenated_and_capped() {
        let slug = slugify(
            "Security Scanning Service that Detects Zero-day Vulnerabilities and Prevents Security",
        );
        assert_eq!(slug, "security-scanning-service-that-detects-zero-day-vu");
        assert_eq!(slug.len(), 50);
    }

    #[test]
    fn slug_strips_punctuation_and_falls_back_when_empty() {
        assert_eq!(slugify("Build & Ship, Fast!"), "build-ship-fast");
        assert_eq!(slugify("!!! ???"), "untitled");
        assert_eq!(slugify(""), "untitled");
    }

    #[test]
    fn project_dir_name_combines_id_and_slug() {
        let idea = idea_with(Category::InfrastructureDevops, "Zero Downtime Deploys");
        assert_eq!(project_dir_name(&idea), "idea-2-zero-downtime-deploys");
    }

    #[test]
    fn relative_path_validation() {
        assert!(is_safe_relative("main.py"));
        assert!(is_safe_relative("static/app.js"));
        assert!(!is_safe_relative("../outside.py"));
        assert!(!is_safe_relative("/etc/passwd"));
        assert!(!is_safe_relative("src/../../outside"));
        assert!(!is_safe_relative(""));
    }

    #[test]
    fn families_dispatch_on_category() {
        let tool = fallback_plan(&idea_with(Category::DeveloperTools, "Analyzer"));
        let tool_main = &tool.files[0];
        assert_eq!(tool_main.path, "main.py");
        assert!(tool_main.content.contains("/api/analyze"));

        let dash = fallback_plan(&idea_with(Category::FintechBusiness, "Treasury"));
        assert!(dash.files[0].content.contains("/api/metrics"));
        assert!(dash.files[1].content.contains("refresh()"));
    }

    #[test]
    fn fallback_plan_fills_idea_fields() {
        let idea = idea_with(Category::SaasProductivity, "Workflow Copilot");
        let plan = fallback_plan(&idea);
        assert_eq!(plan.entry_point, "main.py");
        let paths: Vec<&str> = plan.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["main.py", "index.html", "README.md"]);
        for file in &plan.files {
            assert!(file.content.contains("Workflow Copilot"), "{}", file.path);
        }
        let readme = &plan.files[2].content;
        assert!(readme.contains("- Fast"));
        assert!(readme.contains("Python stdlib"));
    }

    #[test]
    fn scaffold_writes_files_and_records_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut idea = idea_with(Category::DeveloperTools, "Analyzer");
        let outcome = scaffold_idea(&mut idea, None, dir.path()).unwrap();

        assert_eq!(outcome.files_written, 4);
        assert!(!outcome.updated_existing);
        assert!(outcome.project_dir.join("main.py").exists());
        assert!(outcome.project_dir.join("index.html").exists());
        assert!(outcome.project_dir.join("README.md").exists());
        let run_config = fs::read_to_string(outcome.project_dir.join(".replit")).unwrap();
        assert!(run_config.contains("main.py"));

        assert_eq!(idea.iteration, 1);
        assert_eq!(idea.history.len(), 1);
        let entry = &idea.history[0];
        assert_eq!(entry.iteration, 0);
        assert_eq!(entry.files_generated, Some(4));
        assert!(entry.error.is_none());
        assert_eq!(
            idea.project_path.as_deref(),
            Some(outcome.project_dir.to_string_lossy().as_ref())
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(outcome.project_dir.join("main.py"))
                .unwrap()
                .permissions()
                .mode();
            assert_ne!(mode & 0o111, 0, "entry point should be executable");
        }
    }

    #[test]
    fn rescaffold_updates_without_wiping_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut idea = idea_with(Category::DeveloperTools, "Analyzer");
        let first = scaffold_idea(&mut idea, None, dir.path()).unwrap();

        let stray = first.project_dir.join("notes.txt");
        fs::write(&stray, "keep me").unwrap();

        let second = scaffold_idea(&mut idea, None, dir.path()).unwrap();
        assert!(second.updated_existing);
        assert_eq!(idea.iteration, 2);
        assert_eq!(idea.history.len(), 2);
        assert_eq!(fs::read_to_string(&stray).unwrap(), "keep me");
    }

    #[test]
    fn scaffold_failure_is_recorded_and_still_advances_iteration() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();

        let mut idea = idea_with(Category::DeveloperTools, "Analyzer");
        let result = scaffold_idea(&mut idea, None, &blocker);
        assert!(result.is_err());
        assert_eq!(idea.iteration, 1);
        assert_eq!(idea.history.len(), 1);
        let entry = &idea.history[0];
        assert!(entry.error.is_some());
        assert_eq!(entry.files_generated, None);
        assert!(idea.project_path.is_none());
    }

    #[test]
    fn ignorable_directories_do_not_count_as_content() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("idea-2-analyzer");
        fs::create_dir_all(project.join("__pycache__")).unwrap();
        assert!(!has_existing_content(&project));
        fs::write(project.join("main.py"), "print()").unwrap();
        assert!(has_existing_content(&project));
    }
}
