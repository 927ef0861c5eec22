//! Command implementations: each loads the state document, runs one batch
//! operation over it, and persists the result. Output mirrors the tool's
//! console style: a banner, per-item progress lines, and a closing summary.

use colored::Colorize;

use crate::cli::CommandArguments;
use crate::engine::generator::generate_idea;
use crate::engine::iterate::iterate_idea;
use crate::engine::registry::Registry;
use crate::engine::scaffold::scaffold_idea;
use crate::storage::Storage;
use crate::types::Idea;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn banner(title: &str) {
    println!("{}", "=".repeat(60).dimmed());
    println!("IDEA FORGE - {title}");
    println!("{}", "=".repeat(60).dimmed());
}

fn footer() {
    println!("{}", "=".repeat(60).dimmed());
}

pub fn run_generate(args: &CommandArguments) -> CommandResult {
    banner("Generate New Idea");

    let mut storage = Storage::at(args.state_path());
    storage.initialize()?;
    println!("\nCurrent state: {} existing ideas", storage.ideas().len());

    let registry = Registry::builtin();
    let remote = args.remote_client();
    if remote.is_some() {
        println!("Using remote content source to generate idea...");
    } else {
        println!("No API key configured, using deterministic generator...");
    }

    let run_index = storage.metadata().total_runs;
    let idea = generate_idea(&registry, remote.as_ref(), storage.ideas().len(), run_index);

    println!(
        "\n{}",
        format!("✓ Successfully generated idea #{}", idea.id).green()
    );
    print_idea(&idea);

    storage.push_idea(idea);
    storage.record_generate_run();
    storage.save()?;

    println!("\nState saved to: {}", storage.path().display());
    footer();
    Ok(())
}

pub fn run_iterate(args: &CommandArguments) -> CommandResult {
    banner("Iterate All Ideas");

    let mut storage = Storage::open_required(args.state_path())?;
    if storage.ideas().is_empty() {
        println!("\nNo ideas to iterate. Run `idea-forge generate` first.");
        return Ok(());
    }

    let total = storage.ideas().len();
    println!("\nFound {total} ideas to iterate");

    let registry = Registry::builtin();
    let remote = args.remote_client();
    if remote.is_some() {
        println!("Using remote content source for iterations...");
    } else {
        println!("No API key configured, using deterministic generator...");
    }
    println!();

    for (idx, idea) in storage.ideas_mut().iter_mut().enumerate() {
        println!("[{}/{}] Iterating: {}", idx + 1, total, idea.title.bold());
        println!("  Current iteration: {}", idea.iteration);
        match iterate_idea(&registry, remote.as_ref(), idea) {
            Ok(delta) => {
                println!("  → {}", delta.iteration_type);
                println!("  → {}", delta.changes_summary);
            }
            Err(err) => {
                println!("  {} iteration failed: {err}", "!".red());
            }
        }
        println!();
    }

    storage.record_iterate_run(total);
    storage.save()?;

    footer();
    println!(
        "{}",
        format!("✓ Successfully iterated {total} ideas").green()
    );
    println!("State saved to: {}", storage.path().display());
    footer();
    Ok(())
}

pub fn run_scaffold(args: &CommandArguments) -> CommandResult {
    banner("Scaffold All Ideas");

    let mut storage = Storage::open_required(args.state_path())?;
    if storage.ideas().is_empty() {
        println!("\nNo ideas to scaffold. Run `idea-forge generate` first.");
        return Ok(());
    }

    let total = storage.ideas().len();
    println!("\nFound {total} ideas to scaffold");

    let remote = args.remote_client();
    println!();

    let mut succeeded = 0;
    for (idx, idea) in storage.ideas_mut().iter_mut().enumerate() {
        println!("[{}/{}] Scaffolding: {}", idx + 1, total, idea.title.bold());
        match scaffold_idea(idea, remote.as_ref(), &args.projects_dir) {
            Ok(outcome) => {
                let verb = if outcome.updated_existing {
                    "Updated"
                } else {
                    "Created"
                };
                println!(
                    "  {} {verb} {} ({} files)",
                    "✓".green(),
                    outcome.project_dir.display(),
                    outcome.files_written
                );
                for step in &outcome.next_steps {
                    println!("    next: {step}");
                }
                succeeded += 1;
            }
            Err(err) => {
                println!("  {} scaffold failed: {err}", "!".red());
            }
        }
        println!();
    }

    storage.record_scaffold_run();
    storage.save()?;

    footer();
    println!(
        "{}",
        format!("✓ Scaffolded {succeeded}/{total} ideas").green()
    );
    println!("State saved to: {}", storage.path().display());
    footer();
    Ok(())
}

pub fn run_status(args: &CommandArguments) -> CommandResult {
    banner("Status");

    let storage = Storage::open_required(args.state_path())?;
    let metadata = storage.metadata();

    println!("\nState document: {}", storage.path().display());
    println!("Created: {}", metadata.created);
    println!("Generation runs: {}", metadata.total_runs);
    println!(
        "Total iterations: {}",
        metadata.total_iterations.unwrap_or(0)
    );
    if let Some(last) = &metadata.last_generate {
        println!("Last generate: {last}");
    }
    if let Some(last) = &metadata.last_iterate {
        println!("Last iterate: {last}");
    }
    if let Some(last) = &metadata.last_scaffold {
        println!("Last scaffold: {last}");
    }

    println!("\nIdeas: {}", storage.ideas().len());
    for idea in storage.ideas() {
        println!(
            "  #{} {} [{}] - iteration {}{}",
            idea.id,
            idea.title.bold(),
            idea.category,
            idea.iteration,
            if idea.project_path.is_some() {
                " (scaffolded)"
            } else {
                ""
            }
        );
    }
    footer();
    Ok(())
}

fn print_idea(idea: &Idea) {
    println!("\nTitle: {}", idea.title.bold());
    println!("Category: {}", idea.category);
    println!("Description: {}", idea.description);
    println!("\nTarget Audience: {}", idea.target_audience);
    println!("Monetization: {}", idea.monetization);
    println!("\nKey Features:");
    for feature in &idea.key_features {
        println!("  - {feature}");
    }
    println!("\nTechnical Approach: {}", idea.technical_approach);
}
