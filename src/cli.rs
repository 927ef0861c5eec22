use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::engine::remote::{RemoteClient, RemoteConfig};
use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};
use crate::storage::Storage;

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate one new idea and append it to the state document
    Generate(CommandArguments),
    /// Iterate the content of every existing idea
    Iterate(CommandArguments),
    /// Generate or update the project scaffold of every existing idea
    Scaffold(CommandArguments),
    /// Summarize the current state document
    Status(CommandArguments),
}

impl Command {
    pub fn arguments(&self) -> &CommandArguments {
        match self {
            Command::Generate(args)
            | Command::Iterate(args)
            | Command::Scaffold(args)
            | Command::Status(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CommandArguments {
    /// Path of the state document (defaults to ~/.idea-forge/ideas.json)
    #[arg(long, env = "IDEA_FORGE_STATE")]
    pub state_file: Option<PathBuf>,

    /// Directory that receives generated project scaffolds
    #[arg(long, env = "IDEA_FORGE_PROJECTS_DIR", default_value = "projects")]
    pub projects_dir: PathBuf,

    /// API key for the remote content source; deterministic fallback when unset
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model requested from the remote content source
    #[arg(long, env = "IDEA_FORGE_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Base URL of the remote content source
    #[arg(long, env = "IDEA_FORGE_API_URL", default_value = "https://api.openai.com/v1")]
    pub api_url: String,

    /// Per-request timeout for the remote content source, in seconds
    #[arg(long, env = "IDEA_FORGE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl CommandArguments {
    /// Validate CLI/environment-derived arguments.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(format!(
                "Invalid IDEA_FORGE_API_URL '{}': must start with http:// or https://",
                self.api_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err("IDEA_FORGE_TIMEOUT_SECS must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn state_path(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(Storage::default_path)
    }

    /// A remote client when an API key is configured, otherwise None and
    /// the deterministic path runs unconditionally.
    pub fn remote_client(&self) -> Option<RemoteClient> {
        self.api_key.as_ref().map(|key| {
            RemoteClient::new(RemoteConfig {
                api_key: key.clone(),
                model: self.model.clone(),
                base_url: self.api_url.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arguments() -> CommandArguments {
        CommandArguments {
            state_file: None,
            projects_dir: PathBuf::from("projects"),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            api_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn default_arguments_validate() {
        assert!(arguments().validate().is_ok());
    }

    #[test]
    fn bad_api_url_is_rejected() {
        let mut args = arguments();
        args.api_url = "ftp://example.com".to_string();
        assert!(args.validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut args = arguments();
        args.timeout_secs = 0;
        assert!(args.validate().is_err());
    }

    #[test]
    fn no_api_key_means_no_remote_client() {
        assert!(arguments().remote_client().is_none());
        let mut args = arguments();
        args.api_key = Some("sk-test".to_string());
        assert!(args.remote_client().is_some());
    }
}
