use std::path::PathBuf;

use serde::Deserialize;

use crate::application::PromptOptions;
use crate::domain::FilenamePolicy;
use crate::transport::ClientConfig;

const ENV_PREFIX: &str = "TRACK_SAVER_";

fn default_library_directory() -> PathBuf {
    PathBuf::from("library")
}

fn default_user_agent() -> String {
    ClientConfig::default().user_agent
}

fn default_dialog_title() -> String {
    PromptOptions::default().title
}

fn default_command_queue() -> usize {
    16
}

/// Runtime settings, read from `TRACK_SAVER_*` environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct SaverConfig {
    #[serde(default)]
    pub filename_policy: FilenamePolicy,
    #[serde(default = "default_library_directory")]
    pub library_directory: PathBuf,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_dialog_title")]
    pub dialog_title: String,
    #[serde(default = "default_command_queue")]
    pub command_queue: usize,
}

impl SaverConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env::<Self>()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            title: self.dialog_title.clone(),
            ..PromptOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(vars: &[(&str, &str)]) -> Result<SaverConfig, envy::Error> {
        envy::from_iter(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.filename_policy, FilenamePolicy::LinkBasename);
        assert_eq!(config.library_directory, PathBuf::from("library"));
        assert_eq!(config.dialog_title, "Select Folder to Save Track");
        assert_eq!(config.command_queue, 16);
        assert!(config.user_agent.starts_with("local-track-saver/"));
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            ("FILENAME_POLICY", "derived-name"),
            ("LIBRARY_DIRECTORY", "/var/lib/tracks"),
            ("COMMAND_QUEUE", "2"),
        ])
        .unwrap();
        assert_eq!(config.filename_policy, FilenamePolicy::DerivedName);
        assert_eq!(config.library_directory, PathBuf::from("/var/lib/tracks"));
        assert_eq!(config.command_queue, 2);
        assert_eq!(config.prompt_options().title, "Select Folder to Save Track");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(parse(&[("FILENAME_POLICY", "both")]).is_err());
    }
}
