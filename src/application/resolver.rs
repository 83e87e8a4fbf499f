use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::committer::ProgressSender;
use crate::{
    domain::{Destination, FilenamePolicy, InvalidInput, SaveError, SaveOutcome, TrackDescriptor},
    ipc::{Command, CommandChannel, CommandError, Reply},
    utils::derived_file_name,
};

#[derive(Debug, Clone)]
pub struct PromptOptions {
    pub title: String,
    pub can_create_directories: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            title: "Select Folder to Save Track".to_string(),
            can_create_directories: true,
        }
    }
}

/// What came back from the folder prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptSelection {
    pub cancelled: bool,
    pub path: Option<PathBuf>,
}

impl PromptSelection {
    pub fn picked(path: impl Into<PathBuf>) -> Self {
        Self {
            cancelled: false,
            path: Some(path.into()),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            path: None,
        }
    }

    fn usable_path(self) -> Option<PathBuf> {
        if self.cancelled {
            return None;
        }
        self.path.filter(|p| !p.as_os_str().is_empty())
    }
}

#[async_trait]
pub trait DirectoryPrompt: Send + Sync {
    async fn pick_directory(&self, options: &PromptOptions) -> Result<PromptSelection, SaveError>;
}

/// Native folder picker.
pub struct RfdDirectoryPrompt;

#[async_trait]
impl DirectoryPrompt for RfdDirectoryPrompt {
    async fn pick_directory(&self, options: &PromptOptions) -> Result<PromptSelection, SaveError> {
        let picked = rfd::AsyncFileDialog::new()
            .set_title(&options.title)
            .set_can_create_directories(options.can_create_directories)
            .pick_folder()
            .await;

        Ok(match picked {
            Some(handle) => PromptSelection::picked(handle.path()),
            None => PromptSelection::cancelled(),
        })
    }
}

/// UI side of a save: asks for a folder, picks the file name policy and
/// forwards the request to the privileged host.
#[derive(Clone)]
pub struct DestinationResolver {
    prompt: Arc<dyn DirectoryPrompt>,
    channel: CommandChannel,
    policy: FilenamePolicy,
    options: PromptOptions,
}

impl DestinationResolver {
    pub fn new(
        prompt: Arc<dyn DirectoryPrompt>,
        channel: CommandChannel,
        policy: FilenamePolicy,
        options: PromptOptions,
    ) -> Self {
        Self {
            prompt,
            channel,
            policy,
            options,
        }
    }

    pub async fn save_track(
        &self,
        track: TrackDescriptor,
        progress: Option<ProgressSender>,
    ) -> Result<SaveOutcome, SaveError> {
        if track.audio_link().is_none() {
            return Err(InvalidInput::MissingAudioLink.into());
        }

        let selection = self.prompt.pick_directory(&self.options).await?;
        let Some(directory) = selection.usable_path() else {
            info!("save track to local folder cancelled by user");
            return Ok(SaveOutcome::Cancelled);
        };

        let destination = match self.policy {
            FilenamePolicy::LinkBasename => Destination::Directory(directory),
            FilenamePolicy::DerivedName => {
                if track.title().is_none() {
                    warn!("track title is missing");
                }
                if track.artist().is_none() {
                    warn!("artist name is missing");
                }
                Destination::FullPath(directory.join(derived_file_name(&track)))
            }
        };

        let command = Command::SaveTrackToLocalFolder {
            track_data: Some(track),
            destination_path: Some(destination),
        };

        match self.channel.invoke(command, progress).await {
            Ok(Reply::Saved(path)) => Ok(SaveOutcome::Saved(path)),
            Ok(other) => Err(SaveError::Channel(format!("unexpected reply: {other:?}"))),
            Err(CommandError::Save(e)) => Err(e),
            Err(e) => Err(SaveError::Channel(e.to_string())),
        }
    }
}
