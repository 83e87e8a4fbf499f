use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::channel::{CommandResult, Envelope};
use super::commands::{Command, CommandError, Reply};
use crate::{
    application::{DownloadCommitter, ProgressSender},
    domain::{Destination, SaveRequest, TrackDescriptor},
};

/// Library-level audio file operations reachable through the command surface.
#[async_trait]
pub trait AudioFileActions: Send + Sync {
    async fn save(
        &self,
        track: TrackDescriptor,
        progress: Option<&ProgressSender>,
    ) -> Result<PathBuf, CommandError>;

    async fn delete(&self, file_name: &str) -> Result<(), CommandError>;

    async fn read_metadata(&self, _file_path: &Path) -> Result<serde_json::Value, CommandError> {
        Err(CommandError::Unsupported("read-audio-file-metadata"))
    }

    async fn read_cover(&self, _image_data: &str) -> Result<String, CommandError> {
        Err(CommandError::Unsupported("read-audio-file-cover"))
    }

    async fn decrypt(
        &self,
        _file_path: &Path,
        _key: &str,
        _iv: &str,
    ) -> Result<Vec<u8>, CommandError> {
        Err(CommandError::Unsupported("decrypt-file"))
    }
}

/// Audio files kept in a single application-owned directory.
pub struct LocalLibrary {
    directory: PathBuf,
    committer: DownloadCommitter,
}

impl LocalLibrary {
    pub fn new(directory: PathBuf, committer: DownloadCommitter) -> Self {
        Self {
            directory,
            committer,
        }
    }
}

#[async_trait]
impl AudioFileActions for LocalLibrary {
    async fn save(
        &self,
        track: TrackDescriptor,
        progress: Option<&ProgressSender>,
    ) -> Result<PathBuf, CommandError> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let request = SaveRequest::new(track, Destination::Directory(self.directory.clone()));
        Ok(self.committer.commit(request, progress).await?)
    }

    async fn delete(&self, file_name: &str) -> Result<(), CommandError> {
        let invalid = file_name.is_empty()
            || file_name == "."
            || file_name == ".."
            || file_name.contains(['/', '\\']);
        if invalid {
            return Err(CommandError::InvalidArguments {
                command: "delete-audio-file",
                reason: format!("not a library file name: {file_name:?}"),
            });
        }

        tokio::fs::remove_file(self.directory.join(file_name)).await?;
        info!(%file_name, "deleted library file");
        Ok(())
    }
}

/// Privileged side of the command surface.
#[derive(Clone)]
pub struct CommandHost {
    committer: DownloadCommitter,
    library: Arc<dyn AudioFileActions>,
}

impl CommandHost {
    pub fn new(committer: DownloadCommitter, library: Arc<dyn AudioFileActions>) -> Self {
        Self { committer, library }
    }

    /// Handles envelopes until every `CommandChannel` is dropped. Each
    /// request runs on its own task.
    pub async fn serve(self, mut rx: mpsc::Receiver<Envelope>) {
        while let Some(envelope) = rx.recv().await {
            let host = self.clone();
            tokio::spawn(async move {
                let Envelope {
                    command,
                    progress,
                    reply,
                } = envelope;
                let name = command.name();
                let result = host.dispatch(command, progress.as_ref()).await;
                if let Err(e) = &result {
                    let cleanup = match e {
                        CommandError::Save(save) => save.cleanup(),
                        _ => None,
                    };
                    warn!(command = name, error = %e, ?cleanup, "command failed");
                }
                if reply.send(result).is_err() {
                    debug!(command = name, "caller went away before the reply");
                }
            });
        }
        info!("command host stopped");
    }

    pub async fn dispatch(
        &self,
        command: Command,
        progress: Option<&ProgressSender>,
    ) -> CommandResult {
        debug!(command = command.name(), "dispatching");
        match command {
            Command::SaveTrackToLocalFolder {
                track_data,
                destination_path,
            } => {
                let request = SaveRequest {
                    track: track_data,
                    destination: destination_path,
                };
                let path = self.committer.commit(request, progress).await?;
                Ok(Reply::Saved(path))
            }
            Command::SaveAudioFile { track_data } => {
                let track: TrackDescriptor = serde_json::from_str(&track_data).map_err(|e| {
                    CommandError::InvalidArguments {
                        command: "save-audio-file",
                        reason: e.to_string(),
                    }
                })?;
                let path = self.library.save(track, progress).await?;
                Ok(Reply::Saved(path))
            }
            Command::DeleteAudioFile { file_name } => {
                self.library.delete(&file_name).await?;
                Ok(Reply::Deleted)
            }
            Command::ReadAudioFileMetadata { file_path } => self
                .library
                .read_metadata(&file_path)
                .await
                .map(Reply::Metadata),
            Command::ReadAudioFileCover { image_data } => self
                .library
                .read_cover(&image_data)
                .await
                .map(Reply::Cover),
            Command::DecryptFile { file_path, key, iv } => self
                .library
                .decrypt(&file_path, &key, &iv)
                .await
                .map(Reply::Decrypted),
        }
    }
}
