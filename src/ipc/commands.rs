use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Destination, SaveError, TrackDescriptor};

/// Requests the UI process can send to the privileged process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "kebab-case")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    SaveTrackToLocalFolder {
        #[serde(default)]
        track_data: Option<TrackDescriptor>,
        #[serde(default)]
        destination_path: Option<Destination>,
    },
    /// `track_data` arrives as a JSON string.
    #[serde(rename_all = "camelCase")]
    SaveAudioFile { track_data: String },
    #[serde(rename_all = "camelCase")]
    DeleteAudioFile { file_name: String },
    #[serde(rename_all = "camelCase")]
    ReadAudioFileMetadata { file_path: PathBuf },
    #[serde(rename_all = "camelCase")]
    ReadAudioFileCover { image_data: String },
    #[serde(rename_all = "camelCase")]
    DecryptFile {
        file_path: PathBuf,
        key: String,
        iv: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SaveTrackToLocalFolder { .. } => "save-track-to-local-folder",
            Command::SaveAudioFile { .. } => "save-audio-file",
            Command::DeleteAudioFile { .. } => "delete-audio-file",
            Command::ReadAudioFileMetadata { .. } => "read-audio-file-metadata",
            Command::ReadAudioFileCover { .. } => "read-audio-file-cover",
            Command::DecryptFile { .. } => "decrypt-file",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Saved(PathBuf),
    Deleted,
    Metadata(serde_json::Value),
    Cover(String),
    Decrypted(Vec<u8>),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("Invalid arguments for {command}: {reason}")]
    InvalidArguments {
        command: &'static str,
        reason: String,
    },

    #[error("{0} is not supported by this library")]
    Unsupported(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command channel closed")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_save_track_command() {
        let command: Command = serde_json::from_value(json!({
            "command": "save-track-to-local-folder",
            "args": {
                "trackData": { "audio": { "link": "https://cdn.example/track123.mp3" } },
                "destinationPath": { "kind": "directory", "value": "/home/user/Music" }
            }
        }))
        .unwrap();

        match &command {
            Command::SaveTrackToLocalFolder {
                track_data,
                destination_path,
            } => {
                assert_eq!(
                    track_data.as_ref().and_then(|t| t.audio_link()),
                    Some("https://cdn.example/track123.mp3")
                );
                assert_eq!(
                    destination_path,
                    &Some(Destination::Directory("/home/user/Music".into()))
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(command.name(), "save-track-to-local-folder");
    }

    #[test]
    fn test_missing_args_still_parse() {
        let command: Command = serde_json::from_value(json!({
            "command": "save-track-to-local-folder",
            "args": {}
        }))
        .unwrap();

        assert_eq!(
            command,
            Command::SaveTrackToLocalFolder {
                track_data: None,
                destination_path: None,
            }
        );
    }

    #[test]
    fn test_wire_name_matches_serde_tag() {
        let command = Command::DeleteAudioFile {
            file_name: "a.mp3".to_string(),
        };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["command"], command.name());
        assert_eq!(value["args"]["fileName"], "a.mp3");
    }
}
