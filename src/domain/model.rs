use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Track metadata as handed over by the UI. Only `audio.link` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<ArtistRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TrackDescriptor {
    pub fn audio_link(&self) -> Option<&str> {
        non_empty(self.audio.as_ref()?.link.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// `artistName` wins over the nested `artist.name`.
    pub fn artist(&self) -> Option<&str> {
        non_empty(self.artist_name.as_deref())
            .or_else(|| non_empty(self.artist.as_ref()?.name.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Where the committer should write. The tag decides whether a file name
/// still has to be derived from the audio link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Destination {
    /// Bare folder; the committer appends the link's basename.
    Directory(PathBuf),
    /// Folder plus a precomputed file name; written as-is.
    FullPath(PathBuf),
}

impl Destination {
    pub fn path(&self) -> &PathBuf {
        match self {
            Destination::Directory(path) | Destination::FullPath(path) => path,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path().as_os_str().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub track: Option<TrackDescriptor>,
    pub destination: Option<Destination>,
}

impl SaveRequest {
    pub fn new(track: TrackDescriptor, destination: Destination) -> Self {
        Self {
            track: Some(track),
            destination: Some(destination),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// The user dismissed the folder prompt. Not an error.
    Cancelled,
}

/// Result of the best-effort delete that follows a failed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    NothingToRemove,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilenamePolicy {
    /// Send `<artist> - <title>.mp3` as a full path.
    DerivedName,
    /// Send the folder and let the committer use the link's basename.
    #[default]
    LinkBasename,
}
