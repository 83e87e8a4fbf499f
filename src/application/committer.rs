use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::channel::mpsc::UnboundedSender;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use crate::{
    domain::{CleanupOutcome, Destination, DownloadError, InvalidInput, SaveError, SaveRequest},
    transport::{client::FetchedBody, TrackFetcher},
    utils::link_basename,
};

/// Percentage side-channel. Sends are fire-and-forget.
pub type ProgressSender = UnboundedSender<u8>;

/// Privileged side of a save: downloads into the requested destination and
/// removes whatever was written when the download fails.
#[derive(Clone)]
pub struct DownloadCommitter {
    fetcher: Arc<dyn TrackFetcher>,
}

impl DownloadCommitter {
    pub fn new(fetcher: Arc<dyn TrackFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn commit(
        &self,
        request: SaveRequest,
        progress: Option<&ProgressSender>,
    ) -> Result<PathBuf, SaveError> {
        let link = request
            .track
            .as_ref()
            .and_then(|track| track.audio_link())
            .ok_or(InvalidInput::MissingAudioLink)?
            .to_string();

        let destination = request
            .destination
            .filter(|destination| !destination.is_empty())
            .ok_or(InvalidInput::MissingDestination)?;

        let full_path = match destination {
            Destination::Directory(dir) => {
                let filename = link_basename(&link)
                    .ok_or_else(|| InvalidInput::UnusableLink(link.clone()))?;
                dir.join(filename)
            }
            Destination::FullPath(path) => path,
        };

        // Nothing at `full_path` belongs to this save until the create succeeds.
        let untouched = |source: DownloadError| {
            error!(%link, path = %full_path.display(), error = %source, "download failed");
            SaveError::Download {
                source,
                cleanup: CleanupOutcome::NothingToRemove,
            }
        };

        let body = self
            .fetcher
            .fetch(&link)
            .await
            .map_err(|e| untouched(e.into()))?;

        let file = tokio::fs::File::create(&full_path)
            .await
            .map_err(|source| {
                untouched(DownloadError::Write {
                    path: full_path.clone(),
                    source,
                })
            })?;

        match write_body(file, body, &full_path, progress).await {
            Ok(()) => {
                let saved = std::path::absolute(&full_path).unwrap_or(full_path);
                info!(path = %saved.display(), "track saved");
                Ok(saved)
            }
            Err(source) => {
                error!(%link, path = %full_path.display(), error = %source, "download failed");
                let cleanup = remove_partial(&full_path).await;
                Err(SaveError::Download { source, cleanup })
            }
        }
    }
}

async fn write_body(
    mut file: tokio::fs::File,
    body: FetchedBody,
    path: &Path,
    progress: Option<&ProgressSender>,
) -> Result<(), DownloadError> {
    let write_error = |source| DownloadError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut stream = body.stream;
    let mut reporter = ProgressReporter::new(progress, body.total_size);
    reporter.report(0);

    let mut downloaded: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.map_err(write_error)?;

        downloaded += chunk.len() as u64;
        reporter.advance(downloaded);
    }

    file.sync_all().await.map_err(write_error)?;
    reporter.report(100);

    Ok(())
}

/// Single delete attempt; a missing file is not a failure.
async fn remove_partial(path: &Path) -> CleanupOutcome {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            info!(path = %path.display(), "removed partial download");
            CleanupOutcome::Removed
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CleanupOutcome::NothingToRemove,
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to clean up partial download");
            CleanupOutcome::Failed(e.to_string())
        }
    }
}

struct ProgressReporter<'a> {
    sender: Option<&'a ProgressSender>,
    total: Option<u64>,
    last: Option<u8>,
}

impl<'a> ProgressReporter<'a> {
    fn new(sender: Option<&'a ProgressSender>, total: Option<u64>) -> Self {
        Self {
            sender,
            total,
            last: None,
        }
    }

    fn advance(&mut self, downloaded: u64) {
        let Some(total) = self.total.filter(|t| *t > 0) else {
            return;
        };
        let percent = (downloaded.saturating_mul(100) / total).min(100) as u8;
        self.report(percent);
    }

    fn report(&mut self, percent: u8) {
        if self.last.is_some_and(|last| percent <= last) {
            return;
        }
        self.last = Some(percent);
        if let Some(sender) = self.sender {
            let _ = sender.unbounded_send(percent);
        }
    }
}
