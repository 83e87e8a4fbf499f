use tokio::sync::{mpsc, oneshot};

use super::commands::{Command, CommandError, Reply};
use crate::application::ProgressSender;

pub type CommandResult = Result<Reply, CommandError>;

/// One request in flight across the process boundary.
pub struct Envelope {
    pub command: Command,
    pub progress: Option<ProgressSender>,
    pub reply: oneshot::Sender<CommandResult>,
}

/// UI-side handle for sending commands to the privileged host.
#[derive(Clone)]
pub struct CommandChannel {
    tx: mpsc::Sender<Envelope>,
}

pub fn command_channel(capacity: usize) -> (CommandChannel, mpsc::Receiver<Envelope>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (CommandChannel { tx }, rx)
}

impl CommandChannel {
    pub async fn invoke(
        &self,
        command: Command,
        progress: Option<ProgressSender>,
    ) -> CommandResult {
        let (reply, response) = oneshot::channel();
        let envelope = Envelope {
            command,
            progress,
            reply,
        };

        self.tx
            .send(envelope)
            .await
            .map_err(|_| CommandError::ChannelClosed)?;

        response.await.map_err(|_| CommandError::ChannelClosed)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_invoke_round_trip() {
        let (channel, mut rx) = command_channel(4);

        tokio::spawn(async move {
            let envelope = rx.recv().await.unwrap();
            assert_eq!(envelope.command.name(), "delete-audio-file");
            let _ = envelope.reply.send(Ok(Reply::Saved(PathBuf::from("/x"))));
        });

        let reply = channel
            .invoke(
                Command::DeleteAudioFile {
                    file_name: "a.mp3".to_string(),
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(reply, Reply::Saved(PathBuf::from("/x")));
    }

    #[tokio::test]
    async fn test_closed_host_is_reported() {
        let (channel, rx) = command_channel(1);
        drop(rx);

        let err = channel
            .invoke(
                Command::DeleteAudioFile {
                    file_name: "a.mp3".to_string(),
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::ChannelClosed));
    }

    #[tokio::test]
    async fn test_dropped_reply_is_reported() {
        let (channel, mut rx) = command_channel(1);

        tokio::spawn(async move {
            let envelope = rx.recv().await.unwrap();
            drop(envelope.reply);
        });

        let err = channel
            .invoke(
                Command::DeleteAudioFile {
                    file_name: "a.mp3".to_string(),
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::ChannelClosed));
    }
}
