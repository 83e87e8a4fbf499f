pub mod committer;
pub mod resolver;

pub use committer::{DownloadCommitter, ProgressSender};
pub use resolver::{DestinationResolver, PromptOptions, RfdDirectoryPrompt};
