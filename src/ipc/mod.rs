pub mod channel;
pub mod commands;
pub mod host;

pub use channel::{command_channel, CommandChannel};
pub use commands::{Command, CommandError, Reply};
pub use host::{CommandHost, LocalLibrary};
