pub mod error;
pub mod model;

pub use error::{DownloadError, InvalidInput, SaveError};
pub use model::{
    AudioSource, CleanupOutcome, Destination, FilenamePolicy, SaveOutcome, SaveRequest,
    TrackDescriptor,
};
