pub mod client;
pub mod models;

pub use client::{FetchError, HttpFetcher, TrackFetcher};
pub use models::ClientConfig;
