use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use thiserror::Error;

use super::models::ClientConfig;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server responded with {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Download stream interrupted: {0}")]
    Stream(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// An open response body: declared length plus the chunk stream.
pub struct FetchedBody {
    pub total_size: Option<u64>,
    pub stream: BoxStream<'static, Result<bytes::Bytes>>,
}

#[async_trait]
pub trait TrackFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedBody>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TrackFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedBody> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let total_size = response.content_length();
        let stream = response
            .bytes_stream()
            .map_err(FetchError::Request)
            .boxed();

        Ok(FetchedBody { total_size, stream })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_streams_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/track123.mp3")
            .with_status(200)
            .with_body(vec![7u8; 64])
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(&ClientConfig::default()).unwrap();
        let body = fetcher
            .fetch(&format!("{}/track123.mp3", server.url()))
            .await
            .unwrap();

        assert_eq!(body.total_size, Some(64));
        let chunks: Vec<bytes::Bytes> = body.stream.try_collect().await.unwrap();
        assert_eq!(chunks.concat(), vec![7u8; 64]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.mp3")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(&ClientConfig::default()).unwrap();
        let err = fetcher
            .fetch(&format!("{}/missing.mp3", server.url()))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }
}
