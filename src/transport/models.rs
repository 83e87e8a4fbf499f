/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("local-track-saver/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
