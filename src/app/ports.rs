use crate::error::Result;
use async_trait::async_trait;

/// Fetch seam between the crawler and the network
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// GET `url`. Non-success statuses come back as errors.
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub bytes: Vec<u8>,
}

impl HttpGetResult {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
