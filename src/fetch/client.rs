use async_trait::async_trait;
use reqwest::{Request, Response};

/// Injectable transport seam so the API client can be driven by a stub in
/// tests without touching the network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
