use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam between the feed client and the actual transport, so auth wrappers
/// can be layered on and tests can substitute a fake.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
