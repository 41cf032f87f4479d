use async_trait::async_trait;

use crate::fetch::client::HttpClient;

/// An [`HttpClient`] wrapper that appends an API key as a URL query
/// parameter on every request.
///
/// The NeoWs endpoints take their credential this way: `param_name` is
/// `"api_key"` and `key` is the value issued at api.nasa.gov (or the shared
/// rate-limited `DEMO_KEY`).
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    /// Convenience constructor for the NeoWs `api_key` parameter.
    pub fn api_key(inner: C, key: String) -> Self {
        Self {
            inner,
            param_name: "api_key".to_string(),
            key,
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, &self.key);
        self.inner.execute(req).await
    }
}
