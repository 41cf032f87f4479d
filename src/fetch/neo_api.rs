use tracing::debug;

use crate::error::FetchError;
use crate::fetch::client::HttpClient;
use crate::model::{DateRange, Feed};
use crate::parser::decode_feed_response;

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";

/// Client for the NeoWs feed endpoint.
///
/// Issues exactly one GET per [`fetch`](NeoClient::fetch) call; retries,
/// caching, and pagination are all the caller's problem (and none of them
/// exist here). The API key is not handled by this type: wrap the transport
/// in [`crate::fetch::auth::UrlParam`] so the credential stays a
/// configuration concern.
pub struct NeoClient<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> NeoClient<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches every near-earth object approaching within `range`.
    ///
    /// Validates the range before touching the network, so an incomplete
    /// range never costs a request. The returned future resolves exactly
    /// once; dropping it cancels the in-flight request, which is how a
    /// consumer discards a stale fetch when it starts a new one.
    #[tracing::instrument(skip(self), fields(start = %range.start, end = %range.end))]
    pub async fn fetch(&self, range: &DateRange) -> Result<Feed, FetchError> {
        range.validate()?;

        let mut url = reqwest::Url::parse(&format!("{}/neo/rest/v1/feed", self.base_url))
            .map_err(|e| FetchError::Transport(format!("invalid feed URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("start_date", range.start.trim())
            .append_pair("end_date", range.end.trim())
            .append_pair("detailed", "true");

        let req = reqwest::Request::new(reqwest::Method::GET, url);
        let resp = self.client.execute(req).await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(status = %status, bytes = body.len(), "Feed response received");

        decode_feed_response(status, &body)
    }
}
