use crate::components::{CompletionOption, ListingMapping, Method, ParameterSet, RequestDescriptor};
use crate::error::{ConnectorError, Result};
use crate::resources::http::HttpTransport;
use serde_json::{Map, Value};
use std::sync::Arc;
use url::Url;

/// Header name and value sent with listing calls by connectors that authenticate.
pub type AuthHeader = (String, String);

/// Fetches the valid values of a configuration field from a remote listing.
#[derive(Clone)]
pub struct CompletionProvider {
    transport: Arc<dyn HttpTransport>,
}

impl CompletionProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// GETs `listing_url` and maps every listed object through `mapping`.
    ///
    /// Any status other than 200 yields an empty list, the same as a listing
    /// with no entries. A 200 whose body is not a JSON array of objects is an
    /// error.
    #[tracing::instrument(skip(self, listing_url, auth_header), fields(url = %listing_url))]
    pub fn fetch_options(
        &self,
        listing_url: Url,
        auth_header: Option<AuthHeader>,
        mapping: ListingMapping,
    ) -> Result<Vec<CompletionOption>> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        headers.extend(auth_header);

        let request = RequestDescriptor {
            method: Method::Get,
            url: listing_url,
            body: String::new(),
            headers,
            parameters: ParameterSet::default(),
        };

        let response = self.transport.send(&request)?;
        if response.status_code != 200 {
            tracing::warn!(status = response.status_code, "Listing unavailable, no options offered");
            return Ok(Vec::new());
        }

        let items: Vec<Map<String, Value>> =
            serde_json::from_str(&response.body).map_err(|source| ConnectorError::ListingParse {
                url: request.url.to_string(),
                source,
            })?;

        tracing::debug!(count = items.len(), "Listing fetched");
        Ok(items.iter().map(|item| mapping.map(item)).collect())
    }
}
