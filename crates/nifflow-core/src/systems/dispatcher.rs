use crate::components::{
    ConnectorDescriptor, Method, RequestDescriptor, ResolvedConfiguration, ResponseDescriptor,
};
use crate::error::{ConnectorError, Result};
use crate::resources::http::HttpTransport;
use crate::systems::{pipeline, projector};
use std::sync::Arc;
use url::Url;

/// Option holding the service root; must end with `/`.
pub const BASE_URL_KEY: &str = "base_url";
/// Option holding the raw request body.
pub const BODY_KEY: &str = "body";

/// Joins `base` with the relative `path` and, if given, one extra segment.
///
/// The segment is percent-encoded, so a filter name cannot escape its path.
pub fn target_url(base: &str, path: &str, segment: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(base)?.join(path)?;
    if let Some(segment) = segment {
        url.path_segments_mut()
            .map_err(|_| ConnectorError::InvalidUrl(format!("{} cannot be a base", base)))?
            .pop_if_empty()
            .push(segment);
    }
    Ok(url)
}

/// Builds the processing request for one record.
///
/// Fails only when the target URL cannot be built; nothing is sent then.
pub fn build_request(
    descriptor: &ConnectorDescriptor,
    resolved: &ResolvedConfiguration,
) -> Result<RequestDescriptor> {
    let (content_type, segment) = match &descriptor.pipeline {
        Some(routing) => {
            let route = pipeline::route(routing, resolved, &descriptor.content_type_key);
            (route.content_type, route.segment)
        }
        None => (
            resolved.value(&descriptor.content_type_key).to_string(),
            descriptor
                .path_segment
                .as_deref()
                .and_then(|key| resolved.present(key))
                .map(str::to_string),
        ),
    };

    let url = target_url(
        resolved.value(BASE_URL_KEY),
        &descriptor.path,
        segment.as_deref(),
    )?;

    let mut headers = vec![("Content-Type".to_string(), content_type)];
    if let Some(auth) = &descriptor.auth {
        headers.push((auth.header.clone(), resolved.value(&auth.key).to_string()));
    }

    let parameters = projector::project(resolved, &descriptor.recognized_keys());
    tracing::debug!(connector = %descriptor.id, url = %url, params = ?parameters, "Request built");

    Ok(RequestDescriptor {
        method: Method::Post,
        url,
        body: resolved.value(BODY_KEY).to_string(),
        headers,
        parameters,
    })
}

/// Sends requests through the shared transport, one blocking call each.
#[derive(Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn HttpTransport>,
}

impl RequestDispatcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Any HTTP status is a normal outcome; only transport failures are errors.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub fn dispatch(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor> {
        let response = self.transport.send(request)?;
        tracing::debug!(status = response.status_code, "Response received");
        Ok(response)
    }
}
