use crate::components::{Method, RequestDescriptor, ResponseDescriptor};
use crate::error::Result;
use crate::settings::EngineSettings;
use std::collections::HashMap;

/// Blocking HTTP client used for both processing and listing calls.
///
/// Timeouts and connection reuse belong to the implementation.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor>;
}

/// Transport backed by a pooled `reqwest` blocking client.
///
/// Must not be created or used from inside an async runtime thread.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &EngineSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor> {
        let mut builder = match request.method {
            Method::Post => self
                .client
                .post(request.url.clone())
                .body(request.body.clone()),
            Method::Get => self.client.get(request.url.clone()),
        };

        if !request.parameters.is_empty() {
            builder = builder.query(request.parameters.pairs());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder.send()?;
        let status_code = resp.status().as_u16();

        let mut headers: HashMap<String, String> = HashMap::new();
        for (name, value) in resp.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        let body = resp.text()?;
        Ok(ResponseDescriptor {
            status_code,
            headers,
            body,
        })
    }
}
