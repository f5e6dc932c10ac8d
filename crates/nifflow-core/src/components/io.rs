use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Ordered query parameters, keyed by their wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet(Vec<(String, String)>);

impl ParameterSet {
    pub fn push(&mut self, wire_key: impl Into<String>, value: impl Into<String>) {
        self.0.push((wire_key.into(), value.into()));
    }

    pub fn get(&self, wire_key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == wire_key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A fully built outbound request. Processing connectors POST, listings GET.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub body: String,
    pub headers: Vec<(String, String)>,
    pub parameters: ParameterSet,
}

impl RequestDescriptor {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What came back from the remote service, whatever the status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDescriptor {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// The record handed back to the host for every dispatched request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl OutputRecord {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_url_as_string() {
        let mut parameters = ParameterSet::default();
        parameters.push("outformat", "turtle");
        let request = RequestDescriptor {
            method: Method::Post,
            url: Url::parse("http://svc/0.6/e-link/explore").unwrap(),
            body: String::new(),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            parameters,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["method"], "POST");
        assert_eq!(json["url"], "http://svc/0.6/e-link/explore");
        assert_eq!(json["headers"][0][1], "text/plain");
    }
}
