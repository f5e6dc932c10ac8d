use crate::components::completion::ListingMapping;
use crate::components::config::Configuration;
use crate::error::{ConnectorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Table-driven definition of one connector.
///
/// Every connector shares the same dispatch engine; what differs between
/// them (endpoint path, forwarded keys, header rules, completion sources)
/// is data held here. Built-in definitions live in `connectors/*.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorDescriptor {
    /// Unique identifier (e.g. "freme_ner").
    pub id: String,
    /// Human readable name.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// API version the endpoint contract was taken from.
    pub api_version: String,
    /// Endpoint path relative to `base_url`, without a leading slash.
    pub path: String,
    /// Ordered whitelist of option keys forwarded as query parameters.
    pub recognized_keys: Vec<String>,
    /// Option that supplies the request Content-Type.
    #[serde(default = "default_content_type_key")]
    pub content_type_key: String,
    /// Option whose resolved value is appended to the path as one segment.
    #[serde(default)]
    pub path_segment: Option<String>,
    /// Present when the connector sends the auth token header.
    #[serde(default)]
    pub auth: Option<AuthCapability>,
    /// Present when the connector supports a post-processing filter.
    #[serde(default)]
    pub filter: Option<FilterCapability>,
    /// Present for pipeline connectors, which choose between two routes.
    #[serde(default)]
    pub pipeline: Option<PipelineRouting>,
    /// Remote listings backing completable fields.
    #[serde(default)]
    pub completions: Vec<CompletionSource>,
    /// Options applied before user overrides.
    #[serde(default)]
    pub defaults: Configuration,
    /// Form fields, in display order.
    #[serde(default)]
    pub settings: Vec<SettingDef>,
    #[serde(default)]
    pub validation: ValidationRules,
}

fn default_content_type_key() -> String {
    "body_format".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCapability {
    #[serde(default = "default_auth_header")]
    pub header: String,
    /// Option holding the token.
    #[serde(default = "default_auth_key")]
    pub key: String,
}

fn default_auth_header() -> String {
    "X-Auth-Token".to_string()
}

fn default_auth_key() -> String {
    "auth_token".to_string()
}

impl Default for AuthCapability {
    fn default() -> Self {
        Self {
            header: default_auth_header(),
            key: default_auth_key(),
        }
    }
}

/// Shared filter-management listing, the same for every connector.
pub const FILTER_LISTING_PATH: &str = "toolbox/convert/manage";

/// Adds a `filter` option and a filter completion list to a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterCapability {
    #[serde(default = "default_filter_key")]
    pub key: String,
}

fn default_filter_key() -> String {
    "filter".to_string()
}

impl Default for FilterCapability {
    fn default() -> Self {
        Self {
            key: default_filter_key(),
        }
    }
}

/// Routing rule of the pipeline connectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRouting {
    /// Option naming a pipeline template. `None` means the connector only
    /// knows the generic chain resource.
    #[serde(default = "default_template_key")]
    pub template_key: Option<String>,
    /// Content-Type forced onto requests for the generic chain resource.
    #[serde(default = "default_raw_content_type")]
    pub raw_content_type: String,
}

fn default_template_key() -> Option<String> {
    Some("template_id".to_string())
}

fn default_raw_content_type() -> String {
    "application/json".to_string()
}

impl Default for PipelineRouting {
    fn default() -> Self {
        Self {
            template_key: default_template_key(),
            raw_content_type: default_raw_content_type(),
        }
    }
}

/// A remote listing that provides the valid values of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSource {
    pub field: String,
    /// Listing path relative to `base_url`.
    pub path: String,
    pub mapping: ListingMapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    #[default]
    String,
    Text,
    Array,
    Boolean,
}

/// One form field of a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub data_type: SettingType,
    /// Fixed choices for `array` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Valid values come from a remote listing.
    #[serde(default)]
    pub completable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Whether `body` must be set.
    #[serde(default = "default_true")]
    pub body_required: bool,
    /// Options that must be non-blank.
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub ranges: Vec<RangeRule>,
}

fn default_true() -> bool {
    true
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            body_required: true,
            required: Vec::new(),
            ranges: Vec::new(),
        }
    }
}

/// Optional integer option that, when set, must fall in `min..=max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRule {
    pub key: String,
    pub min: i64,
    pub max: i64,
}

impl ConnectorDescriptor {
    /// Forwarded keys, including the filter key when the capability is present.
    pub fn recognized_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.recognized_keys.iter().map(String::as_str).collect();
        if let Some(filter) = &self.filter {
            keys.push(filter.key.as_str());
        }
        keys
    }

    /// Form fields, including the completable filter field when present.
    pub fn settings(&self) -> Vec<SettingDef> {
        let mut settings = self.settings.clone();
        if let Some(filter) = &self.filter {
            settings.push(SettingDef {
                name: filter.key.clone(),
                data_type: SettingType::String,
                values: Vec::new(),
                completable: true,
            });
        }
        settings
    }

    pub fn completion_source(&self, field: &str) -> Option<&CompletionSource> {
        self.completions.iter().find(|c| c.field == field)
    }

    pub fn completable_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.completions.iter().map(|c| c.field.as_str()).collect();
        if let Some(filter) = &self.filter {
            fields.push(filter.key.as_str());
        }
        fields
    }

    /// Structural checks run when a definition is registered.
    pub fn check(&self) -> Result<()> {
        let fail = |reason: String| ConnectorError::Definition {
            name: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(fail("id is empty".into()));
        }
        if self.path.starts_with('/') {
            return Err(fail(format!("path '{}' must be relative", self.path)));
        }
        if self.path_segment.is_some() && self.pipeline.is_some() {
            return Err(fail(
                "path_segment and pipeline routing are mutually exclusive".into(),
            ));
        }

        let mut seen = HashSet::new();
        for key in self.recognized_keys() {
            if !seen.insert(key) {
                return Err(fail(format!("recognized key '{}' listed twice", key)));
            }
        }

        let completable = self.completable_fields();
        for setting in &self.settings {
            if setting.completable && !completable.contains(&setting.name.as_str()) {
                return Err(fail(format!(
                    "setting '{}' is completable but has no completion source",
                    setting.name
                )));
            }
        }
        for source in &self.completions {
            if source.path.starts_with('/') {
                return Err(fail(format!("listing path '{}' must be relative", source.path)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
id: demo
name: Demo
api_version: "0.6"
path: e-demo/documents
recognized_keys: [outformat, source_lang]
"#;

    #[test]
    fn test_minimal_definition_defaults() {
        let desc: ConnectorDescriptor = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(desc.content_type_key, "body_format");
        assert!(desc.auth.is_none());
        assert!(desc.filter.is_none());
        assert!(desc.validation.body_required);
        assert_eq!(desc.recognized_keys(), vec!["outformat", "source_lang"]);
        desc.check().unwrap();
    }

    #[test]
    fn test_filter_capability_extends_keys_and_settings() {
        let yaml = format!("{}filter: {{}}\nauth: {{}}\n", MINIMAL);
        let desc: ConnectorDescriptor = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(desc.recognized_keys(), vec!["outformat", "source_lang", "filter"]);
        assert_eq!(desc.completable_fields(), vec!["filter"]);
        let filter_setting = desc.settings().pop().unwrap();
        assert_eq!(filter_setting.name, "filter");
        assert!(filter_setting.completable);

        let auth = desc.auth.unwrap();
        assert_eq!(auth.header, "X-Auth-Token");
        assert_eq!(auth.key, "auth_token");
        assert_eq!(desc.filter.unwrap().key, "filter");
    }

    #[test]
    fn test_filter_listing_cannot_be_overridden() {
        let yaml = format!("{}filter: {{ listing_path: custom/filters }}\n", MINIMAL);
        assert!(serde_yaml::from_str::<ConnectorDescriptor>(&yaml).is_err());
    }

    #[test]
    fn test_check_rejects_completable_without_source() {
        let yaml = format!("{}settings:\n  - {{ name: collection, completable: true }}\n", MINIMAL);
        let desc: ConnectorDescriptor = serde_yaml::from_str(&yaml).unwrap();
        let err = desc.check().unwrap_err();
        assert!(err.to_string().contains("collection"));
    }

    #[test]
    fn test_pipeline_template_key_defaults_and_null() {
        let templated: ConnectorDescriptor =
            serde_yaml::from_str(&format!("{}pipeline: {{}}\n", MINIMAL)).unwrap();
        assert_eq!(templated.pipeline, Some(PipelineRouting::default()));

        let raw: ConnectorDescriptor =
            serde_yaml::from_str(&format!("{}pipeline: {{ template_key: null }}\n", MINIMAL))
                .unwrap();
        assert_eq!(raw.pipeline.unwrap().template_key, None);
    }

    #[test]
    fn test_check_rejects_duplicate_filter_key() {
        let yaml = MINIMAL.replace("[outformat, source_lang]", "[outformat, filter]") + "filter: {}\n";
        let desc: ConnectorDescriptor = serde_yaml::from_str(&yaml).unwrap();
        assert!(desc.check().is_err());
    }
}
