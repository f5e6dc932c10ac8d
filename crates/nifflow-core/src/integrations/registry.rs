use crate::components::ConnectorDescriptor;
use crate::error::{ConnectorError, Result};
use crate::integrations::builtin::BUILTIN_CONNECTORS;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// All connector definitions known to an engine, keyed by id.
#[derive(Default, Clone)]
pub struct ConnectorRegistry {
    definitions: HashMap<String, Arc<ConnectorDescriptor>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in FREME connectors.
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        for (name, source) in BUILTIN_CONNECTORS {
            registry.register(Self::parse(name, source)?)?;
        }
        Ok(registry)
    }

    /// Parses one YAML definition. `name` only labels errors.
    pub fn parse(name: &str, source: &str) -> Result<ConnectorDescriptor> {
        serde_yaml::from_str(source).map_err(|e| ConnectorError::Definition {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Adds a definition, replacing any previous one with the same id.
    pub fn register(&mut self, descriptor: ConnectorDescriptor) -> Result<()> {
        descriptor.check()?;
        if self.definitions.contains_key(&descriptor.id) {
            tracing::info!(connector = %descriptor.id, "Replacing connector definition");
        }
        self.definitions
            .insert(descriptor.id.clone(), Arc::new(descriptor));
        Ok(())
    }

    /// Loads every `.yaml`/`.yml` file of `path`. A missing directory loads
    /// nothing. Either every file is registered or, on the first bad file,
    /// none is.
    #[tracing::instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_from_directory(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let dir_path = path.as_ref();
        if !dir_path.exists() {
            tracing::warn!("Connector directory does not exist");
            return Ok(0);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir_path)? {
            let path = entry?.path();
            let is_yaml = matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("yaml") | Some("yml")
            );
            if is_yaml {
                files.push(path);
            }
        }
        files.sort();

        let mut loaded = Vec::with_capacity(files.len());
        for path in &files {
            let content = fs::read_to_string(path)?;
            let descriptor = Self::parse(&path.display().to_string(), &content)?;
            descriptor.check()?;
            loaded.push(descriptor);
        }

        let count = loaded.len();
        for descriptor in loaded {
            tracing::info!(connector = %descriptor.id, "Loaded connector");
            self.register(descriptor)?;
        }
        Ok(count)
    }

    pub fn get(&self, id: &str) -> Result<Arc<ConnectorDescriptor>> {
        self.definitions
            .get(id)
            .cloned()
            .ok_or_else(|| ConnectorError::UnknownConnector(id.to_string()))
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ListingMapping;
    use crate::systems::validation;

    #[test]
    fn test_builtin_catalogue() {
        let registry = ConnectorRegistry::with_builtin().unwrap();
        assert_eq!(
            registry.ids(),
            vec![
                "freme_explore",
                "freme_filter",
                "freme_link",
                "freme_ner",
                "freme_nif_converter",
                "freme_pipeline",
                "freme_pipeline_chain",
                "freme_spotlight",
                "freme_terminology",
                "freme_translation",
            ]
        );
    }

    #[test]
    fn test_builtin_capabilities() {
        let registry = ConnectorRegistry::with_builtin().unwrap();

        let ner = registry.get("freme_ner").unwrap();
        assert!(ner.auth.is_some());
        assert_eq!(ner.completable_fields(), vec!["dataset", "filter"]);
        assert_eq!(
            ner.completion_source("dataset").unwrap().mapping,
            ListingMapping::Summarized
        );

        let explore = registry.get("freme_explore").unwrap();
        assert!(explore.auth.is_none());
        assert!(explore.filter.is_none());

        let translation = registry.get("freme_translation").unwrap();
        assert_eq!(translation.path, "e-translation/tilde");

        let chain = registry.get("freme_pipeline_chain").unwrap();
        assert_eq!(chain.pipeline.as_ref().unwrap().template_key, None);
    }

    #[test]
    fn test_builtin_defaults_pass_validation_when_required_fields_set() {
        let registry = ConnectorRegistry::with_builtin().unwrap();
        let ner = registry.get("freme_ner").unwrap();
        let mut options = ner.defaults.clone();
        assert!(validation::validate(&ner, &options).is_err());

        options.insert("dataset", "dbpedia");
        validation::validate(&ner, &options).unwrap();
    }

    #[test]
    fn test_unknown_connector() {
        let registry = ConnectorRegistry::with_builtin().unwrap();
        assert!(matches!(
            registry.get("freme_sentiment"),
            Err(ConnectorError::UnknownConnector(id)) if id == "freme_sentiment"
        ));
    }

    #[test]
    fn test_parse_error_names_source() {
        let err = ConnectorRegistry::parse("broken.yaml", "id: [").unwrap_err();
        assert!(matches!(err, ConnectorError::Definition { ref name, .. } if name == "broken.yaml"));
    }
}
