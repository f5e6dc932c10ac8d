use crate::components::Configuration;
use crate::connector::Connector;
use crate::error::Result;
use crate::integrations::ConnectorRegistry;
use crate::resources::http::{HttpTransport, ReqwestTransport};
use crate::resources::templates::TemplateEngine;
use crate::settings::EngineSettings;
use crate::systems::resolver::Interpolator;
use std::sync::Arc;

/// Entry point: owns the connector catalogue and the shared services every
/// connector instance uses.
pub struct Engine {
    registry: ConnectorRegistry,
    interpolator: Arc<dyn Interpolator>,
    transport: Arc<dyn HttpTransport>,
}

impl Engine {
    /// Built-in connectors plus any found in `settings.connectors_dir`,
    /// handlebars templating and a pooled blocking HTTP client.
    pub fn from_settings(settings: &EngineSettings) -> Result<Self> {
        let mut registry = ConnectorRegistry::with_builtin()?;
        if let Some(dir) = &settings.connectors_dir {
            let loaded = registry.load_from_directory(dir)?;
            tracing::info!(count = loaded, "Custom connectors loaded");
        }

        Ok(Self::new(
            registry,
            Arc::new(TemplateEngine::default()),
            Arc::new(ReqwestTransport::new(settings)?),
        ))
    }

    pub fn new(
        registry: ConnectorRegistry,
        interpolator: Arc<dyn Interpolator>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            registry,
            interpolator,
            transport,
        }
    }

    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    /// Instantiates connector `id` with `overrides` on top of its defaults.
    pub fn connector(&self, id: &str, overrides: &Configuration) -> Result<Connector> {
        let descriptor = self.registry.get(id)?;
        Ok(Connector::new(
            descriptor,
            overrides,
            self.interpolator.clone(),
            self.transport.clone(),
        ))
    }
}
