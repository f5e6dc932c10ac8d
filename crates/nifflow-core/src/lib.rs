//! # NifFlow Core Library
//!
//! Configurable connectors for the FREME NLP service family. A connector
//! resolves its options against an incoming record, forwards a whitelisted
//! subset of them as query parameters, sends exactly one HTTP request and
//! hands the response back as an output record.
//!
//! Configuration fields whose valid values live on the remote service
//! (filters, templates, datasets) are discovered through completion
//! listings.

pub mod app;
pub mod components;
pub mod connector;
pub mod error;
pub mod integrations;
pub mod resources;
pub mod settings;
pub mod systems;

pub use app::Engine;
pub use components::{
    CompletionOption, Configuration, ConnectorDescriptor, OutputRecord, ParameterSet,
    RequestDescriptor, ResolvedConfiguration, ResponseDescriptor,
};
pub use connector::Connector;
pub use error::{ConnectorError, Result};
pub use integrations::registry::ConnectorRegistry;
pub use resources::http::{HttpTransport, ReqwestTransport};
pub use resources::templates::TemplateEngine;
pub use settings::EngineSettings;
pub use systems::resolver::Interpolator;
