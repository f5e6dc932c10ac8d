use crate::components::{
    CompletionOption, Configuration, ConnectorDescriptor, OutputRecord, RequestDescriptor,
    ResolvedConfiguration,
};
use crate::error::{ConnectorError, Result};
use crate::resources::http::HttpTransport;
use crate::systems::completion::{AuthHeader, CompletionProvider};
use crate::systems::dispatcher::{self, BASE_URL_KEY, RequestDispatcher};
use crate::systems::resolver::{self, Interpolator};
use crate::systems::{emitter, filter, validation};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// One configured connector instance.
///
/// Holds no per-record state: every call resolves the options afresh, so an
/// instance can be shared between threads processing independent records.
#[derive(Clone)]
pub struct Connector {
    descriptor: Arc<ConnectorDescriptor>,
    options: Configuration,
    interpolator: Arc<dyn Interpolator>,
    dispatcher: RequestDispatcher,
    completions: CompletionProvider,
}

impl Connector {
    /// Creates an instance whose options are the descriptor defaults
    /// overridden by `overrides`.
    pub fn new(
        descriptor: Arc<ConnectorDescriptor>,
        overrides: &Configuration,
        interpolator: Arc<dyn Interpolator>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let options = descriptor.defaults.merged_with(overrides);
        Self {
            descriptor,
            options,
            interpolator,
            dispatcher: RequestDispatcher::new(transport.clone()),
            completions: CompletionProvider::new(transport),
        }
    }

    pub fn descriptor(&self) -> &ConnectorDescriptor {
        &self.descriptor
    }

    /// The raw (unresolved) options of this instance.
    pub fn options(&self) -> &Configuration {
        &self.options
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate(&self.descriptor, &self.options)
    }

    /// Evaluates the options against one record.
    pub fn resolve(&self, record: &Value) -> Result<ResolvedConfiguration> {
        resolver::resolve(&self.options, record, self.interpolator.as_ref())
    }

    /// The request `receive` would send for `record`, without sending it.
    pub fn dry_run(&self, record: &Value) -> Result<RequestDescriptor> {
        let resolved = self.resolve(record)?;
        dispatcher::build_request(&self.descriptor, &resolved)
    }

    /// Processes one record: resolve, project, dispatch, emit.
    ///
    /// Returns an output record for every response, whatever its status.
    #[tracing::instrument(skip(self, record), fields(connector = %self.descriptor.id, trace_id = %Uuid::new_v4()))]
    pub fn receive(&self, record: &Value) -> Result<OutputRecord> {
        let request = self.dry_run(record)?;
        let response = self.dispatcher.dispatch(&request)?;
        let output = emitter::emit(response);
        tracing::info!(status = output.status, "Output record emitted");
        Ok(output)
    }

    /// Processes records one after another. A failing record does not stop
    /// the ones after it.
    pub fn receive_all(&self, records: &[Value]) -> Vec<Result<OutputRecord>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let result = self.receive(record);
                if let Err(e) = &result {
                    tracing::warn!(connector = %self.descriptor.id, index, error = %e, "Record failed");
                }
                result
            })
            .collect()
    }

    /// Sends one request built from an empty record.
    pub fn check(&self) -> Result<OutputRecord> {
        self.receive(&json!({}))
    }

    pub fn completable_fields(&self) -> Vec<&str> {
        self.descriptor.completable_fields()
    }

    /// Valid values for `field`, fetched from the remote service.
    pub fn complete(&self, field: &str) -> Result<Vec<CompletionOption>> {
        let resolved = self.resolve(&json!({}))?;
        let base_url = resolved.value(BASE_URL_KEY);
        let auth = self.auth_header(&resolved);

        if let Some(capability) = &self.descriptor.filter
            && capability.key == field
        {
            return filter::fetch_filter_options(&self.completions, base_url, auth);
        }

        let source = self.descriptor.completion_source(field).ok_or_else(|| {
            ConnectorError::UnknownCompletion {
                connector: self.descriptor.id.clone(),
                field: field.to_string(),
            }
        })?;
        let url = dispatcher::target_url(base_url, &source.path, None)?;
        self.completions.fetch_options(url, auth, source.mapping)
    }

    fn auth_header(&self, resolved: &ResolvedConfiguration) -> Option<AuthHeader> {
        self.descriptor
            .auth
            .as_ref()
            .map(|auth| (auth.header.clone(), resolved.value(&auth.key).to_string()))
    }
}
