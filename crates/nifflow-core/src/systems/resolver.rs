use crate::components::{Configuration, ResolvedConfiguration};
use crate::error::{ConnectorError, Result};
use serde_json::Value;

/// The template language options are written in.
///
/// Implementations must be pure: the same template and context always give
/// the same string. A literal without template markers resolves to itself.
pub trait Interpolator: Send + Sync {
    fn interpolate(&self, template: &str, context: &Value) -> anyhow::Result<String>;
}

impl<F> Interpolator for F
where
    F: Fn(&str, &Value) -> anyhow::Result<String> + Send + Sync,
{
    fn interpolate(&self, template: &str, context: &Value) -> anyhow::Result<String> {
        self(template, context)
    }
}

/// Evaluates every option against `context`.
///
/// The first failing option aborts resolution; no partial result is returned.
pub fn resolve(
    config: &Configuration,
    context: &Value,
    interpolator: &dyn Interpolator,
) -> Result<ResolvedConfiguration> {
    config
        .iter()
        .map(|(key, template)| {
            interpolator
                .interpolate(template, context)
                .map(|value| (key, value))
                .map_err(|source| ConnectorError::Resolution {
                    key: key.to_string(),
                    source,
                })
        })
        .collect()
}
