use crate::systems::resolver::Interpolator;
use handlebars::{Context, Handlebars, HelperResult, Output, RenderContext};
use serde_json::Value;

/// Handlebars-backed interpolation of connector options.
///
/// `{{ body }}` picks a field of the incoming record. Output is not
/// HTML-escaped: option values are forwarded to the API verbatim.
pub struct TemplateEngine {
    pub hbs: Handlebars<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(false);
        hbs.register_escape_fn(handlebars::no_escape);

        hbs.register_helper(
            "json",
            Box::new(
                |h: &handlebars::Helper,
                 _: &Handlebars,
                 _: &Context,
                 _: &mut RenderContext,
                 out: &mut dyn Output|
                 -> HelperResult {
                    let param = h.param(0).ok_or(handlebars::RenderErrorReason::Other(
                        "Param 0 is required for json helper".to_string(),
                    ))?;
                    let value = param.value();
                    out.write(&serde_json::to_string(value).map_err(|e| {
                        handlebars::RenderErrorReason::Other(format!("JSON encode failed: {}", e))
                    })?)?;
                    Ok(())
                },
            ),
        );

        hbs.register_helper(
            "default",
            Box::new(
                |h: &handlebars::Helper,
                 _: &Handlebars,
                 _: &Context,
                 _: &mut RenderContext,
                 out: &mut dyn Output|
                 -> HelperResult {
                    let value = h.param(0).map(|p| p.value());
                    let fallback = h.param(1).ok_or(handlebars::RenderErrorReason::Other(
                        "Param 1 required".to_string(),
                    ))?;
                    let chosen = match value {
                        None | Some(Value::Null) => fallback.value(),
                        Some(Value::String(s)) if s.is_empty() => fallback.value(),
                        Some(v) => v,
                    };
                    match chosen {
                        Value::String(s) => out.write(s)?,
                        other => out.write(&other.to_string())?,
                    }
                    Ok(())
                },
            ),
        );

        Self { hbs }
    }
}

impl TemplateEngine {
    pub fn render(&self, template: &str, data: &Value) -> Result<String, handlebars::RenderError> {
        self.hbs.render_template(template, data)
    }
}

impl Interpolator for TemplateEngine {
    fn interpolate(&self, template: &str, context: &Value) -> anyhow::Result<String> {
        if !template.contains("{{") {
            return Ok(template.to_string());
        }
        Ok(self.render(template, context)?)
    }
}
