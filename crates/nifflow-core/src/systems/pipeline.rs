use crate::components::{PipelineRouting, ResolvedConfiguration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    /// A pipeline template is selected: the user's body format is forwarded.
    Templated,
    /// Generic chain resource, which only accepts one wire format.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub mode: RouteMode,
    pub content_type: String,
    /// Extra path segment (the template id) for templated requests.
    pub segment: Option<String>,
}

/// Picks the route for one record, after its options are resolved.
pub fn route(
    routing: &PipelineRouting,
    resolved: &ResolvedConfiguration,
    content_type_key: &str,
) -> Route {
    let template = routing
        .template_key
        .as_deref()
        .and_then(|key| resolved.present(key));

    let route = match template {
        Some(template_id) => Route {
            mode: RouteMode::Templated,
            content_type: resolved.value(content_type_key).to_string(),
            segment: Some(template_id.to_string()),
        },
        None => Route {
            mode: RouteMode::Raw,
            content_type: routing.raw_content_type.clone(),
            segment: None,
        },
    };
    tracing::debug!(mode = ?route.mode, content_type = %route.content_type, "Pipeline route selected");
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(template_id: &str, body_format: &str) -> ResolvedConfiguration {
        [("template_id", template_id), ("body_format", body_format)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_blank_template_forces_raw_content_type() {
        for body_format in ["text/turtle", "text/plain", ""] {
            let r = route(
                &PipelineRouting::default(),
                &resolved("", body_format),
                "body_format",
            );
            assert_eq!(r.mode, RouteMode::Raw);
            assert_eq!(r.content_type, "application/json");
            assert_eq!(r.segment, None);
        }
    }

    #[test]
    fn test_template_forwards_body_format() {
        let r = route(
            &PipelineRouting::default(),
            &resolved("34", "text/turtle"),
            "body_format",
        );
        assert_eq!(r.mode, RouteMode::Templated);
        assert_eq!(r.content_type, "text/turtle");
        assert_eq!(r.segment.as_deref(), Some("34"));
    }

    #[test]
    fn test_whitespace_template_is_blank() {
        let r = route(
            &PipelineRouting::default(),
            &resolved("  ", "text/turtle"),
            "body_format",
        );
        assert_eq!(r.mode, RouteMode::Raw);
    }

    #[test]
    fn test_routing_without_template_key_is_always_raw() {
        let routing = PipelineRouting {
            template_key: None,
            ..PipelineRouting::default()
        };
        let r = route(&routing, &resolved("34", "text/turtle"), "body_format");
        assert_eq!(r.mode, RouteMode::Raw);
        assert_eq!(r.content_type, "application/json");
    }
}
