//! Connector definitions compiled into the library.

/// `(file name, YAML source)` of every built-in connector.
pub const BUILTIN_CONNECTORS: &[(&str, &str)] = &[
    ("freme_ner.yaml", include_str!("../../connectors/freme_ner.yaml")),
    ("freme_link.yaml", include_str!("../../connectors/freme_link.yaml")),
    ("freme_filter.yaml", include_str!("../../connectors/freme_filter.yaml")),
    ("freme_explore.yaml", include_str!("../../connectors/freme_explore.yaml")),
    ("freme_translation.yaml", include_str!("../../connectors/freme_translation.yaml")),
    ("freme_terminology.yaml", include_str!("../../connectors/freme_terminology.yaml")),
    ("freme_spotlight.yaml", include_str!("../../connectors/freme_spotlight.yaml")),
    ("freme_nif_converter.yaml", include_str!("../../connectors/freme_nif_converter.yaml")),
    ("freme_pipeline.yaml", include_str!("../../connectors/freme_pipeline.yaml")),
    ("freme_pipeline_chain.yaml", include_str!("../../connectors/freme_pipeline_chain.yaml")),
];
