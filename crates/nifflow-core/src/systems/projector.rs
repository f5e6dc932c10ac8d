use crate::components::{ParameterSet, ResolvedConfiguration};

/// Option key to query-string key: every underscore becomes a hyphen.
pub fn wire_key(key: &str) -> String {
    key.replace('_', "-")
}

/// Selects the recognized options that carry a value, in whitelist order.
///
/// Keys present in `resolved` but absent from `recognized_keys` are dropped,
/// which keeps each connector limited to its own endpoint's parameters.
pub fn project<S: AsRef<str>>(
    resolved: &ResolvedConfiguration,
    recognized_keys: &[S],
) -> ParameterSet {
    let mut params = ParameterSet::default();
    for key in recognized_keys {
        let key = key.as_ref();
        if let Some(value) = resolved.present(key) {
            params.push(wire_key(key), value);
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_key_only_touches_underscores() {
        assert_eq!(wire_key("endpoint_type"), "endpoint-type");
        assert_eq!(wire_key("source_lang_x"), "source-lang-x");
        assert_eq!(wire_key("numLinks"), "numLinks");
        assert_eq!(wire_key("a-b"), "a-b");
        assert_eq!(wire_key(&wire_key("a_b")), "a-b");
    }

    #[test]
    fn test_blank_or_absent_keys_are_skipped() {
        let keys = ["outformat", "prefix", "language", "domain"];
        let resolved: ResolvedConfiguration = [
            ("outformat", "turtle"),
            ("prefix", ""),
            ("language", "   "),
        ]
        .into_iter()
        .collect();

        let params = project(&resolved, &keys);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["outformat"]);
    }

    #[test]
    fn test_every_recognized_key_blank_or_absent_never_sent() {
        let keys = ["outformat", "resource", "endpoint", "endpoint_type"];
        for skipped in keys {
            for blank in [None, Some(""), Some(" \t")] {
                let mut pairs: Vec<(&str, &str)> = keys
                    .iter()
                    .filter(|k| **k != skipped)
                    .map(|k| (*k, "v"))
                    .collect();
                if let Some(b) = blank {
                    pairs.push((skipped, b));
                }
                let resolved: ResolvedConfiguration = pairs.into_iter().collect();
                let params = project(&resolved, &keys);

                assert_eq!(params.len(), keys.len() - 1);
                assert!(params.get(&wire_key(skipped)).is_none());
            }
        }
    }

    #[test]
    fn test_unrecognized_keys_are_dropped_and_order_follows_whitelist() {
        let resolved: ResolvedConfiguration = [
            ("endpoint_type", "sparql"),
            ("body", "ignored"),
            ("base_url", "http://svc/0.6/"),
            ("outformat", "turtle"),
        ]
        .into_iter()
        .collect();

        let params = project(&resolved, &["outformat", "endpoint_type"]);
        assert_eq!(
            params.pairs(),
            &[
                ("outformat".to_string(), "turtle".to_string()),
                ("endpoint-type".to_string(), "sparql".to_string()),
            ]
        );
    }

    #[test]
    fn test_values_pass_through_unvalidated() {
        let resolved: ResolvedConfiguration = [("numLinks", "42")].into_iter().collect();
        let params = project(&resolved, &["numLinks"]);
        assert_eq!(params.get("numLinks"), Some("42"));
    }
}
