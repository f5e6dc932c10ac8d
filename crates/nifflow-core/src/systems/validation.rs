use crate::components::{Configuration, ConnectorDescriptor};
use crate::error::{ConnectorError, Result};
use crate::systems::dispatcher::{BASE_URL_KEY, BODY_KEY};

/// Checks raw connector options before any record is processed.
///
/// Every problem is reported, not just the first. Values are checked as
/// written, before template evaluation.
pub fn validate(descriptor: &ConnectorDescriptor, options: &Configuration) -> Result<()> {
    let mut errors = Vec::new();
    let rules = &descriptor.validation;

    if rules.body_required && !options.is_present(BODY_KEY) {
        errors.push("body needs to be present".to_string());
    }

    if !options.is_present(BASE_URL_KEY) {
        errors.push("base_url needs to be present".to_string());
    }
    if !options.get(BASE_URL_KEY).unwrap_or("").ends_with('/') {
        errors.push("base_url needs to end with a trailing '/'".to_string());
    }

    for key in &rules.required {
        if !options.is_present(key) {
            errors.push(format!("{} needs to be present", key));
        }
    }

    for range in &rules.ranges {
        let Some(raw) = options.get(&range.key).filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        let in_range = raw
            .trim()
            .parse::<i64>()
            .is_ok_and(|n| (range.min..=range.max).contains(&n));
        if !in_range {
            errors.push(format!(
                "{} needs to be a number between {} and {}",
                range.key, range.min, range.max
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConnectorError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ner() -> ConnectorDescriptor {
        serde_yaml::from_str(
            r#"
id: freme_ner
name: NER
api_version: "0.6"
path: e-entity/freme-ner/documents
recognized_keys: [outformat, dataset, numLinks]
validation:
  required: [dataset]
  ranges:
    - { key: numLinks, min: 1, max: 5 }
"#,
        )
        .unwrap()
    }

    fn valid() -> Configuration {
        [
            ("base_url", "http://api.freme-project.eu/0.6/"),
            ("body", "{{ data }}"),
            ("dataset", "dbpedia"),
            ("numLinks", "1"),
        ]
        .into_iter()
        .collect()
    }

    fn messages(result: Result<()>) -> Vec<String> {
        match result {
            Err(ConnectorError::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_options_pass() {
        validate(&ner(), &valid()).unwrap();
    }

    #[test]
    fn test_body_and_base_url_rules() {
        let mut options = valid();
        options.insert("body", "");
        options.insert("base_url", "http://example.com");
        let errors = messages(validate(&ner(), &options));
        assert!(errors.contains(&"body needs to be present".to_string()));
        assert!(errors.contains(&"base_url needs to end with a trailing '/'".to_string()));

        options.insert("base_url", "");
        let errors = messages(validate(&ner(), &options));
        assert!(errors.contains(&"base_url needs to be present".to_string()));
    }

    #[test]
    fn test_required_field() {
        let mut options = valid();
        options.insert("dataset", " ");
        let errors = messages(validate(&ner(), &options));
        assert_eq!(errors, vec!["dataset needs to be present".to_string()]);
    }

    #[test]
    fn test_range_rule() {
        for invalid in ["asdf", "6", "-1", "0"] {
            let mut options = valid();
            options.insert("numLinks", invalid);
            assert!(validate(&ner(), &options).is_err(), "{invalid} accepted");
        }
        for ok in ["", "1", "5"] {
            let mut options = valid();
            options.insert("numLinks", ok);
            assert!(validate(&ner(), &options).is_ok(), "{ok} rejected");
        }
    }

    #[test]
    fn test_body_optional_when_not_required() {
        let mut desc = ner();
        desc.validation.body_required = false;
        let mut options = valid();
        options.insert("body", "");
        validate(&desc, &options).unwrap();
    }
}
