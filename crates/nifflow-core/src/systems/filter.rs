use crate::components::{CompletionOption, FILTER_LISTING_PATH, ListingMapping};
use crate::error::Result;
use crate::systems::completion::{AuthHeader, CompletionProvider};
use crate::systems::dispatcher::target_url;

/// Label of the synthetic "no filter" option.
pub const NO_FILTER_TEXT: &str = "none";

/// The option that clears the filter; its id is the empty string, which the
/// projector never forwards.
pub fn no_filter_option() -> CompletionOption {
    CompletionOption::new(NO_FILTER_TEXT, "")
}

/// Prepends the "no filter" option to a fetched filter list.
pub fn augment(options: Vec<CompletionOption>) -> Vec<CompletionOption> {
    let mut augmented = Vec::with_capacity(options.len() + 1);
    augmented.push(no_filter_option());
    augmented.extend(options);
    augmented
}

/// Filter choices for any connector holding the filter capability.
///
/// Always reads the shared filter-management listing; a failed fetch leaves
/// only the "no filter" option.
pub fn fetch_filter_options(
    provider: &CompletionProvider,
    base_url: &str,
    auth_header: Option<AuthHeader>,
) -> Result<Vec<CompletionOption>> {
    let url = target_url(base_url, FILTER_LISTING_PATH, None)?;
    let fetched = provider.fetch_options(url, auth_header, ListingMapping::Named)?;
    Ok(augment(fetched))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::completion::tests::CannedTransport;

    #[test]
    fn test_sentinel_first_for_any_fetch_size() {
        assert_eq!(augment(Vec::new()), vec![no_filter_option()]);

        let fetched = vec![
            CompletionOption::new("a", "a"),
            CompletionOption::new("b", "b"),
        ];
        let augmented = augment(fetched.clone());
        assert_eq!(augmented.len(), 3);
        assert_eq!(augmented[0], no_filter_option());
        assert_eq!(&augmented[1..], fetched.as_slice());
    }

    #[test]
    fn test_failed_fetch_leaves_only_sentinel() {
        let transport = CannedTransport::new(500, "");
        let provider = CompletionProvider::new(transport);
        let options = fetch_filter_options(&provider, "http://svc/0.6/", None).unwrap();

        assert_eq!(options, vec![no_filter_option()]);
        assert_eq!(
            serde_json::to_value(&options[0]).unwrap(),
            serde_json::json!({"text": "none", "id": ""})
        );
    }

    #[test]
    fn test_reads_shared_listing() {
        let transport = CannedTransport::new(200, r#"[{"name": "testfilter", "description": null}]"#);
        let provider = CompletionProvider::new(transport.clone());
        let options = fetch_filter_options(
            &provider,
            "http://svc/0.6/",
            Some(("X-Auth-Token".into(), "tok".into())),
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!([
                {"text": "none", "id": ""},
                {"text": "testfilter", "id": "testfilter", "description": null}
            ])
        );
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].url.as_str(), "http://svc/0.6/toolbox/convert/manage");
        assert_eq!(seen[0].header("X-Auth-Token"), Some("tok"));
    }
}
