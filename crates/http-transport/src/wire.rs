//! URL assembly and header merging for outgoing requests.

use std::collections::BTreeMap;

use contract::{ApiError, HttpMethod, TransportConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Builds the request URL from the configured origin, a resolved path, and
/// query parameters (form-urlencoded).
///
/// ## Errors
///
/// Returns [`ApiError::InvalidUrl`] if the scheme is not `http`/`https`, the
/// host is empty or malformed, the host carries a path, query, fragment, or
/// credentials, or `path` does not start with `/`.
pub fn build_url(
    config: &TransportConfig,
    path: &str,
    query: &BTreeMap<String, String>,
) -> Result<Url, ApiError> {
    let origin = format!("{}://{}", config.scheme(), config.host());
    let invalid = |reason: &str| ApiError::InvalidUrl {
        url: format!("{origin}{path}"),
        reason: reason.to_string(),
    };

    let mut url = Url::parse(&origin).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("unsupported scheme"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("empty host"));
    }
    if !matches!(url.path(), "" | "/")
        || url.query().is_some()
        || url.fragment().is_some()
        || !url.username().is_empty()
        || url.password().is_some()
    {
        return Err(invalid("host must be a bare authority"));
    }
    if !path.starts_with('/') {
        return Err(invalid("path must start with '/'"));
    }

    url.set_path(path);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

/// Merges shared and per-call headers. Per-call values replace shared values
/// of the same name; names compare case-insensitively.
///
/// ## Errors
///
/// Returns [`ApiError::InvalidHeader`] for a name or value that is not valid
/// in an HTTP header.
pub fn merge_headers(
    shared: &BTreeMap<String, String>,
    per_call: &BTreeMap<String, String>,
) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::with_capacity(shared.len() + per_call.len());
    for (name, value) in shared.iter().chain(per_call) {
        let invalid = |reason: String| ApiError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Converts to the equivalent `reqwest::Method`.
pub fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(scheme: &str, host: &str) -> TransportConfig {
        TransportConfig::builder()
            .scheme(scheme)
            .host(host)
            .build()
            .unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_url_with_query() {
        let url = build_url(
            &config("https", "rest.bandsintown.com"),
            "/artists/Molchat%20Doma/events",
            &query(&[("date", "2023-05-05,2023-09-05"), ("app_id", "123")]),
        )
        .unwrap();

        assert_eq!(url.host_str(), Some("rest.bandsintown.com"));
        assert_eq!(url.path(), "/artists/Molchat%20Doma/events");
        let pairs: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, query(&[("app_id", "123"), ("date", "2023-05-05,2023-09-05")]));
    }

    #[test]
    fn test_build_url_encodes_query_values() {
        let url = build_url(
            &config("http", "127.0.0.1:8080"),
            "/search",
            &query(&[("q", "a b&c")]),
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/search?q=a+b%26c");
    }

    #[test]
    fn test_build_url_without_query_has_none() {
        let url = build_url(&config("https", "example.com"), "/x", &BTreeMap::new()).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_build_url_rejects_bad_input() {
        let cases = [
            ("https", "exa mple.com", "/x"),
            ("https", "example.com/base", "/x"),
            ("https", "user@example.com", "/x"),
            ("ftp", "example.com", "/x"),
            ("https", "example.com", "relative"),
        ];
        for (scheme, host, path) in cases {
            let err = build_url(&config(scheme, host), path, &BTreeMap::new()).unwrap_err();
            assert!(
                matches!(err, ApiError::InvalidUrl { .. }),
                "{scheme}://{host}{path} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_per_call_header_wins() {
        let shared = query(&[("Content-Type", "application/json"), ("X-Client", "shared")]);
        let per_call = query(&[("x-client", "call")]);
        let headers = merge_headers(&shared, &per_call).unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert_eq!(headers.get_all("x-client").iter().count(), 1);
        assert_eq!(headers.get("x-client").unwrap(), "call");
    }

    #[test]
    fn test_invalid_header_rejected() {
        let bad_name = query(&[("bad header", "x")]);
        assert!(matches!(
            merge_headers(&bad_name, &BTreeMap::new()),
            Err(ApiError::InvalidHeader { .. })
        ));

        let bad_value = query(&[("X-Ok", "line\nbreak")]);
        assert!(matches!(
            merge_headers(&BTreeMap::new(), &bad_value),
            Err(ApiError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_to_reqwest() {
        assert_eq!(to_reqwest(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest(HttpMethod::Delete), reqwest::Method::DELETE);
    }
}
