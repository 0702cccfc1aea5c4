use super::options::ClientOptions;
use crate::error::{NotifyError, NotifyResult};
use reqwest::Url;

/// User-Agent sent with every request, e.g. `NOTIFY-API-RUST-CLIENT/0.1.0`
pub fn user_agent() -> String {
    format!("NOTIFY-API-RUST-CLIENT/{}", crate::pkg_version())
}

/// Builds the HTTP client backing a single `NotificationClient`.
///
/// # Features
/// - **Timeouts**: whole-request and connect timeouts from [`ClientOptions`]
/// - **Compression**: gzip response bodies
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
pub(crate) fn build_http_client(options: &ClientOptions) -> NotifyResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(options.timeout)
        .connect_timeout(options.connect_timeout)
        .gzip(true)
        .user_agent(user_agent())
        .build()
        .map_err(|e| NotifyError::configuration(format!("failed to build HTTP client: {}", e)))
}

/// Parses and checks the base URL: it must be absolute http(s)
pub(crate) fn parse_base_url(base_url: &str) -> NotifyResult<Url> {
    let url = Url::parse(base_url.trim()).map_err(|e| {
        NotifyError::configuration(format!("invalid base URL '{}': {}", base_url, e))
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(NotifyError::configuration(format!(
            "base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(NotifyError::configuration(
            "base URL must not carry a query string or fragment",
        ));
    }

    Ok(url)
}

/// Appends path segments (percent-encoded) and query pairs to the base URL.
///
/// `Url` drops `.` and `..` segments (and normalizes their `%2E` forms), and
/// an empty segment collapses into a trailing slash. Any of these would send
/// the request to a different endpoint, so they are rejected up front.
pub(crate) fn endpoint_url(
    base: &Url,
    segments: &[&str],
    query: &[(&'static str, String)],
) -> NotifyResult<Url> {
    if let Some(segment) = segments
        .iter()
        .find(|segment| matches!(**segment, "" | "." | ".."))
    {
        return Err(NotifyError::invalid_id(*segment));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| NotifyError::configuration("base URL cannot be used as a base"))?
        .pop_if_empty()
        .extend(segments);

    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        assert!(build_http_client(&ClientOptions::default()).is_ok());
    }

    #[test]
    fn test_user_agent() {
        assert!(user_agent().starts_with("NOTIFY-API-RUST-CLIENT/"));
    }

    #[test]
    fn test_parse_base_url() {
        assert!(parse_base_url("https://api.notifications.service.gov.uk").is_ok());
        assert!(parse_base_url("http://localhost:6011/").is_ok());
        assert!(parse_base_url("not-a-url").is_err());
        assert!(parse_base_url("ftp://example.com").is_err());
        assert!(parse_base_url("https://example.com/?a=b").is_err());
    }

    #[test]
    fn test_endpoint_url_trailing_slash() {
        let base = parse_base_url("https://api.example.com/").unwrap();
        let url = endpoint_url(&base, &["v2", "notifications", "sms"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v2/notifications/sms");
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let base = parse_base_url("https://gateway.example.com/notify").unwrap();
        let url = endpoint_url(&base, &["v2", "templates"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://gateway.example.com/notify/v2/templates");
    }

    #[test]
    fn test_endpoint_url_encodes_segments_and_query() {
        let base = parse_base_url("https://api.example.com").unwrap();
        let url = endpoint_url(
            &base,
            &["v2", "template", "invalid id/.."],
            &[("type", "sms".to_string())],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v2/template/invalid%20id%2F..?type=sms"
        );
    }

    #[test]
    fn test_endpoint_url_rejects_path_changing_segments() {
        let base = parse_base_url("https://api.example.com").unwrap();

        for id in ["", ".", ".."] {
            let result = endpoint_url(&base, &["v2", "notifications", id, "pdf"], &[]);
            assert!(
                matches!(result, Err(NotifyError::InvalidId { id: ref got }) if got == id),
                "id {:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn test_endpoint_url_keeps_other_dotted_ids() {
        let base = parse_base_url("https://api.example.com").unwrap();

        let url = endpoint_url(&base, &["v2", "template", "..."], &[]).unwrap();
        assert_eq!(url.path(), "/v2/template/...");

        let url = endpoint_url(&base, &["v2", "template", "%2E%2E"], &[]).unwrap();
        assert_eq!(url.path(), "/v2/template/%252E%252E");
    }
}
