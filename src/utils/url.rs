//! Pure URL helpers used by the endpoint bindings.

/// Append `name=value` to a URL's query string.
///
/// The value is percent-encoded. If a parameter named `name` already
/// appears in the URL it is returned unchanged, so repeated application
/// is idempotent. An empty `url` or `name` also returns the input
/// unchanged.
pub fn append_query_param(url: &str, name: &str, value: &str) -> String {
    if url.is_empty() || name.is_empty() {
        return url.to_string();
    }
    if has_query_param(url, name) {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, separator, name, urlencoding::encode(value))
}

/// Whether the URL's query string already carries a parameter `name`.
fn has_query_param(url: &str, name: &str) -> bool {
    let Some((_, query)) = url.split_once('?') else {
        return false;
    };
    query
        .split('&')
        .map(|pair| pair.split('=').next().unwrap_or(""))
        .any(|existing| existing == name)
}

/// Join a base URL and a path without doubling the separator.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_query_param() {
        assert_eq!(append_query_param("/Token/Get", "key", "k1"), "/Token/Get?key=k1");
        assert_eq!(
            append_query_param("/Token/Get?key=k1", "page", "2"),
            "/Token/Get?key=k1&page=2"
        );
    }

    #[test]
    fn test_append_query_param_is_idempotent() {
        let once = append_query_param("/Token/Get", "key", "k1");
        let twice = append_query_param(&once, "key", "k1");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_append_query_param_empty_inputs() {
        assert_eq!(append_query_param("", "key", "k1"), "");
        assert_eq!(append_query_param("/x", "", "k1"), "/x");
    }

    #[test]
    fn test_append_query_param_encodes_value() {
        assert_eq!(
            append_query_param("/Token/Upload", "file", "a b&c"),
            "/Token/Upload?file=a%20b%26c"
        );
    }

    #[test]
    fn test_append_query_param_matches_whole_name() {
        // "key" present must not block a distinct parameter "k"
        assert_eq!(
            append_query_param("/Token/Get?key=k1", "k", "v"),
            "/Token/Get?key=k1&k=v"
        );
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h/", "/Token/Get"), "http://h/Token/Get");
        assert_eq!(join_url("http://h", "Token/Get"), "http://h/Token/Get");
        assert_eq!(join_url("http://h/", "Token/Get"), "http://h/Token/Get");
    }
}
