//! Small URI helpers shared by the dialect parsers and serializers.

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters left alone by JavaScript's `encodeURIComponent`.
/// Everything else in userinfo is escaped.
const USERINFO_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters that would change the structure of a query string.
/// `+` is literal in connection-string options and is left alone.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&');

const QUERY_KEY_ENCODE_SET: &AsciiSet = &QUERY_VALUE_ENCODE_SET.add(b'=');

/// Percent-decodes a URI component, keeping the raw text if it is not UTF-8.
pub(crate) fn decode_component(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Percent-encodes a username or password for a URL authority.
pub(crate) fn encode_userinfo(raw: &str) -> String {
    utf8_percent_encode(raw, USERINFO_ENCODE_SET).to_string()
}

/// Returns `None` for empty strings.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Percent-decodes a query string into ordered key/value pairs.
///
/// `+` is kept as a literal plus, not form-decoded to a space. A repeated key
/// keeps its last value in the position of its first occurrence.
pub(crate) fn parse_query(query: &str) -> IndexMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Serializes params as `k=v&k=v` (no leading `?`).
pub(crate) fn format_query(params: &IndexMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, QUERY_KEY_ENCODE_SET),
                utf8_percent_encode(v, QUERY_VALUE_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the `user:pass@` authority prefix.
///
/// Emits `user:pass@`, `:pass@`, `user@`, or nothing, with both parts encoded.
pub(crate) fn format_userinfo(username: Option<&str>, password: Option<&str>) -> String {
    let username = username.filter(|u| !u.is_empty());
    let password = password.filter(|p| !p.is_empty());

    match (username, password) {
        (Some(user), Some(pass)) => {
            format!("{}:{}@", encode_userinfo(user), encode_userinfo(pass))
        }
        (None, Some(pass)) => format!(":{}@", encode_userinfo(pass)),
        (Some(user), None) => format!("{}@", encode_userinfo(user)),
        (None, None) => String::new(),
    }
}

/// Splits `user[:password]` on the first colon, percent-decoding both halves.
pub(crate) fn split_credentials(raw: &str) -> (Option<String>, Option<String>) {
    match raw.split_once(':') {
        Some((user, pass)) => (
            non_empty(&decode_component(user)),
            non_empty(&decode_component(pass)),
        ),
        None => (non_empty(&decode_component(raw)), None),
    }
}

/// Splits `host[:port]` on the first colon.
pub(crate) fn split_host_port(raw: &str) -> (String, Option<String>) {
    match raw.split_once(':') {
        Some((host, port)) => (host.to_string(), non_empty(port)),
        None => (raw.to_string(), None),
    }
}

/// Strips a single leading `/` from a URL path and drops empty results.
pub(crate) fn path_to_name(path: &str) -> Option<String> {
    non_empty(path.strip_prefix('/').unwrap_or(path))
}
