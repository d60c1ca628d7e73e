//! Redis grammars: `redis://` / `rediss://` URLs, bare `host:port`, and
//! comma-separated cluster lists (optionally behind a scheme and `auth@`).

use tracing::trace;
use url::Url;

use crate::error::DbStringError;
use crate::models::{ConnectionRecord, DatabaseType};
use crate::uri::{
    decode_component, non_empty, parse_query, path_to_name, split_credentials, split_host_port,
};

const FORMAT_ERROR: &str = "Invalid Redis connection string format";

const DEFAULT_PORT: &str = "6379";

fn strip_scheme(raw: &str) -> Option<(&'static str, &str)> {
    if let Some(rest) = raw.strip_prefix("rediss://") {
        Some(("rediss", rest))
    } else {
        raw.strip_prefix("redis://").map(|rest| ("redis", rest))
    }
}

/// Host segment of a scheme-less remainder: after the last `@` if any.
fn host_segment(rest: &str) -> &str {
    rest.rsplit_once('@').map_or(rest, |(_, hosts)| hosts)
}

pub(super) fn parse(raw: &str) -> crate::Result<ConnectionRecord> {
    let mut record = ConnectionRecord::new(DatabaseType::Redis);

    match strip_scheme(raw) {
        Some((scheme, rest)) => {
            record.protocol = Some(scheme.to_string());
            if host_segment(rest).contains(',') {
                parse_cluster(rest, &mut record);
            } else {
                parse_url(raw, &mut record)?;
            }
        }
        None => {
            record.protocol = Some("redis".to_string());
            if raw.contains(',') {
                parse_cluster(raw, &mut record);
            } else {
                parse_bare(raw, &mut record);
            }
        }
    }

    Ok(record)
}

/// Parses `[user:pass@]h1:p1,h2:p2,...` with the scheme already removed.
fn parse_cluster(rest: &str, record: &mut ConnectionRecord) {
    let hosts_part = match rest.rsplit_once('@') {
        Some((credentials, hosts)) => {
            let (username, password) = split_credentials(credentials);
            record.username = username;
            record.password = password;
            hosts
        }
        None => rest,
    };

    let hosts: Vec<String> = hosts_part
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(first) = hosts.first() {
        let (host, port) = split_host_port(first);
        record.host = non_empty(&host);
        record.port = Some(port.unwrap_or_else(|| DEFAULT_PORT.to_string()));
    }

    trace!("Redis cluster with {} nodes", hosts.len());
    record.cluster_hosts = Some(hosts);
}

fn parse_url(raw: &str, record: &mut ConnectionRecord) -> crate::Result<()> {
    let url = Url::parse(raw).map_err(|e| {
        trace!("Redis URL parse failed: {e}");
        DbStringError::invalid(FORMAT_ERROR)
    })?;

    record.username = non_empty(&decode_component(url.username()));
    record.password = url.password().map(decode_component).and_then(|p| non_empty(&p));
    record.host = url.host_str().and_then(non_empty);
    record.port = Some(
        url.port()
            .map_or_else(|| DEFAULT_PORT.to_string(), |p| p.to_string()),
    );
    record.db_name = path_to_name(url.path());
    if let Some(query) = url.query() {
        record.params = parse_query(query);
    }

    Ok(())
}

fn parse_bare(raw: &str, record: &mut ConnectionRecord) {
    let (host, port) = split_host_port(raw.trim());
    record.host = non_empty(&host);
    record.port = Some(port.unwrap_or_else(|| DEFAULT_PORT.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_with_password_and_db() {
        let record = parse("redis://:s3cret@cache.internal:6380/2?timeout=5").unwrap();

        assert_eq!(record.db_type, DatabaseType::Redis);
        assert_eq!(record.protocol.as_deref(), Some("redis"));
        assert_eq!(record.username, None);
        assert_eq!(record.password.as_deref(), Some("s3cret"));
        assert_eq!(record.host.as_deref(), Some("cache.internal"));
        assert_eq!(record.port.as_deref(), Some("6380"));
        assert_eq!(record.db_name.as_deref(), Some("2"));
        assert_eq!(record.params["timeout"], "5");
        assert!(!record.is_cluster());
    }

    #[test]
    fn test_parse_tls_url_defaults_port() {
        let record = parse("rediss://default:pw@redis.example.com").unwrap();

        assert_eq!(record.protocol.as_deref(), Some("rediss"));
        assert_eq!(record.username.as_deref(), Some("default"));
        assert_eq!(record.port.as_deref(), Some("6379"));
        assert_eq!(record.db_name, None);
    }

    #[test]
    fn test_parse_bare_host_port() {
        let record = parse("localhost:6390").unwrap();
        assert_eq!(record.protocol.as_deref(), Some("redis"));
        assert_eq!(record.host.as_deref(), Some("localhost"));
        assert_eq!(record.port.as_deref(), Some("6390"));
    }

    #[test]
    fn test_parse_bare_cluster() {
        let record = parse("node1:7000, node2:7001,node3").unwrap();

        assert!(record.is_cluster());
        assert_eq!(record.host.as_deref(), Some("node1"));
        assert_eq!(record.port.as_deref(), Some("7000"));
        assert_eq!(
            record.cluster_hosts,
            Some(vec![
                "node1:7000".to_string(),
                "node2:7001".to_string(),
                "node3".to_string()
            ])
        );
        assert!(record.params.is_empty());
    }

    #[test]
    fn test_parse_cluster_with_scheme_and_auth() {
        let record = parse("rediss://user:p%40ss@h1:6379,h2:6379").unwrap();

        assert_eq!(record.protocol.as_deref(), Some("rediss"));
        assert_eq!(record.username.as_deref(), Some("user"));
        assert_eq!(record.password.as_deref(), Some("p@ss"));
        assert_eq!(record.host.as_deref(), Some("h1"));
        assert_eq!(record.cluster_hosts.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_parse_cluster_with_scheme_no_auth() {
        let record = parse("redis://h1,h2:6380").unwrap();

        assert_eq!(record.host.as_deref(), Some("h1"));
        assert_eq!(record.port.as_deref(), Some("6379"));
        assert_eq!(record.username, None);
        assert!(record.is_cluster());
    }

    #[test]
    fn test_parse_comma_in_password_is_not_a_cluster() {
        let record = parse("redis://:a,b@localhost:6379").unwrap();
        assert!(!record.is_cluster());
        assert_eq!(record.password.as_deref(), Some("a,b"));
    }

    #[test]
    fn test_parse_invalid_url() {
        let err = parse("redis://[::1").unwrap_err();
        assert!(err.to_string().contains(FORMAT_ERROR));
    }
}
