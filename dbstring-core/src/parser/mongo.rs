//! MongoDB URI grammar (`mongodb://` and `mongodb+srv://`).

use tracing::trace;

use crate::models::{ConnectionRecord, DatabaseType};
use crate::uri::{non_empty, parse_query, split_credentials, split_host_port};

/// Parses a Mongo URI whose scheme has already been detected.
///
/// SRV records never carry a port; their topology is resolved through DNS.
pub(super) fn parse(
    raw: &str,
    scheme: &str,
    db_type: DatabaseType,
) -> crate::Result<ConnectionRecord> {
    let mut record = ConnectionRecord::new(db_type);
    record.protocol = Some(scheme.to_string());
    let is_srv = db_type == DatabaseType::MongoAtlas;

    let without_scheme = raw
        .strip_prefix(scheme)
        .and_then(|rest| rest.strip_prefix("://"))
        .ok_or_else(|| crate::DbStringError::invalid("Invalid MongoDB connection string format"))?;

    let (authority_and_path, query) = match without_scheme.split_once('?') {
        Some((left, query)) => (left, Some(query)),
        None => (without_scheme, None),
    };

    let host_segment = match authority_and_path.rsplit_once('@') {
        Some((credentials, hosts)) => {
            let (username, password) = split_credentials(credentials);
            record.username = username;
            record.password = password;
            hosts
        }
        None => authority_and_path,
    };

    let (hosts, path) = match host_segment.split_once('/') {
        Some((hosts, path)) => (hosts, Some(path)),
        None => (host_segment, None),
    };

    if is_srv {
        record.host = non_empty(hosts);
    } else if hosts.contains(',') {
        let seeds: Vec<String> = hosts
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect();
        if let Some(first) = seeds.first() {
            let (host, port) = split_host_port(first);
            record.host = non_empty(&host);
            record.port = port;
        }
        trace!("Mongo seed list with {} hosts", seeds.len());
        record.cluster_hosts = Some(seeds);
    } else {
        let (host, port) = split_host_port(hosts);
        record.host = non_empty(&host);
        record.port = port;
    }

    record.db_name = path.and_then(non_empty);

    if let Some(query) = query {
        record.params = parse_query(query);
    }

    Ok(record)
}
