//! Azure CosmosDB `AccountEndpoint=...;AccountKey=...;` grammar.

use tracing::trace;
use url::Url;

use crate::models::{ConnectionRecord, DatabaseType};
use crate::uri::non_empty;

/// Parses a Cosmos key/value string or a bare account endpoint URL.
///
/// Unknown keys pass through to `params` with their original spelling.
/// Account keys are base64 and end in `=` padding, so each token splits on
/// its first `=` only.
pub(super) fn parse(raw: &str) -> ConnectionRecord {
    let mut record = ConnectionRecord::new(DatabaseType::AzureCosmos);

    for token in raw.split(';').map(str::trim).filter(|t| !t.is_empty()) {
        let Some((key, value)) = token.split_once('=') else {
            if record.original_endpoint.is_none() && token.contains("://") {
                apply_endpoint(&mut record, token);
            }
            continue;
        };

        let key = key.trim();
        let value = value.trim();
        match key.to_lowercase().as_str() {
            "accountendpoint" => apply_endpoint(&mut record, value),
            "accountkey" => record.password = non_empty(value),
            "databasename" | "database" => record.db_name = non_empty(value),
            _ if key.is_empty() => {}
            _ => {
                record.params.insert(key.to_string(), value.to_string());
            }
        }
    }

    record
}

fn apply_endpoint(record: &mut ConnectionRecord, endpoint: &str) {
    record.original_endpoint = non_empty(endpoint);

    match Url::parse(endpoint) {
        Ok(url) => {
            record.protocol = Some(url.scheme().to_string());
            record.host = url.host_str().and_then(non_empty);
            record.port = url.port().map(|p| p.to_string());
        }
        Err(e) => {
            trace!("Cosmos endpoint is not a URL ({e}), keeping it as host");
            record.host = non_empty(endpoint);
        }
    }
}
