//! Connection string dialect detection.
//!
//! Several grammars overlap (a bare `host:port` could be SQL Server or Redis,
//! a Cosmos string contains `=` like a SQL Server one), so detection is an
//! ordered rule table where the first matching rule wins. The table is public
//! so each rule can be inspected and tested on its own.

use serde::{Deserialize, Serialize};

/// Connection-string grammar, one per parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// `mongodb+srv://` DNS seed list URI
    MongoSrv,
    /// `mongodb://` standard URI
    MongoStandard,
    /// Azure CosmosDB `AccountEndpoint=...;AccountKey=...` string
    AzureCosmos,
    /// ADO.NET key/value or `mssql://` URL
    SqlServer,
    /// `redis://`, bare `host:port`, or comma-separated cluster list
    Redis,
    /// Anything else; classified later by URL scheme
    GenericUrl,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MongoSrv => write!(f, "mongo-srv"),
            Dialect::MongoStandard => write!(f, "mongo-standard"),
            Dialect::AzureCosmos => write!(f, "azure-cosmos"),
            Dialect::SqlServer => write!(f, "sql-server"),
            Dialect::Redis => write!(f, "redis"),
            Dialect::GenericUrl => write!(f, "generic-url"),
        }
    }
}

/// A single named detection rule.
#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub name: &'static str,
    pub dialect: Dialect,
    pub matches: fn(&str) -> bool,
}

fn is_mongo_srv(raw: &str) -> bool {
    raw.starts_with("mongodb+srv://")
}

fn is_mongo_standard(raw: &str) -> bool {
    raw.starts_with("mongodb://")
}

fn is_azure_cosmos(raw: &str) -> bool {
    raw.contains("AccountEndpoint=") || raw.contains(".documents.azure.com")
}

fn is_sql_server(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    lower.contains("server=")
        || lower.contains("data source=")
        || raw.starts_with("mssql://")
        || raw.starts_with("sqlserver://")
}

fn is_redis(raw: &str) -> bool {
    raw.starts_with("redis://")
        || raw.starts_with("rediss://")
        || (!raw.contains("://") && (raw.contains(':') || raw.contains(',')))
}

/// Detection rules in evaluation order. The generic URL fallback is implicit.
pub const DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        name: "mongodb+srv scheme",
        dialect: Dialect::MongoSrv,
        matches: is_mongo_srv,
    },
    DetectionRule {
        name: "mongodb scheme",
        dialect: Dialect::MongoStandard,
        matches: is_mongo_standard,
    },
    DetectionRule {
        name: "cosmos account endpoint",
        dialect: Dialect::AzureCosmos,
        matches: is_azure_cosmos,
    },
    DetectionRule {
        name: "sql server keywords or scheme",
        dialect: Dialect::SqlServer,
        matches: is_sql_server,
    },
    DetectionRule {
        name: "redis scheme, cluster list, or bare host:port",
        dialect: Dialect::Redis,
        matches: is_redis,
    },
];

/// Returns the first rule matching `raw`, if any.
pub fn matching_rule(raw: &str) -> Option<&'static DetectionRule> {
    DETECTION_RULES.iter().find(|rule| (rule.matches)(raw))
}

/// Classifies a raw connection string into exactly one dialect.
///
/// # Example
/// ```rust
/// use dbstring_core::detect::{Dialect, detect_dialect};
///
/// assert_eq!(detect_dialect("mongodb+srv://cluster0.example.net"), Dialect::MongoSrv);
/// assert_eq!(detect_dialect("localhost:6379"), Dialect::Redis);
/// assert_eq!(detect_dialect("postgres://localhost/db"), Dialect::GenericUrl);
/// ```
pub fn detect_dialect(raw: &str) -> Dialect {
    matching_rule(raw).map_or(Dialect::GenericUrl, |rule| rule.dialect)
}
