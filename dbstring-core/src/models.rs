//! Canonical connection record shared by parsing and reconstruction.
//!
//! Every dialect parser fills a [`ConnectionRecord`] and every serializer in
//! the reconstructor consumes one. The record is dialect-agnostic: values that
//! only some grammars carry (SQL Server instance names, the literal Cosmos
//! endpoint, cluster host lists) are explicit optional fields rather than
//! reserved keys inside `params`, so they can never leak back out as query
//! parameters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::security::encryption::{CipherAlgorithm, decrypt_token};

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DatabaseType {
    #[serde(rename = "mongodb atlas")]
    MongoAtlas,
    #[serde(rename = "mongodb compass")]
    MongoCompass,
    #[serde(rename = "azure cosmosdb")]
    AzureCosmos,
    #[serde(rename = "mysql")]
    MySQL,
    #[serde(rename = "postgresql")]
    PostgreSQL,
    #[serde(rename = "redis")]
    Redis,
    #[serde(rename = "sql server")]
    SqlServer,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl DatabaseType {
    /// Whether this dialect is a managed cloud offering.
    pub fn is_cloud(self) -> bool {
        matches!(self, DatabaseType::MongoAtlas | DatabaseType::AzureCosmos)
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseType::MongoAtlas => write!(f, "MongoDB Atlas"),
            DatabaseType::MongoCompass => write!(f, "MongoDB Compass"),
            DatabaseType::AzureCosmos => write!(f, "Azure CosmosDB"),
            DatabaseType::MySQL => write!(f, "MySQL"),
            DatabaseType::PostgreSQL => write!(f, "PostgreSQL"),
            DatabaseType::Redis => write!(f, "Redis"),
            DatabaseType::SqlServer => write!(f, "SQL Server"),
            DatabaseType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Dialect-agnostic representation of a parsed connection string.
///
/// # Security
/// When `encrypted` is true, `password` and `original_string` hold cipher
/// tokens (`ivHex:cipherHex`) rather than plaintext. The same secret must be
/// handed to the reconstructor to recover a usable connection string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub db_type: DatabaseType,
    #[serde(default)]
    pub is_cloud: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    /// Pass-through options in input order
    #[serde(default)]
    pub params: IndexMap<String, String>,
    /// SQL Server named instance (`host\INSTANCE`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Literal Cosmos `AccountEndpoint` value, preferred over a re-derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_endpoint: Option<String>,
    /// Every `host[:port]` of a Redis cluster or Mongo seed list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_hosts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_string: Option<String>,
    /// True when `password` and `original_string` hold cipher tokens
    #[serde(default)]
    pub encrypted: bool,
}

impl ConnectionRecord {
    /// Creates an empty record for the given dialect.
    pub fn new(db_type: DatabaseType) -> Self {
        Self {
            db_type,
            is_cloud: db_type.is_cloud(),
            ..Default::default()
        }
    }

    /// True when the record describes a multi-host cluster.
    pub fn is_cluster(&self) -> bool {
        self.cluster_hosts.is_some()
    }

    /// Returns the original connection string in plaintext.
    ///
    /// Plain records return the stored value; encrypted records require the
    /// secret used at parse time.
    ///
    /// # Errors
    /// Returns an error if the record is encrypted and no secret is given, or
    /// if the stored token cannot be decrypted.
    pub fn reveal_original_string(
        &self,
        secret: Option<&str>,
        cipher: CipherAlgorithm,
    ) -> crate::Result<Option<String>> {
        let Some(original) = self.original_string.as_deref() else {
            return Ok(None);
        };

        if !self.encrypted {
            return Ok(Some(original.to_string()));
        }

        match secret {
            Some(secret) => decrypt_token(original, secret, cipher).map(Some),
            None => Err(crate::error::DbStringError::decryption(
                "record is encrypted but no secret was supplied",
            )),
        }
    }
}
