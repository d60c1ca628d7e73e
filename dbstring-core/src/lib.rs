//! Connection string detection, parsing, reconstruction and protection.
//!
//! `dbstring-core` turns heterogeneous database connection strings (MongoDB,
//! Azure CosmosDB, SQL Server, Redis, MySQL, PostgreSQL) into a single
//! [`ConnectionRecord`] and turns that record back into a string of the
//! right grammar. A secret can be supplied to keep the password and the raw
//! input encrypted inside the record.
//!
//! # Security Guarantees
//! - Errors and log lines never contain raw connection strings or passwords
//! - Every cipher token uses a fresh random IV/nonce
//! - Key material and decrypted passwords live in zeroizing buffers
//! - No network access: all operations are pure string transformations
//!
//! # Example
//! ```rust
//! use dbstring_core::{parse_connection_string, reconstruct_connection_string};
//!
//! let record = parse_connection_string("redis://:s3cret@cache:6380/1", Some("operator-key"))?;
//! assert!(record.encrypted);
//! assert_ne!(record.password.as_deref(), Some("s3cret"));
//!
//! let rebuilt = reconstruct_connection_string(&record, Some("operator-key"))?;
//! assert_eq!(rebuilt, "redis://:s3cret@cache:6380/1");
//! # Ok::<(), dbstring_core::DbStringError>(())
//! ```

pub mod config;
pub mod detect;
pub mod error;
pub mod logging;
pub mod models;
pub mod parser;
pub mod reconstructor;
pub mod security;
mod uri;

// Re-export commonly used types
pub use config::{CodecConfig, DecryptFailurePolicy};
pub use detect::{DETECTION_RULES, DetectionRule, Dialect, detect_dialect, matching_rule};
pub use error::{DbStringError, Result, redact_connection_string};
pub use models::{ConnectionRecord, DatabaseType};
pub use parser::{parse_connection_string, parse_connection_string_with};
pub use reconstructor::{reconstruct_connection_string, reconstruct_connection_string_with};
pub use security::encryption;
