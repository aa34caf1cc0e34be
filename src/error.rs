use std::fmt;

/// Schema description validation error
///
/// Returned by [`crate::schema::SchemaDescription::validate`] before any file
/// is rendered, so a malformed description never produces partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The description contains no table at all
    Empty,
    /// A table key is empty or whitespace
    EmptyTableName,
    /// A table name has no letter or digit to build a model name from
    UnusableTableName {
        /// The offending table key
        table: String,
    },
    /// Two tables map to the same model name
    DuplicateModelName {
        /// Table seen first, by name order
        first: String,
        /// Table whose model name collides with `first`
        second: String,
    },
    /// A field has an empty attribute name
    EmptyFieldName {
        /// Table owning the field
        table: String,
    },
    /// A field has an empty column name
    EmptyColumnName {
        /// Table owning the field
        table: String,
        /// Attribute name of the field
        field: String,
    },
    /// A field has no Sequelize data type
    EmptyFieldType {
        /// Table owning the field
        table: String,
        /// Attribute name of the field
        field: String,
    },
    /// Two fields render to the same attribute key
    DuplicateField {
        /// Table owning the fields
        table: String,
        /// The colliding attribute key
        key: String,
    },
    /// A reference has an empty target table
    MissingReferenceTarget {
        /// Table owning the reference
        table: String,
    },
    /// A reference has an empty alias (`as`)
    MissingAlias {
        /// Table owning the reference
        table: String,
        /// Target table of the reference
        target: String,
    },
    /// A reference lacks a required key
    MissingReferenceKey {
        /// Table owning the reference
        table: String,
        /// Alias of the reference
        alias: String,
        /// Name of the missing key (`foreignKey`, `through`, ...)
        key: &'static str,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Empty => {
                write!(f, "Schema error: the description does not contain any table")
            }
            SchemaError::EmptyTableName => {
                write!(f, "Schema error: a table has an empty name")
            }
            SchemaError::UnusableTableName { table } => {
                write!(
                    f,
                    "Schema error: table '{table}' does not yield a usable model name"
                )
            }
            SchemaError::DuplicateModelName { first, second } => {
                write!(
                    f,
                    "Schema error: tables '{first}' and '{second}' map to the same model name"
                )
            }
            SchemaError::EmptyFieldName { table } => {
                write!(f, "Schema error: table '{table}' has a field with an empty name")
            }
            SchemaError::EmptyColumnName { table, field } => {
                write!(
                    f,
                    "Schema error: field '{field}' of table '{table}' has an empty column name"
                )
            }
            SchemaError::EmptyFieldType { table, field } => {
                write!(
                    f,
                    "Schema error: field '{field}' of table '{table}' has no data type"
                )
            }
            SchemaError::DuplicateField { table, key } => {
                write!(
                    f,
                    "Schema error: table '{table}' declares the attribute {key} more than once"
                )
            }
            SchemaError::MissingReferenceTarget { table } => {
                write!(
                    f,
                    "Schema error: table '{table}' has an association without a target table"
                )
            }
            SchemaError::MissingAlias { table, target } => {
                write!(
                    f,
                    "Schema error: association from '{table}' to '{target}' has no alias (as)"
                )
            }
            SchemaError::MissingReferenceKey { table, alias, key } => {
                write!(
                    f,
                    "Schema error: association '{alias}' of table '{table}' is missing {key}"
                )
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Generator configuration error
///
/// Returned by [`crate::config::DumperConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `appName` is empty; it names both the output directory and the package
    EmptyAppName,
    /// `appPort` is 0
    InvalidPort,
    /// `db` is enabled but no connection URL was given
    MissingConnectionUrl,
    /// The connection URL cannot be parsed
    InvalidConnectionUrl {
        /// The offending URL
        url: String,
        /// Parser message
        reason: String,
    },
    /// The connection URL scheme does not belong to the configured dialect
    DialectMismatch {
        /// Configured dialect
        dialect: String,
        /// Scheme found in the URL
        scheme: String,
    },
    /// An OS override could not be recognised
    UnknownTargetOs {
        /// The unrecognised value
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyAppName => {
                write!(f, "Configuration error: appName must not be empty")
            }
            ConfigError::InvalidPort => {
                write!(f, "Configuration error: appPort must be between 1 and 65535")
            }
            ConfigError::MissingConnectionUrl => {
                write!(
                    f,
                    "Configuration error: dbConnectionUrl is required when db is enabled"
                )
            }
            ConfigError::InvalidConnectionUrl { url, reason } => {
                write!(
                    f,
                    "Configuration error: invalid dbConnectionUrl '{url}': {reason}"
                )
            }
            ConfigError::DialectMismatch { dialect, scheme } => {
                write!(
                    f,
                    "Configuration error: connection URL scheme '{scheme}' does not match dialect '{dialect}'"
                )
            }
            ConfigError::UnknownTargetOs { value } => {
                write!(
                    f,
                    "Configuration error: unknown target OS '{value}'. \
                    Expected one of: linux, darwin, macos, windows, other"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
