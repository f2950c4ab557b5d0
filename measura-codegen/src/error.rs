//! Error types for schema loading and generation.

use measura_core::InvalidFormulaError;
use std::path::PathBuf;

/// Result type for generation of a single definition.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A quantity definition violates a generator invariant.
///
/// Fatal to the offending definition only; every variant names it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("quantity `{quantity}` declares no units")]
    NoUnits { quantity: String },

    #[error("quantity `{quantity}` has no base unit (a unit with scale = 1 and offset = 0)")]
    NoBaseUnit { quantity: String },

    #[error("quantity `{quantity}` has more than one base unit: {}", .units.join(", "))]
    MultipleBaseUnits { quantity: String, units: Vec<String> },

    #[error("quantity `{quantity}` declares unit `{unit}` more than once")]
    DuplicateUnitName { quantity: String, unit: String },

    #[error("quantity `{quantity}`: plural name `{plural}` of unit `{unit}` is already used by another unit")]
    DuplicatePluralName {
        quantity: String,
        unit: String,
        plural: String,
    },

    #[error("quantity `{quantity}`: `{name}` is not a valid identifier")]
    InvalidIdentifier { quantity: String, name: String },

    #[error("quantity `{quantity}`: `{name}` would shadow `{member}`")]
    ReservedName {
        quantity: String,
        name: String,
        member: String,
    },

    #[error("quantity `{quantity}`, unit `{unit}`: {source}")]
    InvalidFormula {
        quantity: String,
        unit: String,
        #[source]
        source: InvalidFormulaError,
    },

    #[error("quantity `{quantity}`: tolerance must be finite and positive, got {tolerance}")]
    InvalidTolerance { quantity: String, tolerance: f64 },

    #[error("quantity `{quantity}` would emit `{item}`, which an earlier quantity already defines")]
    DuplicateQuantity { quantity: String, item: String },
}

impl SchemaError {
    /// Name of the definition this error belongs to.
    pub fn quantity(&self) -> &str {
        match self {
            SchemaError::NoUnits { quantity }
            | SchemaError::NoBaseUnit { quantity }
            | SchemaError::MultipleBaseUnits { quantity, .. }
            | SchemaError::DuplicateUnitName { quantity, .. }
            | SchemaError::DuplicatePluralName { quantity, .. }
            | SchemaError::InvalidIdentifier { quantity, .. }
            | SchemaError::ReservedName { quantity, .. }
            | SchemaError::InvalidFormula { quantity, .. }
            | SchemaError::InvalidTolerance { quantity, .. }
            | SchemaError::DuplicateQuantity { quantity, .. } => quantity,
        }
    }
}

/// Error raised while reading a schema document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read schema file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON schema: {0}")]
    Json(#[from] serde_json::Error),
}
