//! Declarative quantity schema.
//!
//! A schema is a list of quantity definitions, each naming its units and their conversion
//! formulas against the base unit. The TOML form used by the `measura` crate:
//!
//! ```toml
//! [[quantity]]
//! name = "Pressure"
//! tolerance = 1e-5
//!
//! [[quantity.unit]]
//! name = "Pascal"
//! plural = "Pascals"
//! abbreviation = "Pa"
//! scale = 1.0
//!
//! [[quantity.unit]]
//! name = "Bar"
//! plural = "Bars"
//! abbreviation = "bar"
//! scale = 1e5
//! ```
//!
//! JSON documents use the same keys (`quantity`, `unit`).

use crate::error::LoadError;
use measura_core::{ConversionFormula, InvalidFormulaError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tolerance used by generated tests when a definition does not set one.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// One unit of a quantity: `value_in_base = scale · value_in_unit + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    /// Singular name, used as the enum variant (`Pascal`).
    pub name: String,
    /// Plural name, used for the factory and accessor (`Pascals` → `from_pascals` / `pascals`).
    pub plural: String,
    /// Abbreviation shown by `Display`; empty means "none", falling back to the name.
    #[serde(default)]
    pub abbreviation: String,
    /// Multiplicative factor to the base unit.
    pub scale: f64,
    /// Additive offset to the base unit.
    #[serde(default)]
    pub offset: f64,
}

impl UnitDefinition {
    /// A unit related to the base by a pure scale factor.
    pub fn scaled(
        name: impl Into<String>,
        plural: impl Into<String>,
        abbreviation: impl Into<String>,
        scale: f64,
    ) -> Self {
        Self {
            name: name.into(),
            plural: plural.into(),
            abbreviation: abbreviation.into(),
            scale,
            offset: 0.0,
        }
    }

    /// A base unit (identity formula).
    pub fn base(
        name: impl Into<String>,
        plural: impl Into<String>,
        abbreviation: impl Into<String>,
    ) -> Self {
        Self::scaled(name, plural, abbreviation, 1.0)
    }

    /// Sets the additive offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// The validated conversion formula of this unit.
    pub fn formula(&self) -> Result<ConversionFormula, InvalidFormulaError> {
        ConversionFormula::new(self.scale, self.offset)
    }

    /// Whether this unit is declared as the base unit.
    pub fn is_base(&self) -> bool {
        self.scale == 1.0 && self.offset == 0.0
    }
}

/// A physical quantity and the units it can be expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityDefinition {
    /// Type name of the generated quantity (`Pressure`).
    pub name: String,
    /// Absolute tolerance of the generated conversion tests.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Units in declaration order; the order is preserved in the generated code.
    #[serde(rename = "unit", default)]
    pub units: Vec<UnitDefinition>,
}

impl QuantityDefinition {
    /// An empty definition with the default tolerance.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tolerance: DEFAULT_TOLERANCE,
            units: Vec::new(),
        }
    }

    /// Appends a unit.
    pub fn with_unit(mut self, unit: UnitDefinition) -> Self {
        self.units.push(unit);
        self
    }

    /// Sets the test tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Units whose formula is the identity.
    pub fn base_units(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.units.iter().filter(|u| u.is_base())
    }
}

/// A set of quantity definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Definitions in document order.
    #[serde(rename = "quantity", default)]
    pub quantities: Vec<QuantityDefinition>,
}

impl Schema {
    /// Builds a schema from definitions.
    pub fn new(quantities: Vec<QuantityDefinition>) -> Self {
        Self { quantities }
    }

    /// Parses a TOML schema.
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    /// Parses a JSON schema.
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads a schema file; `.json` files are read as JSON, anything else as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Looks up a definition by name.
    pub fn quantity(&self, name: &str) -> Option<&QuantityDefinition> {
        self.quantities.iter().find(|q| q.name == name)
    }
}
