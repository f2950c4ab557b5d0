//! Display formatting and the abbreviation lookup collaborator.
//!
//! A quantity prints its base-unit magnitude rounded half away from zero to at most two fractional
//! digits, then the abbreviation of the base unit. The abbreviation comes from an injected
//! [`AbbreviationLookup`]; when the lookup has nothing for a unit the bare unit name is printed.

use crate::unit::UnitDescriptor;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// Capability `abbreviationOf(unit) -> string`, consulted only when formatting.
pub trait AbbreviationLookup {
    /// Abbreviation of `unit`, or `None` when this lookup cannot provide one.
    fn abbreviation_of(&self, unit: &UnitDescriptor) -> Option<Cow<'_, str>>;
}

/// Lookup backed by the abbreviations declared in the schema.
///
/// This is what `Display` uses for every generated quantity.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaAbbreviations;

impl AbbreviationLookup for SchemaAbbreviations {
    fn abbreviation_of(&self, unit: &UnitDescriptor) -> Option<Cow<'_, str>> {
        if unit.abbreviation.is_empty() {
            None
        } else {
            Some(Cow::Borrowed(unit.abbreviation))
        }
    }
}

impl<F> AbbreviationLookup for F
where
    F: Fn(&UnitDescriptor) -> Option<String>,
{
    fn abbreviation_of(&self, unit: &UnitDescriptor) -> Option<Cow<'_, str>> {
        self(unit).map(Cow::Owned)
    }
}

/// Error raised while loading an [`AbbreviationTable`].
#[derive(Debug, thiserror::Error)]
pub enum AbbreviationTableError {
    /// The file could not be read.
    #[error("Failed to read abbreviation table: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML document is malformed.
    #[error("Failed to parse abbreviation table: {0}")]
    Parse(#[from] toml::de::Error),
}

/// User-supplied abbreviations keyed by quantity and unit name, e.g. a localized table.
///
/// The TOML form has one table per quantity:
///
/// ```toml
/// [Pressure]
/// Pascal = "Па"
/// Bar = "бар"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AbbreviationTable {
    entries: HashMap<String, HashMap<String, String>>,
}

impl AbbreviationTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the abbreviation of `unit` in `quantity`, replacing any previous entry.
    pub fn insert(
        &mut self,
        quantity: impl Into<String>,
        unit: impl Into<String>,
        abbreviation: impl Into<String>,
    ) -> &mut Self {
        self.entries
            .entry(quantity.into())
            .or_default()
            .insert(unit.into(), abbreviation.into());
        self
    }

    /// Number of unit entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses a table from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, AbbreviationTableError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a table from a TOML file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, AbbreviationTableError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

impl AbbreviationLookup for AbbreviationTable {
    fn abbreviation_of(&self, unit: &UnitDescriptor) -> Option<Cow<'_, str>> {
        self.entries
            .get(unit.quantity)
            .and_then(|units| units.get(unit.name))
            .map(|a| Cow::Borrowed(a.as_str()))
    }
}

/// Magnitude rounded for display: half away from zero, at most two fractional digits.
///
/// Trailing zeros are dropped (`1.5`, `2`, `1.23`) and negative zero prints as `0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedMagnitude(pub f64);

// Above this every f64 is an integer at two-digit precision and `* 100.0` may overflow
const UNROUNDED_ABOVE: f64 = 1e15;

impl RoundedMagnitude {
    /// The rounded value that will be printed.
    pub fn rounded(self) -> f64 {
        let value = self.0;
        let rounded = if !value.is_finite() || value.abs() >= UNROUNDED_ABOVE {
            value
        } else {
            (value * 100.0).round() / 100.0
        };
        // -0.0 + 0.0 == +0.0
        rounded + 0.0
    }
}

impl Display for RoundedMagnitude {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded())
    }
}

/// Formatter returned by [`Quantity::display_with`](crate::Quantity::display_with).
pub struct QuantityDisplay<'a, L: ?Sized> {
    value: f64,
    unit: &'static UnitDescriptor,
    lookup: &'a L,
}

impl<'a, L: AbbreviationLookup + ?Sized> QuantityDisplay<'a, L> {
    /// Formats `value`, expressed in `unit`, using `lookup` for the abbreviation.
    pub fn new(value: f64, unit: &'static UnitDescriptor, lookup: &'a L) -> Self {
        Self {
            value,
            unit,
            lookup,
        }
    }
}

impl<L: AbbreviationLookup + ?Sized> Display for QuantityDisplay<'_, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let magnitude = RoundedMagnitude(self.value);
        match self.lookup.abbreviation_of(self.unit) {
            Some(abbreviation) => write!(f, "{} {}", magnitude, abbreviation),
            None => {
                log::debug!(
                    "no abbreviation for {}::{}, using the unit name",
                    self.unit.quantity,
                    self.unit.name
                );
                write!(f, "{} {}", magnitude, self.unit.name)
            }
        }
    }
}

impl<L: ?Sized> fmt::Debug for QuantityDisplay<'_, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuantityDisplay")
            .field("value", &self.value)
            .field("unit", &self.unit.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConversionFormula;

    static PASCAL: UnitDescriptor = UnitDescriptor {
        quantity: "Pressure",
        name: "Pascal",
        plural: "Pascals",
        abbreviation: "Pa",
        formula: ConversionFormula::IDENTITY,
    };

    static NAMELESS: UnitDescriptor = UnitDescriptor {
        quantity: "Foo",
        name: "Foo",
        plural: "Foos",
        abbreviation: "",
        formula: ConversionFormula::IDENTITY,
    };

    // ─────────────────────────────────────────────────────────────────────────────
    // Rounding
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn rounds_to_two_fractional_digits() {
        assert_eq!(RoundedMagnitude(1.234).to_string(), "1.23");
        assert_eq!(RoundedMagnitude(1.236).to_string(), "1.24");
        assert_eq!(RoundedMagnitude(-1.236).to_string(), "-1.24");
    }

    #[test]
    fn drops_trailing_zeros() {
        assert_eq!(RoundedMagnitude(2.0).to_string(), "2");
        assert_eq!(RoundedMagnitude(1.5).to_string(), "1.5");
        assert_eq!(RoundedMagnitude(1.001).to_string(), "1");
    }

    #[test]
    fn ties_round_away_from_zero() {
        // 0.125 and 0.375 are exact in binary
        assert_eq!(RoundedMagnitude(0.125).to_string(), "0.13");
        assert_eq!(RoundedMagnitude(-0.125).to_string(), "-0.13");
        assert_eq!(RoundedMagnitude(0.375).to_string(), "0.38");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(RoundedMagnitude(-0.0).to_string(), "0");
        assert_eq!(RoundedMagnitude(-0.001).to_string(), "0");
    }

    #[test]
    fn huge_and_non_finite_values_are_unrounded() {
        assert_eq!(RoundedMagnitude(1e300).rounded(), 1e300);
        assert_eq!(RoundedMagnitude(f64::INFINITY).to_string(), "inf");
        assert_eq!(RoundedMagnitude(f64::NAN).to_string(), "NaN");
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Lookup and fallback
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn schema_lookup_uses_declared_abbreviation() {
        let shown = QuantityDisplay::new(1.0, &PASCAL, &SchemaAbbreviations).to_string();
        assert_eq!(shown, "1 Pa");
    }

    #[test]
    fn missing_abbreviation_falls_back_to_unit_name() {
        let shown = QuantityDisplay::new(2.5, &NAMELESS, &SchemaAbbreviations).to_string();
        assert_eq!(shown, "2.5 Foo");
    }

    #[test]
    fn closure_lookup_is_injected() {
        let upper = |u: &UnitDescriptor| Some(u.abbreviation.to_uppercase());
        let shown = QuantityDisplay::new(3.0, &PASCAL, &upper).to_string();
        assert_eq!(shown, "3 PA");

        let failing = |_: &UnitDescriptor| None::<String>;
        let shown = QuantityDisplay::new(3.0, &PASCAL, &failing).to_string();
        assert_eq!(shown, "3 Pascal");
    }

    #[test]
    fn table_lookup_by_quantity_and_unit() {
        let mut table = AbbreviationTable::new();
        table.insert("Pressure", "Pascal", "Па");
        assert_eq!(table.len(), 1);

        let shown = QuantityDisplay::new(1.0, &PASCAL, &table).to_string();
        assert_eq!(shown, "1 Па");

        let shown = QuantityDisplay::new(1.0, &NAMELESS, &table).to_string();
        assert_eq!(shown, "1 Foo");
    }

    #[test]
    fn table_from_toml() {
        let table = AbbreviationTable::from_toml_str(
            r#"
            [Pressure]
            Pascal = "N/m²"
            Bar = "bar"
            "#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.abbreviation_of(&PASCAL).as_deref(),
            Some("N/m²")
        );
    }

    #[test]
    fn table_from_malformed_toml_fails() {
        let err = AbbreviationTable::from_toml_str("Pressure = 3").unwrap_err();
        assert!(matches!(err, AbbreviationTableError::Parse(_)));
    }
}
