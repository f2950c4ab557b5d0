//! Unit types and traits.

use crate::formula::ConversionFormula;
use core::fmt::Debug;
use core::hash::Hash;

/// Static description of one unit, emitted by the generator for every unit of every quantity.
///
/// A descriptor is the unit identifier handed to an [`AbbreviationLookup`](crate::AbbreviationLookup).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitDescriptor {
    /// Name of the owning quantity, e.g. `"Pressure"`.
    pub quantity: &'static str,
    /// Singular unit name, e.g. `"Pascal"`.
    pub name: &'static str,
    /// Plural name used for the accessor/factory pair, e.g. `"Pascals"`.
    pub plural: &'static str,
    /// Display abbreviation declared in the schema. Empty when none was declared.
    pub abbreviation: &'static str,
    /// Conversion to the base unit of the quantity.
    pub formula: ConversionFormula,
}

/// Trait implemented by every generated **unit** enum.
///
/// Each variant names one unit of a single quantity. The base unit is the variant whose
/// formula is [`ConversionFormula::IDENTITY`]; there is exactly one per quantity.
pub trait Unit: Copy + Eq + Hash + Debug + 'static {
    /// Every unit of the quantity, in declaration order.
    fn all() -> &'static [Self];

    /// The static descriptor of this unit.
    fn descriptor(self) -> &'static UnitDescriptor;

    /// Conversion formula to the base unit.
    fn formula(self) -> ConversionFormula {
        self.descriptor().formula
    }

    /// Singular unit name.
    fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Whether this is the base unit.
    fn is_base(self) -> bool {
        self.formula().is_identity()
    }

    /// Finds a unit by name, plural name or abbreviation (ASCII case-insensitive).
    ///
    /// Abbreviations are compared case-sensitively first so that `"Mm"` and `"mm"` stay distinct.
    fn parse(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return None;
        }
        let units = Self::all();
        units
            .iter()
            .copied()
            .find(|u| u.descriptor().abbreviation == symbol)
            .or_else(|| {
                units.iter().copied().find(|u| {
                    let d = u.descriptor();
                    d.name.eq_ignore_ascii_case(symbol)
                        || d.plural.eq_ignore_ascii_case(symbol)
                        || d.abbreviation.eq_ignore_ascii_case(symbol)
                })
            })
    }
}

/// Converts `value` from one unit to another unit of the same quantity, through the base unit.
///
/// ```rust
/// use measura_core::{convert, ConversionFormula, Unit, UnitDescriptor};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum LengthUnit { Meter, Kilometer }
///
/// impl Unit for LengthUnit {
///     fn all() -> &'static [Self] { &[LengthUnit::Meter, LengthUnit::Kilometer] }
///     fn descriptor(self) -> &'static UnitDescriptor {
///         static UNITS: [UnitDescriptor; 2] = [
///             UnitDescriptor { quantity: "Length", name: "Meter", plural: "Meters", abbreviation: "m",
///                              formula: ConversionFormula::IDENTITY },
///             UnitDescriptor { quantity: "Length", name: "Kilometer", plural: "Kilometers", abbreviation: "km",
///                              formula: ConversionFormula::from_validated(1000.0, 0.0) },
///         ];
///         &UNITS[self as usize]
///     }
/// }
///
/// assert_eq!(convert(2.5, LengthUnit::Kilometer, LengthUnit::Meter), 2500.0);
/// ```
pub fn convert<U: Unit>(value: f64, from: U, to: U) -> f64 {
    if from == to {
        return value;
    }
    to.formula().from_base(from.formula().to_base(value))
}
