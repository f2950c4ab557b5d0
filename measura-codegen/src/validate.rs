//! Validation of a quantity definition before any code is emitted.
//!
//! Generation is all-or-nothing per definition: either every invariant holds and a
//! [`ValidatedQuantity`] is produced, or the first violation is returned as a [`SchemaError`].

use crate::error::{SchemaError, SchemaResult};
use crate::naming::{is_identifier, is_type_name, snake_case};
use crate::schema::{QuantityDefinition, UnitDefinition};
use measura_core::ConversionFormula;
use std::collections::HashSet;

/// Members of the runtime `Quantity` trait.
const QUANTITY_MEMBERS: &[&str] = &[
    "as_unit",
    "base_value",
    "compare_dyn",
    "compare_to",
    "display_with",
    "equals",
    "equals_dyn",
    "from_base",
    "from_unit",
    "zero",
];

/// Methods of the std traits every generated quantity derives or implements, `ToString`
/// included.
const STD_TRAIT_MEMBERS: &[&str] = &[
    "add",
    "add_assign",
    "clone",
    "clone_from",
    "default",
    "div",
    "div_assign",
    "eq",
    "fmt",
    "ge",
    "gt",
    "hash",
    "hash_slice",
    "le",
    "lt",
    "mul",
    "mul_assign",
    "ne",
    "neg",
    "partial_cmp",
    "sub",
    "sub_assign",
    "sum",
    "to_string",
];

/// Items the runtime exports next to the generated types, and prelude names the conformance
/// suites use unqualified. A quantity or unit enum with one of these names would shadow it.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "AbbreviationLookup",
    "AbbreviationTable",
    "AbbreviationTableError",
    "CompareError",
    "ConversionFormula",
    "Err",
    "InvalidFormulaError",
    "None",
    "Ok",
    "Quantity",
    "QuantityDisplay",
    "RoundedMagnitude",
    "SchemaAbbreviations",
    "Some",
    "Unit",
    "UnitDescriptor",
];

/// Inherent items of every unit enum; a variant cannot reuse them.
const RESERVED_VARIANTS: &[&str] = &["ALL"];

/// Method names an accessor or factory would shadow.
pub(crate) fn reserved_members() -> impl Iterator<Item = &'static str> {
    QUANTITY_MEMBERS
        .iter()
        .chain(STD_TRAIT_MEMBERS)
        .copied()
}

/// A unit whose names and formula passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedUnit<'a> {
    /// The unit as declared.
    pub definition: &'a UnitDefinition,
    /// Its conversion to the base unit.
    pub formula: ConversionFormula,
    /// `snake_case` plural, the accessor name.
    pub accessor: String,
}

impl ValidatedUnit<'_> {
    /// Variant name in the unit enum.
    pub fn variant(&self) -> &str {
        &self.definition.name
    }

    /// Name of the factory method.
    pub fn factory(&self) -> String {
        format!("from_{}", self.accessor)
    }

    /// Abbreviation `Display` prints: the declared one, or the unit name when none is declared.
    pub fn shown_abbreviation(&self) -> &str {
        if self.definition.abbreviation.is_empty() {
            &self.definition.name
        } else {
            &self.definition.abbreviation
        }
    }
}

/// A quantity definition that satisfies every generator invariant.
#[derive(Debug, Clone)]
pub struct ValidatedQuantity<'a> {
    /// The definition as declared.
    pub definition: &'a QuantityDefinition,
    /// Units in declaration order.
    pub units: Vec<ValidatedUnit<'a>>,
    base: usize,
}

impl<'a> ValidatedQuantity<'a> {
    /// Type name of the quantity.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Type name of the unit enum.
    pub fn unit_enum(&self) -> String {
        format!("{}Unit", self.definition.name)
    }

    /// The single base unit.
    pub fn base(&self) -> &ValidatedUnit<'a> {
        &self.units[self.base]
    }

    /// Test tolerance.
    pub fn tolerance(&self) -> f64 {
        self.definition.tolerance
    }
}

/// Checks every invariant of `definition`.
pub fn validate(definition: &QuantityDefinition) -> SchemaResult<ValidatedQuantity<'_>> {
    let quantity = || definition.name.clone();

    if !is_type_name(&definition.name) {
        return Err(SchemaError::InvalidIdentifier {
            quantity: quantity(),
            name: definition.name.clone(),
        });
    }

    let unit_enum = format!("{}Unit", definition.name);
    if let Some(item) = RESERVED_TYPE_NAMES
        .iter()
        .find(|item| **item == definition.name || **item == unit_enum)
    {
        return Err(SchemaError::ReservedName {
            quantity: quantity(),
            name: definition.name.clone(),
            member: (*item).to_string(),
        });
    }

    if !(definition.tolerance.is_finite() && definition.tolerance > 0.0) {
        return Err(SchemaError::InvalidTolerance {
            quantity: quantity(),
            tolerance: definition.tolerance,
        });
    }

    if definition.units.is_empty() {
        return Err(SchemaError::NoUnits {
            quantity: quantity(),
        });
    }

    let mut units = Vec::with_capacity(definition.units.len());
    let mut variants: HashSet<&str> = HashSet::new();
    let mut accessors: HashSet<String> = HashSet::new();

    for unit in &definition.units {
        if !is_type_name(&unit.name) {
            return Err(SchemaError::InvalidIdentifier {
                quantity: quantity(),
                name: unit.name.clone(),
            });
        }

        if RESERVED_VARIANTS.contains(&unit.name.as_str()) {
            return Err(SchemaError::ReservedName {
                quantity: quantity(),
                name: unit.name.clone(),
                member: format!("{}::{}", unit_enum, unit.name),
            });
        }

        let accessor = snake_case(&unit.plural);
        if !is_type_name(&unit.plural) || !is_identifier(&accessor) {
            return Err(SchemaError::InvalidIdentifier {
                quantity: quantity(),
                name: unit.plural.clone(),
            });
        }

        let factory = format!("from_{}", accessor);
        if let Some(member) = reserved_members().find(|m| *m == accessor || *m == factory) {
            return Err(SchemaError::ReservedName {
                quantity: quantity(),
                name: unit.plural.clone(),
                member: member.to_string(),
            });
        }

        let formula = unit
            .formula()
            .map_err(|source| SchemaError::InvalidFormula {
                quantity: quantity(),
                unit: unit.name.clone(),
                source,
            })?;

        if !variants.insert(&unit.name) {
            return Err(SchemaError::DuplicateUnitName {
                quantity: quantity(),
                unit: unit.name.clone(),
            });
        }

        if !accessors.insert(accessor.clone()) {
            return Err(SchemaError::DuplicatePluralName {
                quantity: quantity(),
                unit: unit.name.clone(),
                plural: unit.plural.clone(),
            });
        }

        units.push(ValidatedUnit {
            definition: unit,
            formula,
            accessor,
        });
    }

    let bases: Vec<usize> = units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.formula.is_identity())
        .map(|(i, _)| i)
        .collect();

    match bases.as_slice() {
        [] => Err(SchemaError::NoBaseUnit {
            quantity: quantity(),
        }),
        [base] => Ok(ValidatedQuantity {
            definition,
            units,
            base: *base,
        }),
        _ => Err(SchemaError::MultipleBaseUnits {
            quantity: quantity(),
            units: bases
                .iter()
                .map(|&i| units[i].definition.name.clone())
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measura_core::InvalidFormulaError;

    fn pressure() -> QuantityDefinition {
        QuantityDefinition::new("Pressure")
            .with_unit(UnitDefinition::scaled("Bar", "Bars", "bar", 1e5))
            .with_unit(UnitDefinition::base("Pascal", "Pascals", "Pa"))
            .with_unit(UnitDefinition::scaled(
                "KilogramForcePerSquareCentimeter",
                "KilogramForcePerSquareCentimeter",
                "kgf/cm²",
                9.80665e4,
            ))
    }

    #[test]
    fn valid_definition() {
        let def = pressure();
        let validated = validate(&def).unwrap();
        assert_eq!(validated.name(), "Pressure");
        assert_eq!(validated.unit_enum(), "PressureUnit");
        assert_eq!(validated.base().variant(), "Pascal");
        assert_eq!(validated.base().accessor, "pascals");
        assert_eq!(
            validated.units[2].factory(),
            "from_kilogram_force_per_square_centimeter"
        );
        let order: Vec<_> = validated.units.iter().map(|u| u.variant()).collect();
        assert_eq!(order, ["Bar", "Pascal", "KilogramForcePerSquareCentimeter"]);
    }

    #[test]
    fn no_units() {
        let def = QuantityDefinition::new("Empty");
        assert_eq!(
            validate(&def).unwrap_err(),
            SchemaError::NoUnits {
                quantity: "Empty".into()
            }
        );
    }

    #[test]
    fn no_base_unit() {
        let def = QuantityDefinition::new("Pressure")
            .with_unit(UnitDefinition::scaled("Bar", "Bars", "bar", 1e5));
        assert!(matches!(
            validate(&def),
            Err(SchemaError::NoBaseUnit { .. })
        ));
    }

    #[test]
    fn multiple_base_units_are_all_named() {
        let def = pressure().with_unit(UnitDefinition::base(
            "NewtonPerSquareMeter",
            "NewtonsPerSquareMeter",
            "N/m²",
        ));
        assert_eq!(
            validate(&def).unwrap_err(),
            SchemaError::MultipleBaseUnits {
                quantity: "Pressure".into(),
                units: vec!["Pascal".into(), "NewtonPerSquareMeter".into()],
            }
        );
    }

    #[test]
    fn offset_unit_is_not_a_base() {
        let def = QuantityDefinition::new("Temperature")
            .with_unit(UnitDefinition::base("Kelvin", "Kelvins", "K"))
            .with_unit(UnitDefinition::base("Celsius", "DegreesCelsius", "°C").with_offset(273.15));
        assert_eq!(validate(&def).unwrap().base().variant(), "Kelvin");
    }

    #[test]
    fn duplicate_plural_names() {
        let def = pressure().with_unit(UnitDefinition::scaled("Barye", "Bars", "Ba", 0.1));
        assert_eq!(
            validate(&def).unwrap_err(),
            SchemaError::DuplicatePluralName {
                quantity: "Pressure".into(),
                unit: "Barye".into(),
                plural: "Bars".into(),
            }
        );
    }

    #[test]
    fn plurals_colliding_after_snake_case_are_duplicates() {
        let def = QuantityDefinition::new("Data")
            .with_unit(UnitDefinition::base("Byte", "MegaBytes", "B"))
            .with_unit(UnitDefinition::scaled("MegaByte", "Mega_Bytes", "MB", 1e6));
        assert!(matches!(
            validate(&def),
            Err(SchemaError::DuplicatePluralName { ref unit, .. }) if unit == "MegaByte"
        ));
    }

    #[test]
    fn duplicate_unit_names() {
        let def = pressure().with_unit(UnitDefinition::scaled("Bar", "Barres", "bar", 1e5));
        assert!(matches!(
            validate(&def),
            Err(SchemaError::DuplicateUnitName { ref unit, .. }) if unit == "Bar"
        ));
    }

    #[test]
    fn zero_scale() {
        let def = pressure().with_unit(UnitDefinition::scaled("Void", "Voids", "", 0.0));
        assert_eq!(
            validate(&def).unwrap_err(),
            SchemaError::InvalidFormula {
                quantity: "Pressure".into(),
                unit: "Void".into(),
                source: InvalidFormulaError::ZeroScale { offset: 0.0 },
            }
        );
    }

    #[test]
    fn invalid_identifiers() {
        let bad_quantity = QuantityDefinition::new("fluid pressure")
            .with_unit(UnitDefinition::base("Pascal", "Pascals", "Pa"));
        assert!(matches!(
            validate(&bad_quantity),
            Err(SchemaError::InvalidIdentifier { .. })
        ));

        let keyword_accessor = QuantityDefinition::new("Odd")
            .with_unit(UnitDefinition::base("Kind", "Type", ""));
        assert!(matches!(
            validate(&keyword_accessor),
            Err(SchemaError::InvalidIdentifier { ref name, .. }) if name == "Type"
        ));
    }

    #[test]
    fn reserved_names() {
        let def = QuantityDefinition::new("Odd")
            .with_unit(UnitDefinition::base("Zero", "Zero", ""));
        assert!(matches!(
            validate(&def),
            Err(SchemaError::ReservedName { ref member, .. }) if member == "zero"
        ));

        let def = QuantityDefinition::new("Odd")
            .with_unit(UnitDefinition::base("Unit", "Unit", ""));
        assert!(matches!(
            validate(&def),
            Err(SchemaError::ReservedName { ref member, .. }) if member == "from_unit"
        ));
    }

    #[test]
    fn std_trait_methods_are_reserved() {
        for (plural, member) in [("Default", "default"), ("Hash", "hash"), ("Sum", "sum")] {
            let def = QuantityDefinition::new("Weird")
                .with_unit(UnitDefinition::base("Thing", plural, "d"))
                .with_unit(UnitDefinition::scaled("Other", "Others", "", 2.0));
            assert_eq!(
                validate(&def).unwrap_err(),
                SchemaError::ReservedName {
                    quantity: "Weird".into(),
                    name: plural.into(),
                    member: member.into(),
                }
            );
        }
    }

    #[test]
    fn variant_cannot_reuse_unit_table() {
        let def = QuantityDefinition::new("Odd")
            .with_unit(UnitDefinition::base("ALL", "Alls", "a"))
            .with_unit(UnitDefinition::scaled("Other", "Others", "", 2.0));
        assert_eq!(
            validate(&def).unwrap_err(),
            SchemaError::ReservedName {
                quantity: "Odd".into(),
                name: "ALL".into(),
                member: "OddUnit::ALL".into(),
            }
        );
    }

    #[test]
    fn runtime_type_names_are_reserved() {
        for name in ["Quantity", "Unit", "Some", "Err", "UnitDescriptor"] {
            let def = QuantityDefinition::new(name)
                .with_unit(UnitDefinition::base("Thing", "Things", ""));
            assert!(matches!(
                validate(&def),
                Err(SchemaError::ReservedName { ref member, .. }) if member == name
            ));
        }
    }

    #[test]
    fn tolerance_must_be_positive() {
        for tolerance in [0.0, -1e-5, f64::NAN, f64::INFINITY] {
            let def = pressure().with_tolerance(tolerance);
            assert!(matches!(
                validate(&def),
                Err(SchemaError::InvalidTolerance { .. })
            ));
        }
    }

    #[test]
    fn errors_name_the_definition() {
        let def = pressure().with_unit(UnitDefinition::scaled("Void", "Voids", "", 0.0));
        let err = validate(&def).unwrap_err();
        assert_eq!(err.quantity(), "Pressure");
        assert!(err.to_string().contains("Void"));
    }
}
