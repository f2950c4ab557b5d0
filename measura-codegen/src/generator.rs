//! Batch generation over a whole schema.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{QuantityDefinition, Schema};
use crate::test_gen::{emit_suite, suite_module_name, TestSuiteOptions};
use crate::type_gen::emit_type;
use crate::validate::validate;
use std::collections::HashSet;

/// Code generated for a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedSources {
    /// Every value type, in schema order.
    pub types: String,
    /// Every conformance suite, in schema order.
    pub tests: String,
    /// Names of the quantities present in both outputs.
    pub emitted: Vec<String>,
    /// Definitions left out of both outputs.
    pub failures: Vec<SchemaError>,
}

impl GeneratedSources {
    /// Whether every definition was emitted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generates value types and conformance suites from quantity definitions.
///
/// Output depends only on the input: the same schema always yields byte-identical sources.
#[derive(Debug, Clone)]
pub struct Generator {
    runtime_path: String,
    tests: TestSuiteOptions,
}

impl Default for Generator {
    fn default() -> Self {
        let tests = TestSuiteOptions::default();
        Self {
            runtime_path: tests.runtime_path.clone(),
            tests,
        }
    }
}

impl Generator {
    /// A generator referring to the runtime through `::measura`, with suites importing the
    /// types from `::measura` too.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime path used by the types and the suites.
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.tests.runtime_path = path.clone();
        self.runtime_path = path;
        self
    }

    /// Sets the path the suites import the generated types from.
    pub fn types_path(mut self, path: impl Into<String>) -> Self {
        self.tests.types_path = path.into();
        self
    }

    /// Suite options in effect.
    pub fn test_options(&self) -> &TestSuiteOptions {
        &self.tests
    }

    /// Generates the value type of one definition.
    pub fn generate_type(&self, definition: &QuantityDefinition) -> SchemaResult<String> {
        let quantity = validate(definition)?;
        Ok(emit_type(&quantity, &self.runtime_path))
    }

    /// Generates the conformance suite of one definition.
    pub fn generate_tests(&self, definition: &QuantityDefinition) -> SchemaResult<String> {
        let quantity = validate(definition)?;
        Ok(emit_suite(&quantity, &self.tests))
    }

    /// Generates the value type and the suite of one definition, or neither.
    pub fn generate_quantity(
        &self,
        definition: &QuantityDefinition,
    ) -> SchemaResult<(String, String)> {
        let quantity = validate(definition)?;
        Ok((
            emit_type(&quantity, &self.runtime_path),
            emit_suite(&quantity, &self.tests),
        ))
    }

    /// Generates every definition of `schema`.
    ///
    /// A definition that fails validation is reported in [`GeneratedSources::failures`] and
    /// left out of both outputs; the others are still generated. A definition emitting an item
    /// (type, unit enum or suite module) an earlier emitted definition already defines fails
    /// with [`SchemaError::DuplicateQuantity`].
    pub fn generate(&self, schema: &Schema) -> GeneratedSources {
        let mut out = GeneratedSources::default();
        let mut taken: HashSet<String> = HashSet::new();

        for definition in &schema.quantities {
            let items = emitted_items(&definition.name);
            if let Some(item) = items.iter().find(|item| taken.contains(*item)) {
                log::warn!(
                    "Skipping quantity {}: {} is already defined",
                    definition.name,
                    item
                );
                out.failures.push(SchemaError::DuplicateQuantity {
                    quantity: definition.name.clone(),
                    item: item.clone(),
                });
                continue;
            }

            match self.generate_quantity(definition) {
                Ok((types, tests)) => {
                    taken.extend(items);
                    log::debug!(
                        "Generated {} with {} units",
                        definition.name,
                        definition.units.len()
                    );
                    if !out.emitted.is_empty() {
                        out.types.push('\n');
                        out.tests.push('\n');
                    }
                    out.types.push_str(&types);
                    out.tests.push_str(&tests);
                    out.emitted.push(definition.name.clone());
                }
                Err(e) => {
                    log::warn!("Skipping quantity {}: {}", definition.name, e);
                    out.failures.push(e);
                }
            }
        }

        log::info!(
            "Generated {} of {} quantities",
            out.emitted.len(),
            schema.quantities.len()
        );
        out
    }
}

/// Names a definition introduces in the module it is emitted into.
fn emitted_items(quantity: &str) -> [String; 3] {
    [
        quantity.to_string(),
        format!("{}Unit", quantity),
        suite_module_name(quantity),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::UnitDefinition;

    fn length() -> QuantityDefinition {
        QuantityDefinition::new("Length")
            .with_unit(UnitDefinition::base("Meter", "Meters", "m"))
            .with_unit(UnitDefinition::scaled("Kilometer", "Kilometers", "km", 1e3))
    }

    fn broken() -> QuantityDefinition {
        QuantityDefinition::new("Broken")
            .with_unit(UnitDefinition::scaled("Thing", "Things", "", 2.0))
    }

    fn broken_fixed() -> QuantityDefinition {
        QuantityDefinition::new("Broken")
            .with_unit(UnitDefinition::base("Thing", "Things", ""))
    }

    fn mass() -> QuantityDefinition {
        QuantityDefinition::new("Mass")
            .with_unit(UnitDefinition::base("Kilogram", "Kilograms", "kg"))
            .with_unit(UnitDefinition::scaled("Gram", "Grams", "g", 1e-3))
    }

    #[test]
    fn failing_definition_is_skipped() {
        let schema = Schema::new(vec![length(), broken(), mass()]);
        let out = Generator::new().generate(&schema);

        assert_eq!(out.emitted, ["Length", "Mass"]);
        assert_eq!(
            out.failures,
            [SchemaError::NoBaseUnit {
                quantity: "Broken".into()
            }]
        );
        assert!(!out.is_complete());
        assert!(!out.types.contains("Broken"));
        assert!(!out.tests.contains("Broken"));
        assert!(out.types.contains("pub struct Length"));
        assert!(out.tests.contains("mod mass_conformance"));
    }

    #[test]
    fn duplicate_quantity_names() {
        let schema = Schema::new(vec![length(), length()]);
        let out = Generator::new().generate(&schema);
        assert_eq!(out.emitted, ["Length"]);
        assert_eq!(
            out.failures,
            [SchemaError::DuplicateQuantity {
                quantity: "Length".into(),
                item: "Length".into(),
            }]
        );
    }

    #[test]
    fn names_equal_after_snake_case_collide() {
        let foo_bar = |name: &str| {
            QuantityDefinition::new(name)
                .with_unit(UnitDefinition::base("Thing", "Things", "t"))
        };
        let schema = Schema::new(vec![foo_bar("FooBar"), foo_bar("Foo_Bar")]);
        let out = Generator::new().generate(&schema);
        assert_eq!(out.emitted, ["FooBar"]);
        assert_eq!(
            out.failures,
            [SchemaError::DuplicateQuantity {
                quantity: "Foo_Bar".into(),
                item: "foo_bar_conformance".into(),
            }]
        );
        assert_eq!(out.tests.matches("mod foo_bar_conformance").count(), 1);
    }

    #[test]
    fn unit_enum_name_collides_with_quantity() {
        let thing = |name: &str| {
            QuantityDefinition::new(name)
                .with_unit(UnitDefinition::base("Thing", "Things", "t"))
        };
        let schema = Schema::new(vec![thing("Foo"), thing("FooUnit")]);
        let out = Generator::new().generate(&schema);
        assert_eq!(out.emitted, ["Foo"]);
        assert!(matches!(
            out.failures.as_slice(),
            [SchemaError::DuplicateQuantity { ref item, .. }] if item == "FooUnit"
        ));
    }

    #[test]
    fn failed_definition_does_not_claim_its_names() {
        let out = Generator::new().generate(&Schema::new(vec![broken(), broken_fixed()]));
        assert_eq!(out.emitted, ["Broken"]);
        assert_eq!(out.failures.len(), 1);
        assert!(matches!(out.failures[0], SchemaError::NoBaseUnit { .. }));
    }

    #[test]
    fn generation_is_deterministic() {
        let schema = Schema::new(vec![mass(), length()]);
        let generator = Generator::new();
        assert_eq!(generator.generate(&schema), generator.generate(&schema));
    }

    #[test]
    fn outputs_are_valid_rust() {
        let out = Generator::new().generate(&Schema::new(vec![length(), mass()]));
        let types = syn::parse_file(&out.types).unwrap();
        let tests = syn::parse_file(&out.tests).unwrap();
        assert_eq!(tests.items.len(), 2);
        assert!(types.items.len() > 2);
    }

    #[test]
    fn schema_order_is_kept() {
        let out = Generator::new().generate(&Schema::new(vec![mass(), length()]));
        let mass = out.types.find("pub struct Mass").unwrap();
        let length = out.types.find("pub struct Length").unwrap();
        assert!(mass < length);
    }

    #[test]
    fn paths_are_configurable() {
        let generator = Generator::new()
            .runtime_path("crate::runtime")
            .types_path("crate::generated");
        let (types, tests) = generator.generate_quantity(&length()).unwrap();
        assert!(types.contains("crate::runtime::impl_quantity!"));
        assert!(tests.contains("use crate::generated::{Length, LengthUnit};"));
        assert!(tests.contains("use crate::runtime::Quantity as _;"));
    }

    #[test]
    fn empty_schema() {
        let out = Generator::new().generate(&Schema::default());
        assert!(out.is_complete());
        assert!(out.types.is_empty() && out.tests.is_empty());
    }
}
