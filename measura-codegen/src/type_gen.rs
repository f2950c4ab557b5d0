//! Quantity type generator.
//!
//! For one validated definition this emits:
//!
//! - the `<Name>Unit` enum, one variant per unit in declaration order, with an inherent `ALL`
//!   table and a `const fn formula`, plus its `Unit` impl backed by a static descriptor table;
//! - the `<Name>` struct holding a private `f64` magnitude in the base unit;
//! - `ZERO`, and a `from_<plural>` / `<plural>` pair per unit;
//! - an `impl_quantity!` invocation supplying the trait, the operators, `Hash` and `Display`.

use crate::naming::{float_literal, string_literal, words};
use crate::validate::ValidatedQuantity;

/// Emits the value type of `quantity`, referring to the runtime through `runtime`
/// (e.g. `::measura`).
pub fn emit_type(quantity: &ValidatedQuantity<'_>, runtime: &str) -> String {
    let mut code = String::new();
    emit_unit_enum(&mut code, quantity, runtime);
    code.push('\n');
    emit_struct(&mut code, quantity, runtime);
    code
}

fn emit_unit_enum(code: &mut String, quantity: &ValidatedQuantity<'_>, runtime: &str) {
    let name = quantity.name();
    let unit_enum = quantity.unit_enum();
    let base = quantity.base();
    let count = quantity.units.len();

    code.push_str(&format!("/// Units of [`{}`].\n", name));
    code.push_str("#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
    code.push_str(&format!("pub enum {} {{\n", unit_enum));
    for unit in &quantity.units {
        let abbreviation = &unit.definition.abbreviation;
        if abbreviation.is_empty() {
            code.push_str(&format!("    /// {}", words(unit.variant())));
        } else {
            code.push_str(&format!(
                "    /// {} (`{}`)",
                words(unit.variant()),
                doc_text(abbreviation)
            ));
        }
        if unit.variant() == base.variant() {
            code.push_str(", the base unit");
        }
        code.push_str(".\n");
        code.push_str(&format!("    {},\n", unit.variant()));
    }
    code.push_str("}\n\n");

    code.push_str(&format!("impl {} {{\n", unit_enum));
    code.push_str("    /// Every unit, in declaration order.\n");
    code.push_str(&format!("    pub const ALL: [{}; {}] = [\n", unit_enum, count));
    for unit in &quantity.units {
        code.push_str(&format!("        {}::{},\n", unit_enum, unit.variant()));
    }
    code.push_str("    ];\n\n");

    code.push_str(&format!(
        "    /// Conversion from this unit to {}.\n",
        words(&base.definition.plural)
    ));
    code.push_str(&format!(
        "    pub const fn formula(self) -> {}::ConversionFormula {{\n",
        runtime
    ));
    code.push_str("        match self {\n");
    for unit in &quantity.units {
        code.push_str(&format!(
            "            {}::{} => {}::ConversionFormula::from_validated({}, {}),\n",
            unit_enum,
            unit.variant(),
            runtime,
            float_literal(unit.formula.scale()),
            float_literal(unit.formula.offset()),
        ));
    }
    code.push_str("        }\n");
    code.push_str("    }\n");
    code.push_str("}\n\n");

    code.push_str(&format!("impl {}::Unit for {} {{\n", runtime, unit_enum));
    code.push_str("    fn all() -> &'static [Self] {\n");
    code.push_str(&format!(
        "        static ALL: [{}; {}] = {}::ALL;\n",
        unit_enum, count, unit_enum
    ));
    code.push_str("        &ALL\n");
    code.push_str("    }\n\n");
    code.push_str(&format!(
        "    fn descriptor(self) -> &'static {}::UnitDescriptor {{\n",
        runtime
    ));
    code.push_str(&format!(
        "        static UNITS: [{}::UnitDescriptor; {}] = [\n",
        runtime, count
    ));
    for unit in &quantity.units {
        code.push_str(&format!("            {}::UnitDescriptor {{\n", runtime));
        code.push_str(&format!("                quantity: {},\n", string_literal(name)));
        code.push_str(&format!(
            "                name: {},\n",
            string_literal(unit.variant())
        ));
        code.push_str(&format!(
            "                plural: {},\n",
            string_literal(&unit.definition.plural)
        ));
        code.push_str(&format!(
            "                abbreviation: {},\n",
            string_literal(&unit.definition.abbreviation)
        ));
        code.push_str(&format!(
            "                formula: {}::{}.formula(),\n",
            unit_enum,
            unit.variant()
        ));
        code.push_str("            },\n");
    }
    code.push_str("        ];\n");
    code.push_str("        &UNITS[self as usize]\n");
    code.push_str("    }\n");
    code.push_str("}\n");
}

// Abbreviations are free text; keep them on one doc line and out of the code span.
fn doc_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .replace('`', "'")
}

fn emit_struct(code: &mut String, quantity: &ValidatedQuantity<'_>, runtime: &str) {
    let name = quantity.name();
    let unit_enum = quantity.unit_enum();
    let base = quantity.base();
    let field = &base.accessor;
    let lower = words(name);

    code.push_str(&format!(
        "/// {}, stored as a magnitude in {}.\n",
        name,
        words(&base.definition.plural)
    ));
    code.push_str("///\n");
    code.push_str(&format!(
        "/// Construct it with one of the `from_*` factories and read it back in any of the {} units.\n",
        quantity.units.len()
    ));
    code.push_str("#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]\n");
    code.push_str(&format!("pub struct {} {{\n", name));
    code.push_str(&format!("    {}: f64,\n", field));
    code.push_str("}\n\n");

    code.push_str(&format!("impl {} {{\n", name));
    code.push_str(&format!("    /// The zero {}.\n", lower));
    code.push_str(&format!("    pub const ZERO: Self = Self {{ {}: 0.0 }};\n", field));

    for unit in &quantity.units {
        let accessor = &unit.accessor;
        let unit_words = words(&unit.definition.plural);

        code.push('\n');
        code.push_str(&format!("    /// Creates a {} from {}.\n", lower, unit_words));
        code.push_str("    #[inline]\n");
        code.push_str(&format!(
            "    pub fn {}({}: f64) -> Self {{\n",
            unit.factory(),
            accessor
        ));
        code.push_str(&format!(
            "        Self {{ {}: {}::{}.formula().to_base({}) }}\n",
            field,
            unit_enum,
            unit.variant(),
            accessor
        ));
        code.push_str("    }\n\n");

        code.push_str(&format!("    /// This {} in {}.\n", lower, unit_words));
        code.push_str("    #[inline]\n");
        code.push_str(&format!("    pub fn {}(self) -> f64 {{\n", accessor));
        code.push_str(&format!(
            "        {}::{}.formula().from_base(self.{})\n",
            unit_enum,
            unit.variant(),
            field
        ));
        code.push_str("    }\n");
    }
    code.push_str("}\n\n");

    code.push_str(&format!(
        "{}::impl_quantity!({}, {}, {}, {});\n",
        runtime,
        name,
        unit_enum,
        field,
        base.variant()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{QuantityDefinition, UnitDefinition};
    use crate::validate::validate;

    fn temperature() -> QuantityDefinition {
        QuantityDefinition::new("Temperature")
            .with_unit(UnitDefinition::base("Kelvin", "Kelvins", "K"))
            .with_unit(UnitDefinition::base("Celsius", "DegreesCelsius", "°C").with_offset(273.15))
            .with_unit(UnitDefinition::scaled("Rankine", "Rankines", "", 5.0 / 9.0))
    }

    fn emitted(def: &QuantityDefinition) -> String {
        emit_type(&validate(def).unwrap(), "::measura")
    }

    #[test]
    fn output_is_valid_rust() {
        let code = emitted(&temperature());
        syn::parse_file(&code).unwrap();
    }

    #[test]
    fn unit_enum_in_declaration_order() {
        let code = emitted(&temperature());
        assert!(code.contains("pub enum TemperatureUnit {"));
        let kelvin = code.find("    Kelvin,").unwrap();
        let celsius = code.find("    Celsius,").unwrap();
        let rankine = code.find("    Rankine,").unwrap();
        assert!(kelvin < celsius && celsius < rankine);
        assert!(code.contains("pub const ALL: [TemperatureUnit; 3]"));
        assert!(code.contains("/// kelvin (`K`), the base unit."));
    }

    #[test]
    fn formulas_are_literal() {
        let code = emitted(&temperature());
        assert!(code.contains(
            "TemperatureUnit::Celsius => ::measura::ConversionFormula::from_validated(1.0, 273.15),"
        ));
        assert!(code.contains(&format!(
            "TemperatureUnit::Rankine => ::measura::ConversionFormula::from_validated({:?}, 0.0),",
            5.0 / 9.0
        )));
    }

    #[test]
    fn struct_stores_base_plural() {
        let code = emitted(&temperature());
        assert!(code.contains("pub struct Temperature {\n    kelvins: f64,\n}"));
        assert!(code.contains("pub const ZERO: Self = Self { kelvins: 0.0 };"));
        assert!(code.contains("pub fn from_degrees_celsius(degrees_celsius: f64) -> Self {"));
        assert!(code.contains("pub fn rankines(self) -> f64 {"));
        assert!(code.contains(
            "::measura::impl_quantity!(Temperature, TemperatureUnit, kelvins, Kelvin);"
        ));
    }

    #[test]
    fn descriptors_carry_schema_strings() {
        let code = emitted(&temperature());
        assert!(code.contains("abbreviation: \"°C\","));
        assert!(code.contains("abbreviation: \"\","));
        assert!(code.contains("plural: \"DegreesCelsius\","));
    }

    #[test]
    fn runtime_path_is_configurable() {
        let code = emit_type(&validate(&temperature()).unwrap(), "crate::rt");
        assert!(code.contains("impl crate::rt::Unit for TemperatureUnit"));
        assert!(!code.contains("::measura"));
    }

    #[test]
    fn hostile_abbreviations_are_escaped() {
        let def = QuantityDefinition::new("Odd")
            .with_unit(UnitDefinition::base("Thing", "Things", "\"}`\\\n*/"));
        let code = emitted(&def);
        syn::parse_file(&code).unwrap();
    }
}
