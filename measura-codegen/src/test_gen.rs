//! Conformance test suite generator.
//!
//! Each suite is a `#[cfg(test)]` module checking one generated quantity against the contract
//! every quantity shares: conversion ground truth at the probe value `1` base unit, round trips,
//! arithmetic, ordering, `compare_to`, equality, hashing, zero and display.
//!
//! Expected conversion values are computed here, through the same [`ConversionFormula`] the
//! generated type evaluates, and written into the suite as literals.
//!
//! [`ConversionFormula`]: measura_core::ConversionFormula

use crate::naming::{float_literal, screaming_snake_case, snake_case, string_literal};
use crate::validate::ValidatedQuantity;

/// Base-unit magnitude the conversion tests start from.
pub const PROBE_VALUE: f64 = 1.0;

/// Where a generated suite finds the runtime and the types under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuiteOptions {
    /// Path of the runtime crate, e.g. `::measura`.
    pub runtime_path: String,
    /// Path the quantity and unit types are imported from, e.g. `::measura` or `super`.
    pub types_path: String,
}

impl Default for TestSuiteOptions {
    fn default() -> Self {
        Self {
            runtime_path: "::measura".to_string(),
            types_path: "::measura".to_string(),
        }
    }
}

impl TestSuiteOptions {
    /// Options for a suite emitted next to the types, e.g. inside a macro expansion.
    pub fn inline(runtime_path: impl Into<String>) -> Self {
        Self {
            runtime_path: runtime_path.into(),
            types_path: "super".to_string(),
        }
    }
}

/// Name of the module holding the suite of `quantity`.
pub fn suite_module(quantity: &ValidatedQuantity<'_>) -> String {
    suite_module_name(quantity.name())
}

pub(crate) fn suite_module_name(quantity: &str) -> String {
    format!("{}_conformance", snake_case(quantity))
}

/// Name of the constant holding the expected value of `accessor` at the probe value.
fn expected_constant(accessor: &str, base_variant: &str) -> String {
    format!(
        "{}_IN_ONE_{}",
        accessor.to_uppercase(),
        screaming_snake_case(base_variant)
    )
}

/// Emits the conformance suite of `quantity`.
pub fn emit_suite(quantity: &ValidatedQuantity<'_>, options: &TestSuiteOptions) -> String {
    let name = quantity.name();
    let unit_enum = quantity.unit_enum();
    let base = quantity.base();
    let runtime = &options.runtime_path;
    let from_base = base.factory();
    let in_base = &base.accessor;

    let mut code = String::new();
    code.push_str(&format!("// Conformance suite for `{}`.\n", name));
    code.push_str("#[cfg(test)]\n");
    code.push_str("#[allow(clippy::eq_op, clippy::float_cmp, clippy::nonminimal_bool)]\n");
    code.push_str(&format!("mod {} {{\n", suite_module(quantity)));
    code.push_str(&format!(
        "    use {}::{{{}, {}}};\n",
        options.types_path, name, unit_enum
    ));
    code.push_str(&format!("    use {}::Quantity as _;\n\n", runtime));

    code.push_str(&format!(
        "    const DELTA: f64 = {};\n\n",
        float_literal(quantity.tolerance())
    ));
    for unit in &quantity.units {
        let expected = unit.formula.from_base(PROBE_VALUE);
        code.push_str(&format!(
            "    const {}: f64 = {};\n",
            expected_constant(&unit.accessor, base.variant()),
            float_literal(expected)
        ));
    }
    code.push('\n');

    code.push_str("    fn assert_close(expected: f64, actual: f64, context: &str) {\n");
    code.push_str("        assert!(\n");
    code.push_str("            (expected - actual).abs() <= DELTA,\n");
    code.push_str(&format!(
        "            \"{}: {{}}: expected {{}}, got {{}} (delta {{}})\",\n",
        name
    ));
    code.push_str("            context,\n");
    code.push_str("            expected,\n");
    code.push_str("            actual,\n");
    code.push_str("            DELTA\n");
    code.push_str("        );\n");
    code.push_str("    }\n\n");

    // ground truth
    code.push_str("    #[test]\n");
    code.push_str(&format!(
        "    fn {}_to_{}_units() {{\n",
        snake_case(base.variant()),
        snake_case(name)
    ));
    code.push_str(&format!(
        "        let probe = {}::{}({});\n",
        name,
        from_base,
        float_literal(PROBE_VALUE)
    ));
    for unit in &quantity.units {
        code.push_str(&format!(
            "        assert_close({}, probe.{}(), {});\n",
            expected_constant(&unit.accessor, base.variant()),
            unit.accessor,
            string_literal(&unit.accessor)
        ));
    }
    code.push_str("    }\n\n");

    // round trips
    code.push_str("    #[test]\n");
    code.push_str("    fn conversion_round_trip() {\n");
    code.push_str(&format!(
        "        let probe = {}::{}({});\n",
        name,
        from_base,
        float_literal(PROBE_VALUE)
    ));
    for unit in &quantity.units {
        code.push_str(&format!(
            "        assert_close({}, {}::{}(probe.{}()).{}(), {});\n",
            float_literal(PROBE_VALUE),
            name,
            unit.factory(),
            unit.accessor,
            in_base,
            string_literal(&unit.accessor)
        ));
    }
    code.push_str("    }\n\n");

    code.push_str("    #[test]\n");
    code.push_str("    fn unit_table_round_trip() {\n");
    code.push_str(&format!(
        "        let probe = {}::{}({});\n",
        name,
        from_base,
        float_literal(PROBE_VALUE)
    ));
    code.push_str(&format!("        for unit in {}::ALL {{\n", unit_enum));
    code.push_str(&format!(
        "            let back = {}::from_unit(probe.as_unit(unit), unit);\n",
        name
    ));
    code.push_str(&format!(
        "            assert_close(probe.{}(), back.{}(), &format!(\"{{:?}}\", unit));\n",
        in_base, in_base
    ));
    code.push_str("        }\n");
    code.push_str("    }\n\n");

    // arithmetic
    let q = |v: &str| format!("{}::{}({})", name, from_base, v);
    code.push_str("    #[test]\n");
    code.push_str("    fn arithmetic_operators() {\n");
    code.push_str(&format!("        let one = {};\n", q("1.0")));
    code.push_str(&format!("        let two = {};\n", q("2.0")));
    code.push_str(&format!("        let ten = {};\n", q("10.0")));
    code.push_str(&format!("        assert_eq!((-one).{}(), -1.0);\n", in_base));
    code.push_str(&format!("        assert_eq!((one + two).{}(), 3.0);\n", in_base));
    code.push_str(&format!("        assert_eq!((two - one).{}(), 1.0);\n", in_base));
    code.push_str(&format!("        assert_eq!((one * 10.0).{}(), 10.0);\n", in_base));
    code.push_str(&format!("        assert_eq!((10.0 * one).{}(), 10.0);\n", in_base));
    code.push_str(&format!("        assert_eq!((ten / 5.0).{}(), 2.0);\n", in_base));
    code.push_str("        assert_eq!(ten / two, 5.0);\n");
    code.push_str("        assert_eq!(one * 10.0, 10.0 * one);\n");
    code.push_str("        assert_eq!((one * 10.0) / 10.0, one);\n");
    code.push_str("        assert_eq!((one + two) - two, one);\n");
    code.push_str("    }\n\n");

    // ordering
    code.push_str("    #[test]\n");
    code.push_str("    fn comparison_operators() {\n");
    code.push_str(&format!("        let one = {};\n", q("1.0")));
    code.push_str(&format!("        let two = {};\n", q("2.0")));
    code.push_str("        assert!(one < two);\n");
    code.push_str("        assert!(one <= two);\n");
    code.push_str("        assert!(one <= one);\n");
    code.push_str("        assert!(two > one);\n");
    code.push_str("        assert!(two >= one);\n");
    code.push_str("        assert!(two >= two);\n");
    code.push_str("        assert!(!(one > two));\n");
    code.push_str("        assert!(!(one >= two));\n");
    code.push_str("        assert!(!(two < one));\n");
    code.push_str("        assert!(!(two <= one));\n");
    code.push_str("    }\n\n");

    code.push_str("    #[test]\n");
    code.push_str("    fn compare_to_is_implemented() {\n");
    code.push_str(&format!("        let one = {};\n", q("1.0")));
    code.push_str("        assert_eq!(one.compare_to(&one), ::core::cmp::Ordering::Equal);\n");
    code.push_str(&format!(
        "        assert_eq!(one.compare_to(&{}::ZERO), ::core::cmp::Ordering::Greater);\n",
        name
    ));
    code.push_str(&format!(
        "        assert_eq!({}::ZERO.compare_to(&one), ::core::cmp::Ordering::Less);\n",
        name
    ));
    code.push_str("        assert_eq!(\n");
    code.push_str("            one.compare_dyn(Some(&one as &dyn ::core::any::Any)),\n");
    code.push_str("            Ok(::core::cmp::Ordering::Equal)\n");
    code.push_str("        );\n");
    code.push_str("    }\n\n");

    code.push_str("    #[test]\n");
    code.push_str("    fn compare_to_fails_on_type_mismatch() {\n");
    code.push_str("        let not_a_quantity: &dyn ::core::any::Any = &1.0_f64;\n");
    code.push_str("        assert_eq!(\n");
    code.push_str(&format!(
        "            {}.compare_dyn(Some(not_a_quantity)),\n",
        q("1.0")
    ));
    code.push_str(&format!(
        "            Err({}::CompareError::TypeMismatch {{ expected: {} }})\n",
        runtime,
        string_literal(name)
    ));
    code.push_str("        );\n");
    code.push_str("    }\n\n");

    code.push_str("    #[test]\n");
    code.push_str("    fn compare_to_fails_on_absent_operand() {\n");
    code.push_str("        assert_eq!(\n");
    code.push_str(&format!("            {}.compare_dyn(None),\n", q("1.0")));
    code.push_str(&format!(
        "            Err({}::CompareError::NullOperand {{ quantity: {} }})\n",
        runtime,
        string_literal(name)
    ));
    code.push_str("        );\n");
    code.push_str("    }\n\n");

    // equality
    code.push_str("    #[test]\n");
    code.push_str("    fn equality_operators() {\n");
    code.push_str(&format!("        let one = {};\n", q("1.0")));
    code.push_str(&format!("        let two = {};\n", q("2.0")));
    code.push_str("        assert!(one == one);\n");
    code.push_str("        assert!(one != two);\n");
    code.push_str("        assert!(!(one == two));\n");
    code.push_str("        assert!(!(one != one));\n");
    code.push_str("    }\n\n");

    code.push_str("    #[test]\n");
    code.push_str("    fn equals_is_implemented() {\n");
    code.push_str(&format!("        let one = {};\n", q("1.0")));
    code.push_str(&format!("        assert!(one.equals(&{}));\n", q("1.0")));
    code.push_str(&format!("        assert!(!one.equals(&{}::ZERO));\n", name));
    code.push_str(&format!(
        "        assert!(one.equals_dyn(Some(&{} as &dyn ::core::any::Any)));\n",
        q("1.0")
    ));
    code.push_str("    }\n\n");

    code.push_str("    #[test]\n");
    code.push_str("    fn equals_returns_false_on_type_mismatch() {\n");
    code.push_str("        let not_a_quantity: &dyn ::core::any::Any = &1.0_f64;\n");
    code.push_str(&format!(
        "        assert!(!{}.equals_dyn(Some(not_a_quantity)));\n",
        q("1.0")
    ));
    code.push_str("    }\n\n");

    code.push_str("    #[test]\n");
    code.push_str("    fn equals_returns_false_on_absent_operand() {\n");
    code.push_str(&format!(
        "        assert!(!{}.equals_dyn(None));\n",
        q("1.0")
    ));
    code.push_str("    }\n\n");

    code.push_str("    #[test]\n");
    code.push_str("    fn equal_values_hash_identically() {\n");
    code.push_str(&format!("        fn hash_of(value: &{}) -> u64 {{\n", name));
    code.push_str("            use ::std::hash::{Hash, Hasher};\n");
    code.push_str(
        "            let mut hasher = ::std::collections::hash_map::DefaultHasher::new();\n",
    );
    code.push_str("            value.hash(&mut hasher);\n");
    code.push_str("            hasher.finish()\n");
    code.push_str("        }\n");
    code.push_str(&format!(
        "        assert_eq!(hash_of(&{}), hash_of(&{}));\n",
        q("1.0"),
        q("1.0")
    ));
    code.push_str(&format!(
        "        assert_eq!(hash_of(&{}::ZERO), hash_of(&-{}::ZERO));\n",
        name, name
    ));
    code.push_str("    }\n\n");

    code.push_str("    #[test]\n");
    code.push_str("    fn zero_is_the_default() {\n");
    code.push_str(&format!(
        "        assert_eq!({}::default(), {}::ZERO);\n",
        name, name
    ));
    code.push_str(&format!(
        "        assert_eq!({}::zero().{}(), 0.0);\n",
        name, in_base
    ));
    code.push_str("    }\n\n");

    // display
    let shown = base.shown_abbreviation();
    code.push_str("    #[test]\n");
    code.push_str("    fn display_uses_base_unit_abbreviation() {\n");
    code.push_str(&format!(
        "        assert_eq!({}.to_string(), {});\n",
        q("1.0"),
        string_literal(&format!("1 {}", shown))
    ));
    code.push_str(&format!(
        "        assert_eq!({}.to_string(), {});\n",
        q("-2.346"),
        string_literal(&format!("-2.35 {}", shown))
    ));
    code.push_str("    }\n");
    code.push_str("}\n");

    code
}
