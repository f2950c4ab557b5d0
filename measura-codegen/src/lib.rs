//! Code generation for `measura` quantities.
//!
//! `measura-codegen` turns a declarative [`Schema`] of quantity definitions into Rust source:
//!
//! - one strongly typed value type per definition (see [`type_gen`]), and
//! - one conformance test suite per definition (see [`test_gen`]) asserting that the generated
//!   type converts, computes, orders and prints as every quantity must.
//!
//! Both generators evaluate conversions through [`measura_core::ConversionFormula`], so the
//! expected values written into a suite always match what the type computes.
//!
//! It is used from the `measura` build script and from the `quantity!` macro; most users should
//! depend on `measura` instead.
//!
//! ```rust
//! use measura_codegen::{Generator, QuantityDefinition, Schema, UnitDefinition};
//!
//! let speed = QuantityDefinition::new("Speed")
//!     .with_unit(UnitDefinition::base("MeterPerSecond", "MetersPerSecond", "m/s"))
//!     .with_unit(UnitDefinition::scaled("KilometerPerHour", "KilometersPerHour", "km/h", 1.0 / 3.6));
//!
//! let out = Generator::new().generate(&Schema::new(vec![speed]));
//! assert!(out.is_complete());
//! assert!(out.types.contains("pub fn from_kilometers_per_hour(kilometers_per_hour: f64) -> Self"));
//! assert!(out.tests.contains("mod speed_conformance"));
//! ```
//!
//! # Errors
//!
//! A definition that breaks an invariant fails with a [`SchemaError`] naming it; see
//! [`validate::validate`] for the full list. Reading a schema document fails with [`LoadError`].

#![forbid(unsafe_code)]

mod error;
mod generator;
pub mod naming;
mod schema;
pub mod test_gen;
pub mod type_gen;
pub mod validate;

pub use error::{LoadError, SchemaError, SchemaResult};
pub use generator::{GeneratedSources, Generator};
pub use schema::{QuantityDefinition, Schema, UnitDefinition, DEFAULT_TOLERANCE};
pub use test_gen::TestSuiteOptions;
pub use validate::{validate, ValidatedQuantity, ValidatedUnit};
