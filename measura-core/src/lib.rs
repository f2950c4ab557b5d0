//! Runtime contract for generated, strongly typed physical quantities.
//!
//! `measura-core` holds everything a generated quantity type relies on at runtime:
//!
//! - A [`ConversionFormula`] is the affine relation `y = a·x + b` between a unit and the base unit.
//!   The generator and the generated code evaluate conversions through this one type, so the
//!   emitted tests and the emitted implementation cannot drift apart.
//! - A *unit* is a generated enum variant implementing [`Unit`], backed by a static
//!   [`UnitDescriptor`].
//! - A *quantity* is a generated struct holding one `f64` in its base unit and implementing
//!   [`Quantity`] through [`impl_quantity!`].
//! - Display goes through an injected [`AbbreviationLookup`]; [`SchemaAbbreviations`] is the default.
//!
//! Most users should depend on `measura` (the facade crate), which ships the generated quantities.
//!
//! # What this crate does not try to solve
//!
//! - Non-affine conversions.
//! - Dimensional analysis across quantities (length / time is not a speed here).
//! - Exact arithmetic: magnitudes are `f64`.
//!
//! # Errors
//!
//! Conversions and arithmetic are pure `f64` computations and follow IEEE-754 behavior. The only
//! fallible operations are [`ConversionFormula::new`] ([`InvalidFormulaError`]) and
//! [`Quantity::compare_dyn`] ([`CompareError`]).

#![deny(missing_docs)]
#![forbid(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

mod display;
mod error;
mod formula;
mod macros;
mod quantity;
mod unit;

// ─────────────────────────────────────────────────────────────────────────────
// Public re-exports of core types
// ─────────────────────────────────────────────────────────────────────────────

pub use display::{
    AbbreviationLookup, AbbreviationTable, AbbreviationTableError, QuantityDisplay,
    RoundedMagnitude, SchemaAbbreviations,
};
pub use error::CompareError;
pub use formula::{ConversionFormula, InvalidFormulaError};
pub use quantity::{hash_magnitude, total_compare, Quantity};
pub use unit::{convert, Unit, UnitDescriptor};
