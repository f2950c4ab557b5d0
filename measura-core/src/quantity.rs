//! Quantity trait and the helpers shared by every generated quantity type.

use crate::display::{AbbreviationLookup, QuantityDisplay};
use crate::error::CompareError;
use crate::unit::Unit;
use core::any::Any;
use core::cmp::Ordering;
use core::fmt::{Debug, Display};
use core::hash::Hasher;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// A physical quantity stored as a single `f64` magnitude in its base unit.
///
/// Generated quantity structs implement this trait through [`impl_quantity!`](crate::impl_quantity);
/// the per-unit `from_<plural>` / `<plural>` pairs are inherent methods emitted by the generator.
///
/// Arithmetic is unit-agnostic: every operator works on base-unit magnitudes, and dividing two
/// quantities of the same type yields a plain `f64` ratio.
pub trait Quantity:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Div<Output = f64>
    + 'static
{
    /// Unit enum of this quantity.
    type Unit: Unit;

    /// Quantity name, e.g. `"Pressure"`.
    const NAME: &'static str;

    /// The unit the magnitude is stored in.
    const BASE_UNIT: Self::Unit;

    /// Wraps a magnitude already expressed in the base unit.
    fn from_base(value: f64) -> Self;

    /// The stored magnitude, in the base unit.
    fn base_value(self) -> f64;

    /// The zero quantity.
    fn zero() -> Self {
        Self::from_base(0.0)
    }

    /// Builds a quantity from a value expressed in `unit`.
    fn from_unit(value: f64, unit: Self::Unit) -> Self {
        Self::from_base(unit.formula().to_base(value))
    }

    /// Reads the magnitude expressed in `unit`.
    fn as_unit(self, unit: Self::Unit) -> f64 {
        unit.formula().from_base(self.base_value())
    }

    /// Total order by magnitude.
    ///
    /// `-0.0` and `0.0` compare equal; NaN equals NaN and sorts below every number.
    fn compare_to(&self, other: &Self) -> Ordering {
        total_compare(self.base_value(), other.base_value())
    }

    /// Compares against an arbitrary, possibly absent operand.
    ///
    /// Fails with [`CompareError::NullOperand`] for `None` and [`CompareError::TypeMismatch`] when
    /// the operand is not a `Self`.
    fn compare_dyn(&self, other: Option<&dyn Any>) -> Result<Ordering, CompareError> {
        let other = other.ok_or(CompareError::NullOperand {
            quantity: Self::NAME,
        })?;
        let other = other
            .downcast_ref::<Self>()
            .ok_or(CompareError::TypeMismatch {
                expected: Self::NAME,
            })?;
        Ok(self.compare_to(other))
    }

    /// Magnitude equality, with IEEE-754 semantics (same as `==`).
    fn equals(&self, other: &Self) -> bool {
        self.base_value() == other.base_value()
    }

    /// Equality against an arbitrary, possibly absent operand. Never fails: a missing operand or
    /// one of another type is simply not equal.
    fn equals_dyn(&self, other: Option<&dyn Any>) -> bool {
        other
            .and_then(|o| o.downcast_ref::<Self>())
            .is_some_and(|o| self.equals(o))
    }

    /// Formats the quantity in its base unit, taking the abbreviation from `lookup`.
    fn display_with<'a, L>(&self, lookup: &'a L) -> QuantityDisplay<'a, L>
    where
        L: AbbreviationLookup + ?Sized,
    {
        QuantityDisplay::new(self.base_value(), Self::BASE_UNIT.descriptor(), lookup)
    }
}

/// Total order over magnitudes used by [`Quantity::compare_to`].
pub fn total_compare(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            _ => Ordering::Greater,
        },
    }
}

/// Feeds a magnitude to `state` so that values equal under `==` hash identically.
#[doc(hidden)]
pub fn hash_magnitude<H: Hasher>(value: f64, state: &mut H) {
    // -0.0 == 0.0
    let normalized = if value == 0.0 { 0.0 } else { value };
    state.write_u64(normalized.to_bits());
}
