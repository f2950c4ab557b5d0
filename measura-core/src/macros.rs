//! Macros for implementing the quantity contract.

/// Implements [`Quantity`](crate::Quantity) and the full operator set for a generated quantity struct.
///
/// The struct must have exactly one `f64` field holding the base-unit magnitude and derive
/// `Clone, Copy, Debug, Default, PartialEq, PartialOrd`. Arguments are the struct, its unit enum,
/// the magnitude field and the base unit variant:
///
/// ```rust
/// use measura_core::{impl_quantity, ConversionFormula, Quantity, Unit, UnitDescriptor};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// pub enum FooUnit { Foo }
///
/// impl Unit for FooUnit {
///     fn all() -> &'static [Self] { &[FooUnit::Foo] }
///     fn descriptor(self) -> &'static UnitDescriptor {
///         static FOO: UnitDescriptor = UnitDescriptor {
///             quantity: "Foo", name: "Foo", plural: "Foos", abbreviation: "foo",
///             formula: ConversionFormula::IDENTITY,
///         };
///         &FOO
///     }
/// }
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
/// pub struct Foo { foos: f64 }
///
/// impl_quantity!(Foo, FooUnit, foos, Foo);
///
/// let a = Foo::from_base(3.0);
/// assert_eq!((a + a).base_value(), 6.0);
/// assert_eq!(a / Foo::from_base(1.5), 2.0);
/// assert_eq!(a.to_string(), "3 foo");
/// ```
#[macro_export]
macro_rules! impl_quantity {
    ($quantity:ident, $unit:ident, $field:ident, $base:ident) => {
        impl $crate::Quantity for $quantity {
            type Unit = $unit;
            const NAME: &'static str = ::core::stringify!($quantity);
            const BASE_UNIT: $unit = $unit::$base;

            #[inline]
            fn from_base(value: f64) -> Self {
                Self { $field: value }
            }

            #[inline]
            fn base_value(self) -> f64 {
                self.$field
            }
        }

        impl ::core::ops::Neg for $quantity {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $field: -self.$field }
            }
        }

        impl ::core::ops::Add for $quantity {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $field: self.$field + rhs.$field }
            }
        }

        impl ::core::ops::AddAssign for $quantity {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                self.$field += rhs.$field;
            }
        }

        impl ::core::ops::Sub for $quantity {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $field: self.$field - rhs.$field }
            }
        }

        impl ::core::ops::SubAssign for $quantity {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                self.$field -= rhs.$field;
            }
        }

        impl ::core::ops::Mul<f64> for $quantity {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f64) -> Self {
                Self { $field: self.$field * rhs }
            }
        }

        impl ::core::ops::Mul<$quantity> for f64 {
            type Output = $quantity;
            #[inline]
            fn mul(self, rhs: $quantity) -> $quantity {
                rhs * self
            }
        }

        impl ::core::ops::MulAssign<f64> for $quantity {
            #[inline]
            fn mul_assign(&mut self, rhs: f64) {
                self.$field *= rhs;
            }
        }

        impl ::core::ops::Div<f64> for $quantity {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f64) -> Self {
                Self { $field: self.$field / rhs }
            }
        }

        impl ::core::ops::DivAssign<f64> for $quantity {
            #[inline]
            fn div_assign(&mut self, rhs: f64) {
                self.$field /= rhs;
            }
        }

        impl ::core::ops::Div for $quantity {
            type Output = f64;
            #[inline]
            fn div(self, rhs: Self) -> f64 {
                self.$field / rhs.$field
            }
        }

        impl ::core::iter::Sum for $quantity {
            fn sum<I: ::core::iter::Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self { $field: 0.0 }, |acc, q| acc + q)
            }
        }

        impl ::core::hash::Hash for $quantity {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                $crate::hash_magnitude(self.$field, state);
            }
        }

        impl ::core::fmt::Display for $quantity {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(
                    &$crate::Quantity::display_with(self, &$crate::SchemaAbbreviations),
                    f,
                )
            }
        }
    };
}
