//! Strongly typed physical quantities generated from a declarative unit schema.
//!
//! `measura` is the user-facing crate of this workspace. It re-exports the runtime from
//! `measura-core`, the `quantity!` macro, and the quantities generated at build time from
//! `quantities.toml`:
//!
//! - [`Pressure`] (pascal base; atmospheres, bars, kgf/cm², kPa, MPa, N/cm², N/mm², psi,
//!   technical atmospheres, torrs)
//! - [`Length`] (meter base; metric and imperial units)
//! - [`Mass`] (kilogram base; metric and avoirdupois units)
//! - [`Temperature`] (kelvin base; Celsius, Fahrenheit and Rankine through affine formulas)
//!
//! Every quantity is a `Copy` struct holding one `f64` in its base unit, with a
//! `from_<plural>` factory and a `<plural>` accessor per unit.
//!
//! # Quick start
//!
//! ```rust
//! use measura::{Pressure, Quantity, PressureUnit};
//!
//! let p = Pressure::from_bars(1.0);
//! assert_eq!(p.pascals(), 100_000.0);
//! assert_eq!(p.as_unit(PressureUnit::Kilopascal), 100.0);
//! assert_eq!(p.to_string(), "100000 Pa");
//!
//! // quantity / quantity is a plain ratio
//! assert_eq!(Pressure::from_pascals(10.0) / Pressure::from_pascals(5.0), 2.0);
//! ```
//!
//! Temperatures convert through offsets:
//!
//! ```rust
//! use measura::Temperature;
//!
//! let boiling = Temperature::from_degrees_celsius(100.0);
//! assert!((boiling.kelvins() - 373.15).abs() < 1e-9);
//! assert!((boiling.degrees_fahrenheit() - 212.0).abs() < 1e-9);
//! ```
//!
//! # Defining your own quantities
//!
//! ```rust
//! measura::quantity! {
//!     Speed(tolerance = 1e-9) {
//!         MeterPerSecond / MetersPerSecond = "m/s";
//!         KilometerPerHour / KilometersPerHour = "km/h", scale = 0.2777777777777778;
//!     }
//! }
//!
//! let v = Speed::from_kilometers_per_hour(36.0);
//! assert!((v.meters_per_second() - 10.0).abs() < 1e-9);
//! ```
//!
//! # Incorrect usage (type error)
//!
//! ```compile_fail
//! use measura::{Length, Mass};
//!
//! let _ = Length::from_meters(1.0) + Mass::from_kilograms(1.0); // different quantities
//! ```
//!
//! # Panics and errors
//!
//! Nothing here panics. Arithmetic follows IEEE-754, `compare_dyn` returns a
//! [`CompareError`], and schema problems surface at build time (as build warnings for
//! `quantities.toml`, as compile errors for `quantity!`).

#![deny(missing_docs)]
#![forbid(unsafe_code)]

extern crate self as measura;

pub use measura_core::*;

/// Defines quantity types inline, expanding to the same code as `quantities.toml` entries.
///
/// See the crate documentation for the syntax.
pub use measura_macros::quantity;

/// Quantities generated from `quantities.toml`.
pub mod quantities {
    include!(concat!(env!("OUT_DIR"), "/quantities.rs"));
}

pub use quantities::*;
