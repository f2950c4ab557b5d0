//! Procedural macro for inline quantity definitions.
//!
//! `quantity!` takes the same definitions as a schema file and expands to the same code the
//! `measura` build script generates: the unit enum, the quantity struct and its conformance
//! test module. It expands in terms of `::measura`, so it is meant for crates depending on
//! `measura` (which re-exports it).
//!
//! # Syntax
//!
//! ```text
//! quantity! {
//!     Speed(tolerance = 1e-6) {
//!         MeterPerSecond / MetersPerSecond = "m/s";
//!         KilometerPerHour / KilometersPerHour = "km/h", scale = 0.2777777777777778;
//!     }
//! }
//! ```
//!
//! Each unit line is `Name / Plural`, an optional `= "abbreviation"`, then optional
//! `scale = <number>` (default `1`) and `offset = <number>` (default `0`). The quantity options
//! in parentheses are optional:
//!
//! - `tolerance = 1e-6`: `Delta` of the generated conversion tests (default `1e-5`)
//! - `tests = false`: do not emit the conformance module
//!
//! Several quantities can be defined in one invocation.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use measura_codegen::{
    Generator, QuantityDefinition, Schema, UnitDefinition, DEFAULT_TOLERANCE,
};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use syn::{
    braced, parenthesized,
    parse::{Parse, ParseStream},
    parse_macro_input, Ident, Lit, LitBool, LitStr, Token,
};

/// Defines one or more quantity types inline.
///
/// Schema errors (no base unit, duplicate plural names, zero scale, ...) are reported as
/// compile errors on the quantity name.
#[proc_macro]
pub fn quantity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as QuantityInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &QuantityInput) -> syn::Result<TokenStream2> {
    let generator = Generator::new().types_path("super");
    let definitions: Vec<QuantityDefinition> =
        input.quantities.iter().map(QuantitySpec::definition).collect();

    // Validate the whole invocation first so collisions between its quantities are caught.
    let report = generator.generate(&Schema::new(definitions.clone()));
    let mut errors: Option<syn::Error> = None;
    for failure in &report.failures {
        let span = input
            .quantities
            .iter()
            .rev()
            .find(|q| q.name == failure.quantity())
            .map_or_else(Span::call_site, |q| q.name.span());
        let err = syn::Error::new(span, failure.to_string());
        match errors.as_mut() {
            Some(errors) => errors.combine(err),
            None => errors = Some(err),
        }
    }
    if let Some(errors) = errors {
        return Err(errors);
    }

    let mut expanded = TokenStream2::new();
    for (quantity, definition) in input.quantities.iter().zip(&definitions) {
        let span = quantity.name.span();
        let (types, tests) = generator
            .generate_quantity(definition)
            .map_err(|e| syn::Error::new(span, e.to_string()))?;
        expanded.extend(tokenize(&types, span)?);
        if quantity.tests {
            expanded.extend(tokenize(&tests, span)?);
        }
    }
    Ok(expanded)
}

fn tokenize(code: &str, span: Span) -> syn::Result<TokenStream2> {
    code.parse::<TokenStream2>()
        .map_err(|e| syn::Error::new(span, format!("generated code does not tokenize: {}", e)))
}

/// Every quantity of one invocation.
struct QuantityInput {
    quantities: Vec<QuantitySpec>,
}

/// `Name(options) { units }`.
struct QuantitySpec {
    name: Ident,
    tolerance: f64,
    tests: bool,
    units: Vec<UnitSpec>,
}

/// `Name / Plural = "abbreviation", scale = 1.0, offset = 0.0`.
struct UnitSpec {
    name: Ident,
    plural: Ident,
    abbreviation: Option<LitStr>,
    scale: f64,
    offset: f64,
}

impl QuantitySpec {
    fn definition(&self) -> QuantityDefinition {
        QuantityDefinition {
            name: self.name.to_string(),
            tolerance: self.tolerance,
            units: self.units.iter().map(UnitSpec::definition).collect(),
        }
    }
}

impl UnitSpec {
    fn definition(&self) -> UnitDefinition {
        UnitDefinition {
            name: self.name.to_string(),
            plural: self.plural.to_string(),
            abbreviation: self
                .abbreviation
                .as_ref()
                .map(LitStr::value)
                .unwrap_or_default(),
            scale: self.scale,
            offset: self.offset,
        }
    }
}

impl Parse for QuantityInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut quantities = Vec::new();
        while !input.is_empty() {
            quantities.push(input.parse()?);
        }
        if quantities.is_empty() {
            return Err(syn::Error::new(
                Span::call_site(),
                "expected at least one quantity definition",
            ));
        }
        Ok(QuantityInput { quantities })
    }
}

impl Parse for QuantitySpec {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        let mut tolerance = DEFAULT_TOLERANCE;
        let mut tests = true;

        if input.peek(syn::token::Paren) {
            let options;
            parenthesized!(options in input);
            while !options.is_empty() {
                let key: Ident = options.parse()?;
                options.parse::<Token![=]>()?;

                match key.to_string().as_str() {
                    "tolerance" => {
                        tolerance = parse_number(&options)?;
                    }
                    "tests" => {
                        tests = options.parse::<LitBool>()?.value;
                    }
                    other => {
                        return Err(syn::Error::new(
                            key.span(),
                            format!("unknown quantity option `{}`", other),
                        ));
                    }
                }

                if options.peek(Token![,]) {
                    options.parse::<Token![,]>()?;
                }
            }
        }

        let body;
        braced!(body in input);
        let mut units = Vec::new();
        while !body.is_empty() {
            units.push(body.parse()?);
            if body.peek(Token![;]) {
                body.parse::<Token![;]>()?;
            } else if !body.is_empty() {
                return Err(body.error("expected `;` after a unit"));
            }
        }

        Ok(QuantitySpec {
            name,
            tolerance,
            tests,
            units,
        })
    }
}

impl Parse for UnitSpec {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![/]>()?;
        let plural: Ident = input.parse()?;

        let abbreviation = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse::<LitStr>()?)
        } else {
            None
        };

        let mut scale = 1.0;
        let mut offset = 0.0;
        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() || input.peek(Token![;]) {
                break;
            }
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            match key.to_string().as_str() {
                "scale" => {
                    scale = parse_number(input)?;
                }
                "offset" => {
                    offset = parse_number(input)?;
                }
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("unknown unit attribute `{}`", other),
                    ));
                }
            }
        }

        Ok(UnitSpec {
            name,
            plural,
            abbreviation,
            scale,
            offset,
        })
    }
}

/// A numeric literal with an optional leading `-`.
fn parse_number(input: ParseStream) -> syn::Result<f64> {
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }

    let value = match input.parse::<Lit>()? {
        Lit::Float(lit) => lit.base10_parse::<f64>()?,
        Lit::Int(lit) => lit.base10_parse::<f64>()?,
        other => return Err(syn::Error::new(other.span(), "expected a number")),
    };

    Ok(if negative { -value } else { value })
}
