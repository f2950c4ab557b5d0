//! Identifier helpers shared by both generators.

/// Converts a `PascalCase` identifier into `snake_case`.
///
/// Acronym runs stay together: `PSI` becomes `psi` and `HTTPServer` becomes `http_server`.
pub fn snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower)
                {
                    out.push('_');
                }
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `SCREAMING_SNAKE_CASE` form of a `PascalCase` identifier.
pub fn screaming_snake_case(ident: &str) -> String {
    snake_case(ident).to_uppercase()
}

/// Lower-case words for doc comments: `KilometersPerHour` becomes `kilometers per hour`.
pub fn words(ident: &str) -> String {
    snake_case(ident).replace('_', " ")
}

/// Whether `name` can be emitted verbatim as a Rust identifier.
///
/// Keywords and raw identifiers are rejected.
pub fn is_identifier(name: &str) -> bool {
    !name.starts_with("r#") && syn::parse_str::<syn::Ident>(name).is_ok()
}

/// Whether `name` is an identifier starting with an upper-case letter, as type and variant
/// names must.
pub fn is_type_name(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase) && is_identifier(name)
}

/// Formats an `f64` as a Rust float literal that parses back to the same value.
pub(crate) fn float_literal(value: f64) -> String {
    // `Debug` is shortest round-trip and always carries a `.` or an exponent
    format!("{:?}", value)
}

/// Formats a string as a Rust string literal.
pub(crate) fn string_literal(value: &str) -> String {
    format!("{:?}", value)
}
