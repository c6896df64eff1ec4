//! Literal token recognition: quoted strings, bracketed vectors, numerals.

use engraf_core::{Dimension, VectorSpace};

/// Recognize a bracketed numeric literal `[x,y,z]`, producing a vector token
/// with `vector=1` and the coordinates on `locX`/`locY`/`locZ`.
#[must_use]
pub fn parse_vector_literal(surface: &str) -> Option<VectorSpace> {
    let inner = surface.strip_prefix('[')?.strip_suffix(']')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }
    let x: f32 = parts[0].parse().ok()?;
    let y: f32 = parts[1].parse().ok()?;
    let z: f32 = parts[2].parse().ok()?;
    Some(VectorSpace::from_word(
        surface,
        &[
            (Dimension::VectorLit, 1.0),
            (Dimension::LocX, x),
            (Dimension::LocY, y),
            (Dimension::LocZ, z),
        ],
    ))
}

/// Recognize a quoted string (single or double quotes), producing an opaque
/// `quoted=1` token whose word is the literal without quotes.
#[must_use]
pub fn parse_quoted_literal(surface: &str) -> Option<VectorSpace> {
    let inner = surface
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| surface.strip_prefix('"').and_then(|s| s.strip_suffix('"')))?;
    if inner.is_empty() {
        return None;
    }
    Some(VectorSpace::from_word(inner, &[(Dimension::Quoted, 1.0)]))
}

/// Recognize a bare numeral, producing a numeric determiner token.
#[must_use]
pub fn parse_numeral(surface: &str) -> Option<VectorSpace> {
    let value: f32 = surface.parse().ok()?;
    let mut v = VectorSpace::from_word(
        surface,
        &[(Dimension::Det, 1.0), (Dimension::Number, value)],
    );
    if (value - 1.0).abs() < f32::EPSILON {
        v.set(Dimension::Singular, 1.0);
    }
    Some(v)
}
