//! The semantic vector space.
//!
//! A [`VectorSpace`] is a dense, fixed-length array of signed reals indexed by
//! [`Dimension`], plus an optional surface word. Phrase composition is vector
//! addition; adverb intensification is scalar multiplication.

use crate::dimensions::{Dimension, DIMENSION_COUNT};
use crate::error::VectorError;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A point in the semantic vector space, optionally tagged with the surface
/// word it was produced from.
///
/// Equality compares all dimension values exactly and ignores the surface
/// word; use [`VectorSpace::eq_masked`] to restrict comparison to one
/// partition of the catalog.
#[derive(Clone, Serialize, Deserialize)]
pub struct VectorSpace {
    #[serde(with = "BigArray")]
    values: [f32; DIMENSION_COUNT],
    word: Option<String>,
}

impl VectorSpace {
    /// The zero vector with no surface word.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: [0.0; DIMENSION_COUNT],
            word: None,
        }
    }

    /// Build a vector from (dimension, value) features.
    #[must_use]
    pub fn from_features(features: &[(Dimension, f32)]) -> Self {
        let mut v = Self::new();
        for &(dim, value) in features {
            v.values[dim.index()] = value;
        }
        v
    }

    /// Build a vector from features and attach a surface word.
    #[must_use]
    pub fn from_word(word: &str, features: &[(Dimension, f32)]) -> Self {
        let mut v = Self::from_features(features);
        v.word = Some(word.to_string());
        v
    }

    /// Value at a dimension.
    #[inline]
    #[must_use]
    pub fn get(&self, dim: Dimension) -> f32 {
        self.values[dim.index()]
    }

    /// Set the value at a dimension.
    #[inline]
    pub fn set(&mut self, dim: Dimension, value: f32) {
        self.values[dim.index()] = value;
    }

    /// Read a dimension by surface name; unknown names read as 0.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> f32 {
        Dimension::from_name(name).map_or(0.0, |dim| self.get(dim))
    }

    /// Write a dimension by surface name.
    ///
    /// # Errors
    /// Returns [`VectorError::UnknownDimension`] for a name outside the
    /// catalog; this is a programming error in the caller.
    pub fn set_by_name(&mut self, name: &str, value: f32) -> Result<(), VectorError> {
        let dim = Dimension::from_name(name).ok_or_else(|| VectorError::UnknownDimension {
            name: name.to_string(),
        })?;
        self.set(dim, value);
        Ok(())
    }

    /// True iff the value at `dim` is strictly positive.
    #[inline]
    #[must_use]
    pub fn isa(&self, dim: Dimension) -> bool {
        self.get(dim) > 0.0
    }

    /// Projection of this vector onto a single named dimension.
    #[inline]
    #[must_use]
    pub fn scalar_projection(&self, dim: Dimension) -> f32 {
        self.get(dim)
    }

    /// All (dimension, value) pairs with a non-zero value, in catalog order.
    #[must_use]
    pub fn non_zero_dims(&self) -> Vec<(Dimension, f32)> {
        Dimension::all()
            .iter()
            .filter(|d| self.values[d.index()] != 0.0)
            .map(|d| (*d, self.values[d.index()]))
            .collect()
    }

    /// True if every dimension is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Equality restricted to the dimensions selected by `mask`.
    #[must_use]
    pub fn eq_masked(&self, other: &VectorSpace, mask: &[bool; DIMENSION_COUNT]) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .zip(mask.iter())
            .all(|((a, b), keep)| !keep || a == b)
    }

    /// Equality over the semantic partition only.
    #[must_use]
    pub fn semantic_eq(&self, other: &VectorSpace) -> bool {
        self.eq_masked(other, &crate::dimensions::semantic_mask())
    }

    /// Equality over the POS partition only.
    #[must_use]
    pub fn pos_eq(&self, other: &VectorSpace) -> bool {
        self.eq_masked(other, &crate::dimensions::pos_mask())
    }

    /// The surface word this vector was produced from, if any.
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Replace the surface word.
    pub fn set_word(&mut self, word: impl Into<String>) {
        self.word = Some(word.into());
    }

    /// Builder form of [`VectorSpace::set_word`].
    #[must_use]
    pub fn with_word(mut self, word: impl Into<String>) -> Self {
        self.word = Some(word.into());
        self
    }
}

impl Default for VectorSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for VectorSpace {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Add for VectorSpace {
    type Output = VectorSpace;

    fn add(self, rhs: VectorSpace) -> VectorSpace {
        &self + &rhs
    }
}

impl Add for &VectorSpace {
    type Output = VectorSpace;

    fn add(self, rhs: &VectorSpace) -> VectorSpace {
        let mut out = self.clone();
        for i in 0..DIMENSION_COUNT {
            out.values[i] += rhs.values[i];
        }
        out
    }
}

impl AddAssign<&VectorSpace> for VectorSpace {
    fn add_assign(&mut self, rhs: &VectorSpace) {
        for i in 0..DIMENSION_COUNT {
            self.values[i] += rhs.values[i];
        }
    }
}

impl Sub for &VectorSpace {
    type Output = VectorSpace;

    fn sub(self, rhs: &VectorSpace) -> VectorSpace {
        let mut out = self.clone();
        for i in 0..DIMENSION_COUNT {
            out.values[i] -= rhs.values[i];
        }
        out
    }
}

impl Mul<f32> for &VectorSpace {
    type Output = VectorSpace;

    fn mul(self, scalar: f32) -> VectorSpace {
        let mut out = self.clone();
        for v in out.values.iter_mut() {
            *v *= scalar;
        }
        out
    }
}

impl fmt::Debug for VectorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self
            .non_zero_dims()
            .into_iter()
            .map(|(d, v)| format!("{}={:.2}", d.name(), v))
            .collect();
        match &self.word {
            Some(w) => write!(f, "VS(word='{}', {{ {} }})", w, dims.join(", ")),
            None => write!(f, "VS({{ {} }})", dims.join(", ")),
        }
    }
}
