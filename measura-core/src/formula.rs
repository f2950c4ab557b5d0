//! Affine conversion between a unit and the base unit of its quantity.

/// Error returned when a [`ConversionFormula`] cannot be inverted or emitted.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidFormulaError {
    /// `scale == 0`, so `from_base` would divide by zero.
    #[error("scale must be non-zero (offset = {offset})")]
    ZeroScale {
        /// Offset declared alongside the zero scale.
        offset: f64,
    },

    /// `scale` or `offset` is NaN or infinite.
    #[error("scale and offset must be finite, got scale = {scale}, offset = {offset}")]
    NonFinite {
        /// Declared scale.
        scale: f64,
        /// Declared offset.
        offset: f64,
    },
}

/// Affine relation `y = scale * x + offset` from a unit value `x` to a base unit value `y`.
///
/// The base unit of every quantity carries [`ConversionFormula::IDENTITY`].
///
/// ```rust
/// use measura_core::ConversionFormula;
///
/// // degree Celsius -> kelvin
/// let celsius = ConversionFormula::new(1.0, 273.15).unwrap();
/// assert_eq!(celsius.to_base(0.0), 273.15);
/// assert_eq!(celsius.from_base(273.15), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConversionFormula {
    scale: f64,
    offset: f64,
}

impl ConversionFormula {
    /// The formula of a base unit: `scale = 1`, `offset = 0`.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: 0.0,
    };

    /// Builds a formula, rejecting zero or non-finite parts.
    pub fn new(scale: f64, offset: f64) -> Result<Self, InvalidFormulaError> {
        if !scale.is_finite() || !offset.is_finite() {
            return Err(InvalidFormulaError::NonFinite { scale, offset });
        }
        if scale == 0.0 {
            return Err(InvalidFormulaError::ZeroScale { offset });
        }
        Ok(Self { scale, offset })
    }

    /// Purely multiplicative formula (`offset = 0`).
    pub fn scaled(scale: f64) -> Result<Self, InvalidFormulaError> {
        Self::new(scale, 0.0)
    }

    /// Const constructor for parts that were already checked by [`ConversionFormula::new`].
    ///
    /// Generated code calls this with literals that passed schema validation.
    #[doc(hidden)]
    pub const fn from_validated(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    /// Multiplicative factor `a`.
    #[inline]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Additive term `b`.
    #[inline]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether this is the base unit formula.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.offset == 0.0
    }

    /// Converts a value in this unit to the base unit: `y = a·x + b`.
    #[inline]
    pub fn to_base(&self, value: f64) -> f64 {
        self.scale * value + self.offset
    }

    /// Converts a base unit value into this unit: `x = (y − b) / a`.
    #[inline]
    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.scale
    }
}

impl Default for ConversionFormula {
    fn default() -> Self {
        Self::IDENTITY
    }
}
