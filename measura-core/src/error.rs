//! Runtime contract errors.

/// Error returned by [`Quantity::compare_dyn`](crate::Quantity::compare_dyn).
///
/// Both variants are programmer errors raised at the call site; equality never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// The operand is not a value of the same quantity type.
    #[error("expected a value of type {expected}")]
    TypeMismatch {
        /// Name of the quantity being compared.
        expected: &'static str,
    },

    /// The operand is absent.
    #[error("cannot compare {quantity} against an absent operand")]
    NullOperand {
        /// Name of the quantity being compared.
        quantity: &'static str,
    },
}
