use thiserror::Error;

/// The error type for loss evaluation.
///
/// Numerical problems (for example the logarithm of a non-positive prediction) are not
/// reported here; they surface as NaN or infinite values computed by the backend.
#[derive(Error, Debug)]
pub enum LossError {
    /// Two tensors that must be compared element-wise have different shapes.
    #[error("{operation}: shape mismatch between {left} and {right}")]
    ShapeMismatch {
        /// The loss that rejected its inputs.
        operation: &'static str,
        /// Shape of the first operand.
        left: String,
        /// Shape of the second operand.
        right: String,
    },

    /// A tensor does not have the layout a loss requires.
    #[error("{operation}: invalid input tensor shape: expected {expected}, got {actual}")]
    InvalidShape {
        /// The loss that rejected its input.
        operation: &'static str,
        /// The expected layout.
        expected: String,
        /// The actual shape.
        actual: String,
    },

    /// A multi-scale loss received an empty scale list.
    #[error("{operation}: at least one scale is required")]
    EmptyScales {
        /// The loss that rejected its input.
        operation: &'static str,
    },

    /// Generated and ground-truth scale lists differ in length.
    #[error("{operation}: {generated} generated scales but {target} ground-truth scales")]
    ScaleCountMismatch {
        /// The loss that rejected its input.
        operation: &'static str,
        /// Number of generated scales.
        generated: usize,
        /// Number of ground-truth scales.
        target: usize,
    },

    /// The batch size used for normalization is zero.
    #[error("{operation}: batch size must be greater than zero")]
    InvalidBatchSize {
        /// The loss that rejected its input.
        operation: &'static str,
    },

    /// The loss configuration is logically inconsistent.
    #[error("Invalid loss configuration: {reason}")]
    InvalidConfiguration {
        /// The reason why the configuration is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for loss evaluation.
pub type LossResult<T> = Result<T, LossError>;
