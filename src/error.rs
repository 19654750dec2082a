use std::fmt;

/// Everything that can go wrong before a distance field is sampled.
/// Once the inputs are validated, sampling itself cannot fail.
#[derive(Clone, Debug, PartialEq)]
pub enum SdfError {
    /// A sampling parameter was zero, negative, or not finite.
    InvalidParameter {
        name: &'static str,
        value: f64,
    },

    /// A row-major buffer did not contain `width * height` samples.
    BufferSize {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for SdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdfError::InvalidParameter { name, value } => write!(
                f, "invalid parameter `{}`: {} (must be finite and greater than zero)", name, value
            ),

            SdfError::BufferSize { expected, actual } => write!(
                f, "buffer holds {} samples, but the dimensions require {}", actual, expected
            ),
        }
    }
}

impl std::error::Error for SdfError {}
