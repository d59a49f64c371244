use crate::{compat::*, types::ElementKind};

/// Main error type for uniq_core.
///
/// Every failure is reported before any output buffer is produced; a unique
/// pass either returns both outputs or one of these.
#[derive(Clone, PartialEq, Eq)]
pub enum UniqError {
    // ===== Kind Errors =====
    /// Element kind tag is unknown or names a complex type.
    UnsupportedKind { name: String, reason: String },

    // ===== Shape and Buffer Errors =====
    /// Input is not one-dimensional.
    InvalidRank { ndim: usize },
    /// Declared element count disagrees with the buffer.
    LengthMismatch { expected: usize, got: usize },
    /// Raw bytes cannot be split into elements of the declared kind.
    MalformedBuffer { kind: ElementKind, reason: String },
    /// A text element is not valid UTF-8.
    InvalidUtf8 { index: usize, reason: String },

    // ===== Index Errors =====
    /// Input is too long for 32-bit signed inverse indices.
    IndexOverflow { len: usize },
    /// An inverse index points past the distinct values.
    IndexOutOfBounds { index: i32, len: usize },
}

impl fmt::Display for UniqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Kind Errors
            Self::UnsupportedKind { name, reason } => {
                write!(f, "unsupported element kind {:?}: {}", name, reason)
            },

            // Shape and Buffer Errors
            Self::InvalidRank { ndim } => {
                write!(f, "unique requires a 1-dimensional input, got {} dimensions", ndim)
            },
            Self::LengthMismatch { expected, got } => {
                write!(f, "length mismatch: expected {} elements, got {}", expected, got)
            },
            Self::MalformedBuffer { kind, reason } => {
                write!(f, "malformed {} buffer: {}", kind, reason)
            },
            Self::InvalidUtf8 { index, reason } => {
                write!(f, "invalid utf-8 in element {}: {}", index, reason)
            },

            // Index Errors
            Self::IndexOverflow { len } => {
                write!(f, "{} elements do not fit in i32 indices", len)
            },
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for {} values", index, len)
            },
        }
    }
}

impl fmt::Debug for UniqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UniqError {}

/// Result type alias for uniq_core operations.
pub type UniqResult<T> = core::result::Result<T, UniqError>;
