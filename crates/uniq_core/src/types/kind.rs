#![allow(non_upper_case_globals)]

use crate::{
    compat::*,
    error::{UniqError, UniqResult},
};

pub const bool: ElementKind = ElementKind::BOOL;
pub const float32: ElementKind = ElementKind::F32;
pub const f32: ElementKind = ElementKind::F32;
#[cfg(feature = "f64")]
pub const float64: ElementKind = ElementKind::F64;
#[cfg(feature = "f64")]
pub const f64: ElementKind = ElementKind::F64;
pub const int32: ElementKind = ElementKind::I32;
pub const i32: ElementKind = ElementKind::I32;
pub const string: ElementKind = ElementKind::UTF8;
pub const utf8: ElementKind = ElementKind::UTF8;

/// Declared scalar type of every element in a flat buffer.
///
/// The kind decides which dedup key is used during a unique pass. Complex
/// kinds have no variant; parsing a complex kind name is rejected.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub enum ElementKind {
    BOOL,
    F32,
    #[cfg(feature = "f64")]
    F64,
    I32,
    UTF8,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BOOL => "bool",
            Self::F32 => "f32",
            #[cfg(feature = "f64")]
            Self::F64 => "f64",
            Self::I32 => "i32",
            Self::UTF8 => "utf8",
        };
        write!(f, "{s}")
    }
}

impl fmt::Debug for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl core::str::FromStr for ElementKind {
    type Err = UniqError;

    fn from_str(s: &str) -> UniqResult<Self> {
        match s {
            "bool" => Ok(Self::BOOL),
            "float32" | "f32" => Ok(Self::F32),
            #[cfg(feature = "f64")]
            "float64" | "f64" => Ok(Self::F64),
            "int32" | "i32" => Ok(Self::I32),
            "string" | "utf8" | "str" => Ok(Self::UTF8),
            "complex64" | "complex128" | "c64" | "c128" => Err(UniqError::UnsupportedKind {
                name: s.to_string(),
                reason: "complex values are not supported".to_string(),
            }),
            _ => Err(UniqError::UnsupportedKind {
                name: s.to_string(),
                reason: "unknown element kind".to_string(),
            }),
        }
    }
}

impl ElementKind {
    /// Width of one element in a raw buffer, `None` for variable-width text.
    pub fn get_size_in_bytes(&self) -> Option<usize> {
        match self {
            Self::BOOL => Some(1),
            Self::F32 => Some(4),
            #[cfg(feature = "f64")]
            Self::F64 => Some(8),
            Self::I32 => Some(4),
            Self::UTF8 => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::BOOL)
    }

    pub fn is_float(&self) -> bool {
        match self {
            Self::F32 => true,
            #[cfg(feature = "f64")]
            Self::F64 => true,
            _ => false,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Self::I32)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::UTF8)
    }
}
