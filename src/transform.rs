use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};

/// Largest byte a transform sees or produces
pub const MAX_TRANSFORM_BYTE: u8 = 0x7F;

/// Reversible per-byte mix applied to every payload byte under the message key.
///
/// Implementations must map `0..=127` into `0..=127` for every key, and `invert`
/// must undo `transform` under the same key. [`verify`] checks both before a
/// transform is installed on a codec.
pub trait ByteTransform: Send + Sync {
    fn transform(&self, byte: u8, key: u8) -> u8;
    fn invert(&self, byte: u8, key: u8) -> u8;
}

/// Default transform: XOR with the key, its own inverse
#[derive(Debug, Clone, Copy, Default)]
pub struct XorTransform;

impl ByteTransform for XorTransform {
    fn transform(&self, byte: u8, key: u8) -> u8 {
        byte ^ key
    }

    fn invert(&self, byte: u8, key: u8) -> u8 {
        byte ^ key
    }
}

/// Addition of the key modulo 128
#[derive(Debug, Clone, Copy, Default)]
pub struct AddTransform;

impl ByteTransform for AddTransform {
    fn transform(&self, byte: u8, key: u8) -> u8 {
        byte.wrapping_add(key) & MAX_TRANSFORM_BYTE
    }

    fn invert(&self, byte: u8, key: u8) -> u8 {
        byte.wrapping_sub(key) & MAX_TRANSFORM_BYTE
    }
}

/// Built-in transform options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    #[default]
    Xor,
    Add,
}

impl TransformKind {
    pub fn build(self) -> Box<dyn ByteTransform> {
        match self {
            Self::Xor => Box::new(XorTransform),
            Self::Add => Box::new(AddTransform),
        }
    }
}

impl std::str::FromStr for TransformKind {
    type Err = CodecError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "xor" => Ok(Self::Xor),
            "add" => Ok(Self::Add),
            _ => Err(CodecError::UnsupportedTransform(s.to_string())),
        }
    }
}

/// Keys checked: every byte an alphabet symbol, and therefore a message key, can take
fn candidate_keys() -> impl Iterator<Item = u8> {
    (0u8..=0x7F).filter(|&key| crate::alphabet::is_symbol_byte(key))
}

/// Check that `candidate` is a closed involution pair over `0..=127` for every candidate key
pub fn verify(candidate: &dyn ByteTransform) -> Result<()> {
    for key in candidate_keys() {
        for byte in 0..=MAX_TRANSFORM_BYTE {
            let mixed = candidate.transform(byte, key);
            if mixed > MAX_TRANSFORM_BYTE {
                return Err(CodecError::InvalidTransform(format!(
                    "transform(0x{:02x}, {:?}) = 0x{:02x} leaves the 7-bit range",
                    byte, key as char, mixed
                )));
            }
            let restored = candidate.invert(mixed, key);
            if restored != byte {
                return Err(CodecError::InvalidTransform(format!(
                    "invert(transform(0x{:02x}, {:?})) = 0x{:02x}",
                    byte, key as char, restored
                )));
            }
        }
    }
    Ok(())
}
