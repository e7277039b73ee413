//! bluff64 - Reversible base-64-like text codec
//!
//! Turns arbitrary bytes into printable text over a 64-symbol alphabet and back.
//! Every message starts with a key symbol that parameterizes a reversible byte
//! transform, so the same input encodes differently under different keys while
//! the decoder needs nothing but the message itself.
//!
//! ## Layout
//!
//! ```text
//! general: key | mark p0 p1 p2 | mark p0 p1 p2 | ... | mark p0 [p1]
//! ascii:   key | mark p0 p1 p2 p3 p4 p5 | ... | mark p0 [p1 .. p4]
//! ```
//!
//! - **Key**: fixed symbol (default `C`) or a random one in bluff mode
//! - **Payload**: low 6 bits of `transform(byte, key) ^ slot`
//! - **Mark**: bit 6 of each slot, plus a sign flag per slot in the general layout
//!
//! ## Example
//!
//! ```
//! use bluff64::Codec;
//!
//! let mut codec = Codec::new();
//! codec.set_bluff(true);
//!
//! let text = codec.encode(b"\x00\x7f\x80\xff").unwrap();
//! assert_eq!(codec.decode(&text).unwrap(), b"\x00\x7f\x80\xff");
//! ```

pub mod alphabet;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod key;
pub mod packing;
pub mod transform;

pub use alphabet::Alphabet;
pub use codec::Codec;
pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use transform::{AddTransform, ByteTransform, TransformKind, XorTransform};
