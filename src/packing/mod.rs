pub mod ascii;
pub mod general;

pub use ascii::*;
pub use general::*;

use crate::alphabet::Alphabet;
use crate::error::{CodecError, Result};

/// Bit 6 of a mixed value, carried by the mark symbol
const OVERFLOW_SHIFT: u32 = 6;

/// Encoded length of `len` bytes packed `group` bytes to a mark symbol
pub fn encoded_len(len: usize, group: usize) -> usize {
    if len == 0 {
        0
    } else {
        1 + len + len.div_ceil(group)
    }
}

/// Number of payload bytes in a body of `body_len` symbols split into blocks of `block` symbols
fn decoded_len(body_len: usize, block: usize) -> Result<usize> {
    if body_len == 0 {
        return Err(CodecError::MalformedMessage(
            "key symbol without any block".into(),
        ));
    }
    if body_len % block == 1 {
        return Err(CodecError::MalformedMessage(format!(
            "final block at symbol {} has a mark but no payload",
            body_len
        )));
    }
    Ok(body_len - body_len.div_ceil(block))
}

/// Split a message into its key symbol and the 6-bit values of the remaining symbols
fn open_message(text: &str, alphabet: &Alphabet) -> Result<(u8, Vec<u8>)> {
    let mut values = alphabet.values_of(text)?;
    let key = text.as_bytes()[0];
    values.remove(0);
    Ok((key, values))
}

/// Reject mark bits that refer to payload slots the block does not have
fn check_mark(mark: u8, used_bits: usize, block_index: usize) -> Result<()> {
    if used_bits < 6 && mark >> used_bits != 0 {
        return Err(CodecError::MalformedMessage(format!(
            "mark of block {} flags missing payload slots",
            block_index
        )));
    }
    Ok(())
}

fn into_text(symbols: Vec<u8>) -> String {
    symbols.into_iter().map(char::from).collect()
}
