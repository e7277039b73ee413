use super::{check_mark, decoded_len, encoded_len, into_text, open_message, OVERFLOW_SHIFT};
use crate::alphabet::Alphabet;
use crate::error::{CodecError, Result};
use crate::key::check_key;
use crate::transform::{ByteTransform, MAX_TRANSFORM_BYTE};

/// Payload bytes per mark symbol
pub const ASCII_GROUP: usize = 6;

const ASCII_BLOCK: usize = ASCII_GROUP + 1;

/// Encode bytes in `0..=127`, six to a block.
///
/// Without a sign bit to track, each of the six mark bits carries bit 6 of one slot.
/// Any byte above 127 is rejected before output is produced.
pub fn encode_ascii(
    data: &[u8],
    alphabet: &Alphabet,
    transform: &dyn ByteTransform,
    key: u8,
) -> Result<String> {
    if let Some(position) = data.iter().position(|&b| b > MAX_TRANSFORM_BYTE) {
        return Err(CodecError::OutOfRangeByte {
            byte: data[position],
            position,
        });
    }
    if data.is_empty() {
        return Ok(String::new());
    }
    check_key(key, alphabet)?;

    let mut out = Vec::with_capacity(encoded_len(data.len(), ASCII_GROUP));
    out.push(key);

    for group in data.chunks(ASCII_GROUP) {
        let mut mark = 0u8;
        let mut payload = [0u8; ASCII_GROUP];

        for (slot, &byte) in group.iter().enumerate() {
            let mixed = transform.transform(byte, key) ^ slot as u8;
            mark |= ((mixed >> OVERFLOW_SHIFT) & 1) << slot;
            payload[slot] = alphabet.symbol_of(mixed);
        }

        out.push(alphabet.symbol_of(mark));
        out.extend_from_slice(&payload[..group.len()]);
    }

    Ok(into_text(out))
}

/// Decode a message produced by [`encode_ascii`]
pub fn decode_ascii(
    text: &str,
    alphabet: &Alphabet,
    transform: &dyn ByteTransform,
) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let (key, body) = open_message(text, alphabet)?;
    let mut out = Vec::with_capacity(decoded_len(body.len(), ASCII_BLOCK)?);

    for (index, block) in body.chunks(ASCII_BLOCK).enumerate() {
        let mark = block[0];
        let payload = &block[1..];
        check_mark(mark, payload.len(), index)?;

        for (slot, &value) in payload.iter().enumerate() {
            let mixed = value | (((mark >> slot) & 1) << OVERFLOW_SHIFT);
            out.push(transform.invert(mixed ^ slot as u8, key));
        }
    }

    Ok(out)
}
