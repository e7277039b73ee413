use super::{check_mark, decoded_len, encoded_len, into_text, open_message, OVERFLOW_SHIFT};
use crate::alphabet::Alphabet;
use crate::error::Result;
use crate::key::check_key;
use crate::transform::ByteTransform;

/// Payload bytes per mark symbol
pub const GENERAL_GROUP: usize = 3;

/// Symbols per block: one mark plus the payload
const GENERAL_BLOCK: usize = GENERAL_GROUP + 1;

const SIGN_BIT: u8 = 0x80;

/// Encode arbitrary bytes, three to a block.
///
/// Each byte with its sign bit set is complemented first and flagged in bit `2k + 1`
/// of the block mark; bit `2k` carries bit 6 of the mixed value, the payload symbol
/// its low six bits.
pub fn encode_general(
    data: &[u8],
    alphabet: &Alphabet,
    transform: &dyn ByteTransform,
    key: u8,
) -> Result<String> {
    if data.is_empty() {
        return Ok(String::new());
    }
    check_key(key, alphabet)?;

    let mut out = Vec::with_capacity(encoded_len(data.len(), GENERAL_GROUP));
    out.push(key);

    for group in data.chunks(GENERAL_GROUP) {
        let mut mark = 0u8;
        let mut payload = [0u8; GENERAL_GROUP];

        for (slot, &byte) in group.iter().enumerate() {
            let shift = slot * 2;
            let low = if byte & SIGN_BIT != 0 {
                mark |= 2 << shift;
                !byte
            } else {
                byte
            };

            let mixed = transform.transform(low, key) ^ slot as u8;
            mark |= ((mixed >> OVERFLOW_SHIFT) & 1) << shift;
            payload[slot] = alphabet.symbol_of(mixed);
        }

        out.push(alphabet.symbol_of(mark));
        out.extend_from_slice(&payload[..group.len()]);
    }

    Ok(into_text(out))
}

/// Decode a message produced by [`encode_general`]
pub fn decode_general(
    text: &str,
    alphabet: &Alphabet,
    transform: &dyn ByteTransform,
) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let (key, body) = open_message(text, alphabet)?;
    let mut out = Vec::with_capacity(decoded_len(body.len(), GENERAL_BLOCK)?);

    for (index, block) in body.chunks(GENERAL_BLOCK).enumerate() {
        let mark = block[0];
        let payload = &block[1..];
        check_mark(mark, payload.len() * 2, index)?;

        for (slot, &value) in payload.iter().enumerate() {
            let bits = mark >> (slot * 2);
            let mixed = value | ((bits & 1) << OVERFLOW_SHIFT);
            let byte = transform.invert(mixed ^ slot as u8, key);
            out.push(if bits & 2 != 0 { !byte } else { byte });
        }
    }

    Ok(out)
}
