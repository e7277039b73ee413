use crate::error::{CodecError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sha3::{Digest, Sha3_256};
use std::fmt;

/// Number of symbols in every alphabet
pub const ALPHABET_SIZE: usize = 64;

/// Mask selecting the 6-bit table coordinate of a value
pub const VALUE_MASK: u8 = 0x3F;

/// Built-in symbol order
pub const DEFAULT_SYMBOLS: &[u8; ALPHABET_SIZE] =
    b"PerQfw7gip89BdOv6SDMbsRCNcm5lzIXojH2xW1JVhG0YqETk3aLyntUuZ4KFA_-";

/// Sentinel for symbols that are not part of the alphabet
const UNMAPPED: i8 = -1;

/// Symbols must be printable, non-space ASCII so encoded output is always text
pub fn is_symbol_byte(byte: u8) -> bool {
    byte.is_ascii_graphic()
}

/// A 64-symbol table together with its inverse lookup.
///
/// The forward table maps a 6-bit value to its symbol, the inverse table maps any
/// byte back to its 6-bit value or [`UNMAPPED`]. Every mutation rebuilds the inverse
/// table from the forward one, so the two directions never drift apart.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: [u8; ALPHABET_SIZE],
    values: [i8; 256],
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::from_table(*DEFAULT_SYMBOLS)
    }
}

impl Alphabet {
    /// Build an alphabet from exactly 64 distinct printable ASCII symbols
    pub fn new(symbols: &[u8]) -> Result<Self> {
        let table = validate_symbols(symbols)?;
        Ok(Self::from_table(table))
    }

    fn from_table(symbols: [u8; ALPHABET_SIZE]) -> Self {
        let mut alphabet = Self {
            symbols,
            values: [UNMAPPED; 256],
        };
        alphabet.rebuild_values();
        alphabet
    }

    /// Replace the whole table. On error the current table is left untouched.
    pub fn install(&mut self, symbols: &[u8]) -> Result<()> {
        let table = validate_symbols(symbols)?;
        self.symbols = table;
        self.rebuild_values();
        Ok(())
    }

    /// Fisher-Yates shuffle of the current symbols
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.symbols.shuffle(rng);
        self.rebuild_values();
    }

    /// Deterministic shuffle: the same passphrase always yields the same order
    pub fn shuffle_with_passphrase(&mut self, passphrase: &[u8]) {
        let mut rng = StdRng::from_seed(passphrase_seed(passphrase));
        self.shuffle(&mut rng);
    }

    /// 6-bit value of a symbol, `None` if the symbol is not installed
    pub fn value_of(&self, symbol: u8) -> Option<u8> {
        let value = self.values[symbol as usize];
        (value != UNMAPPED).then_some(value as u8)
    }

    /// Symbol for the low 6 bits of `value`
    pub fn symbol_of(&self, value: u8) -> u8 {
        self.symbols[(value & VALUE_MASK) as usize]
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.value_of(symbol).is_some()
    }

    pub fn symbols(&self) -> &[u8; ALPHABET_SIZE] {
        &self.symbols
    }

    /// Inverse table, indexed by byte value
    pub fn inverse_table(&self) -> &[i8; 256] {
        &self.values
    }

    /// Translate every symbol of `text` into its 6-bit value
    pub fn values_of(&self, text: &str) -> Result<Vec<u8>> {
        text.bytes()
            .enumerate()
            .map(|(position, symbol)| {
                self.value_of(symbol).ok_or_else(|| CodecError::UnknownSymbol {
                    // Every byte before `position` is ASCII, so this is a char boundary
                    symbol: text[position..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
                    position,
                })
            })
            .collect()
    }

    fn rebuild_values(&mut self) {
        self.values = [UNMAPPED; 256];
        for (value, &symbol) in self.symbols.iter().enumerate() {
            self.values[symbol as usize] = value as i8;
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in &self.symbols {
            write!(f, "{}", symbol as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.to_string()).finish()
    }
}

impl std::str::FromStr for Alphabet {
    type Err = CodecError;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.as_bytes())
    }
}

fn validate_symbols(symbols: &[u8]) -> Result<[u8; ALPHABET_SIZE]> {
    let table: [u8; ALPHABET_SIZE] = symbols.try_into().map_err(|_| {
        CodecError::InvalidAlphabet(format!(
            "expected {} symbols, got {}",
            ALPHABET_SIZE,
            symbols.len()
        ))
    })?;

    let mut seen = [false; 256];
    for (index, &symbol) in table.iter().enumerate() {
        if !is_symbol_byte(symbol) {
            return Err(CodecError::InvalidAlphabet(format!(
                "symbol 0x{:02x} at index {} is not printable ASCII",
                symbol, index
            )));
        }
        if std::mem::replace(&mut seen[symbol as usize], true) {
            return Err(CodecError::InvalidAlphabet(format!(
                "duplicate symbol {:?} at index {}",
                symbol as char, index
            )));
        }
    }

    Ok(table)
}

/// Compute a 32-byte RNG seed from a passphrase
fn passphrase_seed(passphrase: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(b"bluff64_alphabet_shuffle_v1");
    hasher.update(passphrase);
    hasher.finalize().into()
}
