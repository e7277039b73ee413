use crate::alphabet::{Alphabet, ALPHABET_SIZE};
use crate::error::{CodecError, Result};
use rand::Rng;

/// Key used when bluff mode is off and no other key was set
pub const DEFAULT_KEY: u8 = b'C';

/// Chooses the key symbol written at the start of each message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySelector {
    bluff: bool,
    fixed: u8,
}

impl Default for KeySelector {
    fn default() -> Self {
        Self {
            bluff: false,
            fixed: DEFAULT_KEY,
        }
    }
}

impl KeySelector {
    pub fn is_bluff(&self) -> bool {
        self.bluff
    }

    pub fn set_bluff(&mut self, bluff: bool) {
        self.bluff = bluff;
    }

    pub fn fixed_key(&self) -> u8 {
        self.fixed
    }

    /// Replace the fixed key, which must be a symbol of `alphabet`
    pub fn set_fixed_key(&mut self, key: u8, alphabet: &Alphabet) -> Result<()> {
        check_key(key, alphabet)?;
        self.fixed = key;
        Ok(())
    }

    /// Key for the next message: a random symbol in bluff mode, otherwise the fixed key
    pub fn next_key<R: Rng + ?Sized>(&self, alphabet: &Alphabet, rng: &mut R) -> Result<u8> {
        if self.bluff {
            return Ok(alphabet.symbol_of(rng.gen_range(0..ALPHABET_SIZE) as u8));
        }
        check_key(self.fixed, alphabet)?;
        Ok(self.fixed)
    }
}

/// Reject keys that are not symbols of `alphabet`
pub fn check_key(key: u8, alphabet: &Alphabet) -> Result<()> {
    if alphabet.contains(key) {
        Ok(())
    } else {
        Err(CodecError::InvalidKey(key as char))
    }
}
