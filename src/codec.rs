use crate::alphabet::Alphabet;
use crate::config::CodecConfig;
use crate::error::Result;
use crate::key::{check_key, KeySelector};
use crate::packing::{decode_ascii, decode_general, encode_ascii, encode_general};
use crate::transform::{verify, ByteTransform, XorTransform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A codec instance: alphabet, byte transform, key selection and random source.
///
/// Configuration changes take `&mut self` and are validated before they are
/// applied, so a rejected change leaves the previous configuration in place.
/// Decoding and keyed encoding only borrow the codec and can run concurrently.
pub struct Codec {
    alphabet: Alphabet,
    transform: Box<dyn ByteTransform>,
    keys: KeySelector,
    rng: StdRng,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("alphabet", &self.alphabet)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl Codec {
    /// Default alphabet, XOR transform, fixed key, RNG seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same as [`Codec::new`] but with a reproducible random source
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            alphabet: Alphabet::default(),
            transform: Box::new(XorTransform),
            keys: KeySelector::default(),
            rng,
        }
    }

    /// Build a codec from a configuration, applying alphabet, passphrase shuffle,
    /// transform, key and bluff setting in that order.
    ///
    /// The fixed key only matters for encoding and is checked there, so a
    /// decode-only codec may use an alphabet without it.
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        let mut codec = Self::new();
        if let Some(symbols) = &config.alphabet {
            codec.set_alphabet(symbols.as_bytes())?;
        }
        if let Some(passphrase) = &config.passphrase {
            codec.shuffle_alphabet_with_passphrase(passphrase.as_bytes());
        }
        codec.set_boxed_transform(config.transform.build())?;
        if let Some(key) = config.key_byte()? {
            codec.set_fixed_key(key)?;
        }
        codec.set_bluff(config.bluff);
        Ok(codec)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Install a new 64-symbol alphabet
    pub fn set_alphabet(&mut self, symbols: &[u8]) -> Result<()> {
        self.alphabet.install(symbols)?;
        tracing::debug!("Installed alphabet {}", self.alphabet);
        if !self.alphabet.contains(self.keys.fixed_key()) {
            tracing::warn!(
                "Fixed key {:?} is not in the new alphabet; set a new key or enable bluff",
                self.keys.fixed_key() as char
            );
        }
        Ok(())
    }

    /// Shuffle the alphabet with a caller-supplied random source
    pub fn shuffle_alphabet<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.alphabet.shuffle(rng);
        tracing::debug!("Shuffled alphabet to {}", self.alphabet);
    }

    /// Shuffle the alphabet deterministically from a passphrase
    pub fn shuffle_alphabet_with_passphrase(&mut self, passphrase: &[u8]) {
        self.alphabet.shuffle_with_passphrase(passphrase);
        tracing::debug!("Derived alphabet {} from passphrase", self.alphabet);
    }

    /// Install a transform after verifying it is a closed involution pair
    pub fn set_transform<T: ByteTransform + 'static>(&mut self, transform: T) -> Result<()> {
        self.set_boxed_transform(Box::new(transform))
    }

    pub fn set_boxed_transform(&mut self, transform: Box<dyn ByteTransform>) -> Result<()> {
        if let Err(e) = verify(transform.as_ref()) {
            tracing::warn!("Rejected byte transform: {}", e);
            return Err(e);
        }
        self.transform = transform;
        tracing::debug!("Installed byte transform");
        Ok(())
    }

    pub fn is_bluff(&self) -> bool {
        self.keys.is_bluff()
    }

    pub fn set_bluff(&mut self, bluff: bool) {
        self.keys.set_bluff(bluff);
    }

    pub fn fixed_key(&self) -> u8 {
        self.keys.fixed_key()
    }

    pub fn set_fixed_key(&mut self, key: u8) -> Result<()> {
        self.keys.set_fixed_key(key, &self.alphabet)
    }

    fn next_key(&mut self) -> Result<u8> {
        self.keys.next_key(&self.alphabet, &mut self.rng)
    }

    /// Encode arbitrary bytes
    pub fn encode(&mut self, data: &[u8]) -> Result<String> {
        let key = self.next_key()?;
        self.encode_with_key(data, key)
    }

    /// Encode arbitrary bytes under an explicit key symbol
    pub fn encode_with_key(&self, data: &[u8], key: u8) -> Result<String> {
        check_key(key, &self.alphabet)?;
        let text = encode_general(data, &self.alphabet, self.transform.as_ref(), key)?;
        tracing::trace!("Encoded {} bytes into {} symbols", data.len(), text.len());
        Ok(text)
    }

    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        let data = decode_general(text, &self.alphabet, self.transform.as_ref())?;
        tracing::trace!("Decoded {} symbols into {} bytes", text.len(), data.len());
        Ok(data)
    }

    /// Encode bytes in `0..=127` with the denser ASCII layout
    pub fn encode_ascii(&mut self, data: &[u8]) -> Result<String> {
        let key = self.next_key()?;
        self.encode_ascii_with_key(data, key)
    }

    pub fn encode_ascii_with_key(&self, data: &[u8], key: u8) -> Result<String> {
        check_key(key, &self.alphabet)?;
        let text = encode_ascii(data, &self.alphabet, self.transform.as_ref(), key)?;
        tracing::trace!("Encoded {} ASCII bytes into {} symbols", data.len(), text.len());
        Ok(text)
    }

    pub fn decode_ascii(&self, text: &str) -> Result<Vec<u8>> {
        let data = decode_ascii(text, &self.alphabet, self.transform.as_ref())?;
        tracing::trace!("Decoded {} symbols into {} ASCII bytes", text.len(), data.len());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::transform::AddTransform;

    struct AddWithoutInverse;

    impl ByteTransform for AddWithoutInverse {
        fn transform(&self, byte: u8, key: u8) -> u8 {
            byte.wrapping_add(key) & 0x7F
        }
        fn invert(&self, byte: u8, key: u8) -> u8 {
            byte.wrapping_add(key) & 0x7F
        }
    }

    #[test]
    fn test_default_roundtrip() {
        let mut codec = Codec::with_seed(1);
        let data = b"Hello, World! \x00\x80\xff";
        let text = codec.encode(data).unwrap();
        assert!(text.starts_with('C'));
        assert_eq!(codec.decode(&text).unwrap(), data);
    }

    #[test]
    fn test_rejected_transform_keeps_previous() {
        let mut codec = Codec::with_seed(1);
        let before = codec.encode(b"stable").unwrap();

        let err = codec.set_transform(AddWithoutInverse).unwrap_err();
        assert!(matches!(err, CodecError::InvalidTransform(_)));

        assert_eq!(codec.encode(b"stable").unwrap(), before);
        assert_eq!(codec.decode(&before).unwrap(), b"stable");
    }

    #[test]
    fn test_custom_transform_roundtrip() {
        let mut codec = Codec::with_seed(1);
        let plain = codec.encode(b"payload").unwrap();
        codec.set_transform(AddTransform).unwrap();
        let mixed = codec.encode(b"payload").unwrap();
        assert_ne!(plain, mixed);
        assert_eq!(codec.decode(&mixed).unwrap(), b"payload");
    }

    #[test]
    fn test_bluff_varies_key() {
        let mut codec = Codec::with_seed(9);
        codec.set_bluff(true);
        let data = b"bluffing";

        let outputs: Vec<String> = (0..16).map(|_| codec.encode(data).unwrap()).collect();
        let first_key = outputs[0].as_bytes()[0];
        assert!(outputs.iter().any(|text| text.as_bytes()[0] != first_key));
        for text in &outputs {
            assert_eq!(codec.decode(text).unwrap(), data);
        }
    }

    #[test]
    fn test_alphabet_swap_orphans_fixed_key() {
        let mut codec = Codec::with_seed(1);
        codec
            .set_alphabet(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/")
            .unwrap();
        // 'C' survives in this table
        assert!(codec.encode(b"x").is_ok());

        codec.set_fixed_key(b'+').unwrap();
        codec
            .set_alphabet(b"PerQfw7gip89BdOv6SDMbsRCNcm5lzIXojH2xW1JVhG0YqETk3aLyntUuZ4KFA_-")
            .unwrap();
        assert!(matches!(codec.encode(b"x"), Err(CodecError::InvalidKey('+'))));

        codec.set_bluff(true);
        let text = codec.encode(b"x").unwrap();
        assert_eq!(codec.decode(&text).unwrap(), b"x");
    }

    #[test]
    fn test_config_without_default_key_still_decodes() {
        let symbols = "ABDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/!";
        let sender_config = CodecConfig {
            alphabet: Some(symbols.into()),
            bluff: true,
            ..Default::default()
        };
        let receiver_config = CodecConfig {
            alphabet: Some(symbols.into()),
            ..Default::default()
        };

        let mut sender = Codec::from_config(&sender_config).unwrap();
        let text = sender.encode(b"hello").unwrap();

        let mut receiver = Codec::from_config(&receiver_config).unwrap();
        assert_eq!(receiver.decode(&text).unwrap(), b"hello");
        assert!(matches!(receiver.encode(b"hello"), Err(CodecError::InvalidKey('C'))));
    }

    #[test]
    fn test_invalid_alphabet_keeps_previous() {
        let mut codec = Codec::with_seed(1);
        let text = codec.encode(b"keep").unwrap();
        assert!(matches!(
            codec.set_alphabet(b"short"),
            Err(CodecError::InvalidAlphabet(_))
        ));
        assert_eq!(codec.decode(&text).unwrap(), b"keep");
    }

    #[test]
    fn test_shuffled_alphabet_roundtrip() {
        let mut codec = Codec::with_seed(3);
        let mut rng = StdRng::seed_from_u64(11);
        codec.shuffle_alphabet(&mut rng);
        let data: Vec<u8> = (0..=255).rev().collect();
        let text = codec.encode(&data).unwrap();
        assert_eq!(codec.decode(&text).unwrap(), data);
        assert!(Codec::new().decode(&text).map_or(true, |decoded| decoded != data));
    }

    #[test]
    fn test_explicit_key() {
        let codec = Codec::with_seed(1);
        let text = codec.encode_with_key(b"abc", b'P').unwrap();
        assert!(text.starts_with('P'));
        assert!(matches!(
            codec.encode_with_key(b"abc", b'#'),
            Err(CodecError::InvalidKey('#'))
        ));
    }

    #[test]
    fn test_ascii_roundtrip() {
        let mut codec = Codec::with_seed(1);
        let text = codec.encode_ascii(b"plain ascii text").unwrap();
        assert_eq!(codec.decode_ascii(&text).unwrap(), b"plain ascii text");
        assert!(matches!(
            codec.encode_ascii("é".as_bytes()),
            Err(CodecError::OutOfRangeByte { position: 0, .. })
        ));
    }
}
