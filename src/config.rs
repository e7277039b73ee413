use crate::error::{CodecError, Result};
use crate::transform::TransformKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Codec settings as stored in a JSON config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// 64-character alphabet, built-in table when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<String>,
    /// Shuffles the alphabet deterministically, applied after `alphabet`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
    /// Draw a random key symbol for every message
    pub bluff: bool,
    /// Fixed key symbol, a single character of the alphabet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub transform: TransformKind,
}

impl CodecConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded codec config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The configured key as a byte, if any
    pub fn key_byte(&self) -> Result<Option<u8>> {
        match self.key.as_deref() {
            None => Ok(None),
            Some(key) => match key.as_bytes() {
                [byte] => Ok(Some(*byte)),
                _ => Err(CodecError::InvalidConfig(format!(
                    "key must be a single ASCII character, got {:?}",
                    key
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_empty_object() {
        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.transform, TransformKind::Xor);
        assert!(!config.bluff);
    }

    #[test]
    fn test_parse_full_config() {
        let config: CodecConfig = serde_json::from_str(
            r#"{
                "alphabet": "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/",
                "passphrase": "hunter2",
                "bluff": true,
                "key": "Z",
                "transform": "add"
            }"#,
        )
        .unwrap();
        assert_eq!(config.transform, TransformKind::Add);
        assert_eq!(config.key_byte().unwrap(), Some(b'Z'));
        assert!(config.bluff);
    }

    #[test]
    fn test_unknown_transform_rejected() {
        let parsed = serde_json::from_str::<CodecConfig>(r#"{"transform": "rot13"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_key_must_be_single_byte() {
        let config = CodecConfig {
            key: Some("AB".into()),
            ..Default::default()
        };
        assert!(matches!(config.key_byte(), Err(CodecError::InvalidConfig(_))));
        assert!(matches!(
            Codec::from_config(&config),
            Err(CodecError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codec.json");
        let config = CodecConfig {
            passphrase: Some("shared secret".into()),
            key: Some("P".into()),
            transform: TransformKind::Add,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(CodecConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_codecs_from_same_config_agree() {
        let config = CodecConfig {
            passphrase: Some("shared secret".into()),
            transform: TransformKind::Add,
            ..Default::default()
        };
        let mut sender = Codec::from_config(&config).unwrap();
        let receiver = Codec::from_config(&config).unwrap();

        let text = sender.encode(b"agreed layout").unwrap();
        assert_eq!(receiver.decode(&text).unwrap(), b"agreed layout");
        assert_ne!(receiver.alphabet(), Codec::new().alphabet());
    }

    #[test]
    fn test_invalid_alphabet_in_config() {
        let config = CodecConfig {
            alphabet: Some("abc".into()),
            ..Default::default()
        };
        assert!(matches!(
            Codec::from_config(&config),
            Err(CodecError::InvalidAlphabet(_))
        ));
    }
}
