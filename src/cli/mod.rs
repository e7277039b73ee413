pub mod alphabet;
pub mod decode;
pub mod encode;

pub use alphabet::*;
pub use decode::*;
pub use encode::*;

use crate::codec::Codec;
use crate::config::CodecConfig;
use crate::error::Result;
use crate::transform::TransformKind;
use std::path::PathBuf;

/// Codec settings shared by every command; flags override the config file
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    pub config: Option<PathBuf>,
    pub passphrase: Option<String>,
    pub transform: Option<TransformKind>,
    pub key: Option<char>,
    pub bluff: bool,
}

impl CodecOptions {
    /// Merge the config file (if any) with command-line overrides
    pub fn resolve(&self) -> Result<CodecConfig> {
        let mut config = match &self.config {
            Some(path) => CodecConfig::load(path)?,
            None => CodecConfig::default(),
        };
        if let Some(passphrase) = &self.passphrase {
            config.passphrase = Some(passphrase.clone());
        }
        if let Some(transform) = self.transform {
            config.transform = transform;
        }
        if let Some(key) = self.key {
            config.key = Some(key.to_string());
        }
        config.bluff |= self.bluff;
        Ok(config)
    }

    pub fn build_codec(&self) -> Result<Codec> {
        Codec::from_config(&self.resolve()?)
    }
}
