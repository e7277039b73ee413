use crate::cli::CodecOptions;
use crate::error::Result;
use std::path::Path;

/// Options for the encode command
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    pub codec: CodecOptions,
    /// Use the ASCII layout (input must be 7-bit)
    pub ascii: bool,
    /// Input file holds hex text instead of raw bytes
    pub hex: bool,
}

/// Encode a file. Writes the text to `output_path` when given and returns it.
pub fn encode_file(
    input_path: &Path,
    output_path: Option<&Path>,
    options: &EncodeOptions,
) -> Result<String> {
    let raw = std::fs::read(input_path)?;
    let data = if options.hex {
        hex::decode(String::from_utf8_lossy(&raw).trim())?
    } else {
        raw
    };

    let mut codec = options.codec.build_codec()?;
    let text = if options.ascii {
        codec.encode_ascii(&data)?
    } else {
        codec.encode(&data)?
    };

    if let Some(path) = output_path {
        std::fs::write(path, &text)?;
    }
    Ok(text)
}
