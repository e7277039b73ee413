use crate::cli::CodecOptions;
use crate::error::Result;
use std::path::Path;

/// Options for the decode command
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub codec: CodecOptions,
    /// Input was produced with the ASCII layout
    pub ascii: bool,
    /// Write hex text instead of raw bytes
    pub hex: bool,
}

/// Decode a file of encoded text. Surrounding whitespace is ignored.
/// Writes the result to `output_path` when given and returns the decoded bytes.
pub fn decode_file(
    input_path: &Path,
    output_path: Option<&Path>,
    options: &DecodeOptions,
) -> Result<Vec<u8>> {
    let raw = std::fs::read_to_string(input_path)?;
    let codec = options.codec.build_codec()?;
    let data = if options.ascii {
        codec.decode_ascii(raw.trim())?
    } else {
        codec.decode(raw.trim())?
    };

    if let Some(path) = output_path {
        if options.hex {
            std::fs::write(path, hex::encode(&data))?;
        } else {
            std::fs::write(path, &data)?;
        }
    }
    Ok(data)
}
