use crate::alphabet::Alphabet;
use crate::cli::CodecOptions;
use crate::error::Result;

/// Render the forward and inverse tables of the configured alphabet
pub fn show_alphabet(options: &CodecOptions) -> Result<String> {
    let codec = options.build_codec()?;
    let alphabet = codec.alphabet();

    let mut output = String::new();
    output.push_str("Alphabet\n");
    output.push_str("========\n\n");
    output.push_str(&format!("Symbols: {}\n", alphabet));
    output.push_str(&format!("Hex: {}\n", hex::encode(alphabet.symbols())));
    output.push_str(&format!("Fixed key: {}\n", codec.fixed_key() as char));
    output.push_str(&format!("Bluff: {}\n\n", codec.is_bluff()));

    output.push_str("Encode table (value -> symbol):\n");
    output.push_str(&encode_table(alphabet));
    output.push('\n');
    output.push_str("Decode table (symbol -> value):\n");
    output.push_str(&decode_table(alphabet));

    Ok(output)
}

fn encode_table(alphabet: &Alphabet) -> String {
    let mut output = String::new();
    for (row, symbols) in alphabet.symbols().chunks(10).enumerate() {
        let cells: Vec<String> = symbols.iter().map(|&s| format!("'{}'", s as char)).collect();
        let first = row * 10;
        output.push_str(&format!(
            "  {:<50}/* {:>2}-{:>2} */\n",
            cells.join(", "),
            first,
            first + symbols.len() - 1
        ));
    }
    output
}

/// Inverse table over the printable ASCII range, `-1` for unmapped symbols
fn decode_table(alphabet: &Alphabet) -> String {
    let table = alphabet.inverse_table();
    let mut output = String::new();
    for first in (0x20usize..0x80).step_by(16) {
        let cells: Vec<String> = table[first..first + 16]
            .iter()
            .map(|v| format!("{:>2}", v))
            .collect();
        output.push_str(&format!(
            "  {}  /* 0x{:02x}-0x{:02x} */\n",
            cells.join(" "),
            first,
            first + 15
        ));
    }
    output
}
