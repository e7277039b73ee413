use bluff64::cli::{
    decode_file, encode_file, show_alphabet, CodecOptions, DecodeOptions, EncodeOptions,
};
use bluff64::TransformKind;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Version info from Cargo and build.rs
const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROFILE: &str = env!("BLUFF64_PROFILE");
const TARGET: &str = env!("BLUFF64_TARGET");
const GIT_HASH: &str = env!("BLUFF64_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        format!("{} ({} {}, {})", VERSION, GIT_HASH, PROFILE, TARGET)
    })
}

#[derive(Parser)]
#[command(name = "bluff64")]
#[command(author, about = "Reversible base-64-like text codec with an embedded message key", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct CodecArgs {
    /// JSON codec configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shuffle the alphabet from a shared passphrase
    #[arg(long)]
    passphrase: Option<String>,

    /// Byte transform
    #[arg(long, value_parser = parse_transform)]
    transform: Option<TransformKind>,
}

impl CodecArgs {
    fn into_options(self, key: Option<char>, bluff: bool) -> CodecOptions {
        CodecOptions {
            config: self.config,
            passphrase: self.passphrase,
            transform: self.transform,
            key,
            bluff,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file to text
    #[command(alias = "e")]
    Encode {
        /// Input file
        input: PathBuf,

        /// Output file (stdout if omitted)
        output: Option<PathBuf>,

        /// Use the denser layout for 7-bit input
        #[arg(long)]
        ascii: bool,

        /// Input file contains hex text
        #[arg(long)]
        hex: bool,

        /// Random key symbol per message
        #[arg(long)]
        bluff: bool,

        /// Fixed key symbol
        #[arg(long)]
        key: Option<char>,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Decode text back to bytes
    #[command(alias = "d")]
    Decode {
        /// Input file with encoded text
        input: PathBuf,

        /// Output file (stdout if omitted)
        output: Option<PathBuf>,

        /// Input was encoded with --ascii
        #[arg(long)]
        ascii: bool,

        /// Write hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Show the alphabet tables
    #[command(alias = "a")]
    Alphabet {
        /// Fixed key symbol to report
        #[arg(long)]
        key: Option<char>,

        #[command(flatten)]
        codec: CodecArgs,
    },
}

fn parse_transform(s: &str) -> Result<TransformKind, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("bluff64 {}", get_version());
        return ExitCode::SUCCESS;
    }

    init_logging(cli.verbose);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Encode {
            input,
            output,
            ascii,
            hex,
            bluff,
            key,
            codec,
        } => {
            let options = EncodeOptions {
                codec: codec.into_options(key, bluff),
                ascii,
                hex,
            };

            encode_file(&input, output.as_deref(), &options).map(|text| match &output {
                Some(path) => println!("Encoded {} symbols to {}", text.len(), path.display()),
                None => println!("{}", text),
            })
        }

        Commands::Decode {
            input,
            output,
            ascii,
            hex: hex_output,
            codec,
        } => {
            let options = DecodeOptions {
                codec: codec.into_options(None, false),
                ascii,
                hex: hex_output,
            };

            decode_file(&input, output.as_deref(), &options).and_then(|data| match &output {
                Some(path) => {
                    println!("Decoded {} bytes to {}", data.len(), path.display());
                    Ok(())
                }
                None if hex_output => {
                    println!("{}", hex::encode(&data));
                    Ok(())
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&data)?;
                    stdout.flush()?;
                    Ok(())
                }
            })
        }

        Commands::Alphabet { key, codec } => {
            show_alphabet(&codec.into_options(key, false)).map(|table| print!("{}", table))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
