use clap::{Parser, Subcommand};
use fpemask::alphabet::{Alphabet, Kind};
use fpemask::cipher::stream_shift::DEFAULT_ROUNDS;
use fpemask::cipher::CipherContext;
use fpemask::error::{FpeError, Result};
use fpemask::field::{FieldKind, FieldOptions, FieldProcessor};
use fpemask::key::decode_key_hex;
use fpemask::opaque::OpaqueCodec;
use std::process::ExitCode;
use std::sync::Arc;

/// Version info from build.rs
const VERSION: &str = env!("FPEMASK_VERSION");
const BUILD: &str = env!("FPEMASK_BUILD");
const PROFILE: &str = env!("FPEMASK_PROFILE");
const GIT_HASH: &str = env!("FPEMASK_GIT_HASH");

/// Combined version string (compile-time concatenation not possible, so we build at runtime)
fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "fpemask")]
#[command(author, about = "Format-preserving encryption for structured identifiers", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct TransformArgs {
    /// Identifier to transform
    text: String,

    /// Field type: email, phone, cnid, cc, passport, generic, or opaque
    #[arg(long = "type", default_value = "generic")]
    field_type: String,

    /// Hex-encoded key (falls back to the FPE_KEY_HEX environment variable)
    #[arg(long)]
    key: Option<String>,

    /// Tweak override (base prefix for fields with sub-group tweaks)
    #[arg(long)]
    tweak: Option<String>,

    /// Marker appended to email ciphertext
    #[arg(long, default_value = "#")]
    marker: char,

    /// Alphabet for the phone middle group
    #[arg(long, default_value = "digits", value_parser = parse_kind)]
    phone_alphabet: Kind,

    /// Leading phone digits kept in the clear
    #[arg(long, default_value_t = 3)]
    keep_prefix: usize,

    /// Trailing phone digits kept in the clear
    #[arg(long, default_value_t = 4)]
    keep_suffix: usize,

    /// Cipher rounds (values below the minimum are raised to it)
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    rounds: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt an identifier
    #[command(alias = "e")]
    Encrypt(TransformArgs),

    /// Decrypt an identifier
    #[command(alias = "d")]
    Decrypt(TransformArgs),
}

fn parse_kind(s: &str) -> std::result::Result<Kind, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn resolve_key(arg: &Option<String>) -> Result<Vec<u8>> {
    let hex = match arg {
        Some(k) => k.clone(),
        None => std::env::var("FPE_KEY_HEX").map_err(|_| {
            FpeError::InvalidKey("missing --key (or FPE_KEY_HEX environment variable)".into())
        })?,
    };
    decode_key_hex(&hex)
}

fn transform(args: &TransformArgs, forward: bool) -> Result<String> {
    let key = resolve_key(&args.key)?;
    let context = Arc::new(CipherContext::stream_shift(&key, args.rounds)?);

    if args.field_type.eq_ignore_ascii_case("opaque") {
        let codec = OpaqueCodec::new(context, Alphabet::of(Kind::Base64Url))?;
        let tweak = args.tweak.as_deref().unwrap_or("opaque:v1");
        return if forward {
            codec.encrypt(&args.text, tweak)
        } else {
            codec.decrypt(&args.text, tweak)
        };
    }

    let kind: FieldKind = args.field_type.parse()?;
    let options = FieldOptions {
        tweak: args.tweak.clone(),
        marker: args.marker,
        phone_alphabet: args.phone_alphabet,
        keep_prefix: args.keep_prefix,
        keep_suffix: args.keep_suffix,
    };
    let fp = FieldProcessor::new(context, kind, options);

    if forward {
        fp.encrypt(&args.text)
    } else {
        fp.decrypt(&args.text)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("fpemask {}", get_version());
        return ExitCode::SUCCESS;
    }

    // Require a command if not showing version
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Show help when no command provided
            use clap::CommandFactory;
            Cli::command().print_help().unwrap();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Encrypt(args) => transform(&args, true),
        Commands::Decrypt(args) => transform(&args, false),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
