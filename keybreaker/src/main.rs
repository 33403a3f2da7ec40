mod search;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use fpemask::alphabet::{Alphabet, Kind};
use search::{candidate_context, candidate_to_key, search, KnownPair, SearchOptions};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keybreaker")]
#[command(about = "Known-plaintext key recovery against weakly seeded fpemask keys")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a candidate range against known plaintext/ciphertext pairs
    Search {
        /// Known pair as plain=cipher (repeatable)
        #[arg(long = "pair", value_parser = parse_pair)]
        pairs: Vec<KnownPair>,

        /// JSON file holding an array of {"plain", "cipher"} objects
        #[arg(long)]
        pairs_file: Option<PathBuf>,

        /// Upper bound of the candidate range [0, max)
        #[arg(long, default_value_t = 300_000)]
        max_candidates: u32,

        /// Derived key length in bytes
        #[arg(long, default_value_t = 8)]
        key_len: usize,

        /// Tweak the transcripts were produced under
        #[arg(long, default_value = "demo:tweak")]
        tweak: String,

        /// Exact round count the transcripts were produced with
        #[arg(long, default_value_t = 2)]
        rounds: u32,

        /// Alphabet of the transcripts
        #[arg(long, default_value = "base62", value_parser = parse_kind)]
        alphabet: Kind,
    },

    /// End-to-end demo: hide a candidate, encrypt a sample, recover the key
    Demo {
        /// The hidden candidate the attacker does not know
        #[arg(long, default_value_t = 1223133422)]
        candidate: u32,

        /// Sample plaintext (base62 characters)
        #[arg(long, default_value = "HELLO123")]
        plain: String,

        /// Upper bound of the searched range [0, max)
        #[arg(long, default_value_t = 300_000)]
        max_candidates: u32,

        #[arg(long, default_value_t = 8)]
        key_len: usize,

        #[arg(long, default_value = "demo:tweak")]
        tweak: String,

        #[arg(long, default_value_t = 2)]
        rounds: u32,
    },
}

fn parse_pair(s: &str) -> Result<KnownPair, String> {
    match s.split_once('=') {
        Some((plain, cipher)) => Ok(KnownPair {
            plain: plain.to_string(),
            cipher: cipher.to_string(),
        }),
        None => Err(format!("expected plain=cipher, got {:?}", s)),
    }
}

fn parse_kind(s: &str) -> Result<Kind, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn report_progress(candidate: u32) {
    if candidate > 0 {
        println!("Tried {} candidates...", candidate);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            mut pairs,
            pairs_file,
            max_candidates,
            key_len,
            tweak,
            rounds,
            alphabet,
        } => {
            if let Some(path) = pairs_file {
                let data = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let from_file: Vec<KnownPair> =
                    serde_json::from_str(&data).with_context(|| "parsing pairs file")?;
                pairs.extend(from_file);
            }
            if pairs.is_empty() {
                bail!("no known pairs given (use --pair or --pairs-file)");
            }

            let options = SearchOptions {
                max_candidates,
                key_len,
                tweak,
                rounds,
                alphabet,
            };
            println!(
                "Searching [0, {}) with key_len={} rounds={} over {} pair(s)",
                options.max_candidates,
                options.key_len,
                options.rounds,
                pairs.len()
            );

            match search(&pairs, &options, report_progress)? {
                Some(candidate) => {
                    let key = candidate_to_key(candidate, options.key_len);
                    println!("FOUND candidate {} (key {})", candidate, hex::encode(&key));
                }
                None => println!("No match in the given range"),
            }
        }

        Commands::Demo {
            candidate,
            plain,
            max_candidates,
            key_len,
            tweak,
            rounds,
        } => {
            let options = SearchOptions {
                max_candidates,
                key_len,
                tweak,
                rounds,
                alphabet: Kind::Base62,
            };

            let real = candidate_context(candidate, &options)?;
            let alphabet = Alphabet::of(options.alphabet);
            let cipher = real.encrypt_str(&plain, &alphabet, &options.tweak)?;

            println!("Hidden candidate: {}", candidate);
            println!("Plain:  {}", plain);
            println!("Cipher: {}", cipher);

            let pairs = vec![KnownPair {
                plain,
                cipher,
            }];
            match search(&pairs, &options, report_progress)? {
                Some(found) => println!("SUCCESS: recovered candidate {}", found),
                None => println!("FAILED to recover in [0, {})", options.max_candidates),
            }
        }
    }

    Ok(())
}
