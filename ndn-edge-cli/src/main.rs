use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

/// ndn-edge command line interface
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Sets the level of verbosity
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Which key material a command works with.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyKind {
    Ecdsa,
    Hmac,
    Aes,
}

/// Which signature variant to apply or check.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SignKind {
    Digest,
    Hmac,
    Ecdsa,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate key material and write it as hex files
    Keygen {
        /// Kind of key to generate
        #[arg(short, long, value_enum)]
        kind: KeyKind,

        /// Application key id to associate with the key
        #[arg(short = 'i', long, default_value = "1")]
        key_id: u32,

        /// Output path prefix (files get .sec/.pub or .key appended)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Build and sign a Data packet
    Sign {
        /// Name of the Data packet (NDN URI format)
        name: String,

        /// Content to carry (string)
        content: String,

        /// Signature variant
        #[arg(short, long, value_enum)]
        kind: SignKind,

        /// Hex key file (required for hmac and ecdsa)
        #[arg(short = 'f', long)]
        key_file: Option<PathBuf>,

        /// Application key id named in the key locator
        #[arg(short = 'i', long, default_value = "1")]
        key_id: u32,

        /// Producer identity for the key locator (NDN URI format)
        #[arg(long, default_value = "/local")]
        identity: String,

        /// Freshness period in milliseconds
        #[arg(long)]
        freshness: Option<u64>,

        /// Output file for the encoded packet (stdout hex if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Verify a signed Data packet
    Verify {
        /// File holding the encoded packet
        packet: PathBuf,

        /// Signature variant to check
        #[arg(short, long, value_enum)]
        kind: SignKind,

        /// Hex key file (required for hmac and ecdsa)
        #[arg(short = 'f', long)]
        key_file: Option<PathBuf>,

        /// Application key id of the verification key
        #[arg(short = 'i', long, default_value = "1")]
        key_id: u32,
    },

    /// Parse a Data packet without verifying and print its fields
    Inspect {
        /// File holding the encoded packet
        packet: PathBuf,

        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match cli.command {
        Commands::Keygen { kind, key_id, out } => commands::keygen::run(kind, key_id, &out),
        Commands::Sign {
            name,
            content,
            kind,
            key_file,
            key_id,
            identity,
            freshness,
            out,
        } => commands::sign::run(
            &name,
            &content,
            kind,
            key_file.as_deref(),
            key_id,
            &identity,
            freshness,
            out.as_deref(),
        ),
        Commands::Verify {
            packet,
            kind,
            key_file,
            key_id,
        } => commands::verify::run(&packet, kind, key_file.as_deref(), key_id),
        Commands::Inspect { packet, json } => commands::inspect::run(&packet, json),
    }
}
