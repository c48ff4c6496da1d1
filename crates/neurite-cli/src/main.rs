//! Neurite CLI - document ingestion, audit ledger, and DID registry operations.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

use commands::{append, attest, canonicalize, get, ingest, register, resolve, schemas, verify};
use neurite_registry::RegistryMode;
use neurite_store::StorageMode;

#[derive(Parser)]
#[command(name = "neurite")]
#[command(about = "Verifiable document registry: ingestion, audit ledger, and DID resolution")]
struct Cli {
    /// Path to the durable database
    #[arg(long, global = true, env = "NEURITE_DB", default_value = "neurite.db")]
    db: PathBuf,

    /// Use the volatile in-process backend instead of the durable database
    #[arg(long, global = true)]
    volatile: bool,

    /// Directory scanned for *.schema.json definitions
    #[arg(long, global = true, env = "NEURITE_SCHEMA_DIR", default_value = "schemas")]
    schema_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify, validate, and store a document
    Ingest {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Fetch a stored document by id
    Get {
        /// Store-assigned document id
        id: u64,
    },
    /// Append an event to the audit ledger
    Append {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Replay the ledger chain and verify its linkage
    Verify {
        /// Exit with error code if the chain is broken
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register a DID document, replacing any previous registration
    Register {
        /// The DID to register
        did: String,
        /// Input JSON file (or stdin): {"document": ..., "signatures": [...]}
        input: Option<String>,
    },
    /// Append an attestation to a registered DID
    Attest {
        /// The attested DID
        did: String,
        /// Input JSON file (or stdin) holding the attestation payload
        input: Option<String>,
        /// Optional raw signature over the attestation
        #[arg(long)]
        signature: Option<String>,
    },
    /// Resolve a DID to its document, signatures, and attestation history
    Resolve {
        /// The DID to resolve
        did: String,
    },
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// List schema definitions discovered in the schema directory
    Schemas {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let storage_mode = if cli.volatile {
        StorageMode::Volatile
    } else {
        StorageMode::Durable(cli.db.clone())
    };
    let registry_mode = if cli.volatile {
        RegistryMode::Volatile
    } else {
        RegistryMode::Durable(cli.db.clone())
    };
    log::debug!("storage mode: {:?}", storage_mode);

    let result = match cli.command {
        Commands::Ingest { input } => ingest::run(&storage_mode, &cli.schema_dir, input),
        Commands::Get { id } => get::run(&storage_mode, id),
        Commands::Append { input } => append::run(&storage_mode, input),
        Commands::Verify { strict, json } => verify::run(&storage_mode, strict, json),
        Commands::Register { did, input } => register::run(&registry_mode, did, input),
        Commands::Attest {
            did,
            input,
            signature,
        } => attest::run(&registry_mode, did, input, signature),
        Commands::Resolve { did } => resolve::run(&registry_mode, did),
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Schemas { json } => schemas::run(&cli.schema_dir, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
