//! spendctx CLI
//!
//! Inspect spend purpose tags and check purpose binding of serialized spend
//! proofs.
//!
//! ## Usage
//!
//! ```bash
//! # Wire byte of a purpose
//! spendctx encode stake
//!
//! # Purpose of a wire byte
//! spendctx decode 3
//!
//! # Binding input, challenge and envelope for a context
//! spendctx bind --purpose stake --commitment 0a0b.. --checkpoint <32 bytes hex> \
//!     --denomination 100 --freshness <32 bytes hex> --json
//!
//! # Check a serialized envelope against what a coinstake validator expects
//! spendctx check --proof 0100.. --kind coinstake
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use spend_context::{
    ChallengeHash, PublicContext, SpendBinder, SpendProofEnvelope, SpendPurpose, TransactionKind,
    Verdict,
};

mod config;

#[derive(Parser)]
#[command(name = "spendctx")]
#[command(about = "spend purpose tags and challenge binding for zerocoin spend proofs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file
    #[arg(short, long, global = true, env = "SPENDCTX_CONFIG")]
    config: Option<PathBuf>,

    /// Override the binding domain
    #[arg(long, global = true, env = "SPENDCTX_DOMAIN")]
    domain: Option<String>,

    /// Override the challenge hash (sha256, blake2b, merlin)
    #[arg(long, global = true, env = "SPENDCTX_HASH")]
    hash: Option<ChallengeHash>,

    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the wire byte of a purpose
    Encode {
        /// Purpose name (spend, stake, collateral-proof, signed-message)
        purpose: SpendPurpose,
    },

    /// Print the purpose for a wire byte
    Decode {
        /// Byte value, decimal or 0x-prefixed hex
        byte: String,
    },

    /// Build the binding input and challenge for a purpose and context
    Bind {
        #[arg(short, long)]
        purpose: SpendPurpose,

        /// Coin commitment (hex)
        #[arg(long)]
        commitment: String,

        /// Accumulator checkpoint (32 bytes hex)
        #[arg(long)]
        checkpoint: String,

        #[arg(long)]
        denomination: u64,

        /// Freshness value, e.g. signed transaction hash (32 bytes hex)
        #[arg(long)]
        freshness: String,

        /// Knowledge-proof response to embed in the envelope (hex)
        #[arg(long, default_value = "")]
        response: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check a serialized envelope against an expected purpose
    Check {
        /// Envelope (hex)
        #[arg(long)]
        proof: String,

        /// Expected purpose
        #[arg(long, conflicts_with = "kind", required_unless_present = "kind")]
        expect: Option<SpendPurpose>,

        /// Transaction kind being validated (send, coinstake, collateral-lock, message-signature)
        #[arg(long)]
        kind: Option<TransactionKind>,
    },
}

#[derive(Serialize)]
struct BindOutput {
    purpose: SpendPurpose,
    purpose_name: &'static str,
    binding_input: String,
    challenge: String,
    envelope: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("spendctx={level},spend_context={level}").into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Encode { purpose } => {
            println!("{}", purpose.encode());
            Ok(())
        }
        Commands::Decode { byte } => {
            let byte = parse_byte(&byte)?;
            let purpose = SpendPurpose::decode(byte)?;
            println!("{}", purpose);
            Ok(())
        }
        Commands::Bind {
            purpose,
            commitment,
            checkpoint,
            denomination,
            freshness,
            response,
            json,
        } => {
            let binder = binder(cli.config.as_deref(), cli.domain, cli.hash)?;
            let ctx = PublicContext::new(
                hex::decode(commitment).context("commitment is not hex")?,
                parse_hex32(&checkpoint).context("checkpoint")?,
                denomination,
                parse_hex32(&freshness).context("freshness")?,
            );
            let response = hex::decode(response).context("response is not hex")?;
            run_bind(&binder, purpose, ctx, response, json)
        }
        Commands::Check {
            proof,
            expect,
            kind,
        } => {
            let binder = binder(cli.config.as_deref(), cli.domain, cli.hash)?;
            let expected = match (expect, kind) {
                (Some(purpose), _) => purpose,
                (None, Some(kind)) => kind.expected_purpose(),
                (None, None) => bail!("one of --expect or --kind is required"),
            };
            let bytes = hex::decode(proof.trim()).context("proof is not hex")?;
            run_check(&binder, &bytes, expected)
        }
    }
}

fn binder(
    path: Option<&Path>,
    domain: Option<String>,
    hash: Option<ChallengeHash>,
) -> Result<SpendBinder> {
    let cfg = config::resolve(path, domain, hash)?;
    info!(domain = %cfg.domain, hash = ?cfg.hash, "binding config");
    Ok(SpendBinder::new(cfg)?)
}

fn run_bind(
    binder: &SpendBinder,
    purpose: SpendPurpose,
    ctx: PublicContext,
    response: Vec<u8>,
    json: bool,
) -> Result<()> {
    let out = bind_output(binder, purpose, ctx, response)?;
    println!("{}", render_bind(&out, json)?);
    Ok(())
}

fn bind_output(
    binder: &SpendBinder,
    purpose: SpendPurpose,
    ctx: PublicContext,
    response: Vec<u8>,
) -> Result<BindOutput> {
    let input = binder.bind_challenge_input(purpose, &ctx)?;
    let envelope = binder.bind(purpose, ctx, |_| response)?;
    Ok(BindOutput {
        purpose,
        purpose_name: purpose.name(),
        binding_input: hex::encode(&input),
        challenge: hex::encode(envelope.challenge.0),
        envelope: hex::encode(envelope.to_bytes()?),
    })
}

fn render_bind(out: &BindOutput, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(out)?);
    }
    Ok(format!(
        "purpose:       {} ({})\nbinding input: {}\nchallenge:     {}\nenvelope:      {}",
        out.purpose_name,
        out.purpose.encode(),
        out.binding_input,
        out.challenge,
        out.envelope,
    ))
}

fn run_check(binder: &SpendBinder, bytes: &[u8], expected: SpendPurpose) -> Result<()> {
    let envelope = SpendProofEnvelope::from_bytes(bytes)?;
    info!(declared = %envelope.purpose, %expected, "checking envelope");

    match binder.check_purpose(&envelope, expected) {
        Verdict::Accept => {
            println!("accept");
            Ok(())
        }
        Verdict::Reject(err) => {
            warn!(error = %err, "envelope rejected");
            println!("reject");
            Err(anyhow!(err))
        }
    }
}

fn parse_byte(s: &str) -> Result<u8> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.with_context(|| format!("not a byte value: {s:?}"))
}

fn parse_hex32(s: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(s.trim()).context("not hex")?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| anyhow!("expected 32 bytes, got {}", v.len()))
}
