//! spend context binding for zerocoin-style spend proofs
//!
//! a spend proof shows ownership of a committed coin without revealing which
//! one. the same proof machinery serves four uses (ordinary spend, stake,
//! collateral proof, signed message), so every proof carries a purpose tag
//! and the tag is folded into its fiat-shamir challenge. a proof made for
//! one purpose then fails verification for any other.
//!
//! # flow
//!
//! ```text
//! prover                                   verifier
//! ──────                                   ────────
//! purpose, public context                  expected purpose (from tx kind)
//!        │                                        │
//!        ▼                                        ▼
//! bind_challenge_input ──► H ──► challenge   bind_challenge_input ──► H
//!        │                        │                                   │
//!        ▼                        ▼                                   ▼
//! knowledge proof responses ──► envelope ──────────► check_purpose: Accept / Reject
//! ```
//!
//! the commitment scheme, accumulator and knowledge proof live outside this
//! crate; they supply [`PublicContext`] and consume the [`Challenge`].
//!
//! # example
//!
//! ```rust
//! use spend_context::{PublicContext, SpendBinder, SpendContextError, SpendPurpose, Verdict};
//!
//! let binder = SpendBinder::default();
//! let ctx = PublicContext::new(vec![0x5a; 48], [1u8; 32], 100, [2u8; 32]);
//!
//! // the knowledge proof computes its responses against the bound challenge
//! let proof = binder.bind(SpendPurpose::Stake, ctx, |challenge| challenge.0.to_vec())?;
//!
//! assert_eq!(binder.check_purpose(&proof, SpendPurpose::Stake), Verdict::Accept);
//! assert_eq!(
//!     binder.check_purpose(&proof, SpendPurpose::Spend),
//!     Verdict::Reject(SpendContextError::WrongContext { expected: SpendPurpose::Spend })
//! );
//! # Ok::<(), SpendContextError>(())
//! ```

pub mod binding;
pub mod challenge;
pub mod context;
pub mod envelope;
pub mod error;
pub mod kind;
pub mod purpose;
mod wire;

pub use binding::{bind_challenge_input, check_purpose, BoundProof, SpendBinder, Verdict};
pub use challenge::{BindingConfig, Challenge, ChallengeHash, DEFAULT_DOMAIN};
pub use context::PublicContext;
pub use envelope::{SpendProofEnvelope, ENVELOPE_VERSION};
pub use error::{Result, SpendContextError};
pub use kind::TransactionKind;
pub use purpose::SpendPurpose;
