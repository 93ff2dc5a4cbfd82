//! challenge binding for spend proofs
//!
//! the purpose byte is folded into the bytes the challenge is hashed from, so
//! a response computed for one purpose cannot satisfy a verifier that
//! recomputes the challenge for another.
//!
//! binding input layout (integers little-endian):
//!
//! ```text
//! u32 len(domain) || domain || u8 purpose || public context
//! ```
//!
//! see [`PublicContext::encode_into`] for the context layout.

use tracing::{debug, warn};

use crate::challenge::{BindingConfig, Challenge};
use crate::context::PublicContext;
use crate::envelope::SpendProofEnvelope;
use crate::error::{Result, SpendContextError};
use crate::kind::TransactionKind;
use crate::purpose::SpendPurpose;

/// what the verifier needs from a proof to check its purpose binding
///
/// implemented by [`SpendProofEnvelope`]; knowledge-proof types that carry
/// their own framing can implement it directly.
pub trait BoundProof {
    /// purpose byte the prover declared
    fn declared_purpose(&self) -> SpendPurpose;

    fn public_context(&self) -> &PublicContext;

    /// challenge the proof's responses were computed against
    fn asserted_challenge(&self) -> &Challenge;
}

/// outcome of a purpose check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(SpendContextError),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            Verdict::Accept => Ok(()),
            Verdict::Reject(err) => Err(err),
        }
    }
}

/// builds binding inputs and checks proofs under one [`BindingConfig`]
#[derive(Clone, Debug, Default)]
pub struct SpendBinder {
    config: BindingConfig,
}

impl SpendBinder {
    pub fn new(config: BindingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// canonical bytes the challenge is derived from
    pub fn bind_challenge_input(
        &self,
        purpose: SpendPurpose,
        context: &PublicContext,
    ) -> Result<Vec<u8>> {
        let domain = self.config.domain.as_bytes();
        let mut out = Vec::with_capacity(4 + domain.len() + 1 + context.encoded_len());
        out.extend_from_slice(&(domain.len() as u32).to_le_bytes());
        out.extend_from_slice(domain);
        out.push(purpose.encode());
        context.encode_into(&mut out)?;
        Ok(out)
    }

    pub fn derive_challenge(
        &self,
        purpose: SpendPurpose,
        context: &PublicContext,
    ) -> Result<Challenge> {
        let input = self.bind_challenge_input(purpose, context)?;
        Ok(self.config.hash.derive(&input))
    }

    /// derive the challenge for `purpose` and wrap the prover's response
    ///
    /// `respond` receives the bound challenge and returns the serialized
    /// knowledge-proof responses.
    pub fn bind<F>(
        &self,
        purpose: SpendPurpose,
        context: PublicContext,
        respond: F,
    ) -> Result<SpendProofEnvelope>
    where
        F: FnOnce(&Challenge) -> Vec<u8>,
    {
        let challenge = self.derive_challenge(purpose, &context)?;
        let response = respond(&challenge);
        debug!(%purpose, response_len = response.len(), "bound spend proof");
        SpendProofEnvelope::new(purpose, context, challenge, response)
    }

    /// accept only if the proof's challenge was derived for `expected`
    pub fn check_purpose<P: BoundProof + ?Sized>(
        &self,
        proof: &P,
        expected: SpendPurpose,
    ) -> Verdict {
        let recomputed = match self.derive_challenge(expected, proof.public_context()) {
            Ok(c) => c,
            Err(err) => {
                debug!(%expected, error = %err, "rejecting spend proof");
                return Verdict::Reject(err);
            }
        };

        let declared = proof.declared_purpose();
        let matches = recomputed.ct_matches(proof.asserted_challenge());
        if declared != expected || !matches {
            warn!(
                %expected,
                %declared,
                challenge_matches = matches,
                "spend proof not bound to expected purpose"
            );
            return Verdict::Reject(SpendContextError::WrongContext { expected });
        }

        Verdict::Accept
    }

    /// [`check_purpose`](Self::check_purpose) with the purpose a validator of
    /// `kind` transactions expects
    pub fn check_for_transaction<P: BoundProof + ?Sized>(
        &self,
        proof: &P,
        kind: TransactionKind,
    ) -> Verdict {
        self.check_purpose(proof, kind.expected_purpose())
    }
}

/// [`SpendBinder::bind_challenge_input`] under the default config
pub fn bind_challenge_input(purpose: SpendPurpose, context: &PublicContext) -> Result<Vec<u8>> {
    SpendBinder::default().bind_challenge_input(purpose, context)
}

/// [`SpendBinder::check_purpose`] under the default config
pub fn check_purpose<P: BoundProof + ?Sized>(proof: &P, expected: SpendPurpose) -> Verdict {
    SpendBinder::default().check_purpose(proof, expected)
}
