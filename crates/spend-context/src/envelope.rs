//! serialized spend proof as seen by the binding layer
//!
//! ```text
//! u8 version || u8 purpose || public context || [32] challenge || u32 len(response) || response
//! ```
//!
//! the purpose byte is decoded before anything after it is read, so an
//! unassigned tag aborts the parse with `InvalidTag`.

use crate::binding::BoundProof;
use crate::challenge::Challenge;
use crate::context::PublicContext;
use crate::error::{Result, SpendContextError};
use crate::purpose::SpendPurpose;
use crate::wire::Reader;

pub const ENVELOPE_VERSION: u8 = 1;

/// largest opaque response accepted
pub const MAX_RESPONSE_LEN: usize = 64 * 1024;

const TRUNCATED: SpendContextError = SpendContextError::MalformedProof("truncated");

/// spend proof framing: purpose, public context, challenge and the
/// knowledge-proof responses
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEnvelope"))]
pub struct SpendProofEnvelope {
    pub purpose: SpendPurpose,
    pub context: PublicContext,
    pub challenge: Challenge,
    /// opaque, owned by the knowledge-proof layer
    pub response: Vec<u8>,
}

/// unchecked serde shape, goes through [`SpendProofEnvelope::new`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawEnvelope {
    purpose: SpendPurpose,
    context: PublicContext,
    challenge: Challenge,
    response: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawEnvelope> for SpendProofEnvelope {
    type Error = SpendContextError;

    fn try_from(raw: RawEnvelope) -> Result<Self> {
        SpendProofEnvelope::new(raw.purpose, raw.context, raw.challenge, raw.response)
    }
}

impl SpendProofEnvelope {
    pub fn new(
        purpose: SpendPurpose,
        context: PublicContext,
        challenge: Challenge,
        response: Vec<u8>,
    ) -> Result<Self> {
        context.validate()?;
        if response.len() > MAX_RESPONSE_LEN {
            return Err(SpendContextError::MalformedProof("response too long"));
        }
        Ok(Self {
            purpose,
            context,
            challenge,
            response,
        })
    }

    pub fn encoded_len(&self) -> usize {
        2 + self.context.encoded_len() + 32 + 4 + self.response.len()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.response.len() > MAX_RESPONSE_LEN {
            return Err(SpendContextError::MalformedProof("response too long"));
        }
        let mut out = Vec::with_capacity(self.encoded_len());
        out.push(ENVELOPE_VERSION);
        out.push(self.purpose.encode());
        self.context.encode_into(&mut out)?;
        out.extend_from_slice(&self.challenge.0);
        out.extend_from_slice(&(self.response.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.response);
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);

        let version = reader.u8(TRUNCATED)?;
        if version != ENVELOPE_VERSION {
            return Err(SpendContextError::UnsupportedVersion(version));
        }
        let purpose = SpendPurpose::decode(reader.u8(TRUNCATED)?)?;
        // context errors are envelope framing errors here
        let context = PublicContext::read(&mut reader).map_err(|e| match e {
            SpendContextError::MalformedContext(msg) => SpendContextError::MalformedProof(msg),
            other => other,
        })?;
        let challenge = Challenge(reader.array32(TRUNCATED)?);

        let len = reader.u32(TRUNCATED)? as usize;
        if len > MAX_RESPONSE_LEN {
            return Err(SpendContextError::MalformedProof("response too long"));
        }
        let response = reader.take(len, TRUNCATED)?.to_vec();

        if reader.remaining() != 0 {
            return Err(SpendContextError::MalformedProof("trailing bytes"));
        }

        Ok(Self {
            purpose,
            context,
            challenge,
            response,
        })
    }
}

impl BoundProof for SpendProofEnvelope {
    fn declared_purpose(&self) -> SpendPurpose {
        self.purpose
    }

    fn public_context(&self) -> &PublicContext {
        &self.context
    }

    fn asserted_challenge(&self) -> &Challenge {
        &self.challenge
    }
}
