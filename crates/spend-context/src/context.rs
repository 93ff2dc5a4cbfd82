//! public proof context supplied by the knowledge-proof layer
//!
//! this crate only encodes the context, it never checks that the commitment
//! or checkpoint are meaningful. the length rules below are the only
//! validation performed here.

use crate::error::{Result, SpendContextError};
use crate::wire::Reader;

/// upper bound on an encoded commitment
pub const MAX_COMMITMENT_LEN: usize = 1024;

/// public values a spend proof's challenge is computed over
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPublicContext"))]
pub struct PublicContext {
    /// serialized coin commitment
    pub commitment: Vec<u8>,
    /// accumulator checkpoint the membership proof was made against
    pub accumulator_checkpoint: [u8; 32],
    /// coin denomination
    pub denomination: u64,
    /// freshness value, e.g. hash of the transaction being signed
    pub freshness: [u8; 32],
}

/// unchecked serde shape, validated on conversion
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPublicContext {
    commitment: Vec<u8>,
    accumulator_checkpoint: [u8; 32],
    denomination: u64,
    freshness: [u8; 32],
}

#[cfg(feature = "serde")]
impl TryFrom<RawPublicContext> for PublicContext {
    type Error = SpendContextError;

    fn try_from(raw: RawPublicContext) -> Result<Self> {
        let ctx = PublicContext::new(
            raw.commitment,
            raw.accumulator_checkpoint,
            raw.denomination,
            raw.freshness,
        );
        ctx.validate()?;
        Ok(ctx)
    }
}

impl PublicContext {
    pub fn new(
        commitment: Vec<u8>,
        accumulator_checkpoint: [u8; 32],
        denomination: u64,
        freshness: [u8; 32],
    ) -> Self {
        Self {
            commitment,
            accumulator_checkpoint,
            denomination,
            freshness,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.commitment.is_empty() {
            return Err(SpendContextError::MalformedContext("empty commitment"));
        }
        if self.commitment.len() > MAX_COMMITMENT_LEN {
            return Err(SpendContextError::MalformedContext("commitment too long"));
        }
        Ok(())
    }

    /// encoded length in bytes
    pub fn encoded_len(&self) -> usize {
        4 + self.commitment.len() + 32 + 8 + 32
    }

    /// append the canonical encoding to `out`
    ///
    /// commitment length (u32 le) || commitment || checkpoint || denomination (u64 le) || freshness
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.validate()?;
        out.reserve(self.encoded_len());
        out.extend_from_slice(&(self.commitment.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.commitment);
        out.extend_from_slice(&self.accumulator_checkpoint);
        out.extend_from_slice(&self.denomination.to_le_bytes());
        out.extend_from_slice(&self.freshness);
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// parse a standalone encoded context, rejecting trailing bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let ctx = Self::read(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(SpendContextError::MalformedContext("trailing bytes"));
        }
        Ok(ctx)
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        const TRUNCATED: SpendContextError = SpendContextError::MalformedContext("truncated");

        let len = reader.u32(TRUNCATED)? as usize;
        if len > MAX_COMMITMENT_LEN {
            return Err(SpendContextError::MalformedContext("commitment too long"));
        }
        let commitment = reader.take(len, TRUNCATED)?.to_vec();
        let accumulator_checkpoint = reader.array32(TRUNCATED)?;
        let denomination = reader.u64(TRUNCATED)?;
        let freshness = reader.array32(TRUNCATED)?;

        let ctx = Self {
            commitment,
            accumulator_checkpoint,
            denomination,
            freshness,
        };
        ctx.validate()?;
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PublicContext {
        PublicContext::new(vec![0xaa; 48], [1u8; 32], 5, [2u8; 32])
    }

    #[test]
    fn test_encoding_layout() {
        let ctx = sample();
        let bytes = ctx.to_bytes().unwrap();
        assert_eq!(bytes.len(), ctx.encoded_len());
        assert_eq!(&bytes[..4], &48u32.to_le_bytes());
        assert_eq!(&bytes[4..52], &[0xaa; 48][..]);
        assert_eq!(&bytes[52..84], &[1u8; 32]);
        assert_eq!(&bytes[84..92], &5u64.to_le_bytes());
        assert_eq!(&bytes[92..124], &[2u8; 32]);
    }

    #[test]
    fn test_parse_roundtrip() {
        let ctx = sample();
        let parsed = PublicContext::from_bytes(&ctx.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, ctx);
    }

    #[test]
    fn test_empty_commitment_rejected() {
        let ctx = PublicContext::new(Vec::new(), [0u8; 32], 1, [0u8; 32]);
        assert_eq!(
            ctx.to_bytes(),
            Err(SpendContextError::MalformedContext("empty commitment"))
        );
    }

    #[test]
    fn test_oversized_commitment_rejected() {
        let ctx = PublicContext::new(vec![0u8; MAX_COMMITMENT_LEN + 1], [0u8; 32], 1, [0u8; 32]);
        assert!(ctx.validate().is_err());

        // declared length alone is enough to reject
        let mut bytes = ((MAX_COMMITMENT_LEN + 1) as u32).to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0u8; 8]);
        assert_eq!(
            PublicContext::from_bytes(&bytes),
            Err(SpendContextError::MalformedContext("commitment too long"))
        );
    }

    #[test]
    fn test_truncated_and_trailing() {
        let bytes = sample().to_bytes().unwrap();
        assert_eq!(
            PublicContext::from_bytes(&bytes[..bytes.len() - 1]),
            Err(SpendContextError::MalformedContext("truncated"))
        );

        let mut extra = bytes.clone();
        extra.push(0);
        assert_eq!(
            PublicContext::from_bytes(&extra),
            Err(SpendContextError::MalformedContext("trailing bytes"))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_lengths() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: PublicContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());

        let mut empty = serde_json::to_value(sample()).unwrap();
        empty["commitment"] = serde_json::json!([]);
        assert!(serde_json::from_value::<PublicContext>(empty).is_err());

        let mut long = serde_json::to_value(sample()).unwrap();
        long["commitment"] = serde_json::to_value(vec![1u8; MAX_COMMITMENT_LEN + 1]).unwrap();
        assert!(serde_json::from_value::<PublicContext>(long).is_err());
    }
}
