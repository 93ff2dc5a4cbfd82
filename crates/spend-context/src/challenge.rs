//! challenge derivation backends and binder configuration

use core::fmt;
use core::str::FromStr;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{Result, SpendContextError};

/// default domain prefix of every binding input
pub const DEFAULT_DOMAIN: &str = "zerocoin.spend-context.v1";

/// longest accepted domain prefix
pub const MAX_DOMAIN_LEN: usize = 255;

#[cfg(feature = "transcript-merlin")]
const MERLIN_LABEL: &[u8] = b"zerocoin.spend-context";

type Blake2b256 = Blake2b<U32>;

/// 32-byte non-interactive challenge
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Challenge(pub [u8; 32]);

impl Challenge {
    /// constant-time equality
    pub fn ct_matches(&self, other: &Challenge) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl AsRef<[u8]> for Challenge {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Challenge(")?;
        for b in &self.0[..8] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "..)")
    }
}

/// hash used to turn a binding input into a challenge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ChallengeHash {
    #[default]
    Sha256,
    Blake2b,
    /// binding input appended under `binding`, squeezed under `challenge`
    #[cfg(feature = "transcript-merlin")]
    Merlin,
}

impl ChallengeHash {
    pub fn derive(&self, binding_input: &[u8]) -> Challenge {
        let mut out = [0u8; 32];
        match self {
            ChallengeHash::Sha256 => {
                out.copy_from_slice(&Sha256::digest(binding_input));
            }
            ChallengeHash::Blake2b => {
                out.copy_from_slice(&Blake2b256::digest(binding_input));
            }
            #[cfg(feature = "transcript-merlin")]
            ChallengeHash::Merlin => {
                let mut t = merlin::Transcript::new(MERLIN_LABEL);
                t.append_message(b"binding", binding_input);
                t.challenge_bytes(b"challenge", &mut out);
            }
        }
        Challenge(out)
    }
}

impl FromStr for ChallengeHash {
    type Err = SpendContextError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(ChallengeHash::Sha256),
            "blake2b" => Ok(ChallengeHash::Blake2b),
            #[cfg(feature = "transcript-merlin")]
            "merlin" => Ok(ChallengeHash::Merlin),
            _ => Err(SpendContextError::UnknownChallengeHash(s.to_string())),
        }
    }
}

/// binder settings
///
/// both sides of a proof must use the same config, a mismatch rejects every
/// proof the same way a wrong purpose does.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BindingConfig {
    pub domain: String,
    pub hash: ChallengeHash,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            hash: ChallengeHash::default(),
        }
    }
}

impl BindingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.domain.is_empty() {
            return Err(SpendContextError::MalformedContext("empty domain"));
        }
        if self.domain.len() > MAX_DOMAIN_LEN {
            return Err(SpendContextError::MalformedContext("domain too long"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_answer() {
        // sha256("abc")
        let c = ChallengeHash::Sha256.derive(b"abc");
        assert_eq!(
            hex::encode(c.0),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_backends_separate() {
        let a = ChallengeHash::Sha256.derive(b"input");
        let b = ChallengeHash::Blake2b.derive(b"input");
        assert_ne!(a, b);

        #[cfg(feature = "transcript-merlin")]
        {
            let m = ChallengeHash::Merlin.derive(b"input");
            assert_ne!(m, a);
            assert_ne!(m, b);
            assert_eq!(m, ChallengeHash::Merlin.derive(b"input"));
        }
    }

    #[test]
    fn test_deterministic() {
        for hash in [ChallengeHash::Sha256, ChallengeHash::Blake2b] {
            assert_eq!(hash.derive(b"x"), hash.derive(b"x"));
            assert_ne!(hash.derive(b"x"), hash.derive(b"y"));
        }
    }

    #[test]
    fn test_ct_matches() {
        let a = Challenge([7u8; 32]);
        let mut other = [7u8; 32];
        assert!(a.ct_matches(&Challenge(other)));
        other[31] ^= 1;
        assert!(!a.ct_matches(&Challenge(other)));
    }

    #[test]
    fn test_config_validation() {
        assert!(BindingConfig::default().validate().is_ok());
        let empty = BindingConfig {
            domain: String::new(),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
        let long = BindingConfig {
            domain: "d".repeat(MAX_DOMAIN_LEN + 1),
            ..Default::default()
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_hash_names() {
        assert_eq!("sha256".parse::<ChallengeHash>(), Ok(ChallengeHash::Sha256));
        assert_eq!("Blake2b".parse::<ChallengeHash>(), Ok(ChallengeHash::Blake2b));
        assert!("md5".parse::<ChallengeHash>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let cfg: BindingConfig = serde_json::from_str(r#"{"hash":"blake2b"}"#).unwrap();
        assert_eq!(cfg.hash, ChallengeHash::Blake2b);
        assert_eq!(cfg.domain, DEFAULT_DOMAIN);
        assert!(serde_json::from_str::<BindingConfig>(r#"{"salt":"x"}"#).is_err());
    }
}
