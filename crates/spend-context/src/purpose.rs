//! spend purpose tags
//!
//! the tag byte is what gets hashed and persisted, not the variant name.
//! values are append-only: a new purpose takes the next unused byte and
//! existing values are never renumbered.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::error::{Result, SpendContextError};

/// intended use of a coin-spend proof
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(u8)]
pub enum SpendPurpose {
    /// ordinary transfer, coin is unusable for any other purpose afterwards
    Spend = 0,
    /// spend performed while producing a proof-of-stake block
    Stake = 1,
    /// ownership of value locked as collateral for a service role
    CollateralProof = 2,
    /// ownership proof authenticating an arbitrary message
    SignedMessage = 3,
}

impl SpendPurpose {
    /// all purposes in wire order
    pub const ALL: [SpendPurpose; 4] = [
        SpendPurpose::Spend,
        SpendPurpose::Stake,
        SpendPurpose::CollateralProof,
        SpendPurpose::SignedMessage,
    ];

    /// wire byte for this purpose
    pub const fn encode(self) -> u8 {
        self as u8
    }

    /// parse an untrusted byte
    ///
    /// anything outside the assigned values is rejected, never mapped to a
    /// default purpose.
    pub fn decode(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(SpendPurpose::Spend),
            1 => Ok(SpendPurpose::Stake),
            2 => Ok(SpendPurpose::CollateralProof),
            3 => Ok(SpendPurpose::SignedMessage),
            other => Err(SpendContextError::InvalidTag(other)),
        }
    }

    /// stable lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            SpendPurpose::Spend => "spend",
            SpendPurpose::Stake => "stake",
            SpendPurpose::CollateralProof => "collateral-proof",
            SpendPurpose::SignedMessage => "signed-message",
        }
    }

    /// whether the coin's serial must be recorded as spent
    ///
    /// collateral and message proofs show ownership without moving value.
    pub const fn consumes_coin(self) -> bool {
        matches!(self, SpendPurpose::Spend | SpendPurpose::Stake)
    }
}

impl PartialOrd for SpendPurpose {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SpendPurpose {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encode().cmp(&other.encode())
    }
}

impl From<SpendPurpose> for u8 {
    fn from(purpose: SpendPurpose) -> u8 {
        purpose.encode()
    }
}

impl TryFrom<u8> for SpendPurpose {
    type Error = SpendContextError;

    fn try_from(byte: u8) -> Result<Self> {
        SpendPurpose::decode(byte)
    }
}

impl fmt::Display for SpendPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpendPurpose {
    type Err = SpendContextError;

    /// accepts the lowercase name or the decimal tag byte
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(purpose) = SpendPurpose::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
        {
            return Ok(purpose);
        }
        match s.parse::<u8>() {
            Ok(byte) => SpendPurpose::decode(byte),
            Err(_) => Err(SpendContextError::UnknownPurpose(s.to_string())),
        }
    }
}
