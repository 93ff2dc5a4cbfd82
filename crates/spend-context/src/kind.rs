//! transaction kinds and the purpose each one must carry

use core::fmt;
use core::str::FromStr;

use crate::error::SpendContextError;
use crate::purpose::SpendPurpose;

/// kind of transaction a spend proof appears in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TransactionKind {
    Send,
    Coinstake,
    CollateralLock,
    MessageSignature,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 4] = [
        TransactionKind::Send,
        TransactionKind::Coinstake,
        TransactionKind::CollateralLock,
        TransactionKind::MessageSignature,
    ];

    /// purpose a validator of this kind checks proofs against
    pub const fn expected_purpose(self) -> SpendPurpose {
        match self {
            TransactionKind::Send => SpendPurpose::Spend,
            TransactionKind::Coinstake => SpendPurpose::Stake,
            TransactionKind::CollateralLock => SpendPurpose::CollateralProof,
            TransactionKind::MessageSignature => SpendPurpose::SignedMessage,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TransactionKind::Send => "send",
            TransactionKind::Coinstake => "coinstake",
            TransactionKind::CollateralLock => "collateral-lock",
            TransactionKind::MessageSignature => "message-signature",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransactionKind {
    type Err = SpendContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionKind::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SpendContextError::UnknownTransactionKind(s.to_string()))
    }
}
