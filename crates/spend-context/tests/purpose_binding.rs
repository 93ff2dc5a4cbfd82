//! property tests for purpose encoding and challenge binding

use proptest::prelude::*;

use spend_context::{
    BindingConfig, ChallengeHash, PublicContext, SpendBinder, SpendContextError,
    SpendProofEnvelope, SpendPurpose, TransactionKind, Verdict,
};

fn any_purpose() -> impl Strategy<Value = SpendPurpose> {
    prop::sample::select(SpendPurpose::ALL.to_vec())
}

fn any_context() -> impl Strategy<Value = PublicContext> {
    (
        prop::collection::vec(any::<u8>(), 1..=128),
        any::<[u8; 32]>(),
        any::<u64>(),
        any::<[u8; 32]>(),
    )
        .prop_map(|(commitment, checkpoint, denomination, freshness)| {
            PublicContext::new(commitment, checkpoint, denomination, freshness)
        })
}

fn any_hash() -> impl Strategy<Value = ChallengeHash> {
    prop::sample::select(vec![ChallengeHash::Sha256, ChallengeHash::Blake2b])
}

/// stand-in for a knowledge-proof response that depends on the challenge
fn respond(challenge: &spend_context::Challenge) -> Vec<u8> {
    challenge.0.iter().map(|b| b.wrapping_mul(3)).collect()
}

proptest! {
    #[test]
    fn decode_inverts_encode(purpose in any_purpose()) {
        prop_assert_eq!(SpendPurpose::decode(purpose.encode()), Ok(purpose));
    }

    #[test]
    fn unassigned_bytes_rejected(byte in any::<u8>()) {
        let assigned = SpendPurpose::ALL.iter().any(|p| p.encode() == byte);
        match SpendPurpose::decode(byte) {
            Ok(p) => {
                prop_assert!(assigned);
                prop_assert_eq!(p.encode(), byte);
            }
            Err(e) => {
                prop_assert!(!assigned);
                prop_assert_eq!(e, SpendContextError::InvalidTag(byte));
            }
        }
    }

    #[test]
    fn same_purpose_accepted(
        purpose in any_purpose(),
        ctx in any_context(),
        hash in any_hash(),
    ) {
        let binder = SpendBinder::new(BindingConfig { hash, ..Default::default() }).unwrap();
        let proof = binder.bind(purpose, ctx, respond).unwrap();
        prop_assert_eq!(binder.check_purpose(&proof, purpose), Verdict::Accept);
    }

    #[test]
    fn other_purpose_rejected(
        p1 in any_purpose(),
        p2 in any_purpose(),
        ctx in any_context(),
        hash in any_hash(),
    ) {
        prop_assume!(p1 != p2);
        let binder = SpendBinder::new(BindingConfig { hash, ..Default::default() }).unwrap();
        let proof = binder.bind(p1, ctx, respond).unwrap();
        prop_assert_eq!(
            binder.check_purpose(&proof, p2),
            Verdict::Reject(SpendContextError::WrongContext { expected: p2 })
        );
    }

    #[test]
    fn envelope_survives_the_wire(purpose in any_purpose(), ctx in any_context()) {
        let binder = SpendBinder::default();
        let proof = binder.bind(purpose, ctx, respond).unwrap();
        let parsed = SpendProofEnvelope::from_bytes(&proof.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(&parsed, &proof);
        prop_assert!(binder.check_purpose(&parsed, purpose).is_accept());
    }

    #[test]
    fn purpose_byte_overwrite_never_parses_as_valid_other(
        purpose in any_purpose(),
        ctx in any_context(),
        byte in any::<u8>(),
    ) {
        let binder = SpendBinder::default();
        let mut bytes = binder.bind(purpose, ctx, respond).unwrap().to_bytes().unwrap();
        bytes[1] = byte;
        match SpendProofEnvelope::from_bytes(&bytes) {
            Err(e) => prop_assert_eq!(e, SpendContextError::InvalidTag(byte)),
            Ok(parsed) => {
                for expected in SpendPurpose::ALL {
                    let accepted = binder.check_purpose(&parsed, expected).is_accept();
                    prop_assert_eq!(accepted, expected == purpose && byte == purpose.encode());
                }
            }
        }
    }
}

#[test]
fn stake_validator_rejects_ordinary_spend() {
    let binder = SpendBinder::default();
    let ctx = PublicContext::new(vec![1; 32], [2; 32], 1000, [3; 32]);
    let spend = binder.bind(SpendPurpose::Spend, ctx.clone(), respond).unwrap();
    let stake = binder.bind(SpendPurpose::Stake, ctx, respond).unwrap();

    assert!(binder
        .check_for_transaction(&stake, TransactionKind::Coinstake)
        .is_accept());
    assert_eq!(
        binder.check_for_transaction(&spend, TransactionKind::Coinstake),
        Verdict::Reject(SpendContextError::WrongContext {
            expected: SpendPurpose::Stake
        })
    );
    // responses differ because the challenges differ
    assert_ne!(spend.response, stake.response);
}

#[test]
fn encodings_are_hard_coded() {
    let bytes: Vec<u8> = SpendPurpose::ALL.iter().map(|p| p.encode()).collect();
    assert_eq!(bytes, vec![0, 1, 2, 3]);
    assert_eq!(
        SpendPurpose::decode(0xff),
        Err(SpendContextError::InvalidTag(0xff))
    );
}
