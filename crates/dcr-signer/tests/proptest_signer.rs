use proptest::prelude::*;

use dcr_primitives::chainhash::Hash;
use dcr_primitives::ec::{PrivateKey, Signature};
use dcr_script::{template, Script};
use dcr_signer::{sign, ErrorCode, SigningInput, SigningOutput, UnspentOutput};
use dcr_transaction::sighash::{
    is_single, SIGHASH_ALL, SIGHASH_ANYONECANPAY, SIGHASH_NONE, SIGHASH_SINGLE,
};
use dcr_transaction::{OutPoint, SerializeType, TransactionOutput};

/// Strategy for a valid secp256k1 private key.
fn arb_key() -> impl Strategy<Value = PrivateKey> {
    prop::array::uniform32(any::<u8>())
        .prop_filter_map("valid scalar", |bytes| PrivateKey::from_bytes(&bytes).ok())
}

fn arb_hash_type() -> impl Strategy<Value = u32> {
    (
        prop_oneof![Just(SIGHASH_ALL), Just(SIGHASH_NONE), Just(SIGHASH_SINGLE)],
        any::<bool>(),
    )
        .prop_map(|(base, acp)| if acp { base | SIGHASH_ANYONECANPAY } else { base })
}

/// Pay-to-pubkey-hash request with `amounts.len()` UTXOs locked to `key`.
fn p2pkh_request(
    key: &PrivateKey,
    amounts: &[i64],
    outputs: &[i64],
    hash_type: u32,
) -> SigningInput {
    let locking = template::p2pkh_for_key(&key.pub_key());
    let mut input = SigningInput::new(hash_type);
    for (i, amount) in amounts.iter().enumerate() {
        input.utxos.push(UnspentOutput::new(
            OutPoint::new(Hash::new([i as u8; 32]), i as u32, 0),
            *amount,
            locking.clone(),
        ));
    }
    for value in outputs {
        input
            .outputs
            .push(TransactionOutput::new(*value, template::p2pkh(&[7; 20])));
    }
    input.add_private_key(&key.to_bytes());
    input
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every signed input carries a signature that verifies against the
    /// input's signature hash.
    #[test]
    fn signatures_verify(
        key in arb_key(),
        amounts in prop::collection::vec(1_000i64..1_000_000, 1..4),
        hash_type in arb_hash_type(),
    ) {
        let outputs = vec![500i64];
        let input = p2pkh_request(&key, &amounts, &outputs, hash_type);
        let locking = template::p2pkh_for_key(&key.pub_key());
        let tx = sign(&input).unwrap();

        for (index, txin) in tx.inputs.iter().enumerate() {
            if is_single(hash_type) && index >= outputs.len() {
                prop_assert!(txin.signature_script.is_empty());
                continue;
            }
            let chunks = txin.signature_script.chunks().unwrap();
            prop_assert_eq!(chunks.len(), 2);
            let sig = chunks[0].push_data().unwrap();
            let (type_byte, der) = sig.split_last().unwrap();
            prop_assert_eq!(*type_byte as u32, hash_type);

            let digest = tx
                .signature_hash(index, locking.to_bytes(), hash_type)
                .unwrap();
            let signature = Signature::from_der(der).unwrap();
            prop_assert!(key.pub_key().verify(&digest, &signature));
        }
    }

    /// Signing only fills signature scripts; the prefix is untouched.
    #[test]
    fn signing_preserves_prefix(
        key in arb_key(),
        amounts in prop::collection::vec(1_000i64..1_000_000, 1..4),
        lock_time in any::<u32>(),
        expiry in any::<u32>(),
    ) {
        let mut input = p2pkh_request(&key, &amounts, &[100, 200], SIGHASH_ALL);
        input.lock_time = lock_time;
        input.expiry = expiry;

        let unsigned = dcr_signer::Signer::new(&input).unsigned_transaction().clone();
        let tx = sign(&input).unwrap();
        prop_assert_eq!(
            tx.serialize(SerializeType::NoWitness),
            unsigned.serialize(SerializeType::NoWitness)
        );
        prop_assert_eq!(tx.inputs.len(), amounts.len());
        for (txin, amount) in tx.inputs.iter().zip(&amounts) {
            prop_assert_eq!(txin.value_in, *amount);
        }
    }

    /// A request whose outputs exceed its UTXOs never yields a transaction.
    #[test]
    fn overspend_is_rejected(
        key in arb_key(),
        amount in 1i64..1_000_000,
        excess in 1i64..1_000,
    ) {
        let input = p2pkh_request(&key, &[amount], &[amount + excess], SIGHASH_ALL);
        let output = SigningOutput::from(sign(&input));
        prop_assert!(output.transaction().is_none());
        prop_assert_eq!(output.error().map(|e| e.code), Some(ErrorCode::NotEnoughUtxos));
    }

    /// The same request always signs to the same bytes.
    #[test]
    fn signing_is_deterministic(key in arb_key(), hash_type in arb_hash_type()) {
        let input = p2pkh_request(&key, &[10_000, 20_000], &[5_000, 5_000], hash_type);
        let first = SigningOutput::from(sign(&input));
        let second = SigningOutput::from(sign(&input));
        prop_assert!(first.is_success());
        prop_assert_eq!(first.encoded(), second.encoded());
        prop_assert_eq!(first.transaction_id(), second.transaction_id());
    }

    /// A key that does not own the UTXO never produces a signature.
    #[test]
    fn foreign_key_is_rejected(owner in arb_key(), other in arb_key()) {
        prop_assume!(owner != other);
        let mut input = p2pkh_request(&owner, &[10_000], &[1_000], SIGHASH_ALL);
        input.private_keys.clear();
        input.add_private_key(&other.to_bytes());
        let err = sign(&input).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::MissingPrivateKey);
    }
}

#[test]
fn unrecognized_script_rejected() {
    let mut input = SigningInput::new(SIGHASH_ALL);
    input.utxos.push(UnspentOutput::new(
        OutPoint::new(Hash::new([1; 32]), 0, 0),
        1_000,
        Script::from_hex("6a").unwrap(),
    ));
    assert_eq!(sign(&input).unwrap_err().code(), ErrorCode::ScriptError);
}
