// Path: crates/services/src/identity/tests/mod.rs
use super::*;
use council_api::crypto::Signer;
use council_api::state::MemoryState;
use council_crypto::sign::eddsa::Ed25519KeyPair;
use council_crypto::sign::secp256k1::Secp256k1KeyPair;
use council_types::app::SignatureSuite;

fn ed(seed: u8) -> Ed25519KeyPair {
    Ed25519KeyPair::from_seed([seed; 32]).unwrap()
}

fn proof(
    hub: &IdentityHub,
    state: &dyn StateAccess,
    did: &Did,
    old: &dyn Signer,
    new: &dyn Signer,
) -> RotationProof {
    let challenge = hub.rotation_challenge(state, did).unwrap();
    RotationProof {
        new_key: new.verification_key(),
        old_signature: old.sign(&challenge).unwrap(),
        new_signature: new.sign(&challenge).unwrap(),
    }
}

#[test]
fn register_then_resolve() {
    let hub = IdentityHub::new(MigrationConfig::default());
    let mut state = MemoryState::new();
    let kp = ed(1);

    let did = hub.register(&mut state, &kp.verification_key()).unwrap();
    assert_eq!(did, kp.verification_key().did().unwrap());
    assert_eq!(
        hub.resolve_key(&state, &did).unwrap(),
        Some(kp.verification_key())
    );
    assert_eq!(hub.resolve_key(&state, &Did([0xAB; 32])).unwrap(), None);
}

#[test]
fn double_registration_is_rejected() {
    let hub = IdentityHub::new(MigrationConfig::default());
    let mut state = MemoryState::new();
    let key = ed(1).verification_key();
    hub.register(&mut state, &key).unwrap();
    assert!(matches!(
        hub.register(&mut state, &key),
        Err(TransactionError::Invalid(_))
    ));
}

#[test]
fn disallowed_suite_cannot_register() {
    let config = MigrationConfig {
        allowed_target_suites: vec![SignatureSuite::ED25519],
        ..MigrationConfig::default()
    };
    let hub = IdentityHub::new(config);
    let mut state = MemoryState::new();
    let key = Secp256k1KeyPair::from_seed([3; 32]).unwrap().verification_key();
    assert!(hub.register(&mut state, &key).is_err());
    assert!(state.is_empty());
}

#[test]
fn corrupt_record_surfaces_as_state_error() {
    let hub = IdentityHub::new(MigrationConfig::default());
    let mut state = MemoryState::new();
    let did = Did([4; 32]);
    state.insert(&identity_key(&did), &[0xff]).unwrap();
    assert!(matches!(
        hub.resolve_key(&state, &did),
        Err(StateError::InvalidValue(_))
    ));
}

#[test]
fn corrupt_rotation_nonce_is_a_state_error() {
    let hub = IdentityHub::new(MigrationConfig::default());
    let mut state = MemoryState::new();
    let old = ed(1);
    let did = hub.register(&mut state, &old.verification_key()).unwrap();
    let p = proof(&hub, &state, &did, &old, &ed(2));

    state.insert(&rotation_nonce_key(&did), b"bad").unwrap();
    assert!(matches!(
        hub.rotation_challenge(&state, &did),
        Err(StateError::InvalidValue(_))
    ));
    assert!(matches!(
        hub.rotate(&mut state, &did, &p),
        Err(TransactionError::State(StateError::InvalidValue(_)))
    ));
    assert_eq!(
        hub.resolve_key(&state, &did).unwrap(),
        Some(old.verification_key())
    );
}

#[test]
fn rotation_replaces_key_and_bumps_nonce() {
    let hub = IdentityHub::new(MigrationConfig::default());
    let mut state = MemoryState::new();
    let old = ed(1);
    let new = Secp256k1KeyPair::from_seed([2; 32]).unwrap();
    let did = hub.register(&mut state, &old.verification_key()).unwrap();

    let challenge_before = hub.rotation_challenge(&state, &did).unwrap();
    let p = proof(&hub, &state, &did, &old, &new);
    hub.rotate(&mut state, &did, &p).unwrap();

    assert_eq!(
        hub.resolve_key(&state, &did).unwrap(),
        Some(new.verification_key())
    );
    assert_ne!(hub.rotation_challenge(&state, &did).unwrap(), challenge_before);

    // The same proof cannot be replayed against the new nonce.
    assert!(hub.rotate(&mut state, &did, &p).is_err());
}

#[test]
fn rotation_requires_both_signatures() {
    let hub = IdentityHub::new(MigrationConfig::default());
    let mut state = MemoryState::new();
    let old = ed(1);
    let new = ed(2);
    let intruder = ed(3);
    let did = hub.register(&mut state, &old.verification_key()).unwrap();

    let forged_old = proof(&hub, &state, &did, &intruder, &new);
    assert!(matches!(
        hub.rotate(&mut state, &did, &forged_old),
        Err(TransactionError::InvalidSignature(_))
    ));

    let mut forged_new = proof(&hub, &state, &did, &old, &new);
    forged_new.new_key = intruder.verification_key();
    assert!(matches!(
        hub.rotate(&mut state, &did, &forged_new),
        Err(TransactionError::InvalidSignature(_))
    ));

    assert_eq!(
        hub.resolve_key(&state, &did).unwrap(),
        Some(old.verification_key())
    );
}

#[test]
fn suite_change_policy_is_enforced() {
    let config = MigrationConfig {
        allow_suite_change: false,
        ..MigrationConfig::default()
    };
    let hub = IdentityHub::new(config);
    let mut state = MemoryState::new();
    let old = ed(1);
    let did = hub.register(&mut state, &old.verification_key()).unwrap();

    let k1 = Secp256k1KeyPair::from_seed([2; 32]).unwrap();
    let p = proof(&hub, &state, &did, &old, &k1);
    assert!(matches!(
        hub.rotate(&mut state, &did, &p),
        Err(TransactionError::Invalid(_))
    ));

    let same_suite = ed(2);
    let p = proof(&hub, &state, &did, &old, &same_suite);
    hub.rotate(&mut state, &did, &p).unwrap();
}

#[test]
fn rotating_an_unknown_identity_fails() {
    let hub = IdentityHub::new(MigrationConfig::default());
    let mut state = MemoryState::new();
    let did = Did([9; 32]);
    let p = proof(&hub, &state, &did, &ed(1), &ed(2));
    assert!(hub.rotate(&mut state, &did, &p).is_err());
}

#[test]
fn service_call_dispatch() {
    let hub = IdentityHub::new(MigrationConfig::default());
    let mut state = MemoryState::new();
    let old = ed(1);
    let new = ed(2);

    let params = codec::to_bytes_canonical(&RegisterParams {
        key: old.verification_key(),
    })
    .unwrap();
    let out = hub
        .handle_service_call(&mut state, "register@v1", &params)
        .unwrap();
    let did: Did = codec::from_bytes_canonical(&out).unwrap();

    let p = proof(&hub, &state, &did, &old, &new);
    let params = codec::to_bytes_canonical(&RotateKeyParams { did, proof: p }).unwrap();
    hub.handle_service_call(&mut state, "rotate_key@v1", &params)
        .unwrap();
    assert_eq!(
        hub.resolve_key(&state, &did).unwrap(),
        Some(new.verification_key())
    );

    assert!(matches!(
        hub.handle_service_call(&mut state, "bogus@v1", &[]),
        Err(TransactionError::Unsupported(_))
    ));
    assert!(matches!(
        hub.handle_service_call(&mut state, "register@v1", &[1, 2, 3]),
        Err(TransactionError::Deserialization(_))
    ));
}
