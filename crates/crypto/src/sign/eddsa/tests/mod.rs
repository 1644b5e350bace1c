// Path: crates/crypto/src/sign/eddsa/tests/mod.rs
use super::*;

fn keypair(seed: u8) -> Ed25519KeyPair {
    Ed25519KeyPair::from_seed([seed; 32]).unwrap()
}

#[test]
fn test_sign_and_verify_raw_key() {
    let kp = keypair(1);
    let message = b"Test message";
    let signature = kp.sign(message).unwrap();

    let verifier = Ed25519Verifier;
    assert!(verifier.verify(&kp.public_key_bytes(), message, &signature));
}

#[test]
fn test_seeded_keys_are_deterministic() {
    let a = keypair(7);
    let b = keypair(7);
    assert_eq!(a.public_key_bytes(), b.public_key_bytes());
    // Ed25519 signatures are deterministic for a fixed key and message.
    assert_eq!(a.sign(b"m").unwrap(), b.sign(b"m").unwrap());
    assert_eq!(a.verification_key().suite, SignatureSuite::ED25519);
}

#[test]
fn test_wrong_key_fails() {
    let kp1 = keypair(1);
    let kp2 = keypair(2);
    let signature = kp1.sign(b"Test message").unwrap();
    assert!(!Ed25519Verifier.verify(&kp2.public_key_bytes(), b"Test message", &signature));
}

#[test]
fn test_tampered_message_fails() {
    let kp = keypair(3);
    let signature = kp.sign(b"original").unwrap();
    assert!(!Ed25519Verifier.verify(&kp.public_key_bytes(), b"tampered", &signature));
}

#[test]
fn test_protobuf_encoded_key_is_accepted() {
    let kp = keypair(4);
    let signature = kp.sign(b"hello").unwrap();
    let encoded = kp.public_key_protobuf();
    assert_ne!(encoded.len(), ED25519_PUBLIC_KEY_LEN);
    assert!(Ed25519Verifier.verify(&encoded, b"hello", &signature));
}

#[test]
fn test_garbage_inputs_verify_false() {
    let kp = keypair(5);
    let signature = kp.sign(b"x").unwrap();
    assert!(!Ed25519Verifier.verify(&[0u8; 7], b"x", &signature));
    assert!(!Ed25519Verifier.verify(&kp.public_key_bytes(), b"x", &signature[..10]));
    assert!(!Ed25519Verifier.verify(&[], b"x", &[]));
}
