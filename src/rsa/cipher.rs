use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::rsa::error::RsaError;
use crate::rsa::keys::Key;

/// Minimal big-endian byte count of `value`; zero takes no bytes.
fn byte_len(value: &BigUint) -> usize {
    ((value.bits() + 7) / 8) as usize
}

fn check_block(value: &BigUint, max: usize) -> Result<(), RsaError> {
    let len = byte_len(value);
    if len > max {
        return Err(RsaError::OversizedBlock { len, max });
    }
    Ok(())
}

/// The raw RSA primitive, `block^exponent mod n`. Encryption and
/// decryption are the same operation under different exponents.
pub fn apply(key: &Key, block: &BigUint) -> BigUint {
    block.modpow(key.exponent(), key.modulus())
}

/// Single-block textbook encryption. The message must fit in
/// `max_block_bytes`; the result is checked against the same bound
/// even though a ciphertext below the modulus can never exceed it.
pub fn encrypt(public_key: &Key, message: &BigUint) -> Result<BigUint, RsaError> {
    let max = public_key.max_block_bytes();
    check_block(message, max)?;
    let ciphertext = apply(public_key, message);
    check_block(&ciphertext, max)?;
    Ok(ciphertext)
}

/// Single-block decryption, symmetric to [`encrypt`].
pub fn decrypt(private_key: &Key, ciphertext: &BigUint) -> Result<BigUint, RsaError> {
    let max = private_key.max_block_bytes();
    check_block(ciphertext, max)?;
    let message = apply(private_key, ciphertext);
    check_block(&message, max)?;
    Ok(message)
}

fn transform_file(
    key: &Key,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    transform: fn(&Key, &BigUint) -> Result<BigUint, RsaError>,
) -> Result<(), RsaError> {
    let data = fs::read(input)?;
    // empty input reads as the integer zero
    let block = BigUint::from_bytes_be(&data);
    // an oversized block fails here, before the destination is touched
    let result = transform(key, &block)?;
    let bytes = if result.is_zero() { Vec::new() } else { result.to_bytes_be() };
    let mut file = File::create(output)?;
    file.write_all(&bytes)?;
    Ok(())
}

/// Encrypt a whole file as one block: its raw bytes are one big-endian
/// integer, the ciphertext integer's minimal big-endian bytes are the
/// output file. No header, no padding, no chunking.
pub fn encrypt_file(
    public_key: &Key,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<(), RsaError> {
    transform_file(public_key, input, output, encrypt)
}

/// Mirror of [`encrypt_file`] under the private exponent.
pub fn decrypt_file(
    private_key: &Key,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<(), RsaError> {
    transform_file(private_key, input, output, decrypt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::config::CONFIG_DEF;
    use crate::rsa::keys::{generate_key_pair, KeyPair};

    // p = 61, q = 53, n = 3233, e = 17, d = 413
    fn textbook_pair() -> KeyPair {
        let n = BigUint::from(3233u32);
        KeyPair::new(
            Key::Public { n: n.clone(), e: BigUint::from(17u32) },
            Key::Private { n, d: BigUint::from(413u32) },
        )
        .unwrap()
    }

    #[test]
    fn textbook_block_values() {
        let kp = textbook_pair();
        let c = encrypt(kp.public(), &BigUint::from(65u32)).unwrap();
        assert_eq!(c, BigUint::from(2790u32));
        let m = decrypt(kp.private(), &c).unwrap();
        assert_eq!(m, BigUint::from(65u32));
    }

    #[test]
    fn round_trip_under_block_bound() {
        let kp = generate_key_pair(&CONFIG_DEF).unwrap();
        assert!(kp.max_block_bytes() >= 64);
        let message = BigUint::from_bytes_be(&vec![0xabu8; kp.max_block_bytes() - 1]);
        let ciphertext = encrypt(kp.public(), &message).unwrap();
        assert_eq!(decrypt(kp.private(), &ciphertext).unwrap(), message);
    }

    #[test]
    fn oversized_message_rejected() {
        let kp = generate_key_pair(&CONFIG_DEF).unwrap();
        let max = kp.max_block_bytes();
        let message = BigUint::from_bytes_be(&vec![0xffu8; max + 1]);
        match encrypt(kp.public(), &message) {
            Err(RsaError::OversizedBlock { len, max: m }) => {
                assert_eq!(len, max + 1);
                assert_eq!(m, max);
            }
            other => panic!("expected oversized-block, got {:?}", other),
        }
        assert!(matches!(
            decrypt(kp.private(), &message),
            Err(RsaError::OversizedBlock { .. })
        ));
    }

    #[test]
    fn file_round_trip() {
        let kp = generate_key_pair(&CONFIG_DEF).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let (plain, cipher, restored) = (
            dir.path().join("plain.txt"),
            dir.path().join("cipher.bin"),
            dir.path().join("restored.txt"),
        );
        fs::write(&plain, b"attack at dawn").unwrap();
        kp.encrypt_file(&plain, &cipher).unwrap();
        assert_ne!(fs::read(&cipher).unwrap(), b"attack at dawn");
        kp.decrypt_file(&cipher, &restored).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), b"attack at dawn");
    }

    #[test]
    fn empty_file_round_trip() {
        let kp = generate_key_pair(&CONFIG_DEF).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let (plain, cipher, restored) = (
            dir.path().join("empty"),
            dir.path().join("cipher"),
            dir.path().join("restored"),
        );
        fs::write(&plain, b"").unwrap();
        kp.encrypt_file(&plain, &cipher).unwrap();
        kp.decrypt_file(&cipher, &restored).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), b"");
    }

    #[test]
    fn oversized_file_fails_without_output() {
        let kp = generate_key_pair(&CONFIG_DEF).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big.bin");
        let out = dir.path().join("out.bin");
        fs::write(&big, vec![0xffu8; kp.max_block_bytes() + 1]).unwrap();
        assert!(matches!(
            kp.encrypt_file(&big, &out),
            Err(RsaError::OversizedBlock { .. })
        ));
        assert!(!out.exists());
        assert!(matches!(
            kp.decrypt_file(&big, &out),
            Err(RsaError::OversizedBlock { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn missing_input_surfaces_io_error() {
        let kp = textbook_pair();
        let dir = tempfile::tempdir().unwrap();
        let res = kp.encrypt_file(dir.path().join("absent"), dir.path().join("out"));
        assert!(matches!(res, Err(RsaError::Io(_))));
    }
}
