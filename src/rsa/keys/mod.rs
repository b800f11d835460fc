pub mod key_reader;
pub mod key_writer;

use std::fmt;
use std::path::Path;

use num_bigint::BigUint;
use num_traits::One;

use crate::rsa::cipher;
use crate::rsa::config::RsaConfig;
use crate::rsa::error::RsaError;
use crate::rsa::prime_gen::generate_prime_pair;
use crate::rsa::{mod_inverse, totient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Public,
    Private,
}

impl KeyKind {
    pub fn label(&self) -> &'static str {
        match self {
            KeyKind::Public => "PUBLIC",
            KeyKind::Private => "PRIVATE",
        }
    }

    pub fn begin_marker(&self) -> String {
        format!("-----BEGIN {} KEY-----", self.label())
    }

    pub fn end_marker(&self) -> String {
        format!("-----END {} KEY-----", self.label())
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One half of an RSA key pair. Both variants carry the modulus `n`;
/// the exponent is `e` for the public half and `d` for the private one.
/// Equality is structural over both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Public { n: BigUint, e: BigUint },
    Private { n: BigUint, d: BigUint },
}

impl Key {
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Public { .. } => KeyKind::Public,
            Key::Private { .. } => KeyKind::Private,
        }
    }

    pub fn modulus(&self) -> &BigUint {
        match self {
            Key::Public { n, .. } | Key::Private { n, .. } => n,
        }
    }

    pub fn exponent(&self) -> &BigUint {
        match self {
            Key::Public { e, .. } => e,
            Key::Private { d, .. } => d,
        }
    }

    /// Largest block in bytes that fits under this modulus,
    /// `ceil(bits(n) / 8)`.
    pub fn max_block_bytes(&self) -> usize {
        ((self.modulus().bits() + 7) / 8) as usize
    }
}

/// An owned public/private key pair over one shared modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    public: Key,
    private: Key,
    max_block_bytes: usize,
}

impl KeyPair {
    /// Both moduli must be identical; anything else is a construction error.
    pub fn new(public: Key, private: Key) -> Result<Self, RsaError> {
        if public.modulus() != private.modulus() {
            return Err(RsaError::MismatchedModulus);
        }
        let max_block_bytes = public.max_block_bytes();
        Ok(Self { public, private, max_block_bytes })
    }

    pub fn public(&self) -> &Key {
        &self.public
    }

    pub fn private(&self) -> &Key {
        &self.private
    }

    pub fn max_block_bytes(&self) -> usize {
        self.max_block_bytes
    }

    pub fn encrypt_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), RsaError> {
        cipher::encrypt_file(&self.public, input, output)
    }

    pub fn decrypt_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), RsaError> {
        cipher::decrypt_file(&self.private, input, output)
    }

    pub fn save(
        &self,
        public_path: impl AsRef<Path>,
        private_path: impl AsRef<Path>,
    ) -> Result<(), RsaError> {
        self.public.write_to_file(public_path)?;
        self.private.write_to_file(private_path)?;
        Ok(())
    }

    pub fn load(
        public_path: impl AsRef<Path>,
        private_path: impl AsRef<Path>,
    ) -> Result<Self, RsaError> {
        let public = Key::from_file(public_path, KeyKind::Public)?;
        let private = Key::from_file(private_path, KeyKind::Private)?;
        KeyPair::new(public, private)
    }
}

/// Derive a key pair from two freshly generated primes of
/// `config.bit_length` bits each: `n = p * q`, `e = 65537`,
/// `d = e^-1 mod (p-1)(q-1)`.
///
/// A non-invertible `e` is reported as a failure, not retried.
pub fn generate_key_pair(config: &RsaConfig) -> Result<KeyPair, RsaError> {
    let (p, q) = generate_prime_pair(config)?;
    let n = &p * &q;
    let f = totient(&p, &q);
    let e = BigUint::from(RsaConfig::PUBLIC_EXPONENT);
    let d = mod_inverse(&e, &f).ok_or(RsaError::InverseUndefined)?;
    debug_assert!(((&e * &d) % &f).is_one());
    KeyPair::new(Key::Public { n: n.clone(), e }, Key::Private { n, d })
}
