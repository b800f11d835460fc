use thiserror::Error;

use crate::rsa::keys::KeyKind;

#[derive(Debug, Error)]
pub enum RsaError {
    #[error("{0} key markers not found in container")]
    KeyNotFound(KeyKind),
    #[error("malformed key container: {0}")]
    Malformed(String),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("block of {len} bytes exceeds the {max} byte key block size")]
    OversizedBlock { len: usize, max: usize },
    #[error("public exponent is not invertible modulo the totient")]
    InverseUndefined,
    #[error("public and private key moduli differ")]
    MismatchedModulus,
    #[error("prime generation timeout after {0} ms")]
    PrimeTimeout(i64),
    #[error("prime bit length {0} is too small")]
    InvalidBitLength(u64),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
