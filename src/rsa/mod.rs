use num_bigint::{BigInt, BigUint, ToBigInt};
use num_traits::{One, Zero};

pub mod cipher;
pub mod config;
pub mod error;
pub mod keys;
pub mod prime_gen;

pub use cipher::*;
pub use config::*;
pub use error::RsaError;
pub use keys::*;
pub use prime_gen::*;

/// Euler's totient of `n = p * q` for primes `p`, `q`.
pub fn totient(p: &BigUint, q: &BigUint) -> BigUint {
    let one = BigUint::one();
    (p - &one) * (q - &one)
}

fn extended_euclid(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        return (a.clone(), BigInt::one(), BigInt::zero());
    }
    let (d, x, y) = extended_euclid(b, &(a % b));
    (d, y.clone(), x - a / b * &y)
}

/// `a^-1 mod m`, or `None` when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let (a, m) = (a.to_bigint()?, m.to_bigint()?);
    let (d, x, _) = extended_euclid(&a, &m);
    if d.is_one() {
        ((x % &m + &m) % &m).to_biguint()
    } else {
        None
    }
}
