use std::thread;

use chrono::Local;
use crossbeam_channel::bounded;
use num::Integer;
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::Rng;

use crate::rsa::config::RsaConfig;
use crate::rsa::error::RsaError;

/// Fermat primality test over `rounds` random bases `a` in `[1, candidate - 1]`:
/// reject as soon as `gcd(a, candidate) != 1` or `a^(candidate-1) mod candidate != 1`.
///
/// The result is probabilistic, not a proof -- Carmichael numbers fool this
/// test with any coprime base, a known limitation of the Fermat check.
/// Values below 2 are rejected and 2 is accepted without drawing a base.
pub fn is_probable_prime<R: Rng + ?Sized>(candidate: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    if *candidate < two {
        return false;
    }
    if *candidate == two {
        return true;
    }
    if !candidate.bit(0) {
        return false;
    }
    let one = BigUint::one();
    let exponent = candidate - &one;
    for _ in 0..rounds {
        let a = rng.gen_biguint_range(&one, candidate);
        if !a.gcd(candidate).is_one() || !a.modpow(&exponent, candidate).is_one() {
            return false;
        }
    }
    true
}

/// Pocklington-style construction of a probable prime: find a random probable
/// prime `t` of exactly `bit_length` bits, then search `k * t + 1` for even
/// `k = 2, 4, 6, ...` until a candidate passes the primality test. The result
/// is at least `bit_length` bits wide and `result - 1` keeps `t` as a large
/// prime factor, which hardens the modulus against Pollard's p-1 factoring.
///
/// The search is unbounded by construction; `config.time_max` converts a
/// stuck loop into a reported timeout instead of running forever.
pub fn generate_probable_prime<R: Rng + ?Sized>(
    bit_length: u64,
    config: &RsaConfig,
    rng: &mut R,
) -> Result<BigUint, RsaError> {
    if bit_length < 2 {
        return Err(RsaError::InvalidBitLength(bit_length));
    }
    let start = Local::now().timestamp_millis();
    let one = BigUint::one();
    let t = loop {
        // odd, top bit set, so t really spans bit_length bits
        let mut t = rng.gen_biguint(bit_length);
        t |= &one << (bit_length - 1);
        t |= &one;
        if is_probable_prime(&t, config.rounds, rng) {
            break t;
        }
        let elapsed = Local::now().timestamp_millis() - start;
        if elapsed > config.time_max {
            return Err(RsaError::PrimeTimeout(elapsed));
        }
    };
    let two = BigUint::from(2u32);
    let mut k = two.clone();
    loop {
        let candidate = &k * &t + &one;
        if is_probable_prime(&candidate, config.rounds, rng) {
            return Ok(candidate);
        }
        k += &two;
        let elapsed = Local::now().timestamp_millis() - start;
        if elapsed > config.time_max {
            return Err(RsaError::PrimeTimeout(elapsed));
        }
    }
}

/// Generate the two key primes concurrently, one worker per prime.
/// Each worker draws from its own thread-local rng; the searches share
/// no state, so this is a pure throughput optimization.
pub fn generate_prime_pair(config: &RsaConfig) -> Result<(BigUint, BigUint), RsaError> {
    let (tx, rx) = bounded(2);
    let handles = (0..2)
        .map(|_| {
            let tx = tx.clone();
            let config = config.clone();
            thread::spawn(move || {
                let mut rng = rand::thread_rng();
                // the receiver may drop early when the other search fails
                let _ = tx.send(generate_probable_prime(config.bit_length, &config, &mut rng));
            })
        })
        .collect::<Vec<_>>();
    let p = rx.recv().unwrap()?;
    let q = rx.recv().unwrap()?;
    for handle in handles {
        handle.join().unwrap();
    }
    Ok((p, q))
}
