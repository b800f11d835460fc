use lazy_static::lazy_static;

/// Parameters for prime search and key generation, passed explicitly
/// to every operation that needs them.
#[derive(Debug, Clone)]
pub struct RsaConfig {
    /// Bit length of the random seed prime `t`; the generated primes
    /// `k * t + 1` are at least this wide.
    pub bit_length: u64,
    /// Fermat trial count per candidate.
    pub rounds: u32,
    /// Deadline in milliseconds for one prime search before it is
    /// reported as a timeout failure.
    pub time_max: i64,
}

impl RsaConfig {
    /// Fixed public exponent, 2^16 + 1.
    pub const PUBLIC_EXPONENT: u32 = 65537;
}

lazy_static! {
    pub static ref CONFIG_DEF: RsaConfig = RsaConfig {
        bit_length: 256,
        rounds: 100,
        time_max: 60_000,
    };
}
