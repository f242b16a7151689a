use hmac::{Hmac, Mac};
use rand::{rngs::StdRng, rngs::ThreadRng, Rng, SeedableRng};
use sha2::{Digest, Sha256};

// The engine never reaches for a global RNG: every draw goes through a RandomSource.
// Live spins wrap a thread RNG, replays use the HMAC stream, tests script the draws.

pub type HmacSha256 = Hmac<Sha256>;

/// Provider of uniform draws for the engine.
pub trait RandomSource {
    /// Uniform float in [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Uniform index in [0, len). `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    /// Per-thread generator; cheap to build once per request.
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Provably-fair stream: HMAC-SHA256(server_seed, "client_seed:nonce") gives the first
/// 32 bytes, each further block is the SHA-256 of the previous one. Every 4 bytes map
/// to one float in [0,1).
pub struct ProvablyFairSource {
    server_seed: String, // secret
    client_seed: String,
    nonce: u64,
    block: [u8; 32],
    cursor: usize,
}

impl ProvablyFairSource {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        let mut source = Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
            block: [0u8; 32],
            cursor: 0,
        };
        source.block = source.hmac_bytes();
        source
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    pub fn hmac_bytes(&self) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.server_seed.as_bytes())
            .expect("HMAC takes any key length");
        let msg = format!("{}:{}", self.client_seed, self.nonce);
        mac.update(msg.as_bytes());
        let res = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&res);
        out
    }

    fn rehash_block(&mut self) {
        let next = Sha256::digest(self.block);
        self.block.copy_from_slice(&next);
        self.cursor = 0;
    }
}

impl RandomSource for ProvablyFairSource {
    fn next_unit(&mut self) -> f64 {
        if self.cursor + 4 > self.block.len() {
            self.rehash_block();
        }
        let chunk = &self.block[self.cursor..self.cursor + 4];
        let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        self.cursor += 4;
        (v as f64) / (u32::MAX as f64 + 1.0)
    }
}

/// Replays a fixed sequence of unit draws, wrapping around at the end.
/// An empty script always yields 0.0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            pos: 0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let v = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        v
    }
}
