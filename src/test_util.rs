use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

/// Deterministic RNG for repeatable tests.
pub fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0xdead_beef)
}

/// Deterministic RNG with a caller-chosen stream.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
