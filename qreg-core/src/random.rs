//! Fonte de aleatoriedade injetável para medições

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Gerador semeado pelo relógio de alta resolução
pub fn clock_seeded() -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    tracing::trace!(seed = nanos, "measurement rng seeded from clock");
    StdRng::seed_from_u64(nanos)
}

/// Gerador determinístico
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
