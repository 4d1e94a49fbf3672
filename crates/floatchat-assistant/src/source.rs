// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use floatchat_app::ReplySource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `rand`-backed draws. Seed it for reproducible sessions.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when a seed is configured, entropy-backed otherwise.
    pub fn from_config(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl ReplySource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
