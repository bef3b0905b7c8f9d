/// Small deterministic generator (SplitMix64) used for color jitter.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed derived from several keys, so each (sweep seed, block size, window) gets its own
    /// stream regardless of which worker computes it.
    pub fn from_keys(keys: &[u64]) -> Self {
        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        for &k in keys {
            state = mix64(state ^ k.wrapping_mul(0xD6E8_FEB8_6659_FD93));
        }
        Self::new(state)
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        mix64(self.state)
    }

    /// Uniform integer in `[-bound, bound]`.
    pub fn next_offset(&mut self, bound: u32) -> i32 {
        let span = u64::from(bound) * 2 + 1;
        (self.next_u64() % span) as i32 - bound as i32
    }
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
