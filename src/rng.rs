/// Seeded position sampler. Same seed and same call sequence always yield the
/// same values.
#[derive(Clone, Debug)]
pub struct PositionSampler {
    seed: u32,
}

impl PositionSampler {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Folds a wide user seed into the 32-bit sampler state.
    pub fn from_seed(seed: i64) -> Self {
        let raw = seed as u64;
        Self::new((raw ^ (raw >> 32)) as u32)
    }

    pub fn next_f32(&mut self) -> f32 {
        self.seed = self.seed.wrapping_add(0x6d2b79f5);
        let mut t = self.seed;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        let out = t ^ (t >> 14);
        (out as f64 / 4_294_967_296.0) as f32
    }

    /// Inclusive on both ends. A collapsed range returns `min`.
    pub fn next(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f64;
        let value = min + (self.next_f32() as f64 * span).floor() as i32;
        value.min(max)
    }

    pub fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_f32() * len as f32).floor().min((len - 1) as f32) as usize
    }
}
