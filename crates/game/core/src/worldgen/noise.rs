//! Seeded 1-D gradient noise.

/// Permutation-table noise over one dimension.
///
/// Pure function of the input coordinate once constructed; the table is fixed
/// by the seed.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perm: [u8; 512],
}

impl NoiseField {
    /// Builds the permutation table from a seed in `[0, 1)` plus an
    /// arbitrary offset (distinct fields use distinct offsets).
    pub fn new(seed: f64) -> Self {
        let mut permutation = [0u8; 256];
        for (i, slot) in permutation.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for i in (1..256usize).rev() {
            let span = (i + 1) as f64;
            let j = ((seed * span * 1000.0) % span).floor() as usize;
            permutation.swap(i, j.min(i));
        }
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = permutation[i % 256];
        }
        Self { perm }
    }

    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    fn grad(hash: u8, x: f64) -> f64 {
        let h = hash & 15;
        let magnitude = f64::from(1 + (h & 7));
        if h & 8 != 0 { -magnitude * x } else { magnitude * x }
    }

    pub fn perlin1(&self, x: f64) -> f64 {
        let cell = x.floor();
        let index = (cell as i64).rem_euclid(256) as usize;
        let t = x - cell;
        let a = Self::grad(self.perm[index], t);
        let b = Self::grad(self.perm[index + 1], t - 1.0);
        a + Self::fade(t) * (b - a)
    }

    /// Fractal sum of `octaves` layers, normalized by total amplitude and
    /// clamped to `[-1, 1]`.
    pub fn octave(&self, x: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;
        for _ in 0..octaves {
            total += self.perlin1(x * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }
        if max_value == 0.0 {
            return 0.0;
        }
        (total / max_value).clamp(-1.0, 1.0)
    }
}
