use crate::rand::Rng32;

#[derive(Debug, Copy, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator seeded from /dev/urandom.
    pub fn new() -> Self {
        Self { state: super::gen_random_seed() }
    }

    pub fn from_seed(seed: u32) -> Self {
        assert!(seed != 0, "XorShift32 cannot be seeded with zero.");
        Self { state: seed }
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Rng32 for XorShift32 {
    fn seed(&mut self, seed: u32) {
        assert!(seed != 0, "XorShift32 cannot be seeded with zero.");
        self.state = seed;
    }

    fn gen(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn test_xorshift32_zero_seed_fails() {
        XorShift32::from_seed(0);
    }

    #[test]
    fn test_xorshift32_deterministic() {
        let mut a = XorShift32::from_seed(1);
        let mut b = XorShift32::from_seed(1);
        for _ in 0..16 {
            assert_eq!(a.gen(), b.gen());
        }
        assert!((0..64).any(|_| a.gen_bool()));
    }
}
