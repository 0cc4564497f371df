//! Pseudo-random generation for randomized values and tests.

pub mod xorshift32;
pub use xorshift32::XorShift32;

use std::io::Read;

/// Generate a random, non-zero seed from /dev/urandom
fn gen_random_seed() -> u32 {
    let mut f = std::fs::File::open("/dev/urandom").expect("couldn't open /dev/urandom");
    loop {
        let mut seed = [0u8; 4];
        f.read_exact(&mut seed)
            .expect("couldn't read seed from /dev/urandom");
        let state = u32::from_le_bytes(seed);
        if state != 0 {
            break state;
        }
    }
}

pub trait Rng32 {
    /// Seed the generator
    fn seed(&mut self, seed: u32);

    /// Generate a 32 bit random value
    fn gen(&mut self) -> u32;

    /// Generate a random boolean value
    fn gen_bool(&mut self) -> bool {
        (self.gen() as i32) < 0
    }
}

impl<T: Rng32> Rng32 for &mut T {
    fn seed(&mut self, seed: u32) {
        (*self).seed(seed)
    }

    fn gen(&mut self) -> u32 {
        (*self).gen()
    }
}
