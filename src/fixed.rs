//! Fixed-width two's-complement integers over 32-bit limbs.
//!
//! [`FixedInt<BITS, LIMBS, SIGNED>`] stores exactly `BITS` bits of
//! two's-complement value in `LIMBS = ceil(BITS / 32)` limbs, least
//! significant limb first. Bits of the top limb above `BITS` are kept
//! equal to the sign extension of bit `BITS - 1` (zero for unsigned
//! types), so limb-wise arithmetic followed by [`canonicalize`] is
//! arithmetic modulo 2^BITS.
//!
//! [`canonicalize`]: FixedInt::canonicalize

mod arith;
mod convert;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use crate::codec;
use crate::limb::{significant_bit, Limb, LIMB_BITS};
use crate::rand::Rng32;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FixedInt<const BITS: usize, const LIMBS: usize, const SIGNED: bool> {
    limbs: [Limb; LIMBS],
}

pub type U32 = FixedInt<32, 1, false>;
pub type U64 = FixedInt<64, 2, false>;
pub type U128 = FixedInt<128, 4, false>;
pub type U256 = FixedInt<256, 8, false>;
pub type I32 = FixedInt<32, 1, true>;
pub type I64 = FixedInt<64, 2, true>;
pub type I128 = FixedInt<128, 4, true>;
pub type I256 = FixedInt<256, 8, true>;

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> FixedInt<BITS, LIMBS, SIGNED> {
    // evaluated at monomorphisation time by every canonicalize call
    const CHECK: () = assert!(
        LIMBS == (BITS + LIMB_BITS - 1) / LIMB_BITS && (BITS > 1 || !SIGNED),
        "LIMBS must equal ceil(BITS / 32), and signed widths need at least 2 bits"
    );

    /// Bits of the most significant limb that belong to the value.
    pub(crate) const TOP_BITS: u32 = if BITS % LIMB_BITS == 0 {
        LIMB_BITS as u32
    } else {
        (BITS % LIMB_BITS) as u32
    };

    pub(crate) const TOP_MASK: Limb = if Self::TOP_BITS == LIMB_BITS as u32 {
        Limb::MAX
    } else {
        (1 << Self::TOP_BITS) - 1
    };

    pub const ZERO: Self = Self { limbs: [0; LIMBS] };

    pub const ONE: Self = {
        let mut limbs = [0; LIMBS];
        limbs[0] = 1;
        Self { limbs }
    };

    pub const MAX: Self = {
        let mut limbs = [Limb::MAX; LIMBS];
        limbs[LIMBS - 1] = if SIGNED {
            Self::TOP_MASK >> 1
        } else {
            Self::TOP_MASK
        };
        Self { limbs }
    };

    pub const MIN: Self = {
        if SIGNED {
            let mut limbs = [0; LIMBS];
            limbs[LIMBS - 1] = !(Self::TOP_MASK >> 1);
            Self { limbs }
        } else {
            Self::ZERO
        }
    };

    /// Build a value from raw limbs, least significant first.
    pub fn from_limbs(limbs: [Limb; LIMBS]) -> Self {
        let mut out = Self { limbs };
        out.canonicalize();
        out
    }

    /// Raw limb access, least significant first.
    pub fn limbs(&self) -> &[Limb; LIMBS] {
        &self.limbs
    }

    /// Overwrite a single limb, keeping the representation canonical.
    pub fn set_limb(&mut self, index: usize, value: Limb) {
        self.limbs[index] = value;
        self.canonicalize();
    }

    /// Re-establish the representation invariant: bits above `BITS` are
    /// the sign extension of bit `BITS - 1` (zero when unsigned).
    pub(crate) fn canonicalize(&mut self) {
        let () = Self::CHECK;
        let top = self.limbs[LIMBS - 1] & Self::TOP_MASK;
        self.limbs[LIMBS - 1] = if SIGNED && top >> (Self::TOP_BITS - 1) == 1 {
            top | !Self::TOP_MASK
        } else {
            top
        };
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|l| *l == 0)
    }

    pub fn is_one(&self) -> bool {
        self.limbs[0] == 1 && self.limbs.iter().skip(1).all(|l| *l == 0)
    }

    pub fn is_negative(&self) -> bool {
        SIGNED && self.limbs[LIMBS - 1] >> (LIMB_BITS - 1) == 1
    }

    /// The value with bits above `BITS` cleared, as raw limbs.
    ///
    /// For canonical unsigned values this is the identity; for negative
    /// signed values it strips the sign extension so the limbs can be
    /// treated as an unsigned BITS-wide word.
    pub(crate) fn masked_limbs(&self) -> [Limb; LIMBS] {
        let mut limbs = self.limbs;
        limbs[LIMBS - 1] &= Self::TOP_MASK;
        limbs
    }

    /// Raw limbs of the absolute value of `self`.
    pub(crate) fn magnitude_limbs(&self) -> [Limb; LIMBS] {
        let mut mag = *self;
        if mag.is_negative() {
            mag.negate();
        }
        mag.masked_limbs()
    }

    /// Number of bits needed to represent the BITS-wide value.
    ///
    /// Negative values always report the full width since their top bit
    /// is set.
    pub fn bit_length(&self) -> u32 {
        let limbs = self.masked_limbs();
        for (i, limb) in limbs.iter().enumerate().rev() {
            if *limb != 0 {
                return i as u32 * LIMB_BITS as u32 + significant_bit(*limb);
            }
        }
        0
    }

    pub fn leading_zeros(&self) -> u32 {
        BITS as u32 - self.bit_length()
    }

    /// Test bit `index`; positions at or above `BITS` read the sign
    /// extension.
    pub fn test_bit(&self, index: usize) -> bool {
        debug_assert!(index < LIMBS * LIMB_BITS);
        self.limbs[index / LIMB_BITS] >> (index % LIMB_BITS) & 1 == 1
    }

    pub fn set_bit(&mut self, index: usize, value: bool) {
        debug_assert!(index < BITS);
        let mask = 1 << (index % LIMB_BITS);
        if value {
            self.limbs[index / LIMB_BITS] |= mask;
        } else {
            self.limbs[index / LIMB_BITS] &= !mask;
        }
        self.canonicalize();
    }

    /// The `n` most significant bits of the value's bit length, shifted
    /// down to the bottom of the result.
    pub fn first_n_bits(&self, n: u32) -> Self {
        let len = self.bit_length();
        let mut out = Self { limbs: self.masked_limbs() };
        if len > n {
            out.logical_shr(len - n);
        }
        out.canonicalize();
        out
    }

    /// The `n` least significant bits of the value, the rest cleared.
    pub fn last_n_bits(&self, n: u32) -> Self {
        let mut out = Self { limbs: self.masked_limbs() };
        for index in n as usize..LIMBS * LIMB_BITS {
            let limb = index / LIMB_BITS;
            if index % LIMB_BITS == 0 {
                // clear whole limbs at once
                out.limbs[limb..].fill(0);
                break;
            }
            out.limbs[limb] &= !(1 << (index % LIMB_BITS));
        }
        out.canonicalize();
        out
    }

    /// A uniformly random value of the full width.
    pub fn random(rng: &mut impl Rng32) -> Self {
        let mut out = Self::ZERO;
        for limb in out.limbs.iter_mut() {
            *limb = rng.gen();
        }
        out.canonicalize();
        out
    }

    /// A random value in `[0, bound)`. Zero when `bound` is zero.
    pub fn random_below(rng: &mut impl Rng32, bound: &Self) -> Self {
        let sample = Self::random(rng);
        // a negative sample keeps its sign through the remainder, and
        // negating the sample first would not help: -MIN wraps back to
        // MIN. The remainder's magnitude is always in range.
        let mut rem = sample.divmod(bound).1;
        if rem.is_negative() {
            rem.negate();
        }
        rem
    }

    /// Parse from a string in `base`, honouring a leading `-` and, for
    /// bases up to 36, the `0x`/`0b` prefixes which override `base`.
    ///
    /// Unlike the garbage-in contract of the arithmetic methods, an
    /// out-of-range digit is reported as an error.
    pub fn from_str_radix(s: &str, base: u32) -> Result<Self> {
        let parsed = codec::parse_digits(s, base)?;
        Ok(Self::from_parsed(&parsed))
    }

    pub(crate) fn from_parsed(parsed: &codec::ParsedNumber) -> Self {
        let mut out = Self::ZERO;
        for (limb, word) in out.limbs.iter_mut().zip(parsed.magnitude.iter()) {
            *limb = *word;
        }
        if parsed.negative {
            out.negate();
        }
        out.canonicalize();
        out
    }

    /// Render in `base`, with an optional `0x`/`0b` prefix and a `_`
    /// separator every `group` digits (0 for no grouping).
    pub fn base_string(&self, base: u32, group: usize, prefix: bool) -> String {
        codec::format_digits(self.is_negative(), &self.magnitude_limbs(), base, group, prefix)
    }

    pub fn decimal_string(&self) -> String {
        self.base_string(10, 0, false)
    }

    pub fn hex_string(&self) -> String {
        self.base_string(16, 0, true)
    }

    pub fn octal_string(&self) -> String {
        self.base_string(8, 0, false)
    }

    pub fn binary_string(&self) -> String {
        self.base_string(2, 0, true)
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> Default
    for FixedInt<BITS, LIMBS, SIGNED>
{
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> fmt::Display
    for FixedInt<BITS, LIMBS, SIGNED>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &codec::render_digits(&self.magnitude_limbs(), 10))
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> fmt::LowerHex
    for FixedInt<BITS, LIMBS, SIGNED>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0x", &codec::render_digits(&self.magnitude_limbs(), 16))
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> fmt::Binary
    for FixedInt<BITS, LIMBS, SIGNED>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0b", &codec::render_digits(&self.magnitude_limbs(), 2))
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> fmt::Octal
    for FixedInt<BITS, LIMBS, SIGNED>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0o", &codec::render_digits(&self.magnitude_limbs(), 8))
    }
}

impl<const BITS: usize, const LIMBS: usize, const SIGNED: bool> FromStr
    for FixedInt<BITS, LIMBS, SIGNED>
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_radix(s, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consts() {
        assert!(U64::ZERO.is_zero());
        assert!(U64::ONE.is_one());
        assert_eq!(U64::MAX.limbs, [u32::MAX; 2]);
        assert_eq!(U64::MIN, U64::ZERO);
        assert_eq!(I64::MAX.limbs, [u32::MAX, u32::MAX >> 1]);
        assert_eq!(I64::MIN.limbs, [0, 1 << 31]);
        assert!(I64::MIN.is_negative());
        assert!(!I64::MAX.is_negative());
    }

    #[test]
    fn test_partial_top_limb() {
        // 40-bit unsigned: two limbs, top limb holds 8 bits
        type U40 = FixedInt<40, 2, false>;
        assert_eq!(U40::MAX.limbs, [u32::MAX, 0xFF]);
        let x = U40::from_limbs([0, 0xFFFF_FF00]);
        assert_eq!(x.limbs, [0, 0]);

        // 40-bit signed: sign extension above bit 39
        type I40 = FixedInt<40, 2, true>;
        let neg = I40::from_limbs([0, 0x80]);
        assert!(neg.is_negative());
        assert_eq!(neg.limbs[1], 0xFFFF_FF80);
    }

    #[test]
    fn test_bit_length() {
        assert_eq!(U64::ZERO.bit_length(), 0);
        assert_eq!(U64::ONE.bit_length(), 1);
        assert_eq!(U64::MAX.bit_length(), 64);
        assert_eq!(U64::from(256u32).bit_length(), 9);
        assert_eq!(U64::from(256u32).leading_zeros(), 64 - 9);
        // negative values occupy the full width
        assert_eq!(I64::from(-1i32).bit_length(), 64);
    }

    #[test]
    fn test_test_and_set_bit() {
        let mut x = U64::ZERO;
        x.set_bit(33, true);
        assert!(x.test_bit(33));
        assert_eq!(x.limbs, [0, 2]);
        x.set_bit(33, false);
        assert!(x.is_zero());
    }

    #[test]
    fn test_bit_windows() {
        let x = U64::from(0b1101_0110u32);
        assert_eq!(x.first_n_bits(4), U64::from(0b1101u32));
        assert_eq!(x.last_n_bits(4), U64::from(0b0110u32));
        assert_eq!(x.first_n_bits(64), x);
        assert_eq!(x.last_n_bits(64), x);
        assert_eq!(U64::ZERO.first_n_bits(8), U64::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(U64::from(1234u32).to_string(), "1234");
        assert_eq!(I64::from(-1234i32).to_string(), "-1234");
        assert_eq!(format!("{:x}", U64::from(255u32)), "ff");
        assert_eq!(format!("{:#x}", U64::from(255u32)), "0xff");
        assert_eq!(format!("{:b}", U64::from(5u32)), "101");
        assert_eq!(format!("{:o}", U64::from(8u32)), "10");
    }

    #[test]
    fn test_string_helpers() {
        let x = U64::from(0xFFu32);
        assert_eq!(x.decimal_string(), "255");
        assert_eq!(x.hex_string(), "0xff");
        assert_eq!(x.binary_string(), "0b11111111");
        assert_eq!(x.octal_string(), "377");
        assert_eq!(U64::from(0xFFFFu32).base_string(16, 2, true), "0xff_ff");
        assert_eq!(I64::from(-255i32).hex_string(), "-0xff");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1234".parse::<U64>().unwrap(), U64::from(1234u32));
        assert_eq!("-7".parse::<I64>().unwrap(), I64::from(-7i32));
        assert_eq!("0xff".parse::<U64>().unwrap(), U64::from(255u32));
        assert_eq!("0b101".parse::<U64>().unwrap(), U64::from(5u32));
        assert_eq!(U64::from_str_radix("zz", 36).unwrap(), U64::from(35 * 36 + 35u32));
        assert!(U64::from_str_radix("12a", 10).is_err());
        // empty and sign-only inputs default to zero
        assert!(U64::from_str_radix("", 10).unwrap().is_zero());
        assert!(I64::from_str_radix("-", 10).unwrap().is_zero());
    }

    #[test]
    fn test_random_below() {
        let mut rng = crate::rand::XorShift32::from_seed(0x1234_5678);
        let bound = U64::from(1000u32);
        for _ in 0..100 {
            let x = U64::random_below(&mut rng, &bound);
            assert!(x < bound);
        }

        let sbound = I64::from(1000i32);
        for _ in 0..100 {
            let x = I64::random_below(&mut rng, &sbound);
            assert!(!x.is_negative());
            assert!(x < sbound);
        }
    }

    #[test]
    fn test_random_below_min_sample() {
        struct Scripted(Vec<u32>);
        impl Rng32 for Scripted {
            fn seed(&mut self, _seed: u32) {}
            fn gen(&mut self) -> u32 {
                self.0.remove(0)
            }
        }

        // limbs fill least significant first: this sample is I64::MIN,
        // whose negation wraps back to itself
        let mut rng = Scripted(vec![0, 0x8000_0000]);
        let x = I64::random_below(&mut rng, &I64::from(1000i32));
        assert!(!x.is_negative());
        assert_eq!(x, I64::from(808i32));
    }
}
