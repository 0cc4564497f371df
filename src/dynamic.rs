//! Arbitrary-base growable integers.
//!
//! [`BigInt<BASE, SIGNED>`] is a sign-magnitude value: a growable
//! sequence of 32-bit limbs (least significant first) plus a sign flag.
//! When `BASE` is a power of two that exactly fills a limb ("optimal
//! base": 2, 4, 16, 256, 65536) each limb packs pure binary and the
//! limb radix is 2^32; otherwise each limb is a super-digit holding
//! `base_max_log(BASE)` base-`BASE` digits, e.g. nine decimal digits
//! per limb for `BASE = 10`.
//!
//! Invariants: no most-significant zero limb except for the single-limb
//! zero value, every limb is below the limb radix, and zero is never
//! negative.

mod arith;
mod convert;

use std::fmt;
use std::str::FromStr;

use anyhow::{ensure, Result};

use crate::codec;
use crate::limb::{base_max_log, is_packed_base, limb_radix, significant_bit, Limb, Wide, LIMB_BITS};
use crate::rand::Rng32;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BigInt<const BASE: u32, const SIGNED: bool> {
    limbs: Vec<Limb>,
    negative: bool,
}

impl<const BASE: u32, const SIGNED: bool> BigInt<BASE, SIGNED> {
    // evaluated at monomorphisation time via new()
    const CHECK: () = assert!(2 <= BASE && BASE <= 64, "BASE must be between 2 and 64");

    /// Value of one full limb: 2^32 for packed bases,
    /// `BASE^DIGITS_PER_LIMB` otherwise.
    pub(crate) const RADIX: Wide = limb_radix(BASE);

    /// Base-`BASE` digits held by one limb.
    pub(crate) const DIGITS_PER_LIMB: usize = base_max_log(BASE) as usize;

    pub fn new() -> Self {
        let () = Self::CHECK;
        Self { limbs: vec![0], negative: false }
    }

    /// Build from raw limbs (least significant first) and a sign.
    pub fn from_limbs(limbs: Vec<Limb>, negative: bool) -> Self {
        debug_assert!(limbs.iter().all(|l| (*l as Wide) < Self::RADIX));
        let mut out = Self { limbs, negative: SIGNED && negative };
        if out.limbs.is_empty() {
            out.limbs.push(0);
        }
        out.normalize();
        out
    }

    /// Raw limb access, least significant first.
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|l| *l == 0)
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Flip the sign; no-op for unsigned types and for zero.
    pub fn negate(&mut self) {
        if SIGNED && !self.is_zero() {
            self.negative = !self.negative;
        }
    }

    /// Drop most-significant zero limbs down to the canonical form.
    pub(crate) fn remove_empty_back(&mut self) {
        while self.limbs.len() > 1 && *self.limbs.last().unwrap() == 0 {
            self.limbs.pop();
        }
    }

    /// Restore both data-model invariants: trimmed limbs and no
    /// negative zero.
    pub(crate) fn normalize(&mut self) {
        let () = Self::CHECK;
        self.remove_empty_back();
        if !SIGNED || self.is_zero() {
            self.negative = false;
        }
    }

    /// Number of significant base-`BASE` digits; zero has none.
    pub fn digit_count(&self) -> usize {
        if self.is_zero() {
            return 0;
        }
        let top = *self.limbs.last().unwrap();
        (self.limbs.len() - 1) * Self::DIGITS_PER_LIMB + Self::digits_in_limb(top)
    }

    fn digits_in_limb(mut limb: Limb) -> usize {
        if is_packed_base(BASE) {
            let bits_per_digit = LIMB_BITS / Self::DIGITS_PER_LIMB;
            (significant_bit(limb) as usize).div_ceil(bits_per_digit)
        } else {
            let mut count = 0;
            while limb > 0 {
                limb /= BASE;
                count += 1;
            }
            count
        }
    }

    fn base_pow(exp: usize) -> Limb {
        let mut power = 1;
        let mut i = 0;
        while i < exp {
            power *= BASE;
            i += 1;
        }
        power
    }

    /// The base-`BASE` digit at `index` (0 = least significant).
    /// Positions past the end read zero.
    pub fn digit(&self, index: usize) -> u32 {
        let limb = index / Self::DIGITS_PER_LIMB;
        let offset = index % Self::DIGITS_PER_LIMB;
        let Some(&word) = self.limbs.get(limb) else {
            return 0;
        };
        if is_packed_base(BASE) {
            let bits_per_digit = LIMB_BITS / Self::DIGITS_PER_LIMB;
            word >> (offset * bits_per_digit) & (BASE - 1)
        } else {
            word / Self::base_pow(offset) % BASE
        }
    }

    pub(crate) fn set_digit_raw(limbs: &mut [Limb], index: usize, value: u32) {
        let limb = index / Self::DIGITS_PER_LIMB;
        let offset = index % Self::DIGITS_PER_LIMB;
        if is_packed_base(BASE) {
            let bits_per_digit = LIMB_BITS / Self::DIGITS_PER_LIMB;
            limbs[limb] &= !((BASE - 1) << (offset * bits_per_digit));
            limbs[limb] |= value << (offset * bits_per_digit);
        } else {
            let scale = Self::base_pow(offset);
            let current = limbs[limb] / scale % BASE;
            limbs[limb] = limbs[limb] - current * scale + value * scale;
        }
    }

    /// Write the digit at `index`, growing the limb sequence as needed.
    pub fn set_digit(&mut self, index: usize, value: u32) {
        debug_assert!(value < BASE);
        let limb = index / Self::DIGITS_PER_LIMB;
        if limb >= self.limbs.len() {
            self.limbs.resize(limb + 1, 0);
        }
        Self::set_digit_raw(&mut self.limbs, index, value);
        self.normalize();
    }

    /// Replace the value with `limbs` random limbs. The result is
    /// non-negative.
    pub fn randomize(&mut self, rng: &mut impl Rng32, limbs: usize) {
        self.limbs = (0..limbs.max(1))
            .map(|_| (rng.gen() as Wide % Self::RADIX) as Limb)
            .collect();
        self.negative = false;
        self.normalize();
    }

    pub fn random(rng: &mut impl Rng32, limbs: usize) -> Self {
        let mut out = Self::new();
        out.randomize(rng, limbs);
        out
    }

    /// Parse from a string in `base`, honouring a leading `-` and, for
    /// bases up to 36, the `0x`/`0b` prefixes which override `base`.
    ///
    /// Unlike the garbage-in contract of the arithmetic methods, an
    /// out-of-range digit is reported as an error.
    pub fn from_str_radix(s: &str, base: u32) -> Result<Self> {
        let parsed = codec::parse_digits(s, base)?;
        ensure!(
            SIGNED || !parsed.negative,
            "negative literal for an unsigned integer"
        );
        let mut out = Self::from_binary_words(&parsed.magnitude);
        if parsed.negative {
            out.negate();
        }
        Ok(out)
    }

    /// Render in `base`, with an optional `0x`/`0b` prefix and a `_`
    /// separator every `group` digits (0 for no grouping).
    pub fn base_string(&self, base: u32, group: usize, prefix: bool) -> String {
        codec::format_digits(self.negative, &self.to_binary_words(), base, group, prefix)
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

impl<const BASE: u32, const SIGNED: bool> Default for BigInt<BASE, SIGNED> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BASE: u32, const SIGNED: bool> fmt::Display for BigInt<BASE, SIGNED> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "", &codec::render_digits(&self.to_binary_words(), 10))
    }
}

impl<const BASE: u32, const SIGNED: bool> fmt::LowerHex for BigInt<BASE, SIGNED> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0x", &codec::render_digits(&self.to_binary_words(), 16))
    }
}

impl<const BASE: u32, const SIGNED: bool> fmt::Binary for BigInt<BASE, SIGNED> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0b", &codec::render_digits(&self.to_binary_words(), 2))
    }
}

impl<const BASE: u32, const SIGNED: bool> fmt::Octal for BigInt<BASE, SIGNED> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0o", &codec::render_digits(&self.to_binary_words(), 8))
    }
}

impl<const BASE: u32, const SIGNED: bool> FromStr for BigInt<BASE, SIGNED> {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_radix(s, BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Decimal = BigInt<10, true>;
    type Hex = BigInt<16, false>;

    #[test]
    fn test_limb_packing_constants() {
        assert_eq!(Decimal::RADIX, 1_000_000_000);
        assert_eq!(Decimal::DIGITS_PER_LIMB, 9);
        assert_eq!(Hex::RADIX, 1 << 32);
        assert_eq!(Hex::DIGITS_PER_LIMB, 8);
    }

    #[test]
    fn test_new_is_zero() {
        let z = Decimal::new();
        assert!(z.is_zero());
        assert!(!z.is_negative());
        assert_eq!(z.limbs(), &[0]);
    }

    #[test]
    fn test_from_limbs_normalizes() {
        let x = Decimal::from_limbs(vec![5, 0, 0], false);
        assert_eq!(x.limbs(), &[5]);
        // negative zero is cleared
        let z = Decimal::from_limbs(vec![0, 0], true);
        assert!(!z.is_negative());
        // unsigned types never carry a sign
        let u = Hex::from_limbs(vec![5], true);
        assert!(!u.is_negative());
    }

    #[test]
    fn test_digit_access_decimal() {
        let x: Decimal = "123456789012".parse().unwrap();
        assert_eq!(x.digit(0), 2);
        assert_eq!(x.digit(1), 1);
        assert_eq!(x.digit(9), 3); // crosses the nine-digit limb seam
        assert_eq!(x.digit(11), 1);
        assert_eq!(x.digit(12), 0);
        assert_eq!(x.digit_count(), 12);
    }

    #[test]
    fn test_digit_access_packed() {
        let x: Hex = "0xdeadbeef1".parse().unwrap();
        assert_eq!(x.digit(0), 1);
        assert_eq!(x.digit(1), 0xf);
        assert_eq!(x.digit(8), 0xd); // second limb
        assert_eq!(x.digit_count(), 9);
    }

    #[test]
    fn test_set_digit() {
        let mut x = Decimal::new();
        x.set_digit(10, 7);
        assert_eq!(x.decimal_string(), "70000000000");
        x.set_digit(10, 0);
        assert!(x.is_zero());
        assert_eq!(x.limbs().len(), 1);
    }

    #[test]
    fn test_digit_count_zero() {
        assert_eq!(Decimal::new().digit_count(), 0);
        assert_eq!(Hex::new().digit_count(), 0);
    }

    #[test]
    fn test_parse_and_render() {
        let x: Decimal = "-123".parse().unwrap();
        assert!(x.is_negative());
        assert_eq!(x.to_string(), "-123");
        assert_eq!(x.decimal_string(), "-123");

        let y: Hex = "0xFF".parse().unwrap();
        assert_eq!(y.to_string(), "255");
        assert_eq!(y.hex_string(), "0xff");
        assert_eq!(y.binary_string(), "0b11111111");

        // native-base digits without a prefix
        let z: Hex = "ff".parse().unwrap();
        assert_eq!(z.to_string(), "255");

        assert!("-1".parse::<Hex>().is_err());
        assert!("12a".parse::<Decimal>().is_err());
        assert!("".parse::<Decimal>().unwrap().is_zero());
        assert!("-".parse::<Decimal>().unwrap().is_zero());
    }

    #[test]
    fn test_base64_strings() {
        let x: BigInt<64, false> = "BAA".parse().unwrap();
        assert_eq!(x.to_string(), "4096");
        assert_eq!(x.base_string(64, 0, false), "BAA");
    }

    #[test]
    fn test_randomize() {
        let mut rng = crate::rand::XorShift32::from_seed(7);
        let x = Decimal::random(&mut rng, 4);
        assert!(!x.is_negative());
        assert!(x.limbs().iter().all(|l| (*l as u64) < Decimal::RADIX));
    }
}
