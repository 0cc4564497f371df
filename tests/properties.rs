//! Algebraic property suites over randomized operands, exercised on
//! both integer types.

use multiprec::rand::{Rng32, XorShift32};
use multiprec::{BigInt, FixedInt};

type U64 = FixedInt<64, 2, false>;
type I128 = FixedInt<128, 4, true>;
type Decimal = BigInt<10, true>;

fn random_decimal(rng: &mut XorShift32) -> Decimal {
    let limbs = (rng.gen() % 5 + 1) as usize;
    let mut x = Decimal::random(rng, limbs);
    if rng.gen_bool() {
        x.negate();
    }
    x
}

#[test]
fn fixed_add_sub_round_trip() {
    let mut rng = XorShift32::from_seed(0xfeed_beef);
    for _ in 0..500 {
        let a = I128::random(&mut rng);
        let b = I128::random(&mut rng);
        assert_eq!(a + b - b, a);
        assert_eq!(a + I128::ZERO, a);
        assert_eq!(a * I128::ONE, a);
    }
}

#[test]
fn fixed_add_commutes_and_associates() {
    let mut rng = XorShift32::from_seed(0x0dd_ba11);
    for _ in 0..500 {
        let a = U64::random(&mut rng);
        let b = U64::random(&mut rng);
        let c = U64::random(&mut rng);
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + c, a + (b + c));
        assert_eq!(a * b, b * a);
    }
}

#[test]
fn fixed_division_identity() {
    let mut rng = XorShift32::from_seed(0xcafe_f00d);
    for _ in 0..500 {
        let a = I128::random(&mut rng);
        let b = I128::random(&mut rng);
        if b.is_zero() {
            continue;
        }
        let (q, r) = a.divmod(&b);
        assert_eq!(q * b + r, a, "{a} = {q} * {b} + {r}");
    }
}

#[test]
fn fixed_quick_division_agrees_with_reference() {
    let mut rng = XorShift32::from_seed(0xdead_10cc);
    for _ in 0..500 {
        let a = U64::random(&mut rng);
        let b = U64::random(&mut rng).last_n_bits(rng.gen() % 65);
        if b.is_zero() {
            continue;
        }
        assert_eq!(a.divmod(&b), a.divmod_reference(&b), "{a} / {b}");
    }
}

#[test]
fn fixed_shift_identities() {
    let mut rng = XorShift32::from_seed(0x5eed_5eed);
    for _ in 0..200 {
        let a = U64::random(&mut rng);
        let n = rng.gen() % 32;
        assert_eq!(a << n >> n, a & (U64::MAX >> n));
        // a << n == a * 2^n
        assert_eq!(a << n, a * (U64::ONE << n));
    }
}

#[test]
fn fixed_comparison_is_total() {
    let mut rng = XorShift32::from_seed(0xabad_cafe);
    for _ in 0..500 {
        let a = I128::random(&mut rng);
        let b = I128::random(&mut rng);
        let outcomes = [a < b, a == b, a > b];
        assert_eq!(outcomes.iter().filter(|o| **o).count(), 1);
        let c = I128::random(&mut rng);
        if a < b && b < c {
            assert!(a < c);
        }
    }
}

#[test]
fn fixed_string_round_trip() {
    let mut rng = XorShift32::from_seed(0xb16_b00b5);
    for _ in 0..100 {
        let a = I128::random(&mut rng);
        for base in [2u32, 8, 10, 16, 64] {
            let s = a.base_string(base, 0, false);
            let back = I128::from_str_radix(&s, base).unwrap();
            assert_eq!(back, a, "base {base}: {s}");
        }
    }
}

#[test]
fn bigint_add_sub_round_trip() {
    let mut rng = XorShift32::from_seed(0x600d_5eed);
    for _ in 0..300 {
        let a = random_decimal(&mut rng);
        let b = random_decimal(&mut rng);
        assert_eq!(&(&a + &b) - &b, a);
        assert_eq!(&a + &Decimal::new(), a);
        assert_eq!(&a * &Decimal::from(1u32), a);
        assert_eq!(&a + &b, &b + &a);
    }
}

#[test]
fn bigint_division_identity() {
    let mut rng = XorShift32::from_seed(0x1057_ca15);
    for _ in 0..300 {
        let a = random_decimal(&mut rng);
        let b = random_decimal(&mut rng);
        if b.is_zero() {
            continue;
        }
        let (q, r) = a.divmod(&b);
        assert_eq!(&q * &b + &r, a);
        // remainder magnitude is strictly below the divisor's
        let mut r_mag = r.clone();
        let mut b_mag = b.clone();
        if r_mag.is_negative() {
            r_mag.negate();
        }
        if b_mag.is_negative() {
            b_mag.negate();
        }
        assert!(r_mag < b_mag);
    }
}

#[test]
fn bigint_string_round_trip() {
    let mut rng = XorShift32::from_seed(0x7e57_ab1e);
    for _ in 0..100 {
        let a = random_decimal(&mut rng);
        for base in [2u32, 8, 10, 16, 64] {
            let s = a.base_string(base, 0, false);
            let back = Decimal::from_str_radix(&s, base).unwrap();
            assert_eq!(back, a, "base {base}: {s}");
        }
    }
}

#[test]
fn bigint_rebase_round_trip() {
    let mut rng = XorShift32::from_seed(0xf01d_ab1e);
    for _ in 0..100 {
        let a = random_decimal(&mut rng);
        let b7: BigInt<7, true> = a.rebase();
        let b16: BigInt<16, true> = b7.rebase();
        let back: Decimal = b16.rebase();
        assert_eq!(back, a);
    }
}

#[test]
fn bigint_digit_shift_is_base_scaling() {
    let mut rng = XorShift32::from_seed(0xd161_7a11);
    let thousand = Decimal::from(1000u32);
    for _ in 0..100 {
        let a = random_decimal(&mut rng);
        assert_eq!(&a << 3, &a * &thousand);
        assert_eq!(&(&a << 3) >> 3, a);
    }
}

#[test]
fn conversions_agree_across_types() {
    let mut rng = XorShift32::from_seed(0xca11_ab1e);
    for _ in 0..100 {
        let a = I128::random(&mut rng);
        let big = Decimal::from(&a);
        assert_eq!(big.to_string(), a.to_string());
        assert_eq!(I128::from(&big), a);
    }
}
