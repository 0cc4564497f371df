//! Base-string codec: parsing and rendering integers in any base from
//! 2 to 64.
//!
//! Bases up to 36 use the usual `0-9a-z` alphabet (parsing accepts both
//! cases); bases above 36 use a case-sensitive 64-symbol alphabet.
//! Values travel through this module as binary magnitudes: vectors of
//! 32-bit words, least significant first.

use anyhow::{anyhow, ensure, Result};

use crate::limb::{base_max_log, limb_radix, Limb, Wide, LIMB_BITS};

const STD_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const WIDE_DIGITS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// A parsed numeric literal: sign plus binary magnitude.
pub(crate) struct ParsedNumber {
    pub negative: bool,
    pub magnitude: Vec<Limb>,
}

/// Render a single digit value as its character in `base`.
pub fn digit_to_char(digit: u32, base: u32) -> u8 {
    debug_assert!(digit < base);
    if base <= 36 {
        STD_DIGITS[digit as usize]
    } else {
        WIDE_DIGITS[digit as usize]
    }
}

/// Parse a single character into its digit value in `base`.
pub fn char_to_digit(c: u8, base: u32) -> Result<u32> {
    let value = if base <= 36 {
        match c {
            b'0'..=b'9' => (c - b'0') as u32,
            b'a'..=b'z' => (c - b'a') as u32 + 10,
            b'A'..=b'Z' => (c - b'A') as u32 + 10,
            _ => return Err(anyhow!("unrecognised digit {:?}", c as char)),
        }
    } else {
        WIDE_DIGITS
            .iter()
            .position(|d| *d == c)
            .ok_or_else(|| anyhow!("unrecognised digit {:?}", c as char))? as u32
    };
    ensure!(value < base, "digit {:?} out of range for base {base}", c as char);
    Ok(value)
}

/// words = words * mul + add, in place. `mul` is at most 2^32 and `add`
/// is less than `mul`, so the per-word product always fits 64 bits.
fn words_mul_add(words: &mut Vec<Limb>, mul: Wide, add: Wide) {
    let mut carry = add;
    for word in words.iter_mut() {
        let wide = *word as Wide * mul + carry;
        *word = wide as Limb;
        carry = wide >> LIMB_BITS;
    }
    if carry > 0 {
        words.push(carry as Limb);
    }
}

/// words /= div, in place, returning the remainder. `div` is at most
/// 2^32 and non-zero.
fn words_div_rem(words: &mut Vec<Limb>, div: Wide) -> Wide {
    let mut rem: Wide = 0;
    for word in words.iter_mut().rev() {
        let cur = rem << LIMB_BITS | *word as Wide;
        *word = (cur / div) as Limb;
        rem = cur % div;
    }
    while words.len() > 1 && *words.last().unwrap() == 0 {
        words.pop();
    }
    rem
}

/// Parse a numeric literal in `base`.
///
/// Grammar: optional `-`, optional `0x`/`0b` prefix (which overrides
/// `base` to 16/2; recognized for bases up to 36 only, since the wide
/// alphabet uses those characters as digits), then digits most
/// significant first. `_` separators are skipped. An empty string or a
/// bare sign parses as zero.
///
/// Digits are folded in chunks of `base_max_log(base)` characters, each
/// chunk applied to the binary magnitude as one multiply-and-add.
pub(crate) fn parse_digits(s: &str, base: u32) -> Result<ParsedNumber> {
    ensure!((2..=64).contains(&base), "unsupported base {base}");

    let mut bytes = s.as_bytes();
    let mut negative = false;
    if let Some((b'-', rest)) = bytes.split_first() {
        negative = true;
        bytes = rest;
    }

    // only the standard alphabet can carry a prefix: above base 36 the
    // characters '0', 'x' and 'b' are ordinary digits, and a trimmed
    // base <= 36 rendering of a non-zero value never starts with '0'
    let mut base = base;
    if base <= 36 {
        match bytes {
            [b'0', b'x' | b'X', rest @ ..] => {
                base = 16;
                bytes = rest;
            }
            [b'0', b'b' | b'B', rest @ ..] => {
                base = 2;
                bytes = rest;
            }
            _ => {}
        }
    }

    if bytes.iter().all(|c| *c == b'_') {
        // empty input (or a bare sign) defaults to zero
        return Ok(ParsedNumber { negative: false, magnitude: vec![0] });
    }

    let chunk_digits = base_max_log(base);
    let mut magnitude = vec![0];
    let mut chunk_value: Wide = 0;
    let mut chunk_scale: Wide = 1;
    let mut pending = 0;
    for &c in bytes {
        if c == b'_' {
            continue;
        }
        chunk_value = chunk_value * base as Wide + char_to_digit(c, base)? as Wide;
        chunk_scale *= base as Wide;
        pending += 1;
        if pending == chunk_digits {
            words_mul_add(&mut magnitude, chunk_scale, chunk_value);
            chunk_value = 0;
            chunk_scale = 1;
            pending = 0;
        }
    }
    if pending > 0 {
        words_mul_add(&mut magnitude, chunk_scale, chunk_value);
    }

    Ok(ParsedNumber { negative, magnitude })
}

/// Render a binary magnitude as digits in `base`, most significant
/// first. Always emits at least one digit.
///
/// Digits are peeled a full limb-radix chunk at a time: the scratch
/// buffer is divided by `base^base_max_log(base)` and each remainder
/// expanded into individual digits.
pub(crate) fn render_digits(magnitude: &[Limb], base: u32) -> String {
    debug_assert!((2..=64).contains(&base));

    let mut scratch = magnitude.to_vec();
    while scratch.len() > 1 && *scratch.last().unwrap() == 0 {
        scratch.pop();
    }
    if scratch.is_empty() {
        scratch.push(0);
    }

    let chunk_digits = base_max_log(base);
    let chunk_radix = limb_radix(base);

    // least significant digit first, reversed at the end
    let mut digits = Vec::new();
    loop {
        let mut rem = words_div_rem(&mut scratch, chunk_radix);
        if scratch.iter().all(|w| *w == 0) {
            // final chunk: no leading-zero padding
            loop {
                digits.push(digit_to_char((rem % base as Wide) as u32, base));
                rem /= base as Wide;
                if rem == 0 {
                    break;
                }
            }
            break;
        }
        for _ in 0..chunk_digits {
            digits.push(digit_to_char((rem % base as Wide) as u32, base));
            rem /= base as Wide;
        }
    }
    digits.reverse();

    // SAFETY: every byte comes from the ASCII digit alphabets
    unsafe { String::from_utf8_unchecked(digits) }
}

/// Compose a full rendering: sign, optional `0x`/`0b` prefix, and a `_`
/// separator every `group` digits counted from the right (0 disables
/// grouping).
pub(crate) fn format_digits(
    negative: bool,
    magnitude: &[Limb],
    base: u32,
    group: usize,
    prefix: bool,
) -> String {
    let digits = render_digits(magnitude, base);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if prefix {
        match base {
            16 => out.push_str("0x"),
            2 => out.push_str("0b"),
            _ => {}
        }
    }

    if group == 0 {
        out.push_str(&digits);
    } else {
        let bytes = digits.as_bytes();
        let mut lead = bytes.len() % group;
        if lead == 0 {
            lead = group.min(bytes.len());
        }
        out.push_str(&digits[..lead]);
        for chunk in bytes[lead..].chunks(group) {
            out.push('_');
            // SAFETY: chunk boundaries fall between ASCII digits
            out.push_str(unsafe { std::str::from_utf8_unchecked(chunk) });
        }
    }
    out
}
