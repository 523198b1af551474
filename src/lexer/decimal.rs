// src/lexer/decimal.rs
// Exact decimal rounding for decimal_literal lexemes.

use num::{BigUint, Integer, Zero};

/// Fractional digits every decimal_literal is rendered with.
pub const DECIMAL_SCALE: u32 = 5;

// Guards against exponents that would build absurdly large powers of ten.
const MAX_EXPONENT: u64 = 1_000;

/// Parses `lexeme` as an exact decimal (`[+-]digits[.digits][e[+-]digits]`),
/// rounds half-up to `scale` fractional digits and renders it in plain form.
/// Returns `None` when the lexeme is not a number.
pub fn round_half_up(lexeme: &str, scale: u32) -> Option<String> {
    let (negative, rest) = match lexeme.as_bytes().first()? {
        b'-' => (true, &lexeme[1..]),
        b'+' => (false, &lexeme[1..]),
        _ => (false, lexeme),
    };
    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(i) => (&rest[..i], rest[i + 1..].parse::<i64>().ok()?),
        None => (rest, 0),
    };
    if exponent.unsigned_abs() > MAX_EXPONENT {
        return None;
    }
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part
        .bytes()
        .chain(frac_part.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let unscaled: BigUint = format!("{int_part}{frac_part}").parse().ok()?;
    // value = unscaled * 10^-(frac_len - exponent)
    let shift = frac_part.len() as i64 - exponent - scale as i64;
    let ten = BigUint::from(10u32);
    let rounded = if shift <= 0 {
        unscaled * num::pow(ten, shift.unsigned_abs() as usize)
    } else {
        let divisor = num::pow(ten, shift as usize);
        let (q, r) = unscaled.div_rem(&divisor);
        if r * 2u32 >= divisor { q + 1u32 } else { q }
    };

    let mut out = rounded.to_string();
    let scale = scale as usize;
    if scale > 0 {
        if out.len() <= scale {
            out.insert_str(0, &"0".repeat(scale + 1 - out.len()));
        }
        out.insert(out.len() - scale, '.');
    }
    if negative && !rounded.is_zero() {
        out.insert(0, '-');
    }
    Some(out)
}
