//! Packing and unpacking of integer fields inside a 64-bit word.
//!
//! Fields are addressed by their width in bits and the position of their
//! least significant bit (`lsb` 0 = the word's lowest bit). Getters and
//! fit-queries never fail; setters return [`Overflow`] when the value does
//! not fit the field, which callers may recover from. Passing a width or
//! `width + lsb` greater than 64 is a contract violation and panics.

use thiserror::Error;

const WORD_WIDTH: u64 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value {value} does not fit in a {width}-bit field")]
pub struct Overflow {
    pub value: i64,
    pub width: u64,
}

/// Left shift with the shift amount allowed to reach or exceed 64,
/// in which case the entire word is cleared.
fn shift_left(n: u64, amount: u64) -> u64 {
    if amount >= WORD_WIDTH {
        return 0;
    }

    n << amount
}

/// Logical right shift, clearing the word for amounts of 64 or more.
fn shift_right(n: u64, amount: u64) -> u64 {
    if amount >= WORD_WIDTH {
        return 0;
    }

    n >> amount
}

/// Arithmetic right shift. Shifting by 64 or more saturates to the sign:
/// -1 for negative input, 0 otherwise.
fn shift_right_signed(n: i64, amount: u64) -> i64 {
    if amount >= WORD_WIDTH {
        return if n < 0 { -1 } else { 0 };
    }

    n >> amount
}

pub fn fits_unsigned(n: u64, width: u64) -> bool {
    if width >= WORD_WIDTH {
        return true;
    }
    if width == 0 {
        return n == 0;
    }

    let max = !shift_left(!0, width);
    n <= max
}

pub fn fits_signed(n: i64, width: u64) -> bool {
    if width >= WORD_WIDTH {
        return true;
    }
    if width == 0 {
        return n == 0;
    }

    // Two's complement: width bits span [-2^(width-1), 2^(width-1) - 1].
    let min = shift_left(!0, width - 1) as i64;
    let max = !min;
    n >= min && n <= max
}

pub fn get_unsigned(word: u64, width: u64, lsb: u64) -> u64 {
    assert!(width <= WORD_WIDTH);
    assert!(width + lsb <= WORD_WIDTH);

    // Push the field to the top of the word, then back down, so the bits
    // on either side of it fall off.
    let data = shift_left(word, WORD_WIDTH - width - lsb);
    shift_right(data, WORD_WIDTH - width)
}

pub fn get_signed(word: u64, width: u64, lsb: u64) -> i64 {
    assert!(width <= WORD_WIDTH);
    assert!(width + lsb <= WORD_WIDTH);

    // Same dance as the unsigned variant, but the downward shift is
    // arithmetic so the field's top bit sign-extends.
    let data = shift_left(word, WORD_WIDTH - width - lsb) as i64;
    shift_right_signed(data, WORD_WIDTH - width)
}

pub fn set_unsigned(word: u64, width: u64, lsb: u64, value: u64) -> Result<u64, Overflow> {
    assert!(width <= WORD_WIDTH);
    assert!(width + lsb <= WORD_WIDTH);

    if !fits_unsigned(value, width) {
        return Err(Overflow {
            value: value as i64,
            width,
        });
    }

    let field_mask = shift_right(shift_left(!0, WORD_WIDTH - width), WORD_WIDTH - width - lsb);
    Ok((word & !field_mask) | shift_left(value, lsb))
}

pub fn set_signed(word: u64, width: u64, lsb: u64, value: i64) -> Result<u64, Overflow> {
    assert!(width <= WORD_WIDTH);
    assert!(width + lsb <= WORD_WIDTH);

    if !fits_signed(value, width) {
        return Err(Overflow { value, width });
    }

    let field_mask = shift_right(shift_left(!0, WORD_WIDTH - width), WORD_WIDTH - width - lsb);
    // Mask the shifted value so a negative value's sign extension does not
    // leak outside the field.
    let field_bits = shift_left(value as u64, lsb) & field_mask;
    Ok((word & !field_mask) | field_bits)
}
