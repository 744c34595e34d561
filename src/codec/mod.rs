pub mod decode;
pub mod encode;

use thiserror::Error;

use crate::bitpack::{self, Overflow};
use crate::quantization::QuantizedBlock;

//Structure ("COMP40 Compressed image format 2")
//
//ASCII header:
//  COMP40 Compressed image format 2\n
//  <width> <height>\n        original pixel dimensions, both even
//body: (width/2)*(height/2) words of 4 bytes each, most significant byte
//first, row-major over the block grid.
//
//word layout, bit 31 = MSB:
//  a   6 bits, lsb 26, unsigned
//  b   6 bits, lsb 20, signed
//  c   6 bits, lsb 14, signed
//  d   6 bits, lsb 8,  signed
//  pb  4 bits, lsb 4,  unsigned
//  pr  4 bits, lsb 0,  unsigned

pub const HEADER_MAGIC: &str = "COMP40 Compressed image format 2";
pub const WORD_BYTES: usize = 4;

const LUMA_WIDTH: u64 = 6;
const CHROMA_WIDTH: u64 = 4;
const A_LSB: u64 = 26;
const B_LSB: u64 = 20;
const C_LSB: u64 = 14;
const D_LSB: u64 = 8;
const PB_LSB: u64 = 4;
const PR_LSB: u64 = 0;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("bad magic: expected \"{HEADER_MAGIC}\"")]
    BadMagic,
    #[error("header dimensions are not valid unsigned integers")]
    BadDimensionLine,
    #[error("dimensions {width}x{height} are not nonzero even numbers")]
    BadDimensions { width: usize, height: usize },
    #[error("compressed stream truncated: expected {expected} words, found only {found} whole words")]
    Truncated { expected: usize, found: usize },
}

/// Packs one block's quantized codes into the low 32 bits of a word.
/// A code outside its declared field width surfaces as [`Overflow`].
pub fn pack_word(quantized: &QuantizedBlock) -> Result<u32, Overflow> {
    let mut word = 0u64;
    word = bitpack::set_unsigned(word, LUMA_WIDTH, A_LSB, quantized.a as u64)?;
    word = bitpack::set_signed(word, LUMA_WIDTH, B_LSB, quantized.b as i64)?;
    word = bitpack::set_signed(word, LUMA_WIDTH, C_LSB, quantized.c as i64)?;
    word = bitpack::set_signed(word, LUMA_WIDTH, D_LSB, quantized.d as i64)?;
    word = bitpack::set_unsigned(word, CHROMA_WIDTH, PB_LSB, quantized.pb as u64)?;
    word = bitpack::set_unsigned(word, CHROMA_WIDTH, PR_LSB, quantized.pr as u64)?;

    Ok(word as u32)
}

/// The exact inverse of [`pack_word`] for any word: field values round-trip
/// bit-exactly even though the pixel pipeline around them is lossy.
pub fn unpack_word(word: u32) -> QuantizedBlock {
    let word = word as u64;

    QuantizedBlock {
        a: bitpack::get_unsigned(word, LUMA_WIDTH, A_LSB) as u32,
        b: bitpack::get_signed(word, LUMA_WIDTH, B_LSB) as i32,
        c: bitpack::get_signed(word, LUMA_WIDTH, C_LSB) as i32,
        d: bitpack::get_signed(word, LUMA_WIDTH, D_LSB) as i32,
        pb: bitpack::get_unsigned(word, CHROMA_WIDTH, PB_LSB) as u32,
        pr: bitpack::get_unsigned(word, CHROMA_WIDTH, PR_LSB) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_roundtrips_every_field() {
        let quantized = QuantizedBlock {
            a: 63,
            b: -30,
            c: 30,
            d: -1,
            pb: 15,
            pr: 8,
        };
        assert_eq!(unpack_word(pack_word(&quantized).unwrap()), quantized);
    }

    #[test]
    fn all_fields_zero_is_the_zero_word() {
        let quantized = QuantizedBlock {
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            pb: 0,
            pr: 0,
        };
        assert_eq!(pack_word(&quantized).unwrap(), 0);
    }

    #[test]
    fn a_field_occupies_the_top_bits() {
        let quantized = QuantizedBlock {
            a: 63,
            b: 0,
            c: 0,
            d: 0,
            pb: 0,
            pr: 0,
        };
        assert_eq!(pack_word(&quantized).unwrap(), 0b111111 << 26);
    }

    #[test]
    fn out_of_range_code_is_an_overflow() {
        let quantized = QuantizedBlock {
            a: 64,
            b: 0,
            c: 0,
            d: 0,
            pb: 0,
            pr: 0,
        };
        assert!(pack_word(&quantized).is_err());
    }
}
