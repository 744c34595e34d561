//! Lossy mapping between continuous block coefficients and the small integer
//! codes that get bitpacked. The average luma keeps 6 unsigned bits; the
//! difference coefficients carry far less energy and are quantized coarser
//! and clamped to [-30, 30]; chroma goes through the 16-entry codebook.

use crate::transform::BlockCoefficients;

pub mod chroma;

const LUMA_AVERAGE_SCALE: f32 = 63.;
const LUMA_DIFF_SCALE: f32 = 100.;
const LUMA_DIFF_LIMIT: i32 = 30;

/// Integer codes for one block: `a` in [0, 63], `b`/`c`/`d` in [-30, 30],
/// `pb`/`pr` in [0, 15].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizedBlock {
    pub a: u32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
    pub pb: u32,
    pub pr: u32,
}

pub fn quantize(coefficients: &BlockCoefficients) -> QuantizedBlock {
    QuantizedBlock {
        a: (coefficients.a * LUMA_AVERAGE_SCALE).round() as u32,
        b: quantize_diff(coefficients.b),
        c: quantize_diff(coefficients.c),
        d: quantize_diff(coefficients.d),
        pb: chroma::index_of_chroma(coefficients.pb),
        pr: chroma::index_of_chroma(coefficients.pr),
    }
}

pub fn dequantize(quantized: &QuantizedBlock) -> BlockCoefficients {
    BlockCoefficients {
        a: quantized.a as f32 / LUMA_AVERAGE_SCALE,
        b: quantized.b as f32 / LUMA_DIFF_SCALE,
        c: quantized.c as f32 / LUMA_DIFF_SCALE,
        d: quantized.d as f32 / LUMA_DIFF_SCALE,
        pb: chroma::chroma_of_index(quantized.pb),
        pr: chroma::chroma_of_index(quantized.pr),
    }
}

fn quantize_diff(coefficient: f32) -> i32 {
    // The clamp is deliberately narrower than the signed 6-bit field's
    // [-32, 31]: it bounds worst-case block reconstruction error.
    ((coefficient * LUMA_DIFF_SCALE).floor() as i32).clamp(-LUMA_DIFF_LIMIT, LUMA_DIFF_LIMIT)
}
