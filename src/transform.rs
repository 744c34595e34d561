//! The 2x2 block transform: four luma samples become one flat average plus
//! three Hadamard-style difference coefficients, and the block's chroma is
//! averaged. The inverse is algebraically exact; loss only enters through
//! quantization downstream.

use crate::colors::YPbPr;

pub const BLOCK_SIZE: usize = 2;
pub const PIXELS_PER_BLOCK: usize = BLOCK_SIZE * BLOCK_SIZE;

/// One 2x2 group of component-video pixels, ordered top-left, bottom-left,
/// top-right, bottom-right (column-major within the block).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block(pub [YPbPr; PIXELS_PER_BLOCK]);

/// The decorrelated form of a [`Block`]: `a` in [0, 1], `b`/`c`/`d` small
/// values in [-1, 1], `pb`/`pr` in [-0.5, 0.5].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockCoefficients {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub pb: f32,
    pub pr: f32,
}

impl Block {
    pub fn to_coefficients(&self) -> BlockCoefficients {
        let [p1, p2, p3, p4] = self.0;
        let (y1, y2, y3, y4) = (p1.y, p2.y, p3.y, p4.y);

        BlockCoefficients {
            a: (y4 + y3 + y2 + y1) / 4.,
            b: (y4 + y3 - y2 - y1) / 4.,
            c: (y4 - y3 + y2 - y1) / 4.,
            d: (y4 - y3 - y2 + y1) / 4.,
            pb: (p1.pb + p2.pb + p3.pb + p4.pb) / 4.,
            pr: (p1.pr + p2.pr + p3.pr + p4.pr) / 4.,
        }
    }
}

impl BlockCoefficients {
    /// Reconstructs the four pixels; the averaged chroma is broadcast to
    /// every pixel of the block.
    pub fn to_block(&self) -> Block {
        let Self { a, b, c, d, pb, pr } = *self;

        Block([
            YPbPr::new(a - b - c + d, pb, pr),
            YPbPr::new(a - b + c - d, pb, pr),
            YPbPr::new(a + b - c - d, pb, pr),
            YPbPr::new(a + b + c + d, pb, pr),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-6;

    fn block_of(lumas: [f32; 4]) -> Block {
        Block(lumas.map(|y| YPbPr::new(y, 0.1, -0.2)))
    }

    #[test]
    fn flat_block_has_only_average() {
        let coefficients = block_of([0.5, 0.5, 0.5, 0.5]).to_coefficients();
        assert_eq!(coefficients.a, 0.5);
        assert_eq!(coefficients.b, 0.);
        assert_eq!(coefficients.c, 0.);
        assert_eq!(coefficients.d, 0.);
    }

    #[test]
    fn chroma_is_averaged() {
        let pixels = [
            YPbPr::new(0.5, 0.1, -0.1),
            YPbPr::new(0.5, 0.2, -0.2),
            YPbPr::new(0.5, 0.3, -0.3),
            YPbPr::new(0.5, 0.4, -0.4),
        ];
        let coefficients = Block(pixels).to_coefficients();
        assert!((coefficients.pb - 0.25).abs() < TOLERANCE);
        assert!((coefficients.pr + 0.25).abs() < TOLERANCE);
    }

    #[test]
    fn inverse_is_exact() {
        let samples = [
            [0., 0.25, 0.5, 1.],
            [0.9, 0.1, 0.3, 0.6],
            [0.123, 0.456, 0.789, 0.321],
            [1., 1., 0., 0.],
        ];

        for lumas in samples {
            let block = block_of(lumas);
            let roundtrip = block.to_coefficients().to_block();

            for (pixel, original) in roundtrip.0.iter().zip(block.0.iter()) {
                assert!((pixel.y - original.y).abs() < TOLERANCE);
                assert!((pixel.pb - original.pb).abs() < TOLERANCE);
                assert!((pixel.pr - original.pr).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn gradient_block_coefficients() {
        // y4 alone set: every coefficient contributes +y4/4
        let coefficients = block_of([0., 0., 0., 1.]).to_coefficients();
        assert!((coefficients.a - 0.25).abs() < TOLERANCE);
        assert!((coefficients.b - 0.25).abs() < TOLERANCE);
        assert!((coefficients.c - 0.25).abs() < TOLERANCE);
        assert!((coefficients.d - 0.25).abs() < TOLERANCE);
    }
}
