//! The decompress pipeline: parse and validate the header, unpack every
//! word, dequantize, invert the block transform, convert back to RGB, and
//! rescale to a 255-denominator image.

use rayon::prelude::*;
use tracing::debug;

use crate::binary::byte_reader::ByteReader;
use crate::colors::{FloatRgb, YPbPr, OUTPUT_DENOMINATOR};
use crate::grid::{BlockedGrid, Grid2, RowMajorGrid};
use crate::image::Image;
use crate::quantization::dequantize;
use crate::transform::{BLOCK_SIZE, PIXELS_PER_BLOCK};

use super::{unpack_word, FormatError, HEADER_MAGIC};

pub fn decompress(bytes: &[u8]) -> Result<Image, FormatError> {
    let mut reader = ByteReader::new(bytes);
    let (width, height) = parse_header(&mut reader)?;
    let words = read_words(&mut reader, (width / 2) * (height / 2))?;

    debug!(width, height, words = words.len(), "decompressing image");

    let component = unpack_blocks(&words, width, height);
    Ok(to_rgb_image(&component))
}

fn parse_header(reader: &mut ByteReader) -> Result<(usize, usize), FormatError> {
    let magic = reader.read_line().ok_or(FormatError::BadMagic)?;
    if magic != HEADER_MAGIC.as_bytes() {
        return Err(FormatError::BadMagic);
    }

    let dimension_line = reader.read_line().ok_or(FormatError::BadDimensionLine)?;
    let dimension_line =
        std::str::from_utf8(dimension_line).map_err(|_| FormatError::BadDimensionLine)?;

    let mut fields = dimension_line.split(' ');
    let mut next_dimension = || {
        fields
            .next()
            .and_then(|field| field.parse::<usize>().ok())
            .ok_or(FormatError::BadDimensionLine)
    };
    let width = next_dimension()?;
    let height = next_dimension()?;

    // The encoder trims to even dimensions, so anything else is corruption.
    if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
        return Err(FormatError::BadDimensions { width, height });
    }

    Ok((width, height))
}

fn read_words(reader: &mut ByteReader, expected: usize) -> Result<Vec<u32>, FormatError> {
    // Check against the actual input length before trusting the header's
    // dimensions with an allocation.
    let available = reader.number_of_bytes_left() / super::WORD_BYTES;
    if available < expected {
        return Err(FormatError::Truncated {
            expected,
            found: available,
        });
    }

    let mut words = Vec::with_capacity(expected);
    for _ in 0..expected {
        let word = reader.read_u32_be().ok_or(FormatError::Truncated {
            expected,
            found: words.len(),
        })?;
        words.push(word);
    }

    Ok(words)
}

/// Every word unpacks, dequantizes, and inverse-transforms independently
/// into one 2x2 tile of component-video pixels.
fn unpack_blocks(words: &[u32], width: usize, height: usize) -> BlockedGrid<YPbPr> {
    let blocks: Vec<_> = words
        .par_iter()
        .map(|&word| dequantize(&unpack_word(word)).to_block())
        .collect();

    let mut component = BlockedGrid::defaulted(width, height, BLOCK_SIZE);
    for (tile, block) in component.tiles_mut().zip(blocks) {
        tile[..PIXELS_PER_BLOCK].copy_from_slice(&block.0);
    }

    component
}

fn to_rgb_image(component: &BlockedGrid<YPbPr>) -> Image {
    let pixels = RowMajorGrid::from_fn(component.width(), component.height(), |col, row| {
        let reconstructed = FloatRgb::from(*component.get(col, row));
        reconstructed.to_scaled(OUTPUT_DENOMINATOR)
    });

    Image::new(
        component.width(),
        component.height(),
        OUTPUT_DENOMINATOR,
        pixels,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_header(body: &[u8]) -> Vec<u8> {
        let mut bytes = b"COMP40 Compressed image format 2\n2 2\n".to_vec();
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn rejects_bad_magic() {
        assert!(matches!(
            decompress(b"COMP39 Compressed image format 2\n2 2\n\x00\x00\x00\x00"),
            Err(FormatError::BadMagic)
        ));
    }

    #[test]
    fn rejects_non_numeric_dimensions() {
        assert!(matches!(
            decompress(b"COMP40 Compressed image format 2\ntwo 2\n"),
            Err(FormatError::BadDimensionLine)
        ));
    }

    #[test]
    fn rejects_zero_and_odd_dimensions() {
        assert!(matches!(
            decompress(b"COMP40 Compressed image format 2\n0 2\n"),
            Err(FormatError::BadDimensions { .. })
        ));
        assert!(matches!(
            decompress(b"COMP40 Compressed image format 2\n3 2\n"),
            Err(FormatError::BadDimensions { .. })
        ));
    }

    #[test]
    fn rejects_truncated_body() {
        assert!(matches!(
            decompress(&with_header(b"\x00\x00")),
            Err(FormatError::Truncated {
                expected: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn oversized_header_dimensions_fail_without_allocating() {
        assert!(matches!(
            decompress(b"COMP40 Compressed image format 2\n2000000000 2000000000\n"),
            Err(FormatError::Truncated { found: 0, .. })
        ));
    }

    #[test]
    fn decodes_a_single_block() {
        let image = decompress(&with_header(&[0, 0, 0, 0])).unwrap();
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.denominator, OUTPUT_DENOMINATOR);
    }

    #[test]
    fn word_bytes_constant_matches_serialized_size() {
        let bytes = with_header(&[1, 2, 3, 4]);
        assert_eq!(bytes.len() - 37, super::super::WORD_BYTES);
        assert!(decompress(&bytes).is_ok());
    }
}
