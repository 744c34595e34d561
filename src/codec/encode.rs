//! The compress pipeline: trim to even dimensions, normalize, convert to
//! component video, transform each 2x2 block, quantize, pack, serialize.
//! Every stage is a full pass producing a fresh buffer; blocks carry no
//! cross-block state, so the per-block stage runs data-parallel.

use rayon::prelude::*;
use tracing::debug;

use crate::bitpack::Overflow;
use crate::colors::{FloatRgb, YPbPr};
use crate::grid::{BlockedGrid, Grid2};
use crate::image::Image;
use crate::quantization::quantize;
use crate::transform::{Block, BLOCK_SIZE, PIXELS_PER_BLOCK};

use super::{pack_word, HEADER_MAGIC};

pub fn compress(image: &Image) -> Result<Vec<u8>, Overflow> {
    let trimmed = image.trimmed_to_even();
    let component = to_component_video(&trimmed);
    let words = pack_blocks(&component)?;

    debug!(
        width = trimmed.width,
        height = trimmed.height,
        words = words.len(),
        "compressed image"
    );

    Ok(serialize(trimmed.width, trimmed.height, &words))
}

/// Normalizes every pixel by the denominator and converts it to YPbPr,
/// stored block-tiled so each 2x2 block is one contiguous tile.
fn to_component_video(image: &Image) -> BlockedGrid<YPbPr> {
    BlockedGrid::from_fn(image.width, image.height, BLOCK_SIZE, |col, row| {
        let normalized = FloatRgb::from_scaled(*image.pixels.get(col, row), image.denominator);
        YPbPr::from(normalized)
    })
}

/// Transforms, quantizes, and packs every block independently.
fn pack_blocks(component: &BlockedGrid<YPbPr>) -> Result<Vec<u32>, Overflow> {
    component
        .tiles()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|tile| {
            let pixels: [YPbPr; PIXELS_PER_BLOCK] = (*tile).try_into().unwrap();
            pack_word(&quantize(&Block(pixels).to_coefficients()))
        })
        .collect()
}

fn serialize(width: usize, height: usize, words: &[u32]) -> Vec<u8> {
    let mut bytes = format!("{HEADER_MAGIC}\n{width} {height}\n").into_bytes();
    bytes.reserve(words.len() * super::WORD_BYTES);

    for word in words {
        bytes.extend_from_slice(&word.to_be_bytes());
    }

    bytes
}
