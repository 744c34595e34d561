//! A lossy raster-image codec for the "COMP40 Compressed image format 2"
//! stream: RGB pixels are converted to component video, decorrelated per
//! 2x2 block, quantized to small integer codes, and bitpacked into one
//! 32-bit big-endian word per block.

pub mod algebra;
pub mod binary;
pub mod bitpack;
pub mod codec;
pub mod colors;
pub mod grid;
pub mod image;
pub mod ppm;
pub mod quantization;
pub mod transform;
